use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Hand;
use crate::domain::ClientId;

/// Что участник сделал в текущем раунде.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionState {
    /// Ещё ходит.
    #[default]
    None,
    /// Сказал stand.
    Stood,
    /// Перебрал (> 21).
    Busted,
}

impl ActionState {
    /// Раунд для участника закончен (stand или bust).
    pub fn is_resolved(self) -> bool {
        !matches!(self, ActionState::None)
    }
}

/// Слот участника за столом.
///
/// Слоты создаются в порядке join, никогда не переупорядочиваются и не удаляются:
/// выбывание — это `hit_points == 0`, а не удаление слота.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantSlot {
    /// Непрозрачный id подключения.
    pub client_id: ClientId,
    pub hand: Hand,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub chips: Chips,
    pub action: ActionState,
}

impl ParticipantSlot {
    pub fn new(client_id: ClientId, starting_hp: u32) -> Self {
        Self {
            client_id,
            hand: Hand::new(),
            hit_points: starting_hp,
            max_hit_points: starting_hp,
            chips: Chips::ZERO,
            action: ActionState::None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Может ли слот получить ход: жив и ещё не закончил раунд.
    pub fn can_take_turn(&self) -> bool {
        self.is_alive() && !self.action.is_resolved()
    }

    /// Урон с полом в 0. Возвращает фактически снятые HP.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let dealt = damage.min(self.hit_points);
        self.hit_points -= dealt;
        dealt
    }

    pub fn restore_full_hp(&mut self) {
        self.hit_points = self.max_hit_points;
    }
}
