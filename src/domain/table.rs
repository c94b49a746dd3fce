use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Индекс слота участника (0..N-1, в порядке join).
pub type SlotIndex = usize;

/// Глобальная фаза сессии.
///
/// `Waiting → PlayerTurn → RoundOver → PlayerTurn → ... → GameOver`.
/// Раздача (Dealing) происходит внутри `start_round` и наружу не видна.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Waiting,
    PlayerTurn,
    RoundOver,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::PlayerTurn => "player_turn",
            Phase::RoundOver => "round_over",
            Phase::GameOver => "game_over",
        }
    }

    /// Можно ли из этой фазы запустить новый раунд.
    pub fn accepts_start_round(&self) -> bool {
        !matches!(self, Phase::PlayerTurn)
    }
}

/// Кто выиграл раунд / игру.
///
/// На проводе кодируется sentinel-числом: `-1` нет победителя, `-2` ничья,
/// `0..N-1` индекс слота.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WinnerMark {
    #[default]
    NoWinner,
    Tie,
    Slot(SlotIndex),
}

impl WinnerMark {
    pub fn as_sentinel(&self) -> i32 {
        match self {
            WinnerMark::NoWinner => -1,
            WinnerMark::Tie => -2,
            WinnerMark::Slot(i) => *i as i32,
        }
    }

    pub fn from_sentinel(v: i32) -> Option<Self> {
        match v {
            -1 => Some(WinnerMark::NoWinner),
            -2 => Some(WinnerMark::Tie),
            i if i >= 0 => Some(WinnerMark::Slot(i as SlotIndex)),
            _ => None,
        }
    }

    pub fn slot(&self) -> Option<SlotIndex> {
        match self {
            WinnerMark::Slot(i) => Some(*i),
            _ => None,
        }
    }
}

/// Правила стола: HP, награды, цены магазина и т.д.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    /// Стартовые (и максимальные) HP нового участника.
    pub starting_hp: u32,
    /// Сколько фишек получает победитель раунда.
    pub win_reward: Chips,
    /// Бонус урона за натуральный блэкджек (21 двумя картами).
    pub natural_bonus: u32,
    /// Цена апгрейда max HP.
    pub upgrade_cost: Chips,
    /// На сколько апгрейд поднимает max HP.
    pub upgrade_hp_bonus: u32,
    /// Лечить ли до нового максимума после апгрейда.
    pub heal_on_upgrade: bool,
    /// Цена power-карты.
    pub power_card_cost: Chips,
    /// Максимальное число участников за столом.
    pub max_participants: usize,
    /// Bust сразу завершает раунд, не дожидаясь остальных.
    pub bust_ends_round: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_hp: 30,
            win_reward: Chips(10),
            natural_bonus: 5,
            upgrade_cost: Chips(10),
            upgrade_hp_bonus: 5,
            heal_on_upgrade: true,
            power_card_cost: Chips(15),
            max_participants: 8,
            bust_ends_round: true,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.starting_hp == 0 {
            return Err("RulesConfig: starting_hp = 0".into());
        }
        if self.max_participants < 2 {
            return Err("RulesConfig: max_participants < 2".into());
        }
        Ok(())
    }
}
