//! Реплицируемое состояние сессии.
//!
//! Мутирует только хост (через `engine::game_loop::TableSession`), остальные
//! видят опубликованные снапшоты. Колоды сюда не входят: они приватны для хоста.

use serde::{Deserialize, Serialize};

use crate::domain::table::{Phase, WinnerMark};
use crate::domain::{ClientId, ParticipantSlot, SlotIndex};
use crate::engine::resolution::RoundSummary;
use crate::engine::turn_order::TurnScheduler;

/// Какая часть состояния изменилась. По этим ключам наблюдатели решают, что перерисовать.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateAggregate {
    Participants,
    Hands,
    HitPoints,
    ActionStates,
    Chips,
    Phase,
    TurnIndex,
    Winner,
}

/// Глобальное состояние стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    /// Слоты в порядке join.
    pub participants: Vec<ParticipantSlot>,
    pub phase: Phase,
    pub turn: TurnScheduler,
    /// Победитель последнего раунда или игры (после GameOver).
    pub winner: WinnerMark,
    /// Номер текущего раунда (0 — ещё не было ни одного).
    pub round: u64,
    /// Разбор последнего раунда для UI (урон, награда).
    pub last_round: Option<RoundSummary>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_turn(&self) -> SlotIndex {
        self.turn.current
    }

    pub fn slot_of(&self, client_id: ClientId) -> Option<SlotIndex> {
        self.participants
            .iter()
            .position(|p| p.client_id == client_id)
    }

    pub fn participant(&self, slot: SlotIndex) -> Option<&ParticipantSlot> {
        self.participants.get(slot)
    }

    pub fn alive_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_alive()).count()
    }

    /// Может ли этот клиент сейчас жать hit/stand.
    pub fn can_act(&self, client_id: ClientId) -> bool {
        self.phase == Phase::PlayerTurn
            && self.slot_of(client_id) == Some(self.turn.current)
    }

    /// Сравнить с более новым состоянием и вернуть изменившиеся агрегаты.
    pub fn changed_aggregates(&self, newer: &SessionState) -> Vec<StateAggregate> {
        let mut changed = Vec::new();

        let ids = |s: &SessionState| -> Vec<ClientId> {
            s.participants.iter().map(|p| p.client_id).collect()
        };
        if ids(self) != ids(newer) {
            changed.push(StateAggregate::Participants);
        }

        let (old, new) = (&self.participants, &newer.participants);
        if any_slot_differs(old, new, |a, b| a.hand != b.hand) {
            changed.push(StateAggregate::Hands);
        }
        if any_slot_differs(old, new, |a, b| {
            a.hit_points != b.hit_points || a.max_hit_points != b.max_hit_points
        }) {
            changed.push(StateAggregate::HitPoints);
        }
        if any_slot_differs(old, new, |a, b| a.action != b.action) {
            changed.push(StateAggregate::ActionStates);
        }
        if any_slot_differs(old, new, |a, b| a.chips != b.chips) {
            changed.push(StateAggregate::Chips);
        }

        if self.phase != newer.phase {
            changed.push(StateAggregate::Phase);
        }
        if self.turn != newer.turn {
            changed.push(StateAggregate::TurnIndex);
        }
        if self.winner != newer.winner || self.last_round != newer.last_round {
            changed.push(StateAggregate::Winner);
        }

        changed
    }
}

fn any_slot_differs(
    old: &[ParticipantSlot],
    new: &[ParticipantSlot],
    differs: impl Fn(&ParticipantSlot, &ParticipantSlot) -> bool,
) -> bool {
    old.len() != new.len() || old.iter().zip(new.iter()).any(|(a, b)| differs(a, b))
}

/// Опубликованный снапшот: состояние + монотонная версия.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub version: u64,
    pub state: SessionState,
}
