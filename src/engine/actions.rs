use serde::{Deserialize, Serialize};

use crate::domain::{Card, SlotIndex};
use crate::engine::resolution::{RoundEnd, RoundSummary};

/// Что произошло после принятого hit/stand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Ход перешёл к следующему слоту.
    NextTurn { slot: SlotIndex },
    /// Раунд разрешён.
    RoundResolved(RoundResolution),
}

/// Разрешённый раунд + что дальше (таймер или конец игры).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResolution {
    pub summary: RoundSummary,
    pub end: RoundEnd,
}

impl RoundResolution {
    /// Нужно ли хосту запланировать авто-рестарт.
    pub fn needs_restart(&self) -> bool {
        matches!(self.end, RoundEnd::Continue { .. })
    }
}

/// Результат hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HitResult {
    pub slot: SlotIndex,
    pub card: Card,
    pub value: u32,
    pub busted: bool,
    pub outcome: TurnOutcome,
}

/// Результат join.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(SlotIndex),
    /// Клиент уже сидел за столом — повторный join ничего не меняет.
    AlreadyJoined(SlotIndex),
}

impl JoinOutcome {
    pub fn slot(&self) -> SlotIndex {
        match self {
            JoinOutcome::Joined(s) | JoinOutcome::AlreadyJoined(s) => *s,
        }
    }
}
