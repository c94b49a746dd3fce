use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::WinnerMark;
use crate::domain::{ClientId, SlotIndex};
use crate::engine::resolution::RoundSummary;

/// Тип события в сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SessionEventKind {
    /// Новый участник сел за стол.
    Joined { client_id: ClientId, slot: SlotIndex },

    /// Раунд начат, всем розданы по 2 карты.
    RoundStarted { round: u64 },

    /// Участник вытянул карту (раздача или hit).
    CardDrawn { slot: SlotIndex, card: Card },

    /// Участник сказал stand.
    Stood { slot: SlotIndex, value: u32 },

    /// Участник перебрал.
    Busted { slot: SlotIndex, value: u32 },

    /// Раунд разрешён.
    RoundResolved { round: u64, summary: RoundSummary },

    /// Игра окончена.
    GameOver { winner: WinnerMark },

    /// Куплен апгрейд max HP.
    UpgradePurchased {
        slot: SlotIndex,
        cost: Chips,
        max_hit_points: u32,
    },

    /// Куплена power-карта.
    PowerCardPurchased {
        slot: SlotIndex,
        cost: Chips,
        effect_id: u32,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionEvent {
    pub index: u64,
    pub kind: SessionEventKind,
}

/// Журнал сессии. Держит не больше `capacity` последних событий.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionHistory {
    pub events: VecDeque<SessionEvent>,
    next_index: u64,
    capacity: usize,
}

impl SessionHistory {
    pub const DEFAULT_CAPACITY: usize = 512;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            next_index: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, kind: SessionEventKind) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(SessionEvent {
            index: self.next_index,
            kind,
        });
        self.next_index += 1;
    }

    /// Сколько событий записано за всё время (включая вытесненные).
    pub fn total_recorded(&self) -> u64 {
        self.next_index
    }

    pub fn last(&self) -> Option<&SessionEvent> {
        self.events.back()
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}
