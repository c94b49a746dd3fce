use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantSlot, SlotIndex};

/// Найти следующий слот, который может ходить, по кругу начиная с `current + 1`.
///
/// Сам `current` проверяется последним, так что единственный оставшийся
/// участник сохраняет ход. `None` — ходить некому, раунд пора разрешать.
pub fn next_eligible_slot(slots: &[ParticipantSlot], current: SlotIndex) -> Option<SlotIndex> {
    let n = slots.len();
    if n == 0 {
        return None;
    }

    (1..=n)
        .map(|offset| (current + offset) % n)
        .find(|&idx| slots[idx].can_take_turn())
}

/// Первый слот, который может ходить, начиная с 0.
pub fn first_eligible_slot(slots: &[ParticipantSlot]) -> Option<SlotIndex> {
    slots.iter().position(|s| s.can_take_turn())
}

/// Все живые слоты уже сказали stand или перебрали.
pub fn all_alive_resolved(slots: &[ParticipantSlot]) -> bool {
    slots.iter().all(|s| !s.can_take_turn())
}

/// Планировщик ходов: хранит только индекс текущего слота.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnScheduler {
    pub current: SlotIndex,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self { current: 0 }
    }

    /// Начало раунда: ход у первого живого слота (обычно 0).
    pub fn reset(&mut self, slots: &[ParticipantSlot]) -> Option<SlotIndex> {
        let first = first_eligible_slot(slots)?;
        self.current = first;
        Some(first)
    }

    /// Передать ход дальше. Если подходящего слота нет, индекс не меняется.
    pub fn advance(&mut self, slots: &[ParticipantSlot]) -> Option<SlotIndex> {
        let next = next_eligible_slot(slots, self.current)?;
        self.current = next;
        Some(next)
    }

    pub fn is_turn_of(&self, slot: SlotIndex) -> bool {
        self.current == slot
    }
}
