//! Разрешение раунда: победитель, урон, награда, выбывания.
//!
//! `compute_round` ничего не мутирует и детерминирован при фиксированных руках;
//! `apply_round` применяет посчитанный результат к слотам.

use serde::{Deserialize, Serialize};

use crate::domain::table::{RulesConfig, WinnerMark};
use crate::domain::{Chips, ParticipantSlot, SlotIndex};
use crate::eval::{hand_value, is_natural, BLACKJACK};

/// Урон, нанесённый одному проигравшему.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DamageDealt {
    pub slot: SlotIndex,
    /// Очки проигравшего для расчёта урона (перебор = 0).
    pub loser_value: u32,
    /// Урон по формуле (до пола в 0 HP).
    pub damage: u32,
    pub hit_points_after: u32,
}

/// Итог одного раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub winner: WinnerMark,
    /// Максимальные очки среди допустимых рук (None — все перебрали/выбыли).
    pub winning_value: Option<u32>,
    /// Победитель взял натуральный блэкджек.
    pub natural: bool,
    pub damages: Vec<DamageDealt>,
    pub reward: Option<(SlotIndex, Chips)>,
}

/// Что делать после раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEnd {
    /// Живых больше одного — следующий раунд по таймеру.
    Continue { alive: usize },
    /// Живых <= 1 — конец игры. Победитель — последний живой (или никто).
    GameOver { winner: WinnerMark },
}

/// Посчитать исход раунда по текущим рукам (без мутаций).
pub fn compute_round(slots: &[ParticipantSlot], rules: &RulesConfig) -> RoundSummary {
    // 1. Максимум среди живых и не перебравших.
    let mut best: Option<(SlotIndex, u32)> = None;
    let mut tie = false;

    for (idx, slot) in slots.iter().enumerate() {
        if !slot.is_alive() {
            continue;
        }
        let v = hand_value(&slot.hand);
        if v > BLACKJACK {
            continue;
        }
        match best {
            None => best = Some((idx, v)),
            Some((_, max)) if v > max => {
                best = Some((idx, v));
                tie = false;
            }
            Some((_, max)) if v == max => tie = true,
            Some(_) => {}
        }
    }

    // 2. Никого — нет победителя.
    let Some((winner_idx, winner_value)) = best else {
        return RoundSummary {
            winner: WinnerMark::NoWinner,
            winning_value: None,
            natural: false,
            damages: Vec::new(),
            reward: None,
        };
    };

    // 3. Ничья на максимуме — без урона и награды.
    if tie {
        return RoundSummary {
            winner: WinnerMark::Tie,
            winning_value: Some(winner_value),
            natural: false,
            damages: Vec::new(),
            reward: None,
        };
    }

    // 4. Единственный победитель.
    let natural = is_natural(&slots[winner_idx].hand);
    let bonus = if natural { rules.natural_bonus } else { 0 };

    let damages = slots
        .iter()
        .enumerate()
        .filter(|(idx, slot)| *idx != winner_idx && slot.is_alive())
        .map(|(idx, slot)| {
            let raw = hand_value(&slot.hand);
            let loser_value = if raw > BLACKJACK { 0 } else { raw };
            let damage = winner_value.saturating_sub(loser_value).saturating_add(bonus);
            DamageDealt {
                slot: idx,
                loser_value,
                damage,
                hit_points_after: slot.hit_points.saturating_sub(damage),
            }
        })
        .collect();

    RoundSummary {
        winner: WinnerMark::Slot(winner_idx),
        winning_value: Some(winner_value),
        natural,
        damages,
        reward: Some((winner_idx, rules.win_reward)),
    }
}

/// Применить итог раунда к слотам: награда победителю, урон проигравшим.
pub fn apply_round(slots: &mut [ParticipantSlot], summary: &RoundSummary) {
    if let Some((idx, amount)) = summary.reward {
        if let Some(slot) = slots.get_mut(idx) {
            slot.chips += amount;
        }
    }
    for d in &summary.damages {
        if let Some(slot) = slots.get_mut(d.slot) {
            slot.take_damage(d.damage);
        }
    }
}

/// Проверка после урона: продолжаем или конец игры.
pub fn round_end(slots: &[ParticipantSlot]) -> RoundEnd {
    let alive: Vec<SlotIndex> = slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_alive())
        .map(|(i, _)| i)
        .collect();

    if alive.len() > 1 {
        RoundEnd::Continue { alive: alive.len() }
    } else {
        let winner = alive
            .last()
            .copied()
            .map(WinnerMark::Slot)
            .unwrap_or(WinnerMark::NoWinner);
        RoundEnd::GameOver { winner }
    }
}
