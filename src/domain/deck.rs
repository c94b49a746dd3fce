use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, CardKind, ACE, KING};

/// Колода одного участника. В домене — просто список карт.
/// Перемешивание и случайный выбор делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Свежий набор обычных карт: по одной каждого ранга 1..=13, масть 0.
    pub fn ordinary_set() -> Self {
        let mut deck = Deck {
            cards: Vec::with_capacity(KING as usize),
        };
        deck.push_ordinary_set();
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Дописать в колоду 13 обычных карт.
    pub fn push_ordinary_set(&mut self) {
        for rank in ACE..=KING {
            self.cards.push(Card::ordinary(rank, 0));
        }
    }

    /// Сброс к раунду: обычные карты выкидываем, power-карты оставляем,
    /// затем добавляем свежий набор 1..=13.
    pub fn reset_keeping_specials(&mut self) {
        self.cards.retain(|c| c.kind == CardKind::Special);
        self.push_ordinary_set();
    }

    /// Взять карту по индексу (индекс выбирает RNG снаружи).
    pub fn take_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn add_special(&mut self, effect_id: u32) {
        self.cards.push(Card::special(effect_id));
    }

    pub fn specials(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_special())
    }
}
