use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Максимум карт в руке. Это же ограничение зашито в wire-формат.
pub const MAX_HAND_CARDS: usize = 32;

/// Рука участника: карты в порядке вытягивания.
///
/// Порядок важен: "натуральный" блэкджек — это ровно две карты.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: Vec<Card>,
}

/// Попытка положить карту в заполненную руку.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandFull;

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(4),
        }
    }

    /// Собрать руку из готовых карт (лишние сверх `MAX_HAND_CARDS` отбрасываются).
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Hand::new();
        for card in cards {
            if hand.add(card).is_err() {
                break;
            }
        }
        hand
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Добавить карту в конец. При переполнении рука не меняется.
    pub fn add(&mut self, card: Card) -> Result<(), HandFull> {
        if self.is_full() {
            return Err(HandFull);
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= MAX_HAND_CARDS
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Стабильный хэш руки, не зависящий от процесса:
    /// h = 17; для каждого поля каждой карты h = h * 31 + поле.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 17;
        for card in &self.cards {
            for field in [
                u64::from(card.kind.as_byte()),
                u64::from(card.rank),
                u64::from(card.suit),
                u64::from(card.effect_id),
            ] {
                h = h.wrapping_mul(31).wrapping_add(field);
            }
        }
        h
    }
}
