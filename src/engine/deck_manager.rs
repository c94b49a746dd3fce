use tracing::debug;

use crate::domain::{Card, Deck, SlotIndex};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

const LOG_TARGET: &str = "blackjack_engine::engine::deck_manager";

/// Колоды всех участников: индекс вектора = SlotIndex.
///
/// Колоды живут только на хосте и в реплицируемое состояние не попадают;
/// посмотреть свою колоду участник может через reveal_deck.
#[derive(Clone, Debug, Default)]
pub struct DeckManager {
    decks: Vec<Deck>,
}

impl DeckManager {
    pub fn new() -> Self {
        Self { decks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Завести колоду для нового слота: 1..=13, перемешанная.
    /// Возвращает индекс слота, которому она принадлежит.
    pub fn add_deck<R: RandomSource>(&mut self, rng: &mut R) -> SlotIndex {
        let mut deck = Deck::ordinary_set();
        rng.shuffle(&mut deck.cards);
        self.decks.push(deck);
        self.decks.len() - 1
    }

    pub fn deck(&self, slot: SlotIndex) -> Option<&Deck> {
        self.decks.get(slot)
    }

    /// Вытянуть случайную карту из колоды слота.
    ///
    /// Пустая колода сначала пополняется набором 1..=13 и перемешивается,
    /// так что вытягивание никогда не падает.
    pub fn draw<R: RandomSource>(&mut self, slot: SlotIndex, rng: &mut R) -> Result<Card, EngineError> {
        let deck = self
            .decks
            .get_mut(slot)
            .ok_or(EngineError::UnknownSlot(slot))?;

        if deck.is_empty() {
            debug!(target: LOG_TARGET, slot, "deck exhausted, refilling ordinary set");
            deck.push_ordinary_set();
            rng.shuffle(&mut deck.cards);
        }

        let index = rng.pick_index(deck.len());
        let card = deck
            .take_at(index)
            .ok_or(EngineError::Internal("RNG picked an index outside the deck"))?;

        debug!(target: LOG_TARGET, slot, %card, left = deck.len(), "card drawn");
        Ok(card)
    }

    /// Сброс колоды к новому раунду: power-карты остаются, обычные заменяются свежим набором.
    pub fn reset<R: RandomSource>(&mut self, slot: SlotIndex, rng: &mut R) -> Result<(), EngineError> {
        let deck = self
            .decks
            .get_mut(slot)
            .ok_or(EngineError::UnknownSlot(slot))?;
        deck.reset_keeping_specials();
        rng.shuffle(&mut deck.cards);
        Ok(())
    }

    pub fn add_special(&mut self, slot: SlotIndex, effect_id: u32) -> Result<(), EngineError> {
        let deck = self
            .decks
            .get_mut(slot)
            .ok_or(EngineError::UnknownSlot(slot))?;
        deck.add_special(effect_id);
        Ok(())
    }

    /// Копия содержимого колоды (для reveal_deck).
    pub fn snapshot(&self, slot: SlotIndex) -> Result<Vec<Card>, EngineError> {
        self.decks
            .get(slot)
            .map(|d| d.cards.clone())
            .ok_or(EngineError::UnknownSlot(slot))
    }
}
