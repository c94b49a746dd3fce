//! Движок сессии: колоды участников, очередь ходов, разрешение раунда.
//!
//! Высокоуровневый объект: `TableSession`
//! Основные операции:
//!   - `join` – посадить клиента за стол
//!   - `start_round` – сбросить колоды и раздать по 2 карты
//!   - `hit` / `stand` – ход текущего участника
//!   - `purchase_upgrade` / `purchase_power` – покупки за фишки
//!   - `reveal_deck` – показать участнику его колоду

pub mod actions;
pub mod deck_manager;
pub mod effects;
pub mod errors;
pub mod game_loop;
pub mod history;
pub mod resolution;
pub mod turn_order;
pub mod validation;

pub use actions::{HitResult, JoinOutcome, RoundResolution, TurnOutcome};
pub use deck_manager::DeckManager;
pub use effects::{EffectContext, EffectRegistry, PowerEffect};
pub use errors::EngineError;
pub use game_loop::{PowerCardReceipt, TableSession, UpgradeReceipt, INITIAL_DEAL};
pub use history::{SessionEvent, SessionEventKind, SessionHistory};
pub use resolution::{DamageDealt, RoundEnd, RoundSummary};
pub use turn_order::TurnScheduler;

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртка над `rand`), тесты подставляют свои.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерный индекс в `0..len`. Вызывается только с `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}
