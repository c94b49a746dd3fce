use crate::domain::table::Phase;
use crate::domain::{Chips, ClientId, SlotIndex};

use thiserror::Error;

/// Причины отказа в запросе. Любая ошибка гарантирует: состояние сессии не изменилось.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Клиент {0} не сидит за столом")]
    NotJoined(ClientId),

    #[error("Клиент {0} не является хостом")]
    NotHost(ClientId),

    #[error("Стол заполнен: максимум {0} участников")]
    TableFull(usize),

    #[error("Недостаточно участников для раунда")]
    NotEnoughPlayers,

    #[error("Недопустимо в фазе {0:?}")]
    WrongPhase(Phase),

    #[error("Сейчас не ход клиента {client_id} (ходит слот {current})")]
    NotYourTurn { client_id: ClientId, current: SlotIndex },

    #[error("Недостаточно фишек: нужно {needed:?}, есть {available:?}")]
    InsufficientChips { needed: Chips, available: Chips },

    #[error("Рука слота {0} заполнена")]
    HandFull(SlotIndex),

    #[error("Слот {0} не существует")]
    UnknownSlot(SlotIndex),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
