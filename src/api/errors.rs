use serde::{Deserialize, Serialize};

use crate::domain::table::Phase;
use crate::domain::{Chips, ClientId, SlotIndex};
use crate::engine::EngineError;

/// Машиночитаемая причина отказа (клиент по ней решает, что показать).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RejectReason {
    NotJoined { client_id: ClientId },
    NotHost { client_id: ClientId },
    TableFull { max_participants: usize },
    NotEnoughPlayers,
    WrongPhase { phase: Phase },
    NotYourTurn { current: SlotIndex },
    InsufficientChips { needed: Chips, available: Chips },
    HandFull { slot: SlotIndex },
    Internal,
}

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub reason: RejectReason,
    /// Человекочитаемое сообщение движка.
    pub message: String,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let reason = match &err {
            EngineError::NotJoined(client_id) => RejectReason::NotJoined {
                client_id: *client_id,
            },
            EngineError::NotHost(client_id) => RejectReason::NotHost {
                client_id: *client_id,
            },
            EngineError::TableFull(max) => RejectReason::TableFull {
                max_participants: *max,
            },
            EngineError::NotEnoughPlayers => RejectReason::NotEnoughPlayers,
            EngineError::WrongPhase(phase) => RejectReason::WrongPhase { phase: *phase },
            EngineError::NotYourTurn { current, .. } => RejectReason::NotYourTurn {
                current: *current,
            },
            EngineError::InsufficientChips { needed, available } => {
                RejectReason::InsufficientChips {
                    needed: *needed,
                    available: *available,
                }
            }
            EngineError::HandFull(slot) => RejectReason::HandFull { slot: *slot },
            EngineError::UnknownSlot(_) | EngineError::Internal(_) => RejectReason::Internal,
        };

        ApiError {
            reason,
            message: err.to_string(),
        }
    }
}
