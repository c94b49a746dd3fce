use serde::{Deserialize, Serialize};

use crate::domain::ClientId;

/// Команда к хосту стола.
///
/// Каждая команда несёт id отправителя: хост проверяет по нему
/// членство, очередь хода и права (start_round — только хост).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Сесть за стол (повторный join — no-op).
    Join { client_id: ClientId },

    /// Запустить раунд. Принимается только от хоста.
    StartRound { client_id: ClientId },

    /// Взять карту.
    Hit { client_id: ClientId },

    /// Остановиться.
    Stand { client_id: ClientId },

    /// Купить +max HP за фишки.
    PurchaseUpgrade { client_id: ClientId },

    /// Купить power-карту в свою колоду.
    PurchasePower { client_id: ClientId, effect_id: u32 },

    /// Посмотреть свою колоду. Ответ уходит только отправителю.
    RevealDeck { client_id: ClientId },
}

impl Command {
    pub fn client_id(&self) -> ClientId {
        match self {
            Command::Join { client_id }
            | Command::StartRound { client_id }
            | Command::Hit { client_id }
            | Command::Stand { client_id }
            | Command::PurchaseUpgrade { client_id }
            | Command::PurchasePower { client_id, .. }
            | Command::RevealDeck { client_id } => *client_id,
        }
    }

    /// Короткое имя для логов.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Join { .. } => "join",
            Command::StartRound { .. } => "start_round",
            Command::Hit { .. } => "hit",
            Command::Stand { .. } => "stand",
            Command::PurchaseUpgrade { .. } => "purchase_upgrade",
            Command::PurchasePower { .. } => "purchase_power",
            Command::RevealDeck { .. } => "reveal_deck",
        }
    }
}
