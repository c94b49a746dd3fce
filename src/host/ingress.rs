use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::warn;

use crate::api::{
    answer_query, ApiError, Command, CommandResponse, DeckRevealDto, Query, QueryResponse,
};
use crate::domain::{ClientId, SlotIndex};
use crate::state::{SessionSnapshot, StateAggregate};

const LOG_TARGET: &str = "blackjack_engine::host::ingress";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Актор стола остановлен")]
    Closed,

    #[error("Актор стола не ответил на запрос")]
    NoReply,

    #[error("Команда отклонена: {}", .0.message)]
    Rejected(ApiError),

    #[error("Неожиданный ответ на команду {0}")]
    UnexpectedResponse(&'static str),
}

/// Уведомление об изменении состояния: какие агрегаты поменялись + полный снапшот.
///
/// Снапшот полный, поэтому наблюдатель может применять уведомления идемпотентно
/// и пропускать отставшие.
#[derive(Clone, Debug)]
pub struct StateChanged {
    pub aggregates: Vec<StateAggregate>,
    pub snapshot: Arc<SessionSnapshot>,
}

/// Сообщения актору стола.
pub enum Message {
    Command {
        command: Command,
        response: oneshot::Sender<CommandResponse>,
    },
    /// Сработал таймер авто-рестарта с этим поколением.
    Restart { generation: u64 },
    Shutdown {
        response: oneshot::Sender<()>,
    },
}

/// Хэндл стола: отправка команд актору и чтение опубликованного состояния.
///
/// Клонируется свободно; каждый наблюдатель держит свой клон.
#[derive(Clone)]
pub struct TableHandle {
    sender: mpsc::Sender<Message>,
    snapshots: watch::Receiver<Arc<SessionSnapshot>>,
    changes: broadcast::Sender<StateChanged>,
}

impl TableHandle {
    pub(super) fn new(
        sender: mpsc::Sender<Message>,
        snapshots: watch::Receiver<Arc<SessionSnapshot>>,
        changes: broadcast::Sender<StateChanged>,
    ) -> Self {
        Self {
            sender,
            snapshots,
            changes,
        }
    }

    /// Отправить команду и дождаться ответа (в том числе `Rejected`).
    pub async fn execute(&self, command: Command) -> Result<CommandResponse, HostError> {
        let (response, receiver) = oneshot::channel();
        let name = command.name();
        if self
            .sender
            .send(Message::Command { command, response })
            .await
            .is_err()
        {
            warn!(target: LOG_TARGET, command = name, "table mailbox closed; command dropped");
            return Err(HostError::Closed);
        }
        receiver.await.map_err(|_| HostError::NoReply)
    }

    /// То же, что `execute`, но отказ превращается в `HostError::Rejected`.
    pub async fn request(&self, command: Command) -> Result<CommandResponse, HostError> {
        match self.execute(command).await? {
            CommandResponse::Rejected { reason } => Err(HostError::Rejected(reason)),
            other => Ok(other),
        }
    }

    pub async fn join(&self, client_id: ClientId) -> Result<SlotIndex, HostError> {
        match self.request(Command::Join { client_id }).await? {
            CommandResponse::Joined { slot, .. } => Ok(slot),
            _ => Err(HostError::UnexpectedResponse("join")),
        }
    }

    /// Запустить раунд. Возвращает номер раунда.
    pub async fn start_round(&self, client_id: ClientId) -> Result<u64, HostError> {
        match self.request(Command::StartRound { client_id }).await? {
            CommandResponse::RoundStarted { round, .. } => Ok(round),
            _ => Err(HostError::UnexpectedResponse("start_round")),
        }
    }

    pub async fn hit(&self, client_id: ClientId) -> Result<CommandResponse, HostError> {
        self.request(Command::Hit { client_id }).await
    }

    pub async fn stand(&self, client_id: ClientId) -> Result<CommandResponse, HostError> {
        self.request(Command::Stand { client_id }).await
    }

    pub async fn purchase_upgrade(&self, client_id: ClientId) -> Result<CommandResponse, HostError> {
        self.request(Command::PurchaseUpgrade { client_id }).await
    }

    pub async fn purchase_power(
        &self,
        client_id: ClientId,
        effect_id: u32,
    ) -> Result<CommandResponse, HostError> {
        self.request(Command::PurchasePower {
            client_id,
            effect_id,
        })
        .await
    }

    /// Колода запросившего. Ответ получает только он (через свой oneshot).
    pub async fn reveal_deck(&self, client_id: ClientId) -> Result<DeckRevealDto, HostError> {
        match self.request(Command::RevealDeck { client_id }).await? {
            CommandResponse::DeckRevealed(deck) => Ok(deck),
            _ => Err(HostError::UnexpectedResponse("reveal_deck")),
        }
    }

    /// Последний опубликованный снапшот (без обращения к актору).
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Ответ на read-only запрос по последнему снапшоту.
    pub fn query(&self, query: &Query) -> QueryResponse {
        answer_query(&self.snapshot(), query)
    }

    /// Подписка на уведомления об изменениях.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChanged> {
        self.changes.subscribe()
    }

    /// Канал последнего снапшота (удобно ждать `changed()`).
    pub fn watch(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.snapshots.clone()
    }

    /// Остановить актор. Отложенный рестарт отменяется.
    pub async fn shutdown(&self) -> Result<(), HostError> {
        let (response, receiver) = oneshot::channel();
        if self
            .sender
            .send(Message::Shutdown { response })
            .await
            .is_err()
        {
            return Err(HostError::Closed);
        }
        receiver.await.map_err(|_| HostError::NoReply)
    }
}
