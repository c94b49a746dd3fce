use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{execute, Command, CommandResponse};
use crate::domain::table::Phase;
use crate::domain::ClientId;
use crate::engine::{EffectRegistry, RandomSource, TableSession};
use crate::infra::SessionConfig;
use crate::state::{SessionSnapshot, SessionState};

use super::ingress::{Message, StateChanged, TableHandle};
use super::restart::RestartTimer;

const LOG_TARGET: &str = "blackjack_engine::host::actor";

/// Сколько уведомлений держит broadcast-канал до того, как медленный
/// подписчик начнёт получать `Lagged`.
pub const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Актор стола: единственный писатель состояния.
///
/// Забирает сообщения из mpsc-очереди по одному, применяет их к `TableSession`
/// и публикует новый снапшот (watch) + уведомление (broadcast).
pub struct Actor<R: RandomSource> {
    session: TableSession<R>,
    restart_delay: Duration,
    mailbox: mpsc::Receiver<Message>,
    self_sender: mpsc::WeakSender<Message>,
    snapshots: watch::Sender<Arc<SessionSnapshot>>,
    changes: broadcast::Sender<StateChanged>,
    restart: RestartTimer,
    version: u64,
}

impl<R: RandomSource + Send + 'static> Actor<R> {
    pub fn new(
        config: &SessionConfig,
        host: ClientId,
        rng: R,
        effects: EffectRegistry,
    ) -> (Self, TableHandle) {
        let (sender, mailbox) = mpsc::channel(config.mailbox_capacity.max(1));
        let session = TableSession::new(host, config.rules.clone(), rng).with_effects(effects);

        let initial = Arc::new(SessionSnapshot {
            version: 0,
            state: session.state.clone(),
        });
        let (snapshots, snapshots_rx) = watch::channel(initial);
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        let handle = TableHandle::new(sender.clone(), snapshots_rx, changes.clone());
        let actor = Self {
            session,
            restart_delay: config.restart_delay(),
            mailbox,
            self_sender: sender.downgrade(),
            snapshots,
            changes,
            restart: RestartTimer::new(),
            version: 0,
        };
        (actor, handle)
    }

    /// Запустить актор в текущем tokio runtime.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        info!(target: LOG_TARGET, host = self.session.host, "table actor started");

        while let Some(message) = self.mailbox.recv().await {
            match message {
                Message::Command { command, response } => {
                    let reply = self.handle_command(command);
                    // Клиент мог уйти, не дождавшись ответа.
                    let _ = response.send(reply);
                }
                Message::Restart { generation } => self.handle_restart(generation),
                Message::Shutdown { response } => {
                    self.restart.cancel();
                    let _ = response.send(());
                    info!(target: LOG_TARGET, "table actor shut down");
                    return;
                }
            }
        }

        self.restart.cancel();
        info!(target: LOG_TARGET, "all table handles dropped, actor exiting");
    }

    fn handle_command(&mut self, command: Command) -> CommandResponse {
        let before = self.session.state.clone();
        let reply = execute(&mut self.session, command);
        self.after_mutation(&before);
        reply
    }

    fn handle_restart(&mut self, generation: u64) {
        if !self.restart.fire(generation) {
            debug!(target: LOG_TARGET, generation, "stale restart ignored");
            return;
        }
        if self.session.state.phase != Phase::RoundOver {
            debug!(
                target: LOG_TARGET,
                phase = self.session.state.phase.as_str(),
                "restart skipped, round no longer over"
            );
            return;
        }

        info!(target: LOG_TARGET, round = self.session.state.round, "auto-restarting round");
        let host = self.session.host;
        let before = self.session.state.clone();
        let _ = execute(&mut self.session, Command::StartRound { client_id: host });
        self.after_mutation(&before);
    }

    /// Опубликовать изменения и поправить таймер рестарта по новой фазе.
    fn after_mutation(&mut self, before: &SessionState) {
        let after = &self.session.state;

        if after.phase == Phase::RoundOver && before.phase != Phase::RoundOver {
            self.restart
                .schedule(self.restart_delay, self.self_sender.clone());
        } else if after.phase != Phase::RoundOver && self.restart.is_pending() {
            self.restart.cancel();
        }

        let aggregates = before.changed_aggregates(after);
        if aggregates.is_empty() {
            return;
        }

        self.version += 1;
        let snapshot = Arc::new(SessionSnapshot {
            version: self.version,
            state: after.clone(),
        });
        self.snapshots.send_replace(snapshot.clone());
        // Нет подписчиков — не ошибка.
        let _ = self.changes.send(StateChanged {
            aggregates,
            snapshot,
        });
        debug!(target: LOG_TARGET, version = self.version, "state published");
    }
}

/// Поднять актор стола и вернуть хэндл к нему.
pub fn spawn_table<R: RandomSource + Send + 'static>(
    config: &SessionConfig,
    host: ClientId,
    rng: R,
    effects: EffectRegistry,
) -> (TableHandle, JoinHandle<()>) {
    let (actor, handle) = Actor::new(config, host, rng, effects);
    (handle, actor.start())
}
