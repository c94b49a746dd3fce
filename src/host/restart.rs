use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ingress::Message;

const LOG_TARGET: &str = "blackjack_engine::host::restart";

/// Отложенный авто-рестарт раунда.
///
/// Одновременно запланирован максимум один рестарт. Поколение защищает от
/// сообщения, которое успело попасть в очередь до отмены.
#[derive(Debug, Default)]
pub struct RestartTimer {
    pending: Option<PendingRestart>,
    next_generation: u64,
}

#[derive(Debug)]
struct PendingRestart {
    generation: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RestartTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Запланировать рестарт через `delay`. Предыдущий (если был) отменяется.
    pub fn schedule(&mut self, delay: Duration, mailbox: mpsc::WeakSender<Message>) -> u64 {
        self.cancel();

        self.next_generation += 1;
        let generation = self.next_generation;
        let cancel = CancellationToken::new();
        let child = cancel.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(sender) = mailbox.upgrade() {
                        let _ = sender.send(Message::Restart { generation }).await;
                    }
                }
            }
        });

        debug!(target: LOG_TARGET, generation, delay_ms = delay.as_millis() as u64, "restart scheduled");
        self.pending = Some(PendingRestart {
            generation,
            cancel,
            handle,
        });
        generation
    }

    /// Отменить запланированный рестарт (если есть).
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            pending.handle.abort();
            debug!(target: LOG_TARGET, generation = pending.generation, "restart cancelled");
        }
    }

    /// Таймер сработал. `true`, если это актуальный рестарт (и он снимается).
    pub fn fire(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(p) if p.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for RestartTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
