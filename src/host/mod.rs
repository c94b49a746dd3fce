//! Хост стола: актор-единственный писатель, очередь команд и публикация снапшотов.

pub mod actor;
pub mod ingress;
pub mod restart;

pub use actor::{spawn_table, Actor, CHANGE_CHANNEL_CAPACITY};
pub use ingress::{HostError, Message, StateChanged, TableHandle};
pub use restart::RestartTimer;
