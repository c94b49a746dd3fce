//! Главный модуль приложения PvP-блэкджека на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! связываем модули движка, API и хоста стола.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;

#[cfg(not(target_arch = "wasm32"))]
pub mod host;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BlackjackOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera. Пока не нужны.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BlackjackMessage {}

/// Запросы к сервису (read-only).
pub type BlackjackQuery = Query;

/// Ответы на запросы.
pub type BlackjackResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct BlackjackAbi;

impl ContractAbi for BlackjackAbi {
    type Operation = BlackjackOperation;
    type Response = ();
}

impl ServiceAbi for BlackjackAbi {
    type Query = BlackjackQuery;
    type QueryResponse = BlackjackResponse;
}
