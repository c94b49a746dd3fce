//! Внешний API сессии стола.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние (join, раунд, ходы, покупки);
//! - запросы (queries.rs) — только чтение по снапшоту;
//! - DTO (dto.rs) — удобные структуры для клиента;
//! - ошибки (errors.rs) — то, что видит клиент при отказе;
//! - handlers.rs — применение команды к `TableSession`;
//! - graphql.rs — read-only схема для наблюдателей (не wasm).

pub mod commands;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod queries;

#[cfg(not(target_arch = "wasm32"))]
pub mod graphql;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use handlers::execute;
pub use queries::*;
