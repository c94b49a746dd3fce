//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации для движка;
//! - конфигурация из окружения / JSON;
//! - установка tracing-subscriber.

pub mod rng;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

pub use rng::*;

#[cfg(not(target_arch = "wasm32"))]
pub use config::{ConfigError, SessionConfig};
#[cfg(not(target_arch = "wasm32"))]
pub use logging::init_tracing;
