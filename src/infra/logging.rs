use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Фильтр по умолчанию, если `RUST_LOG` не задан.
pub const DEFAULT_FILTER: &str = "info";

/// Поставить глобальный fmt-subscriber с фильтром из `RUST_LOG`.
///
/// Повторный вызов ничего не делает (subscriber уже установлен).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_level(true))
        .try_init();
}
