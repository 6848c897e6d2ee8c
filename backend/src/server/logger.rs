use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GlobalConfig;

fn level(log_level: usize) -> Level {
    match log_level {
        0 => Level::TRACE,
        1 => Level::DEBUG,
        2 => Level::INFO,
        3 => Level::WARN,
        4 => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize tracing-subscriber and route panic through `tracing`
pub fn init(config: &GlobalConfig) {
    init_panic_hook();

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::from_level(level(
            config.log_level,
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    std::panic::set_hook(Box::new(|panic| {
        if let Some(location) = panic.location() {
            tracing::error!(
                message = %panic,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic);
        }
    }));
}
