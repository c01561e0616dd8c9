use std::fmt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextaLogOption {
    API,
    Relay,
    Provider,
    Client,
    Batch,
    Csv,
}

impl fmt::Display for TextaLogOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextaLogOption::API => "api",
            TextaLogOption::Relay => "relay",
            TextaLogOption::Provider => "provider",
            TextaLogOption::Client => "client",
            TextaLogOption::Batch => "batch",
            TextaLogOption::Csv => "csv",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextaLogLevel {
    Error,
    Info,
    Debug,
}

/// Emits `message` as a tracing event tagged with the component it came from.
pub fn texta_log(option: TextaLogOption, level: TextaLogLevel, message: &str) {
    match level {
        TextaLogLevel::Error => tracing::error!(option = %option, "{}", message),
        TextaLogLevel::Info => tracing::info!(option = %option, "{}", message),
        TextaLogLevel::Debug => tracing::debug!(option = %option, "{}", message),
    }
}

/// Installs the fmt subscriber, honoring `RUST_LOG` (default `info`).
/// Calling it twice is harmless, which keeps tests free to call it.
pub fn init_default_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
