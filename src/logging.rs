//! Logging Setup
//!
//! tracing subscriber driven by the `[logging]` config section. `RUST_LOG`
//! takes precedence when set. Output goes to stderr so command output on
//! stdout stays clean.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is unset
pub fn default_directive(config: &LoggingConfig) -> String {
    format!("qpu_console={},tower_http={}", config.level, config.level)
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };
        assert_eq!(default_directive(&config), "qpu_console=debug,tower_http=debug");
    }
}
