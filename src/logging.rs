//! Logging setup.
//!
//! Filtering follows the `RUST_LOG` environment variable when it is set;
//! otherwise only this crate's spans are emitted, at the configured
//! level.

use tracing_subscriber::EnvFilter;

/// Level applied when neither `RUST_LOG` nor a configured level exists.
const DEFAULT_LEVEL: &str = "info";

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shell_probe={level}")))
}

/// Initialize logging.
///
/// # Panics
///
/// Panics if another tracing subscriber has already been set.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(DEFAULT_LEVEL))
        .compact()
        .init();
}

/// Initialize logging, reporting failure instead of panicking when a
/// subscriber is already installed.
pub fn try_init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    try_init_with_filter(DEFAULT_LEVEL)
}

/// Initialize logging at an explicit level for this crate, still letting
/// `RUST_LOG` win when set.
///
/// Used by the binary so a configured log level takes effect without
/// touching the process environment.
pub fn try_init_with_filter(
    level: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .compact()
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_does_not_panic() {
        // Whichever test initializes first wins; later attempts fail
        // gracefully instead of panicking.
        let _ = try_init();
        assert!(try_init().is_err() || try_init_with_filter("debug").is_err());
    }

    #[test]
    fn test_emit_after_init() {
        let _ = try_init();

        tracing::info!("test info message");
        tracing::debug!("test debug message");
    }
}
