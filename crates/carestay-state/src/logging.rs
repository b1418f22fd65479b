//! Structured logging initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// `RUST_LOG` overrides `level` when set. Only the first call installs a
/// subscriber; later calls (or a subscriber installed by the embedding
/// application) are left alone.
///
/// # Example
///
/// ```rust,no_run
/// use carestay_state::logging::init_logging;
///
/// init_logging("debug", false);
/// ```
pub fn init_logging(level: &str, json_format: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("carestay_api={level},carestay_state={level},warn").into()
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .try_init()
    } else {
        registry.with(fmt::layer().pretty()).try_init()
    };

    if installed.is_ok() {
        tracing::info!(
            level = %level,
            format = if json_format { "json" } else { "pretty" },
            "Logging initialized"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging("debug", true);
        init_logging("info", false);
    }
}
