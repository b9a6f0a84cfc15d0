use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Set to `json` to emit one JSON object per log event.
pub const LOG_FORMAT_ENV: &str = "CREDCTL_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise quiet mode shows warnings and errors
/// only, and verbose mode shows info events. Logs go to stderr so stdout stays
/// free for command output.
pub fn init_logging(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A second init (tests, embedding) keeps the first subscriber.
    if let Err(e) = result {
        tracing::debug!(event = "core.logging.init_skipped", error = %e);
    }
}

fn default_directive(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}
