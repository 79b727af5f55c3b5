//! Process-wide `tracing` setup for the quiz server.
//!
//! `RUST_LOG` wins when it is set and parses. Otherwise the server logs at
//! the given default level, with the quiz crates raised to their own level.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
};

/// Log targets of the workspace crates.
pub const QUIZ_TARGETS: [&str; 4] = ["api", "quiz_session", "question_store", "ai_llm_service"];

/// UTC timestamps with millisecond precision, e.g. `2025-09-12T10:20:30.123Z`.
#[derive(Clone, Copy, Debug, Default)]
struct UtcMillis;

impl FormatTime for UtcMillis {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        w.write_str(&now)
    }
}

/// Compact one-line events with target and span-close timings.
pub fn fmt_layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(UtcMillis)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .compact()
}

/// Builds the filter from an explicit `RUST_LOG` value.
pub fn filter_from(rust_log: Option<&str>, default: &str, quiz_level: Level) -> EnvFilter {
    if let Some(filter) = rust_log.and_then(|v| EnvFilter::try_new(v).ok()) {
        return filter;
    }

    let level = quiz_level.as_str().to_lowercase();
    QUIZ_TARGETS
        .iter()
        .filter_map(|target| format!("{target}={level}").parse::<Directive>().ok())
        .fold(EnvFilter::new(default), EnvFilter::add_directive)
}

/// Installs the global subscriber.
///
/// # Errors
/// Fails if a global subscriber is already set.
pub fn init(default: &str, quiz_level: Level) -> Result<(), TryInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(filter_from(rust_log.as_deref(), default, quiz_level))
        .with(fmt_layer())
        .try_init()
}
