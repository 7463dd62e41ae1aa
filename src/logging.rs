use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber: RUST_LOG-driven filtering
/// (default `info`), human-readable output on a terminal, JSON lines when
/// stdout is piped to a log collector.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if std::io::stdout().is_terminal() {
        builder.init();
    } else {
        builder.json().with_ansi(false).init();
    }
}
