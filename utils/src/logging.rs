//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber.
///
/// Respects the `RUST_LOG` environment variable for filtering; falls back to
/// `info` when unset. `json = true` emits one JSON object per line for log
/// shippers.
pub fn init_tracing(json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
