use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing. Call once at service startup.
/// JSON output by default (env-filter via `RUST_LOG`); compact human-readable
/// output when `debug` is set.
///
/// Safe to call multiple times — subsequent calls are silently ignored.
pub fn init_tracing(debug: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if debug {
        let _ = registry.with(fmt::layer().compact()).try_init();
    } else {
        let _ = registry.with(fmt::layer().json()).try_init();
    }
}
