//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for an application.
///
/// Binary names use hyphens while tracing targets use the crate path, so
/// `lingo-server` becomes `lingo_server`.
pub fn default_directive(app_name: &str, level: &str) -> String {
    let target = app_name.replace('-', "_");
    format!("{target}={level},tower_http={level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default directive. Calling this more
/// than once (e.g. from several integration tests) is harmless.
pub fn setup_logger(app_name: &str, level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(app_name, level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
