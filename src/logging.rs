//! Log output for the command-line binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a verbosity level: 0 = warn, 1 = info, 2 = debug, 3+ = trace
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "citegraph=warn",
        1 => "citegraph=info",
        2 => "citegraph=debug",
        _ => "citegraph=trace",
    }
}

/// Initialize the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this twice is a no-op.
pub fn init_tracing(verbosity: u8) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
