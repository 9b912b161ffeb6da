//! tracing setup. Diagnostics go to stderr so they never mix with the
//! rendered dashboards on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins; otherwise `-v` flags, otherwise the configured level.
pub fn init(verbosity: u8, configured: &str) {
    let level = match verbosity {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("rtracker={level}")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (tests calling run() twice) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
