//! Tracing setup for applications embedding the tree.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global stderr subscriber, filtered by `RUST_LOG` and
/// defaulting to `info`. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logging() {
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .compact();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .event_format(format)
        .try_init();
}
