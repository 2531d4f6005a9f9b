//! Tracing setup for the binary.

use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `VKBIND_LOG=vkbind_registry=trace`.
pub const LOG_ENV: &str = "VKBIND_LOG";

/// Install the global subscriber. `VKBIND_LOG` wins when set; otherwise the
/// level is `warn`, or `debug` with `verbose`.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let layer = HierarchicalLayer::new(2)
        .with_targets(true)
        .with_bracketed_fields(true);
    if tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
