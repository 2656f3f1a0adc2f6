//! Tracing subscriber setup.
//!
//! Logs go to stderr so command output on stdout stays machine-readable. `RUST_LOG` overrides
//! the default filter.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "sitesnap=info,tower_http=info";

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber, plain or JSON.
pub fn init(json: bool) {
    let registry = tracing_subscriber::registry().with(filter());
    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()
    };
    if let Err(e) = installed {
        eprintln!("warning: logging unavailable: {e}");
    }
}
