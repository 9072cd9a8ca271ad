//! Tracing subscriber setup for the binary

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Build the env filter, honouring `RUST_LOG` and the verbosity flag
#[must_use]
pub fn env_filter(verbose: u8) -> EnvFilter {
    let fallback = match verbose {
        0 => DEFAULT_FILTER,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a stderr subscriber; JSON lines when `json` is set
///
/// Calling twice is harmless: the second install is ignored.
pub fn init(verbose: u8, json: bool) {
    let builder = fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
