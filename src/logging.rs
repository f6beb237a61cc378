//! Tracing subscriber setup
//!
//! `RUST_LOG` always wins. Without it, `--verbose` turns on debug output for
//! this crate and everything else stays at warnings.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging(verbose: bool) {
    let level = if verbose { "fundwise=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // try_init: a second call (e.g. from tests) is not an error
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(filter)
        .try_init();
}
