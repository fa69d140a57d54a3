// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Shared plumbing for the shadermorph command-line tools.

mod pipeline;

pub use pipeline::{Rewritten, ToolError, make_in_bounds_file, make_in_bounds_source};

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info` everywhere and `debug` for the tools themselves.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shadermorph_tools=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
