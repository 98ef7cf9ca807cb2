//! Terminal host for `todo-core`: executes requests with ureq and renders
//! UI signals as lines of text (or an HTML fragment).

pub mod args;
pub mod terminal;
pub mod transport;

use std::error::Error;
use std::io;

use tracing_subscriber::EnvFilter;

pub use args::{Cli, Command};
pub use terminal::{ListFormat, TerminalUi};
pub use transport::UreqTransport;

/// Install the fmt subscriber on stderr (`RUST_LOG`, default `warn`), which
/// also forwards the core's `log` records. Fails if a global subscriber or
/// logger is already set.
pub fn init_logging() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init()
}
