//! Command-line surface of the `todo` binary.

use clap::{Parser, Subcommand};
use todo_core::ClientConfig;

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Terminal client for the todo service")]
pub struct Cli {
    /// Hostname the client runs as; `localhost` talks to the dev backend
    #[arg(long, env = "TODO_HOST", global = true)]
    pub host: Option<String>,

    /// Origin a relative API path is resolved against
    #[arg(long, env = "TODO_ORIGIN", global = true)]
    pub origin: Option<String>,

    /// Full collection URL; takes precedence over --host
    #[arg(long, env = "TODO_API_URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List todos
    List {
        /// Only completed todos
        #[arg(long)]
        completed: bool,
    },
    /// Create a todo
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Flip a todo's completion flag
    Toggle { id: i64 },
    /// Delete a todo
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show operation counters
    Stats,
    /// Zero the operation counters
    ResetStats {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check backend health
    Health,
    /// Show everything, then keep polling the counters
    Watch,
    /// Print the todo list as HTML
    Render {
        #[arg(long)]
        completed: bool,
    },
}

impl Cli {
    /// Settings from the environment (poll interval included) with the
    /// command-line values applied on top.
    pub fn config(&self) -> ClientConfig {
        self.config_with(ClientConfig::from_env())
    }

    /// An explicit API URL always wins; `--host` only picks the base URL
    /// when no URL was given.
    pub fn config_with(&self, mut config: ClientConfig) -> ClientConfig {
        match (&self.api_url, &self.host) {
            (Some(url), _) => config = config.with_api_url(url),
            (None, Some(host)) => config.base_url = ClientConfig::for_host(host).base_url,
            (None, None) => {}
        }
        if let Some(origin) = &self.origin {
            config = config.with_origin(origin);
        }
        config
    }

    /// Confirmation prompts are skipped for `--yes`.
    pub fn assume_yes(&self) -> bool {
        matches!(
            self.command,
            Command::Delete { yes: true, .. } | Command::ResetStats { yes: true }
        )
    }
}
