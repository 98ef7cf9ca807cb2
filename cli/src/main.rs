//! `todo`: terminal client for the todo service.

use std::error::Error;
use std::io;

use clap::Parser;
use todo_cli::{Cli, Command, ListFormat, TerminalUi, UreqTransport};
use todo_core::TodoApp;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    todo_cli::init_logging()?;

    let cli = Cli::parse();
    let config = cli.config();
    log::debug!("using {config:?}");

    let format = match cli.command {
        Command::Render { .. } => ListFormat::Html,
        _ => ListFormat::Text,
    };
    let ui = TerminalUi::new(io::stdout(), io::stdin().lock(), format, cli.assume_yes());
    let transport = UreqTransport::new(config.origin.clone());
    let mut app = TodoApp::new(config.client(), transport, ui);

    match cli.command {
        Command::List { completed } | Command::Render { completed } => {
            if completed {
                app.load_completed();
            } else {
                app.load_todos();
            }
        }
        Command::Add { title, description } => app.add_todo(&title, &description),
        Command::Toggle { id } => app.toggle_todo(id),
        Command::Delete { id, .. } => app.delete_todo(id),
        Command::Stats => app.load_stats(),
        Command::ResetStats { .. } => app.reset_stats(),
        Command::Health => app.check_health(),
        Command::Watch => {
            app.start();
            loop {
                std::thread::sleep(config.poll_interval);
                app.load_stats();
            }
        }
    }
    Ok(())
}
