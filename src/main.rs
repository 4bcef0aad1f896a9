//! Reminders helper for SketchyBar.
//!
//! Usage:
//!   reminder-count count            print the number of due or overdue incomplete reminders
//!   reminder-count list             print a JSON array of due or overdue reminders
//!   reminder-count complete <id>    mark a reminder as complete
//!
//! Every invocation prints exactly one line to stdout and exits normally.

mod command;
mod config;
mod error;
mod reminders;

use clap::error::ErrorKind;
use clap::Parser;
use color_eyre::Result;

use command::Command;
use config::Config;
use error::ReminderError;

#[derive(Parser)]
#[command(name = "reminder-count")]
#[command(about = "Count, list and complete due reminders", long_about = None)]
#[command(version)]
struct Cli {
    /// count, list or complete (default: count)
    command: Option<String>,

    /// Reminder identifier for `complete`
    argument: Option<String>,

    #[arg(hide = true)]
    #[allow(dead_code)]
    rest: Vec<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            log::debug!("Argument parsing failed: {}", err);
            let given = std::env::args_os()
                .nth(1)
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("{}", ReminderError::UnknownCommand(given).line());
            return Ok(());
        }
    };

    let line = match Command::parse(cli.command.as_deref(), cli.argument.as_deref()) {
        Ok(command) => {
            log::debug!("Running {:?}", command);
            let config = Config::load();
            execute(&command, &config)
        }
        Err(err) => err.line(),
    };

    println!("{}", line);
    Ok(())
}

#[cfg(target_os = "macos")]
fn execute(command: &Command, config: &Config) -> String {
    match reminders::EventKitStore::new(config.lists.clone()) {
        Ok(store) => command::authorize_and_run(&store, command, config),
        Err(err) => format!("error: {}", err),
    }
}

#[cfg(not(target_os = "macos"))]
fn execute(_command: &Command, _config: &Config) -> String {
    ReminderError::Unavailable.line()
}
