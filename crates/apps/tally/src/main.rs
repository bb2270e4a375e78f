//! Tally - support mailbox statistics
//!
//! Classifies pre-fetched support mailbox messages, prints the category
//! report and keeps the open inquiry list up to date between runs.

use clap::Parser;
use log::error;

mod args;
mod commands;

use args::{Cli, Command};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let result = match cli.command {
        Command::Run(run) => commands::run(run),
        Command::Convert(convert) => {
            let direction = convert.direction();
            commands::convert(convert.open, direction)
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
