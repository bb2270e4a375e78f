//! Command line definition

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use triage::LegacyDirection;

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Support mailbox statistics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a period's messages, print the report and update the open list
    Run(RunArgs),
    /// Convert an open inquiry list between the legacy and current formats
    Convert(ConvertArgs),
}

/// How review decisions are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Prompt,
    Yes,
    No,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON list of the period's messages
    #[arg(long)]
    pub messages: PathBuf,
    /// JSON list of the messages currently in the inbox
    #[arg(long)]
    pub inbox: PathBuf,
    /// Gmail labels.list response; message files are then read as Gmail
    /// metadata responses
    #[arg(long)]
    pub labels: Option<PathBuf>,
    /// Classifier configuration (default: classifier.json in the config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Run settings (default: run.json in the config directory)
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Open inquiry list (default: open.txt in the config directory)
    #[arg(long)]
    pub open: Option<PathBuf>,
    /// Count every thread that needs review
    #[arg(long, conflicts_with = "no")]
    pub yes: bool,
    /// Count no thread that needs review
    #[arg(long)]
    pub no: bool,
    /// Do not write the open inquiry list
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn answer(&self) -> Answer {
        match (self.yes, self.no) {
            (true, _) => Answer::Yes,
            (_, true) => Answer::No,
            _ => Answer::Prompt,
        }
    }
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("direction").required(true).args(["from_mbox", "to_mbox"])))]
pub struct ConvertArgs {
    /// Open inquiry list to rewrite in place
    #[arg(long)]
    pub open: PathBuf,
    /// Legacy four-line decimal records to the current format
    #[arg(long)]
    pub from_mbox: bool,
    /// Current format back to legacy records
    #[arg(long)]
    pub to_mbox: bool,
}

impl ConvertArgs {
    pub fn direction(&self) -> LegacyDirection {
        if self.from_mbox {
            LegacyDirection::FromMbox
        } else {
            LegacyDirection::ToMbox
        }
    }
}
