//! Command implementations

use anyhow::{Context, Result};
use log::info;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use triage::gmail::{self, api::GmailMessage, api::ListLabelsResponse};
use triage::{
    AlwaysCount, Classifier, ClassifierConfig, ConsolePrompt, Decide, FileInquiryStore,
    InquiryStore, LegacyDirection, Message, NeverCount, RawMessage, Registry, RunSettings,
    StatsReport, ThreadId, fold_threads, rules,
};

use crate::args::{Answer, RunArgs};

/// Open inquiry list filename in the shared config directory
const OPEN_FILE: &str = "open.txt";

pub fn run(args: RunArgs) -> Result<()> {
    let config = ClassifierConfig::load(args.config.as_deref())?;
    let settings = RunSettings::load(args.settings.as_deref())?;
    let open_path = match args.open.clone() {
        Some(path) => path,
        None => config::config_path(OPEN_FILE).context("Could not determine config directory")?,
    };

    let label_map = match &args.labels {
        Some(path) => Some(gmail::label_names(config::load_json_file::<ListLabelsResponse>(
            path,
        )?)),
        None => None,
    };
    let period = load_messages(&args.messages, label_map.as_ref())?;
    let inbox = load_messages(&args.inbox, label_map.as_ref())?;

    let mut decider = decider(args.answer());

    // Spam and the ideas list never count toward statistics
    let counted = period
        .iter()
        .map(Message::from_raw)
        .filter(|m| !rules::is_spam(m, &config) && !rules::is_idea(m, &config));

    let mut classifier = Classifier::new(
        &config,
        &settings.stat_labels,
        settings.cutoff_instant(),
        decider.as_mut(),
    );
    if let Some(members) = &settings.member_labels {
        classifier = classifier.with_members(members);
    }
    let threads = fold_threads(counted, &mut classifier)?;

    let report = StatsReport::from_threads(&threads);
    println!("{}", serde_json::to_string_pretty(&report)?);

    let new_open =
        Registry::from_current_inbox(&inbox, &settings.stat_labels, &config, decider.as_mut())?;
    let inbox_ids: HashSet<ThreadId> = inbox
        .iter()
        .map(|raw| ThreadId::new(raw.thread_id.clone().unwrap_or_default()))
        .collect();

    let store = FileInquiryStore::new(open_path);
    let previous = store
        .load()
        .with_context(|| format!("Failed to load {}", store.path().display()))?;
    let update = previous.update(new_open, &inbox_ids);

    println!(
        "Open inquiries: {} still open, {} closed since last run, {} now open",
        update.still_open,
        update.closed,
        update.registry.len()
    );

    if args.dry_run {
        info!("Dry run, not writing {}", store.path().display());
    } else {
        store
            .save(&update.registry)
            .with_context(|| format!("Failed to write {}", store.path().display()))?;
    }
    Ok(())
}

pub fn convert(open: PathBuf, direction: LegacyDirection) -> Result<()> {
    triage::convert_legacy_file(&open, direction)
        .with_context(|| format!("Failed to convert {}", open.display()))
}

fn decider(answer: Answer) -> Box<dyn Decide> {
    match answer {
        Answer::Prompt => Box::new(ConsolePrompt::stdio()),
        Answer::Yes => Box::new(AlwaysCount),
        Answer::No => Box::new(NeverCount),
    }
}

/// Read a message file, either raw records or Gmail metadata responses
fn load_messages(
    path: &Path,
    label_map: Option<&HashMap<String, String>>,
) -> Result<Vec<RawMessage>> {
    let messages = match label_map {
        Some(labels) => config::load_json_file::<Vec<GmailMessage>>(path)?
            .into_iter()
            .map(|m| gmail::normalize_message(m, labels))
            .collect(),
        None => config::load_json_file::<Vec<RawMessage>>(path)?,
    };
    info!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(messages)
}
