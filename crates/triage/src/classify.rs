//! Classification context and thread folding

use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

use crate::config::ClassifierConfig;
use crate::decision::Decide;
use crate::error::DecisionError;
use crate::models::{Message, Thread, ThreadId};
use crate::rules::ReviewReason;

/// Everything a [`Thread`] needs while it evaluates messages: the mailbox
/// configuration, the reference label sets, the cutoff and the strategy used
/// for manual count decisions.
pub struct Classifier<'a> {
    config: &'a ClassifierConfig,
    stat_labels: &'a BTreeSet<String>,
    member_labels: Option<&'a BTreeSet<String>>,
    cutoff: Option<DateTime<Utc>>,
    decider: &'a mut dyn Decide,
}

impl<'a> Classifier<'a> {
    pub fn new(
        config: &'a ClassifierConfig,
        stat_labels: &'a BTreeSet<String>,
        cutoff: DateTime<Utc>,
        decider: &'a mut dyn Decide,
    ) -> Self {
        Self {
            config,
            stat_labels,
            member_labels: None,
            cutoff: Some(cutoff),
            decider,
        }
    }

    /// A classifier for which every dated message passes the cutoff
    pub fn without_cutoff(
        config: &'a ClassifierConfig,
        stat_labels: &'a BTreeSet<String>,
        decider: &'a mut dyn Decide,
    ) -> Self {
        Self {
            config,
            stat_labels,
            member_labels: None,
            cutoff: None,
            decider,
        }
    }

    /// Also collect member organization labels
    pub fn with_members(mut self, member_labels: &'a BTreeSet<String>) -> Self {
        self.member_labels = Some(member_labels);
        self
    }

    pub fn config(&self) -> &'a ClassifierConfig {
        self.config
    }

    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.cutoff
    }

    /// A message without a date never fails the cutoff
    pub fn passes_cutoff(&self, date: Option<DateTime<Utc>>) -> bool {
        match (self.cutoff, date) {
            (Some(cutoff), Some(date)) => date >= cutoff,
            _ => true,
        }
    }

    pub fn extract_labels(&self, message: &Message) -> (BTreeSet<String>, BTreeSet<String>) {
        message.extract_labels(self.stat_labels, self.member_labels)
    }

    pub fn decide(
        &mut self,
        message: &Message,
        reason: ReviewReason,
    ) -> Result<bool, DecisionError> {
        self.decider.should_count(message, reason)
    }
}

/// Fold messages into threads in arrival order.
///
/// The first message seen for a thread id starts the thread; later ones are
/// added to it. Threads are returned in the order they were first seen.
pub fn fold_threads<I>(
    messages: I,
    classifier: &mut Classifier<'_>,
) -> Result<Vec<Thread>, DecisionError>
where
    I: IntoIterator<Item = Message>,
{
    let mut index: HashMap<ThreadId, usize> = HashMap::new();
    let mut threads: Vec<Thread> = Vec::new();

    for message in messages {
        match index.get(&message.thread_id) {
            Some(&position) => threads[position].add_message(message, classifier)?,
            None => {
                debug!("Starting thread {}", message.thread_id);
                index.insert(message.thread_id.clone(), threads.len());
                threads.push(Thread::new(message, classifier)?);
            }
        }
    }

    info!("Folded messages into {} threads", threads.len());
    Ok(threads)
}
