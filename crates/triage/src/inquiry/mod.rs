//! Open-inquiry registry
//!
//! Tracks which support threads are still awaiting resolution across
//! statistics runs. Each run derives the currently open threads from the
//! inbox, reconciles them with the registry persisted by the previous run and
//! persists the result.

mod format;

pub use format::{LegacyDirection, convert_legacy, read_open, write_open};

use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::classify::Classifier;
use crate::config::ClassifierConfig;
use crate::decision::Decide;
use crate::error::DecisionError;
use crate::models::{Message, OpenInquiry, RawMessage, Thread, ThreadId};
use crate::rules;

/// Open inquiries keyed by thread id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    inquiries: BTreeMap<ThreadId, OpenInquiry>,
}

/// Result of reconciling a registry with the current inbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryUpdate {
    /// Previously open inquiries that are still in the inbox
    pub still_open: usize,
    /// Previously open inquiries that left the inbox since the last run
    pub closed: usize,
    /// Reconciled registry including this run's open inquiries
    pub registry: Registry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an inquiry, replacing any inquiry with the same id
    pub fn insert(&mut self, inquiry: OpenInquiry) -> Option<OpenInquiry> {
        self.inquiries.insert(inquiry.id.clone(), inquiry)
    }

    pub fn get(&self, id: &ThreadId) -> Option<&OpenInquiry> {
        self.inquiries.get(id)
    }

    pub fn contains(&self, id: &ThreadId) -> bool {
        self.inquiries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inquiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inquiries.is_empty()
    }

    /// Inquiries in thread id order
    pub fn iter(&self) -> impl Iterator<Item = &OpenInquiry> {
        self.inquiries.values()
    }

    /// Derive the open inquiries from the messages currently in the inbox.
    ///
    /// Messages are folded into threads without a cutoff; once a thread stops
    /// counting, its further messages are only checked for open markers.
    /// Threads that were not reviewed during classification but contain a
    /// support or internal message are always put to `decider`, whatever the
    /// configured force switches say.
    pub fn from_current_inbox(
        inbox: &[RawMessage],
        stat_labels: &BTreeSet<String>,
        config: &ClassifierConfig,
        decider: &mut dyn Decide,
    ) -> Result<Self, DecisionError> {
        let mut classifier = Classifier::without_cutoff(config, stat_labels, decider);
        let mut index: HashMap<ThreadId, usize> = HashMap::new();
        let mut threads: Vec<Thread> = Vec::new();

        for raw in inbox {
            let message = Message::from_raw(raw);

            let position = match index.get(&message.thread_id) {
                Some(&position) => {
                    if threads[position].is_good() {
                        threads[position].add_message(message.clone(), &mut classifier)?;
                    }
                    position
                }
                None => {
                    index.insert(message.thread_id.clone(), threads.len());
                    threads.push(Thread::new(message.clone(), &mut classifier)?);
                    threads.len() - 1
                }
            };

            let thread = &mut threads[position];
            if !thread.is_checked()
                && let Some(reason) = rules::inbox_review_reason(&message, config)
            {
                thread.should_it_count(&message, reason, true, &mut classifier)?;
            }
            // Repeats add_message's check, but also covers messages of a
            // thread that no longer takes them
            thread.mark_open_if_labeled(&message, &classifier);
        }

        let registry: Registry = threads
            .iter()
            .filter(|thread| thread.is_good() && !thread.is_closed())
            .map(|thread| OpenInquiry::new(thread.id().clone(), thread.subject()))
            .collect();

        info!(
            "Found {} open inquiries in {} inbox threads",
            registry.len(),
            threads.len()
        );
        Ok(registry)
    }

    /// Reconcile with the current inbox and merge in this run's inquiries.
    ///
    /// Inquiries whose thread is no longer in `inbox` are considered closed
    /// and dropped. Entries of `new_open` replace existing entries with the
    /// same id.
    pub fn update(self, new_open: Registry, inbox: &HashSet<ThreadId>) -> RegistryUpdate {
        let (kept, dropped): (BTreeMap<_, _>, BTreeMap<_, _>) = self
            .inquiries
            .into_iter()
            .partition(|(id, _)| inbox.contains(id));

        let still_open = kept.len();
        let closed = dropped.len();

        let mut registry = Registry { inquiries: kept };
        registry.inquiries.extend(new_open.inquiries);

        info!(
            "Open inquiries: {} still open, {} closed, {} tracked",
            still_open,
            closed,
            registry.len()
        );

        RegistryUpdate {
            still_open,
            closed,
            registry,
        }
    }
}

impl FromIterator<OpenInquiry> for Registry {
    fn from_iter<T: IntoIterator<Item = OpenInquiry>>(iter: T) -> Self {
        let mut registry = Registry::new();
        for inquiry in iter {
            registry.insert(inquiry);
        }
        registry
    }
}

impl IntoIterator for Registry {
    type Item = OpenInquiry;
    type IntoIter = std::collections::btree_map::IntoValues<ThreadId, OpenInquiry>;

    fn into_iter(self) -> Self::IntoIter {
        self.inquiries.into_values()
    }
}

/// Map each inbox thread to its subject, skipping records missing either
pub fn inbox_subjects(inbox: &[RawMessage]) -> HashMap<ThreadId, String> {
    inbox
        .iter()
        .filter_map(|raw| {
            let id = raw.thread_id.as_ref()?;
            let subject = raw.subject.as_ref()?;
            Some((ThreadId::new(id.as_str()), subject.clone()))
        })
        .collect()
}
