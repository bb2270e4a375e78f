//! Integration tests for the triage crate
//!
//! These tests run a statistics pass end to end: raw records in, classified
//! threads, open inquiries and a reconciled registry out.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use tempfile::TempDir;
use triage::{
    AlwaysCount, Classifier, ClassifierConfig, Decide, DecisionError, FileInquiryStore,
    InMemoryInquiryStore, InquiryStore, Message, NeverCount, OpenInquiry, RawMessage, Registry,
    ReviewReason, StatsReport, ThreadId, fold_threads,
};

/// Helper to create raw records
fn make_raw(thread_id: &str, from: &str, to: &str, date: &str, labels: &[&str]) -> RawMessage {
    RawMessage {
        thread_id: Some(thread_id.to_string()),
        to: Some(to.to_string()),
        from: Some(from.to_string()),
        subject: Some(format!("Subject of {thread_id}")),
        date: Some(date.to_string()),
        labels: labels.iter().map(|s| s.to_string()).collect(),
    }
}

fn cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

fn stat_labels() -> BTreeSet<String> {
    ["Training".to_string(), "Billing".to_string()].into()
}

/// Answers from a script and remembers what was asked
struct Scripted {
    answers: Vec<bool>,
    reasons: Vec<ReviewReason>,
}

impl Decide for Scripted {
    fn should_count(
        &mut self,
        _message: &Message,
        reason: ReviewReason,
    ) -> Result<bool, DecisionError> {
        self.reasons.push(reason);
        Ok(self.answers.remove(0))
    }
}

#[test]
fn test_full_run_simulation() {
    let config = ClassifierConfig::default();
    let stats = stat_labels();
    let mut decider = Scripted {
        answers: vec![false],
        reasons: Vec::new(),
    };

    let records = vec![
        make_raw("t1", "Jane <jane@example.com>", "support@irbnet.org", "2 Mar 2024 09:00:00 +0000", &["Training"]),
        make_raw("t2", "relay <ping@irbnet.org>", "support@irbnet.org", "3 Mar 2024 09:00:00 +0000", &["Pings/Inquiry"]),
        make_raw("t1", "support@irbnet.org", "jane@example.com", "2 Mar 2024 10:00:00 +0000", &["Training", "Open"]),
        make_raw("t3", "Bob <bob@irbnet.org>", "support@irbnet.org", "4 Mar 2024 09:00:00 +0000", &["Billing"]),
        make_raw("t4", "old@example.com", "support@irbnet.org", "20 Feb 2024 09:00:00 +0000", &["Training"]),
    ];

    let mut classifier = Classifier::new(&config, &stats, cutoff(), &mut decider);
    let threads = fold_threads(records.iter().map(Message::from_raw), &mut classifier).unwrap();
    drop(classifier);

    assert_eq!(threads.len(), 4);
    assert_eq!(decider.reasons, vec![ReviewReason::Internal]);

    let report = StatsReport::from_threads(&threads);
    assert_eq!(report.threads, 4);
    assert_eq!(report.counted_threads, 2);
    assert_eq!(report.inquiry, 1);
    assert_eq!(report.open, 1);
    assert_eq!(report.stat_labels.get("Training"), Some(&1));
    assert_eq!(report.stat_labels.get("Billing"), None);
}

#[test]
fn test_registry_reconciliation_across_runs() {
    let config = ClassifierConfig::default();
    let stats = stat_labels();
    let store = InMemoryInquiryStore::with_registry(
        [
            OpenInquiry::new("old-closed", "Resolved last week"),
            OpenInquiry::new("t1", "Subject of t1"),
        ]
        .into_iter()
        .collect(),
    );

    let inbox = vec![
        make_raw("t1", "jane@example.com", "support@irbnet.org", "2 Mar 2024 09:00:00 +0000", &["Open"]),
        make_raw("t5", "joe@example.com", "support@irbnet.org", "5 Mar 2024 09:00:00 +0000", &["Status/Open"]),
        make_raw("t6", "ann@example.com", "support@irbnet.org", "5 Mar 2024 09:00:00 +0000", &[]),
    ];
    let inbox_ids: HashSet<ThreadId> = inbox
        .iter()
        .map(|raw| Message::from_raw(raw).thread_id)
        .collect();

    let mut decider = NeverCount;
    let new_open = Registry::from_current_inbox(&inbox, &stats, &config, &mut decider).unwrap();
    let update = store.load().unwrap().update(new_open, &inbox_ids);
    store.save(&update.registry).unwrap();

    assert_eq!(update.still_open, 1);
    assert_eq!(update.closed, 1);
    let saved = store.load().unwrap();
    let ids: Vec<&str> = saved.iter().map(|inquiry| inquiry.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t5"]);
}

#[test]
fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileInquiryStore::new(dir.path().join("open.txt"));

    let registry: Registry = [
        OpenInquiry::new("18c2a0f1", "Cannot log in"),
        OpenInquiry::new("18c2a0f2", "Re: [External] Invoice #4411 – question"),
        OpenInquiry::new("18c2a0f3", ""),
    ]
    .into_iter()
    .collect();
    store.save(&registry).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, registry);
    for inquiry in registry.iter() {
        assert_eq!(loaded.get(&inquiry.id).map(|i| i.subject.as_str()), Some(inquiry.subject.as_str()));
    }
}

#[test]
fn test_unparseable_registry_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("open.txt");
    fs::write(&path, "18c2a0f1\nCannot log in\n18c2a0f2\n").unwrap();

    let result = FileInquiryStore::new(&path).load();
    assert!(result.is_err());
}

#[test]
fn test_force_count_switches() {
    let stats = stat_labels();
    let records = vec![make_raw(
        "t1",
        "bob@irbnet.org",
        "support@irbnet.org",
        "4 Mar 2024 09:00:00 +0000",
        &["Training"],
    )];

    let count_all = ClassifierConfig {
        count_all: true,
        ..ClassifierConfig::default()
    };
    let mut never = NeverCount;
    let mut classifier = Classifier::new(&count_all, &stats, cutoff(), &mut never);
    let threads = fold_threads(records.iter().map(Message::from_raw), &mut classifier).unwrap();
    assert!(threads[0].is_good());

    let count_none = ClassifierConfig {
        count_none: true,
        ..ClassifierConfig::default()
    };
    let mut always = AlwaysCount;
    let mut classifier = Classifier::new(&count_none, &stats, cutoff(), &mut always);
    let threads = fold_threads(records.iter().map(Message::from_raw), &mut classifier).unwrap();
    assert!(!threads[0].is_good());
}
