//! Triage crate - classification of support mailbox threads
//!
//! This crate provides the decision logic behind the support statistics:
//! - Domain models (Message, Thread, OpenInquiry)
//! - Classification rules over labels, subjects and addresses
//! - The per-thread classification state machine
//! - Pluggable manual count decisions
//! - The open-inquiry registry and its persisted text format
//! - Gmail metadata normalization and statistics reports
//!
//! Message retrieval is left to the caller; this crate works on records that
//! were already fetched.

pub mod classify;
pub mod config;
pub mod decision;
pub mod error;
pub mod gmail;
pub mod inquiry;
pub mod models;
pub mod report;
pub mod rules;
pub mod storage;

pub use classify::{Classifier, fold_threads};
pub use crate::config::{CategoryLabels, ClassifierConfig, CountPolicy, RunSettings};
pub use decision::{AlwaysCount, ConsolePrompt, Decide, NeverCount};
pub use error::{DecisionError, FormatError, StoreError};
pub use inquiry::{LegacyDirection, Registry, RegistryUpdate, inbox_subjects};
pub use models::{Message, OpenInquiry, RawMessage, Thread, ThreadId};
pub use report::StatsReport;
pub use rules::{Ping, ReviewReason, Voicemail};
pub use storage::{FileInquiryStore, InMemoryInquiryStore, InquiryStore, convert_legacy_file};
