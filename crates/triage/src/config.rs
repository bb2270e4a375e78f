//! Classifier configuration
//!
//! Supports loading the classifier configuration from (in order of priority):
//! 1. An explicit JSON file path
//! 2. `classifier.json` in the shared config directory
//! 3. Built-in defaults

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Classifier config filename in the shared config directory
const CLASSIFIER_FILE: &str = "classifier.json";

/// Run settings filename in the shared config directory
const RUN_SETTINGS_FILE: &str = "run.json";

/// Label names for each thread category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryLabels {
    pub vm_admin: String,
    pub vm_researcher: String,
    pub vm_sales: String,
    pub vm_finance: String,
    pub ping_demo: String,
    pub ping_inquiry: String,
    pub ping_support: String,
    pub new_org: String,
    pub sales_ping: String,
    pub check_in: String,
}

impl Default for CategoryLabels {
    fn default() -> Self {
        Self {
            vm_admin: "Voicemail/Administrator".to_string(),
            vm_researcher: "Voicemail/Researcher".to_string(),
            vm_sales: "Voicemail/Sales".to_string(),
            vm_finance: "Voicemail/Finance".to_string(),
            ping_demo: "Pings/Demo".to_string(),
            ping_inquiry: "Pings/Inquiry".to_string(),
            ping_support: "Pings/Support".to_string(),
            new_org: "New Organizations".to_string(),
            sales_ping: "Sales Pings".to_string(),
            check_in: "Check-In Call".to_string(),
        }
    }
}

/// How manual review decisions are made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPolicy {
    /// Ask the decision strategy for every flagged thread
    Ask,
    /// Count every flagged thread without asking
    All,
    /// Count no flagged thread without asking
    None,
}

/// Everything the classification rules need to know about the mailbox
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Address of the shared support mailbox
    pub support_email: String,
    /// Address that relays web-form pings and voicemails into the mailbox
    pub ping_email: String,
    /// Substring identifying the organization's own addresses
    pub internal_domain: String,
    /// Organization addresses that are treated as external
    pub internal_emails: Vec<String>,
    /// Sender substrings marking a message as spam
    pub spam_emails: Vec<String>,
    /// Address of the product ideas list
    pub ideas_email: String,
    /// Label substrings marking a thread as still open
    pub open_labels: Vec<String>,
    /// Subject phrase of a web-form demo request
    pub demo_subject: String,
    /// Subject phrase of a web-form inquiry
    pub inquiry_subject: String,
    pub labels: CategoryLabels,
    /// Count every flagged thread without asking
    pub count_all: bool,
    /// Count no flagged thread without asking
    pub count_none: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            support_email: "support@irbnet.org".to_string(),
            ping_email: "ping@irbnet.org".to_string(),
            internal_domain: "irbnet.org".to_string(),
            internal_emails: vec![
                "support@irbnet.org".to_string(),
                "ping@irbnet.org".to_string(),
                "noreply@irbnet.org".to_string(),
            ],
            spam_emails: vec!["mailer-daemon".to_string(), "postmaster".to_string()],
            ideas_email: "ideas@irbnet.org".to_string(),
            open_labels: vec!["Open".to_string()],
            demo_subject: "IRBNet Demo Request".to_string(),
            inquiry_subject: "IRBNet Inquiry From".to_string(),
            labels: CategoryLabels::default(),
            count_all: false,
            count_none: false,
        }
    }
}

impl ClassifierConfig {
    /// Load the configuration using the following priority:
    /// 1. `path` when given
    /// 2. ~/.config/support-stats/classifier.json
    /// 3. Built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let loaded = config::load_json_or_default_location(path, CLASSIFIER_FILE)
            .context("Failed to load classifier configuration")?;
        Ok(loaded.unwrap_or_default())
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse classifier configuration JSON")
    }

    /// Resolve the two force switches into a single policy.
    ///
    /// `count_none` wins when both are set.
    pub fn count_policy(&self) -> CountPolicy {
        if self.count_none {
            CountPolicy::None
        } else if self.count_all {
            CountPolicy::All
        } else {
            CountPolicy::Ask
        }
    }
}

/// Per-run inputs that change between statistics runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Earliest date for which a thread counts
    pub cutoff: NaiveDate,
    /// Labels that make a thread a non-ping thread
    pub stat_labels: BTreeSet<String>,
    /// Member organization labels, when member statistics are wanted
    #[serde(default)]
    pub member_labels: Option<BTreeSet<String>>,
}

impl RunSettings {
    /// Load run settings from `path`, or from ~/.config/support-stats/run.json
    pub fn load(path: Option<&Path>) -> Result<Self> {
        config::load_json_or_default_location(path, RUN_SETTINGS_FILE)?
            .context("No run settings found; pass --settings or create run.json")
    }

    /// Cutoff as the first instant of the cutoff day in UTC
    pub fn cutoff_instant(&self) -> DateTime<Utc> {
        self.cutoff.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}
