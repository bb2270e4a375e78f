//! Thread model and its classification state machine

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::Message;
use crate::classify::Classifier;
use crate::config::CountPolicy;
use crate::error::DecisionError;
use crate::rules::{self, Ping, ReviewReason, Voicemail};

/// Unique identifier for a thread (Gmail thread ID)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A support conversation and everything learned about it so far.
///
/// Messages are folded in arrival order. Most flags only ever go from false
/// to true; `good_thread` and `checked` may also be set by a manual count
/// decision, and `closed` only ever goes from true to false.
#[derive(Debug, Clone, Serialize)]
pub struct Thread {
    id: ThreadId,
    subject: String,
    message_count: i64,
    stat_labels: BTreeSet<String>,
    member_labels: BTreeSet<String>,
    oldest_date: Option<DateTime<Utc>>,
    last_contact_date: Option<DateTime<Utc>>,
    check_in_date: Option<DateTime<Utc>>,
    good_thread: bool,
    non_ping: bool,
    demo: bool,
    inquiry: bool,
    support_ping: bool,
    admin_vm: bool,
    res_vm: bool,
    sales_vm: bool,
    finance_vm: bool,
    new_org: bool,
    sales_ping: bool,
    checked: bool,
    closed: bool,
    messages: Vec<Message>,
}

impl Thread {
    /// Start a thread from its first message
    pub fn new(message: Message, classifier: &mut Classifier<'_>) -> Result<Self, DecisionError> {
        let (stat_labels, member_labels) = classifier.extract_labels(&message);
        let last_contact_date = if rules::is_customer_contact(&message, classifier.config()) {
            message.date
        } else {
            None
        };

        let mut thread = Self {
            id: message.thread_id.clone(),
            subject: message.subject.clone(),
            message_count: 1,
            non_ping: !stat_labels.is_empty(),
            stat_labels,
            member_labels,
            oldest_date: message.date,
            last_contact_date,
            check_in_date: None,
            good_thread: classifier.passes_cutoff(message.date),
            demo: false,
            inquiry: false,
            support_ping: false,
            admin_vm: false,
            res_vm: false,
            sales_vm: false,
            finance_vm: false,
            new_org: false,
            sales_ping: false,
            checked: false,
            closed: true,
            messages: Vec::new(),
        };

        thread.evaluate(&message, classifier)?;
        thread.messages.push(message);
        Ok(thread)
    }

    /// Fold the next message of this thread into its state
    pub fn add_message(
        &mut self,
        message: Message,
        classifier: &mut Classifier<'_>,
    ) -> Result<(), DecisionError> {
        self.message_count += 1;

        let (stats, members) = classifier.extract_labels(&message);
        self.stat_labels.extend(stats);
        self.member_labels.extend(members);

        if !classifier.passes_cutoff(message.date) {
            self.good_thread = false;
        }

        if let Some(date) = message.date {
            self.oldest_date = Some(self.oldest_date.map_or(date, |oldest| oldest.min(date)));

            if rules::is_customer_contact(&message, classifier.config()) {
                self.last_contact_date =
                    Some(self.last_contact_date.map_or(date, |last| last.max(date)));
            }
        }

        self.non_ping = !self.stat_labels.is_empty();

        self.evaluate(&message, classifier)?;
        self.messages.push(message);
        Ok(())
    }

    /// Apply the category rules for one message.
    fn evaluate(
        &mut self,
        message: &Message,
        classifier: &mut Classifier<'_>,
    ) -> Result<(), DecisionError> {
        let config = classifier.config();
        let names = &config.labels;
        let labels = &message.labels;

        match rules::voicemail_kind(labels, names) {
            Some(Voicemail::Admin) => self.admin_vm = true,
            Some(Voicemail::Researcher) => {
                self.res_vm = true;
                // Replies to a relayed voicemail are not separate contacts
                if !message.from_address.contains(config.ping_email.as_str()) {
                    self.message_count -= 1;
                }
            }
            Some(Voicemail::Sales) => self.sales_vm = true,
            Some(Voicemail::Finance) => self.finance_vm = true,
            None => {}
        }

        match rules::ping_kind(labels, names, self.message_count) {
            Some(Ping::Demo) => self.demo = true,
            Some(Ping::Inquiry) => self.inquiry = true,
            Some(Ping::Support) => self.support_ping = true,
            Some(Ping::NewOrg) => self.new_org = true,
            None => {}
        }

        if rules::is_sales_ping(labels, names) {
            self.sales_ping = true;
            self.checked = true;
            match rules::sales_subject_kind(&message.subject, config) {
                Some(Ping::Demo) => self.demo = true,
                Some(Ping::Inquiry) => self.inquiry = true,
                _ => {}
            }
        }

        if self.non_ping {
            if !self.checked && self.good_thread {
                let reason = rules::review_reason(message, config, self.new_org, self.sales_ping);
                if let Some(reason) = reason {
                    self.should_it_count(message, reason, false, classifier)?;
                }
            }

            if rules::is_check_in(labels, names)
                && let Some(date) = message.date
                && self.check_in_date.is_none_or(|current| current < date)
            {
                self.check_in_date = Some(date);
            }
        }

        self.mark_open_if_labeled(message, classifier);
        Ok(())
    }

    /// Decide whether the thread counts.
    ///
    /// With `override_checked` the configured force switches are ignored and
    /// the decision strategy is always consulted.
    pub fn should_it_count(
        &mut self,
        message: &Message,
        reason: ReviewReason,
        override_checked: bool,
        classifier: &mut Classifier<'_>,
    ) -> Result<(), DecisionError> {
        let policy = if override_checked {
            CountPolicy::Ask
        } else {
            classifier.config().count_policy()
        };

        match policy {
            CountPolicy::Ask => {
                self.checked = true;
                self.good_thread = classifier.decide(message, reason)?;
                debug!(
                    "Thread {} flagged as {}: counted = {}",
                    self.id, reason, self.good_thread
                );
            }
            CountPolicy::All => self.good_thread = true,
            CountPolicy::None => self.good_thread = false,
        }
        Ok(())
    }

    /// Mark the thread open if the message carries an open marker
    pub(crate) fn mark_open_if_labeled(&mut self, message: &Message, classifier: &Classifier<'_>) {
        if rules::has_open_marker(&message.labels, &classifier.config().open_labels) {
            self.closed = false;
        }
    }

    /// Exclude the thread from statistics
    pub fn dont_count(&mut self) {
        self.good_thread = false;
    }

    pub fn id(&self) -> &ThreadId {
        &self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Number of messages counted, net of researcher voicemail replies
    pub fn message_count(&self) -> i64 {
        self.message_count
    }

    pub fn stat_labels(&self) -> &BTreeSet<String> {
        &self.stat_labels
    }

    pub fn member_labels(&self) -> &BTreeSet<String> {
        &self.member_labels
    }

    pub fn oldest_date(&self) -> Option<DateTime<Utc>> {
        self.oldest_date
    }

    /// Most recent date of a message from outside the organization
    pub fn last_contact_date(&self) -> Option<DateTime<Utc>> {
        self.last_contact_date
    }

    pub fn check_in_date(&self) -> Option<DateTime<Utc>> {
        self.check_in_date
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_good(&self) -> bool {
        self.good_thread
    }

    pub fn is_non_ping(&self) -> bool {
        self.non_ping
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn is_inquiry(&self) -> bool {
        self.inquiry
    }

    pub fn is_support_ping(&self) -> bool {
        self.support_ping
    }

    pub fn is_admin_vm(&self) -> bool {
        self.admin_vm
    }

    pub fn is_res_vm(&self) -> bool {
        self.res_vm
    }

    pub fn is_sales_vm(&self) -> bool {
        self.sales_vm
    }

    pub fn is_finance_vm(&self) -> bool {
        self.finance_vm
    }

    pub fn is_new_org(&self) -> bool {
        self.new_org
    }

    pub fn is_sales_ping(&self) -> bool {
        self.sales_ping
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_check_in(&self) -> bool {
        self.check_in_date.is_some()
    }
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Thread ID: {}, Subject: {}, Count: {}",
            self.id, self.subject, self.message_count
        )
    }
}
