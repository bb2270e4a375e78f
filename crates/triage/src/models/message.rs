//! Message model representing one support mailbox message

use super::ThreadId;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A message record as handed over by the mail retrieval layer.
///
/// Every header is optional; label IDs have already been resolved to names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMessage {
    pub thread_id: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub subject: Option<String>,
    /// Unparsed `Date` header
    pub date: Option<String>,
    pub labels: Vec<String>,
}

/// A single normalized message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Thread this message belongs to (empty if the record had none)
    pub thread_id: ThreadId,
    /// Recipient header, verbatim
    pub to: String,
    /// Lower-cased sender address
    pub from_address: String,
    /// Subject line without line breaks
    pub subject: String,
    /// When the message was sent, if the record carried a parseable date
    pub date: Option<DateTime<Utc>>,
    /// Label names attached to the message
    pub labels: BTreeSet<String>,
}

impl Message {
    /// Normalize a raw record. Missing headers become empty strings.
    pub fn from_raw(raw: &RawMessage) -> Self {
        let thread_id = ThreadId::new(raw.thread_id.clone().unwrap_or_default());
        let subject = raw
            .subject
            .as_deref()
            .map(strip_line_breaks)
            .unwrap_or_default();
        let date = raw.date.as_deref().and_then(|text| {
            let parsed = parse_date(text);
            if parsed.is_none() {
                warn!("Unparseable date {:?} on thread {}", text, thread_id.as_str());
            }
            parsed
        });

        Self {
            thread_id,
            to: raw.to.clone().unwrap_or_default(),
            from_address: raw
                .from
                .as_deref()
                .map(normalize_from_address)
                .unwrap_or_default(),
            subject,
            date,
            labels: raw.labels.iter().cloned().collect(),
        }
    }

    /// Split the message labels into those found in `stat_labels` and those
    /// found in `member_labels`.
    pub fn extract_labels(
        &self,
        stat_labels: &BTreeSet<String>,
        member_labels: Option<&BTreeSet<String>>,
    ) -> (BTreeSet<String>, BTreeSet<String>) {
        let stats = self.labels.intersection(stat_labels).cloned().collect();
        let members = member_labels
            .map(|members| self.labels.intersection(members).cloned().collect())
            .unwrap_or_default();
        (stats, members)
    }
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        Self::from_raw(&raw)
    }
}

/// Reduce a `From` header to a lower-cased address.
///
/// "Jane Doe <Jane@Example.org>" becomes "jane@example.org". Without both
/// angle brackets the whole value is used.
pub fn normalize_from_address(from: &str) -> String {
    if let Some(start) = from.find('<')
        && let Some(end) = from.find('>')
    {
        // Only the text strictly between the first '<' and the first '>'
        return from.get(start + 1..end).unwrap_or_default().to_lowercase();
    }
    from.to_lowercase()
}

/// Parse a `Date` header.
///
/// Accepts RFC 2822 (with or without a trailing comment such as "(UTC)") and
/// RFC 3339.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    let without_comment = match text.rfind('(') {
        Some(open) if text.ends_with(')') => text[..open].trim_end(),
        _ => text,
    };

    DateTime::parse_from_rfc2822(without_comment)
        .or_else(|_| DateTime::parse_from_rfc3339(without_comment))
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

fn strip_line_breaks(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
