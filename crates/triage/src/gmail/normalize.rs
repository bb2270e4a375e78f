//! Gmail API response normalization
//!
//! Converts Gmail metadata responses to raw message records.

use std::collections::HashMap;

use super::api::{GmailMessage, ListLabelsResponse, MessagePayload};
use crate::models::RawMessage;

/// Build the label id → name map from a `labels.list` response
pub fn label_names(response: ListLabelsResponse) -> HashMap<String, String> {
    response
        .labels
        .unwrap_or_default()
        .into_iter()
        .map(|label| (label.id, label.name))
        .collect()
}

/// Normalize a Gmail metadata message to a raw record.
///
/// Label ids are resolved through `labels`; ids without a name are kept as
/// they are.
pub fn normalize_message(gmail_msg: GmailMessage, labels: &HashMap<String, String>) -> RawMessage {
    let payload = gmail_msg.payload.as_ref();
    let header = |name: &str| payload.and_then(|p| extract_header(p, name));

    let resolved = gmail_msg
        .label_ids
        .unwrap_or_default()
        .into_iter()
        .map(|id| labels.get(&id).cloned().unwrap_or(id))
        .collect();

    RawMessage {
        thread_id: gmail_msg.thread_id,
        to: header("To"),
        from: header("From"),
        subject: header("Subject"),
        date: header("Date"),
        labels: resolved,
    }
}

/// Extract a header value by name
fn extract_header(payload: &MessagePayload, name: &str) -> Option<String> {
    payload.headers.as_ref()?.iter().find_map(|h| {
        if h.name.eq_ignore_ascii_case(name) {
            Some(h.value.clone())
        } else {
            None
        }
    })
}
