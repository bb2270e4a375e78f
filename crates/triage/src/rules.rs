//! Classification rules
//!
//! Stateless predicates over a message's labels, subject and addresses.
//! [`Thread`](crate::Thread) consults these on every message it evaluates.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::{CategoryLabels, ClassifierConfig};
use crate::models::Message;

/// Voicemail line a thread was left on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voicemail {
    Admin,
    Researcher,
    Sales,
    Finance,
}

/// Kind of inbound ping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ping {
    Demo,
    Inquiry,
    Support,
    NewOrg,
}

/// Why a thread needs a manual count decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewReason {
    ToAndFromSupport,
    Internal,
}

impl fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewReason::ToAndFromSupport => f.write_str("to and from Support"),
            ReviewReason::Internal => f.write_str("Internal"),
        }
    }
}

/// True if `address` belongs to the organization and is not whitelisted
pub fn is_internal(address: &str, config: &ClassifierConfig) -> bool {
    address.contains(config.internal_domain.as_str())
        && config
            .internal_emails
            .iter()
            .all(|email| !address.contains(email.as_str()))
}

pub fn is_from_support(message: &Message, config: &ClassifierConfig) -> bool {
    message.from_address.contains(config.support_email.as_str())
}

pub fn is_to_from_support(message: &Message, config: &ClassifierConfig) -> bool {
    message.to.contains(config.support_email.as_str()) && is_from_support(message, config)
}

/// True if the sender matches any configured spam substring
pub fn is_spam(message: &Message, config: &ClassifierConfig) -> bool {
    config
        .spam_emails
        .iter()
        .any(|spam| message.from_address.contains(spam.as_str()))
}

/// True if the message was sent to the ideas list
pub fn is_idea(message: &Message, config: &ClassifierConfig) -> bool {
    message.to.contains(config.ideas_email.as_str())
}

/// True if the message should update a thread's last contact date
pub fn is_customer_contact(message: &Message, config: &ClassifierConfig) -> bool {
    !(is_from_support(message, config) || is_internal(&message.from_address, config))
}

/// First matching voicemail label, in admin, researcher, sales, finance order
pub fn voicemail_kind(labels: &BTreeSet<String>, names: &CategoryLabels) -> Option<Voicemail> {
    if labels.contains(&names.vm_admin) {
        Some(Voicemail::Admin)
    } else if labels.contains(&names.vm_researcher) {
        Some(Voicemail::Researcher)
    } else if labels.contains(&names.vm_sales) {
        Some(Voicemail::Sales)
    } else if labels.contains(&names.vm_finance) {
        Some(Voicemail::Finance)
    } else {
        None
    }
}

/// First matching ping label, in demo, inquiry, support, new-org order.
///
/// A new-org label only counts once the thread holds exactly two messages.
pub fn ping_kind(
    labels: &BTreeSet<String>,
    names: &CategoryLabels,
    message_count: i64,
) -> Option<Ping> {
    if labels.contains(&names.ping_demo) {
        Some(Ping::Demo)
    } else if labels.contains(&names.ping_inquiry) {
        Some(Ping::Inquiry)
    } else if labels.contains(&names.ping_support) {
        Some(Ping::Support)
    } else if labels.contains(&names.new_org) && message_count == 2 {
        Some(Ping::NewOrg)
    } else {
        None
    }
}

pub fn is_sales_ping(labels: &BTreeSet<String>, names: &CategoryLabels) -> bool {
    labels.contains(&names.sales_ping)
}

pub fn is_check_in(labels: &BTreeSet<String>, names: &CategoryLabels) -> bool {
    labels.contains(&names.check_in)
}

/// Web-form kind of a sales ping, read from its subject line
pub fn sales_subject_kind(subject: &str, config: &ClassifierConfig) -> Option<Ping> {
    if subject.contains(config.demo_subject.as_str()) {
        Some(Ping::Demo)
    } else if subject.contains(config.inquiry_subject.as_str()) {
        Some(Ping::Inquiry)
    } else {
        None
    }
}

/// True if any label contains any of the open markers
pub fn has_open_marker(labels: &BTreeSet<String>, open_labels: &[String]) -> bool {
    open_labels
        .iter()
        .any(|marker| labels.iter().any(|label| label.contains(marker.as_str())))
}

/// Review trigger used while a thread is being classified.
///
/// A to-and-from-support message on a new-org thread is expected, and
/// support writing to colleagues about a sales ping is routine.
pub fn review_reason(
    message: &Message,
    config: &ClassifierConfig,
    new_org: bool,
    sales_ping: bool,
) -> Option<ReviewReason> {
    if is_to_from_support(message, config) && !new_org {
        Some(ReviewReason::ToAndFromSupport)
    } else if is_internal(&message.from_address, config)
        || (is_from_support(message, config) && is_internal(&message.to, config) && !sales_ping)
    {
        Some(ReviewReason::Internal)
    } else {
        None
    }
}

/// Review trigger used when reconciling the current inbox
pub fn inbox_review_reason(message: &Message, config: &ClassifierConfig) -> Option<ReviewReason> {
    if is_to_from_support(message, config) {
        Some(ReviewReason::ToAndFromSupport)
    } else if is_internal(&message.from_address, config)
        || (is_from_support(message, config) && is_internal(&message.to, config))
    {
        Some(ReviewReason::Internal)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMessage;

    fn labels(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn message(from: &str, to: &str) -> Message {
        Message::from_raw(&RawMessage {
            thread_id: Some("t1".to_string()),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_is_internal() {
        let config = ClassifierConfig::default();
        assert!(is_internal("bob@irbnet.org", &config));
        assert!(!is_internal("ping@irbnet.org", &config));
        assert!(!is_internal("support@irbnet.org", &config));
        assert!(!is_internal("bob@example.com", &config));
    }

    #[test]
    fn test_voicemail_precedence() {
        let names = CategoryLabels::default();
        let both = labels(&[names.vm_sales.as_str(), names.vm_admin.as_str()]);
        assert_eq!(voicemail_kind(&both, &names), Some(Voicemail::Admin));

        let researcher_and_finance =
            labels(&[names.vm_finance.as_str(), names.vm_researcher.as_str()]);
        assert_eq!(
            voicemail_kind(&researcher_and_finance, &names),
            Some(Voicemail::Researcher)
        );
        assert_eq!(voicemail_kind(&labels(&["INBOX"]), &names), None);
    }

    #[test]
    fn test_ping_precedence() {
        let names = CategoryLabels::default();
        let mixed = labels(&[
            names.ping_support.as_str(),
            names.ping_inquiry.as_str(),
            names.new_org.as_str(),
        ]);
        assert_eq!(ping_kind(&mixed, &names, 2), Some(Ping::Inquiry));

        let new_org = labels(&[names.new_org.as_str()]);
        assert_eq!(ping_kind(&new_org, &names, 1), None);
        assert_eq!(ping_kind(&new_org, &names, 2), Some(Ping::NewOrg));
        assert_eq!(ping_kind(&new_org, &names, 3), None);
    }

    #[test]
    fn test_sales_subject_kind() {
        let config = ClassifierConfig::default();
        assert_eq!(
            sales_subject_kind("IRBNet Demo Request - State University", &config),
            Some(Ping::Demo)
        );
        assert_eq!(
            sales_subject_kind("IRBNet Inquiry From Jane", &config),
            Some(Ping::Inquiry)
        );
        assert_eq!(sales_subject_kind("Pricing", &config), None);
    }

    #[test]
    fn test_open_marker_is_substring_match() {
        let open = vec!["Open".to_string()];
        assert!(has_open_marker(&labels(&["Status/Open Inquiry"]), &open));
        assert!(!has_open_marker(&labels(&["Closed"]), &open));
        assert!(!has_open_marker(&BTreeSet::new(), &open));
    }

    #[test]
    fn test_review_reason() {
        let config = ClassifierConfig::default();

        let loopback = message("Support <support@irbnet.org>", "support@irbnet.org");
        assert_eq!(
            review_reason(&loopback, &config, false, false),
            Some(ReviewReason::ToAndFromSupport)
        );
        assert_eq!(review_reason(&loopback, &config, true, false), None);

        let colleague = message("bob@irbnet.org", "someone@example.com");
        assert_eq!(
            review_reason(&colleague, &config, false, false),
            Some(ReviewReason::Internal)
        );

        let to_colleague = message("support@irbnet.org", "bob@irbnet.org");
        assert_eq!(
            review_reason(&to_colleague, &config, false, false),
            Some(ReviewReason::Internal)
        );
        assert_eq!(review_reason(&to_colleague, &config, false, true), None);

        let customer = message("jane@example.com", "support@irbnet.org");
        assert_eq!(review_reason(&customer, &config, false, false), None);
    }

    #[test]
    fn test_reason_tags() {
        assert_eq!(ReviewReason::ToAndFromSupport.to_string(), "to and from Support");
        assert_eq!(ReviewReason::Internal.to_string(), "Internal");
    }

    #[test]
    fn test_spam_and_ideas() {
        let config = ClassifierConfig::default();
        assert!(is_spam(&message("MAILER-DAEMON@example.com", ""), &config));
        assert!(is_idea(&message("jane@example.com", "ideas@irbnet.org"), &config));
        assert!(!is_spam(&message("jane@example.com", ""), &config));
    }
}
