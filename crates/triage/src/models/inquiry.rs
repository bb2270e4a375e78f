//! Open inquiry model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::ThreadId;

/// A thread that still awaits resolution in the support inbox.
///
/// Two inquiries are the same inquiry when their thread ids match,
/// whatever their subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenInquiry {
    pub id: ThreadId,
    pub subject: String,
}

impl OpenInquiry {
    pub fn new(id: impl Into<ThreadId>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
        }
    }
}

impl PartialEq for OpenInquiry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OpenInquiry {}

impl Hash for OpenInquiry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for OpenInquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "< {}, {}>", self.id, self.subject)
    }
}
