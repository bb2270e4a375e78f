//! Gmail API integration
//!
//! The retrieval layer fetches messages with `format=metadata`; this module
//! turns those responses into [`RawMessage`](crate::RawMessage) records.

mod normalize;

pub use normalize::{label_names, normalize_message};

/// Gmail API response types
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Message fetched with `format=metadata`
    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailMessage {
        pub id: String,
        pub thread_id: Option<String>,
        pub label_ids: Option<Vec<String>>,
        pub payload: Option<MessagePayload>,
    }

    /// Message payload containing headers
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct MessagePayload {
        pub headers: Option<Vec<Header>>,
    }

    /// Email header (name-value pair)
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct Header {
        pub name: String,
        pub value: String,
    }

    /// Response from listing labels
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct ListLabelsResponse {
        pub labels: Option<Vec<LabelRef>>,
    }

    /// Label id and display name
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct LabelRef {
        pub id: String,
        pub name: String,
    }
}
