//! Domain models for support mailbox entities

mod inquiry;
mod message;
mod thread;

pub use inquiry::OpenInquiry;
pub use message::{Message, RawMessage, normalize_from_address, parse_date};
pub use thread::{Thread, ThreadId};
