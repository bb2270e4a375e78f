//! Persistence of the open-inquiry registry between runs

mod file;
mod memory;
mod traits;

pub use file::{FileInquiryStore, convert_legacy_file};
pub use memory::InMemoryInquiryStore;
pub use traits::InquiryStore;
