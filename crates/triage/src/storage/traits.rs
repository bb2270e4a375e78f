//! Storage trait definitions

use crate::error::StoreError;
use crate::inquiry::Registry;

/// Trait for open-inquiry registry storage
///
/// A run loads the registry persisted by the previous run, reconciles it and
/// saves the result.
pub trait InquiryStore {
    /// Load the persisted registry, empty if nothing was persisted yet
    fn load(&self) -> Result<Registry, StoreError>;

    /// Replace the persisted registry
    fn save(&self, registry: &Registry) -> Result<(), StoreError>;
}
