//! In-memory registry storage, a test double for the file store

use std::sync::RwLock;

use super::InquiryStore;
use crate::error::StoreError;
use crate::inquiry::Registry;

/// In-memory implementation of InquiryStore
#[derive(Default)]
pub struct InMemoryInquiryStore {
    registry: RwLock<Registry>,
}

impl InMemoryInquiryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `registry`
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }
}

impl InquiryStore for InMemoryInquiryStore {
    fn load(&self) -> Result<Registry, StoreError> {
        Ok(self
            .registry
            .read()
            .map(|registry| registry.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone()))
    }

    fn save(&self, registry: &Registry) -> Result<(), StoreError> {
        let mut guard = self
            .registry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = registry.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpenInquiry;

    #[test]
    fn test_save_then_load() {
        let store = InMemoryInquiryStore::new();
        assert!(store.load().unwrap().is_empty());

        let registry: Registry = [OpenInquiry::new("18c2a", "Login trouble")]
            .into_iter()
            .collect();
        store.save(&registry).unwrap();
        assert_eq!(store.load().unwrap(), registry);
    }
}
