//! File-backed registry storage using the two-line text format

use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use super::InquiryStore;
use crate::error::StoreError;
use crate::inquiry::{self, LegacyDirection, Registry};

/// Registry persisted as a text file
pub struct FileInquiryStore {
    path: PathBuf,
}

impl FileInquiryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InquiryStore for FileInquiryStore {
    fn load(&self) -> Result<Registry, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No open inquiry file at {}, starting empty", self.path.display());
                return Ok(Registry::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(inquiry::read_open(&text)?)
    }

    fn save(&self, registry: &Registry) -> Result<(), StoreError> {
        info!(
            "Recording {} open inquiries to {}",
            registry.len(),
            self.path.display()
        );
        let file = File::create(&self.path)?;
        inquiry::write_open(registry, BufWriter::new(file))?;
        Ok(())
    }
}

/// Convert a persisted list between the legacy and current formats in place
pub fn convert_legacy_file(path: &Path, direction: LegacyDirection) -> Result<(), StoreError> {
    let text = fs::read_to_string(path)?;
    let converted = inquiry::convert_legacy(&text, direction)?;
    fs::write(path, converted)?;
    info!("Converted {} ({:?})", path.display(), direction);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::models::OpenInquiry;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileInquiryStore::new(dir.path().join("open.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileInquiryStore::new(dir.path().join("open.txt"));

        let registry: Registry = [
            OpenInquiry::new("18c2a", "Login trouble"),
            OpenInquiry::new("18c2b", "Billing question"),
        ]
        .into_iter()
        .collect();
        store.save(&registry).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "18c2a\nLogin trouble\n18c2b\nBilling question\n");
        assert_eq!(store.load().unwrap(), registry);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("open.txt");
        fs::write(&path, "18c2a\n").unwrap();

        let err = FileInquiryStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            StoreError::Format(FormatError::DanglingId { line: 1 })
        ));
    }

    #[test]
    fn test_convert_legacy_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("open.txt");
        fs::write(&path, "255\nLogin trouble\nY\nY\n").unwrap();

        convert_legacy_file(&path, LegacyDirection::FromMbox).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ff\nLogin trouble\n");

        convert_legacy_file(&path, LegacyDirection::ToMbox).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "255\nLogin trouble\nY\nY\n");
    }
}
