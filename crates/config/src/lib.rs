//! Shared configuration directory for the support statistics tools
//!
//! The classifier configuration, run settings and open inquiry list live in
//! `support-stats/` under the platform config directory. Any of them can also
//! be given as an explicit path; see [`load_json_or_default_location`].

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Name of the directory created under the platform config directory
const APP_DIR: &str = "support-stats";

/// Create the support-stats directory so the open inquiry list can be saved
/// there on the first run.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// The support-stats directory, if the platform has a config directory
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR))
}

pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Read `filename` from the support-stats directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Read a JSON file; errors name the offending path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load `filename` from an explicit path if given, otherwise from the config
/// directory if present. Returns `Ok(None)` when neither source exists.
pub fn load_json_or_default_location<T: DeserializeOwned>(
    explicit: Option<&Path>,
    filename: &str,
) -> Result<Option<T>> {
    if let Some(path) = explicit {
        return load_json_file(path).map(Some);
    }
    if config_exists(filename) {
        return load_json(filename).map(Some);
    }
    Ok(None)
}

pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("support-stats"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path("classifier.json");
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("support-stats/classifier.json"));
    }

    #[test]
    fn test_load_json_file_reports_path_on_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_json_file::<HashMap<String, String>>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"a": "b"}"#).unwrap();

        let loaded: Option<HashMap<String, String>> =
            load_json_or_default_location(Some(&path), "does-not-exist.json").unwrap();
        assert_eq!(loaded.unwrap().get("a").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_missing_default_location_is_none() {
        let loaded: Option<HashMap<String, String>> =
            load_json_or_default_location(None, "support-stats-never-written.json").unwrap();
        assert!(loaded.is_none());

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.json");
        let explicit = load_json_or_default_location::<HashMap<String, String>>(
            Some(&missing),
            "x.json",
        );
        assert!(explicit.is_err());
    }
}
