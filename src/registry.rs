/// Dataset registry
///
/// Fixed mapping from the display names offered in the dataset selector to
/// CSV files under the datasets directory. Built once at startup and shared
/// read-only with every request.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Display name and file name of every bundled dataset, in selector order.
pub const DATASETS: [(&str, &str); 4] = [
    ("cars.com", "classified_cars.csv"),
    ("ev.com", "cleaned_data-5.csv"),
    ("motorwat.com", "clean.csv"),
    ("electrifying.com", "last.csv"),
];

/// Dataset shown when the request does not select one.
pub const DEFAULT_DATASET: &str = "cars.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRegistry {
    entries: Vec<(String, PathBuf)>,
    default: String,
}

impl DatasetRegistry {
    /// Registry of the bundled datasets, resolved against `dir`.
    pub fn bundled(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let entries = DATASETS
            .iter()
            .map(|(name, file)| (name.to_string(), dir.join(file)))
            .collect();

        DatasetRegistry {
            entries,
            default: DEFAULT_DATASET.to_string(),
        }
    }

    /// Registry with explicit entries. The first entry is the default.
    pub fn new(entries: Vec<(String, PathBuf)>) -> Result<Self> {
        let default = entries
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| Error::Internal("dataset registry is empty".to_string()))?;

        Ok(DatasetRegistry { entries, default })
    }

    pub fn default_key(&self) -> &str {
        &self.default
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn path(&self, key: &str) -> Result<&Path> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, path)| path.as_path())
            .ok_or_else(|| Error::DatasetNotFound(key.to_string()))
    }

    /// The selected key, falling back to the default when `requested` is
    /// absent or blank. An unknown key is an error, not a fallback.
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str> {
        match requested.map(str::trim).filter(|k| !k.is_empty()) {
            None => Ok(self.default_key()),
            Some(key) if self.contains(key) => Ok(key),
            Some(key) => Err(Error::DatasetNotFound(key.to_string())),
        }
    }
}
