//! Explicit persistence of lookup results.
//!
//! Nothing in the client persists state on its own; a [`LookupStore`] only
//! touches the filesystem when `save` or `load` is called.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::identifiers::IdentifierRecord;

const RECORD_SUFFIX: &str = ".identifiers.json";

/// Directory of saved identifier lookups, one JSON file per target.
#[derive(Debug, Clone)]
pub struct LookupStore {
    root: PathBuf,
}

impl LookupStore {
    /// Open a store rooted at the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "exomast", "exomast-client")
            .ok_or(Error::ProjectDirsUnavailable)?;
        Ok(Self {
            root: dirs.data_dir().to_path_buf(),
        })
    }

    /// Open a store rooted at an explicit directory.
    pub fn at<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `record` under its canonical name, returning the path it was
    /// written to. Existing files for the same name are replaced atomically.
    pub fn save(&self, record: &IdentifierRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let path = self.record_path(&record.canonical_name);

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), record).map_err(io::Error::from)?;
        tmp.flush()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        tmp.persist(&path).map_err(|err| err.error)?;

        info!(name = %record.canonical_name, path = %path.display(), "saved identifier lookup");
        Ok(path)
    }

    /// Load a previously saved record for `name`, when one exists.
    pub fn load(&self, name: &str) -> Result<Option<IdentifierRecord>> {
        let path = self.record_path(name);
        if !path.exists() {
            debug!(name, path = %path.display(), "no saved lookup");
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let record =
            serde_json::from_str(&contents).map_err(|err| Error::SavedLookupCorrupt {
                path: path.clone(),
                message: err.to_string(),
            })?;
        Ok(Some(record))
    }

    /// Path a record for `name` would be saved to.
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}{}", file_stem(name), RECORD_SUFFIX))
    }
}

/// Normalize a target name into a filesystem-friendly file stem.
fn file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_unfriendly_characters() {
        assert_eq!(file_stem("HD 189733 b"), "HD_189733_b");
        assert_eq!(file_stem("  2MASS J20004370+2242391 b "), "2MASS_J20004370_2242391_b");
    }

    #[test]
    fn record_path_carries_suffix() {
        let store = LookupStore::at("/tmp/lookups");
        let path = store.record_path("HD 189733 b");
        assert!(path.ends_with("HD_189733_b.identifiers.json"));
    }
}
