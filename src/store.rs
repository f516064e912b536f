use std::fs::create_dir_all;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::types::SearchRecord;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Append-only record log for one session, stored as a JSON array in
/// `{dir}/{source_name}_{session_ts}.json`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    file: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl AsRef<Path>, source_name: &str, session_ts: &str) -> Self {
        let file = dir
            .as_ref()
            .join(format!("{}_{}.json", source_name, session_ts));
        Self { file }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Saved records in file order, or `None` if nothing was saved yet.
    pub fn load(&self) -> Result<Option<Vec<SearchRecord>>> {
        let content = match std::fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io { path: self.file.clone(), source });
            }
        };

        let records = serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.file.clone(),
            source,
        })?;
        Ok(Some(records))
    }

    /// Add `records` after whatever is already saved, rewriting the file.
    /// Returns the number of records now stored.
    pub fn append(&self, records: &[SearchRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut saved = self.load()?.unwrap_or_default();
        saved.extend_from_slice(records);

        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = serde_json::to_string_pretty(&saved).map_err(StoreError::Encode)?;
        std::fs::write(&self.file, serialized).map_err(|source| StoreError::Io {
            path: self.file.clone(),
            source,
        })?;

        tracing::debug!(file = %self.file.display(), added = records.len(), total = saved.len(), "saved search records");
        Ok(saved.len())
    }
}
