#![deny(missing_docs)]
//! Filesystem-backed implementation of link0's DraftStore trait.
//!
//! Each slot is one URL-encoded `.json` file under the root directory.
//! This is the durable draft slot: an in-progress chain written here
//! survives process restarts and is restored when the editor reopens.

use async_trait::async_trait;
use link0::draft::DraftStore;
use link0::error::DraftError;
use std::path::{Path, PathBuf};

/// Filesystem-backed draft store.
///
/// Directory layout:
/// ```text
/// root/
///   <url-encoded-slot>.json
/// ```
///
/// The root directory is created lazily on first save.
pub struct FsDraftStore {
    root: PathBuf,
}

impl FsDraftStore {
    /// Create a new store rooted at the given directory.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(slot_to_filename(slot))
    }
}

/// Encode a slot name into a safe filename.
fn slot_to_filename(slot: &str) -> String {
    let mut encoded = String::new();
    for ch in slot.chars() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => encoded.push(ch),
            _ => {
                for byte in ch.to_string().as_bytes() {
                    encoded.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    format!("{encoded}.json")
}

#[async_trait]
impl DraftStore for FsDraftStore {
    async fn load(&self, slot: &str) -> Result<Option<serde_json::Value>, DraftError> {
        match tokio::fs::read_to_string(self.slot_path(slot)).await {
            Ok(contents) => {
                let value: serde_json::Value = serde_json::from_str(&contents)
                    .map_err(|e| DraftError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DraftError::ReadFailed(e.to_string())),
        }
    }

    async fn save(&self, slot: &str, value: serde_json::Value) -> Result<(), DraftError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DraftError::WriteFailed(e.to_string()))?;
        let contents = serde_json::to_string_pretty(&value)
            .map_err(|e| DraftError::Serialization(e.to_string()))?;
        tokio::fs::write(self.slot_path(slot), contents)
            .await
            .map_err(|e| DraftError::WriteFailed(e.to_string()))
    }

    async fn clear(&self, slot: &str) -> Result<(), DraftError> {
        match tokio::fs::remove_file(self.slot_path(slot)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DraftError::WriteFailed(e.to_string())),
        }
    }
}
