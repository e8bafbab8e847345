//! Filesystem persistence for extracted product records.

use std::path::{Path, PathBuf};

use asinsnap_core::ProductRecord;

use crate::error::ScrapeError;

/// A directory of product records, one pretty-printed JSON document per
/// identifier at `<root>/<id>.json`.
#[derive(Debug, Clone)]
pub struct ProductStore {
    root: PathBuf,
}

impl ProductStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Write`] when the root cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ScrapeError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| ScrapeError::Write {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The directory records are written under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, product_id: &str) -> PathBuf {
        self.root.join(format!("{product_id}.json"))
    }

    /// Whether a record for `product_id` is already on disk.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.path_for(product_id).exists()
    }

    /// Serializes `record` and replaces `<root>/<id>.json` wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Write`] when serialization or the write
    /// itself fails.
    pub async fn write(
        &self,
        product_id: &str,
        record: &ProductRecord,
    ) -> Result<(), ScrapeError> {
        let path = self.path_for(product_id);
        let write_err = |source: std::io::Error| ScrapeError::Write {
            path: path.clone(),
            source,
        };
        let json = serde_json::to_string_pretty(record)
            .map_err(|source| write_err(source.into()))?;
        tokio::fs::write(&path, json).await.map_err(write_err)
    }
}
