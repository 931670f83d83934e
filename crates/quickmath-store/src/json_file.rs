//! JSON file store for best scores.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quickmath_core::model::BestScores;
use quickmath_core::traits::ScoreStore;

use crate::error::StoreError;

/// Keeps the best-score list as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<BestScores>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let scores = serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(scores))
    }

    fn write(&self, scores: &BestScores) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(scores)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> anyhow::Result<Option<BestScores>> {
        let scores = self.read()?;
        tracing::debug!(
            path = %self.path.display(),
            found = scores.is_some(),
            "loaded best scores"
        );
        Ok(scores)
    }

    fn save(&self, scores: &BestScores) -> anyhow::Result<()> {
        self.write(scores)?;
        tracing::debug!(path = %self.path.display(), "saved best scores");
        Ok(())
    }
}
