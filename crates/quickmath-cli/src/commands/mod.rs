//! Subcommand implementations.

pub mod generate;
pub mod init;
pub mod play;
pub mod reset_scores;
pub mod scores;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use quickmath_store::{load_config_from, JsonFileStore, QuickmathConfig};

/// Load config and open the scores file, honoring a `--scores` override.
pub(crate) fn open_store(
    config_path: Option<PathBuf>,
    scores_path: Option<PathBuf>,
) -> Result<(QuickmathConfig, JsonFileStore)> {
    let config = load_config_from(config_path.as_deref())?;
    let path = scores_path.unwrap_or_else(|| config.scores_path.clone());
    Ok((config, JsonFileStore::new(path)))
}
