//! The `quickmath scores` command.

use std::path::PathBuf;

use anyhow::Result;

use quickmath_core::traits::ScoreStore;

use crate::commands::open_store;
use crate::presenter::best_scores_table;

pub fn execute(json: bool, scores_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (config, store) = open_store(config_path, scores_path)?;

    let mut scores = store.load()?.unwrap_or_default();
    scores.ensure_tiers(&config.tiers);

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else {
        println!("{}", best_scores_table(&scores));
        println!("Scores file: {}", store.path().display());
    }

    Ok(())
}
