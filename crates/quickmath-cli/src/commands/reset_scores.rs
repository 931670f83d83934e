//! The `quickmath reset-scores` command.

use std::path::PathBuf;

use anyhow::Result;

use quickmath_core::model::BestScores;
use quickmath_core::traits::ScoreStore;

use crate::commands::open_store;

pub fn execute(scores_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (config, store) = open_store(config_path, scores_path)?;

    let scores = BestScores::with_tiers(&config.tiers);
    store.save(&scores)?;

    println!(
        "Reset best scores for {} tiers in {}",
        scores.records().len(),
        store.path().display()
    );
    Ok(())
}
