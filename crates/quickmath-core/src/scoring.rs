//! Penalty scoring and best-score tracking.
//!
//! A round's final time is the time played plus a fixed penalty for every
//! answer that disagrees with the equation it was given for. Final times are
//! offered to the tier-keyed best-score collection, which is persisted
//! through a [`ScoreStore`] whenever it changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{BestScores, EquationSet, RoundState, ScoreUpdate};
use crate::traits::ScoreStore;

/// Seconds added per wrong answer.
pub const DEFAULT_PENALTY_SECS: f64 = 0.5;

/// Round to the one-decimal precision shown to the player.
///
/// Ties round away from zero on the scaled value, so a binary value just
/// under a tie such as `0.15` becomes `0.2`. Tick and penalty steps are
/// multiples of a tenth, so real round times only hit this through float
/// accumulation error.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Number of guesses that disagree with their equation's flag.
pub fn count_wrong_answers(equations: &EquationSet, guesses: &[bool]) -> u32 {
    equations
        .iter()
        .zip(guesses)
        .filter(|(equation, guess)| equation.is_correct != **guess)
        .count() as u32
}

/// Display values for a finished round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Unique identifier for this round.
    pub round_id: Uuid,
    /// How many equations were asked.
    pub question_amount: u32,
    /// Base time plus penalties, in seconds (one decimal).
    pub final_time: f64,
    /// Time played, in seconds (one decimal).
    pub base_time: f64,
    /// Accumulated penalty, in seconds (one decimal).
    pub penalty_time: f64,
    /// Answers that disagreed with their equation.
    pub wrong_answers: u32,
    /// Whether the final time replaced the tier's best score.
    pub new_best: bool,
    /// When the round finished.
    pub completed_at: DateTime<Utc>,
}

/// Owns the best-score collection and scores finished rounds.
pub struct ScoreKeeper {
    store: Arc<dyn ScoreStore>,
    scores: BestScores,
    penalty_secs: f64,
    /// Set when the stored scores could not be loaded. Nothing is written
    /// back for the rest of the session so the unreadable data survives.
    load_failed: bool,
}

impl ScoreKeeper {
    /// Load best scores from `store`, seeding placeholders for any of `tiers`
    /// without a record. A store with nothing saved yet is seeded and
    /// written back. A store that fails to load is never written for the
    /// lifetime of this keeper; improved times are kept in memory only.
    pub fn load(store: Arc<dyn ScoreStore>, tiers: &[u32], penalty_secs: f64) -> Self {
        let (mut scores, mut dirty, load_failed) = match store.load() {
            Ok(Some(scores)) => (scores, false, false),
            Ok(None) => {
                tracing::debug!("no stored best scores, seeding defaults");
                (BestScores::default(), true, false)
            }
            Err(e) => {
                tracing::warn!(
                    "failed to load best scores, playing without saving: {e:#}"
                );
                (BestScores::with_tiers(tiers), false, true)
            }
        };
        if scores.ensure_tiers(tiers) && !load_failed {
            dirty = true;
        }

        let keeper = Self {
            store,
            scores,
            penalty_secs,
            load_failed,
        };
        if dirty {
            keeper.persist();
        }
        keeper
    }

    pub fn scores(&self) -> &BestScores {
        &self.scores
    }

    pub fn penalty_secs(&self) -> f64 {
        self.penalty_secs
    }

    /// Whether best scores are being written back to the store.
    pub fn is_persisting(&self) -> bool {
        !self.load_failed
    }

    /// Append a guess to the round. Fails once every equation has an answer.
    pub fn record_guess(&self, round: &mut RoundState, guess: bool) -> Result<(), SessionError> {
        if round.is_complete() {
            return Err(SessionError::RoundClosed(round.question_amount));
        }
        round.guesses.push(guess);
        Ok(())
    }

    /// Apply penalties, compute the final time, and offer it as a best score.
    ///
    /// A question amount without a configured tier still produces a result;
    /// only the best-score update is skipped.
    pub fn finalize(&mut self, round: &mut RoundState) -> RoundResult {
        let wrong_answers = count_wrong_answers(&round.equations, &round.guesses);
        round.penalty_secs = f64::from(wrong_answers) * self.penalty_secs;
        round.final_time_secs = round.time_played_secs + round.penalty_secs;

        let final_time = round_to_tenth(round.final_time_secs);
        let completed_at = Utc::now();
        let update = self.scores.offer(
            round.question_amount,
            round.final_time_secs,
            final_time,
            completed_at,
        );

        let new_best = match update {
            ScoreUpdate::Improved { previous } => {
                tracing::info!(
                    questions = round.question_amount,
                    ?previous,
                    best = final_time,
                    "new best score"
                );
                self.persist();
                true
            }
            ScoreUpdate::Kept => false,
            ScoreUpdate::UnknownTier => {
                tracing::warn!(
                    questions = round.question_amount,
                    "no best-score tier for this question amount, skipping update"
                );
                false
            }
        };

        RoundResult {
            round_id: Uuid::new_v4(),
            question_amount: round.question_amount,
            final_time,
            base_time: round_to_tenth(round.time_played_secs),
            penalty_time: round_to_tenth(round.penalty_secs),
            wrong_answers,
            new_best,
            completed_at,
        }
    }

    fn persist(&self) {
        if self.load_failed {
            tracing::warn!("stored best scores were unreadable, not overwriting them");
            return;
        }
        if let Err(e) = self.store.save(&self.scores) {
            tracing::warn!("failed to save best scores: {e:#}");
        }
    }
}
