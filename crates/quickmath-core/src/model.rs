//! Core data model types for quickmath.
//!
//! Equations, the per-round state the session mutates, and the tier-keyed
//! best-score collection that gets persisted between runs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default question-amount tiers, each with its own best score.
pub const DEFAULT_TIERS: [u32; 4] = [10, 25, 50, 99];

/// A single `a x b = c` claim shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    /// Rendered text, e.g. `"3 x 4 = 12"`.
    pub expression: String,
    /// Whether the claim was generated as a true statement.
    pub is_correct: bool,
}

impl Equation {
    /// Render an equation from its three displayed numbers.
    pub fn new(first: i64, second: i64, result: i64, is_correct: bool) -> Self {
        Self {
            expression: format!("{first} x {second} = {result}"),
            is_correct,
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// The ordered equations of one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationSet(Vec<Equation>);

impl EquationSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Equation> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Equation] {
        &self.0
    }

    /// Number of equations generated as true claims.
    pub fn correct_count(&self) -> usize {
        self.0.iter().filter(|e| e.is_correct).count()
    }

    /// Number of equations generated as false claims.
    pub fn incorrect_count(&self) -> usize {
        self.len() - self.correct_count()
    }
}

impl From<Vec<Equation>> for EquationSet {
    fn from(equations: Vec<Equation>) -> Self {
        Self(equations)
    }
}

impl<'a> IntoIterator for &'a EquationSet {
    type Item = &'a Equation;
    type IntoIter = std::slice::Iter<'a, Equation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Mutable state of the round in progress.
///
/// `guesses[i]` pairs with `equations[i]`; there are never more guesses than
/// equations, and the round is over exactly when the counts match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundState {
    pub question_amount: u32,
    pub equations: EquationSet,
    pub guesses: Vec<bool>,
    pub time_played_secs: f64,
    pub penalty_secs: f64,
    pub final_time_secs: f64,
}

impl RoundState {
    /// Fresh state for a round over `equations`, with no guesses and zero times.
    pub fn new(question_amount: u32, equations: EquationSet) -> Self {
        Self {
            question_amount,
            equations,
            ..Self::default()
        }
    }

    pub fn answered(&self) -> usize {
        self.guesses.len()
    }

    /// True once every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.guesses.len() == self.question_amount as usize
    }

    /// Zero the three timing fields.
    pub fn reset_times(&mut self) {
        self.time_played_secs = 0.0;
        self.penalty_secs = 0.0;
        self.final_time_secs = 0.0;
    }
}

/// Best time for one tier. A `best_score` of `0.0` means no record yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub questions: u32,
    pub best_score: f64,
    #[serde(default)]
    pub achieved_at: Option<DateTime<Utc>>,
}

impl ScoreRecord {
    pub fn placeholder(questions: u32) -> Self {
        Self {
            questions,
            best_score: 0.0,
            achieved_at: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.best_score == 0.0
    }
}

/// Outcome of offering a finished time to the best-score collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreUpdate {
    /// The record was replaced. `previous` is `None` for a placeholder.
    Improved { previous: Option<f64> },
    /// The stored best was equal or faster.
    Kept,
    /// No record exists for the question amount.
    UnknownTier,
}

/// Tier-keyed best scores, kept in tier order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScores {
    records: Vec<ScoreRecord>,
}

impl BestScores {
    /// A placeholder record for every tier.
    pub fn with_tiers(tiers: &[u32]) -> Self {
        let mut scores = Self::default();
        scores.ensure_tiers(tiers);
        scores
    }

    /// Add placeholder records for configured tiers that have none.
    /// Existing records are left untouched. Returns whether anything was added.
    pub fn ensure_tiers(&mut self, tiers: &[u32]) -> bool {
        let mut added = false;
        for &tier in tiers {
            if self.get(tier).is_none() {
                self.records.push(ScoreRecord::placeholder(tier));
                added = true;
            }
        }
        if added {
            self.records.sort_by_key(|r| r.questions);
        }
        added
    }

    pub fn get(&self, questions: u32) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.questions == questions)
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreRecord> {
        self.records.iter()
    }

    /// Offer a finished round's time.
    ///
    /// `final_time` is compared unrounded against the stored value; the
    /// stored value becomes `display_time` (the one-decimal figure the
    /// player saw) when the record is a placeholder or strictly slower.
    pub fn offer(
        &mut self,
        questions: u32,
        final_time: f64,
        display_time: f64,
        at: DateTime<Utc>,
    ) -> ScoreUpdate {
        let Some(record) = self.records.iter_mut().find(|r| r.questions == questions) else {
            return ScoreUpdate::UnknownTier;
        };

        if record.is_placeholder() || record.best_score > final_time {
            let previous = (!record.is_placeholder()).then_some(record.best_score);
            record.best_score = display_time;
            record.achieved_at = Some(at);
            ScoreUpdate::Improved { previous }
        } else {
            ScoreUpdate::Kept
        }
    }
}

impl<'a> IntoIterator for &'a BestScores {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equation_renders_expression() {
        let eq = Equation::new(3, 4, 12, true);
        assert_eq!(eq.expression, "3 x 4 = 12");
        assert_eq!(eq.to_string(), "3 x 4 = 12");

        let negative = Equation::new(0, 5, -1, false);
        assert_eq!(negative.expression, "0 x 5 = -1");
    }

    #[test]
    fn equation_set_counts() {
        let set = EquationSet::from(vec![
            Equation::new(1, 1, 1, true),
            Equation::new(2, 2, 5, false),
            Equation::new(2, 3, 6, true),
        ]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.correct_count(), 2);
        assert_eq!(set.incorrect_count(), 1);
    }

    #[test]
    fn round_state_completion() {
        let mut round = RoundState::new(2, EquationSet::default());
        assert!(!round.is_complete());
        round.guesses.push(true);
        assert!(!round.is_complete());
        round.guesses.push(false);
        assert!(round.is_complete());
        assert_eq!(round.answered(), 2);
    }

    #[test]
    fn best_scores_default_tiers() {
        let scores = BestScores::with_tiers(&DEFAULT_TIERS);
        let tiers: Vec<u32> = scores.iter().map(|r| r.questions).collect();
        assert_eq!(tiers, vec![10, 25, 50, 99]);
        assert!(scores.iter().all(ScoreRecord::is_placeholder));
    }

    #[test]
    fn ensure_tiers_keeps_existing_records() {
        let mut scores = BestScores::with_tiers(&[25]);
        let now = Utc::now();
        scores.offer(25, 30.0, 30.0, now);

        assert!(scores.ensure_tiers(&[10, 25]));
        assert_eq!(scores.records()[0].questions, 10);
        assert_eq!(scores.get(25).unwrap().best_score, 30.0);
        assert!(!scores.ensure_tiers(&[10, 25]));
    }

    #[test]
    fn offer_replaces_placeholder_and_slower_times() {
        let mut scores = BestScores::with_tiers(&[10]);
        let now = Utc::now();

        assert_eq!(
            scores.offer(10, 12.3, 12.3, now),
            ScoreUpdate::Improved { previous: None }
        );
        assert_eq!(scores.offer(10, 15.0, 15.0, now), ScoreUpdate::Kept);
        assert_eq!(scores.offer(10, 12.3, 12.3, now), ScoreUpdate::Kept);
        assert_eq!(
            scores.offer(10, 9.9, 9.9, now),
            ScoreUpdate::Improved {
                previous: Some(12.3)
            }
        );
        assert_eq!(scores.get(10).unwrap().best_score, 9.9);
        assert!(scores.get(10).unwrap().achieved_at.is_some());
    }

    #[test]
    fn offer_unknown_tier() {
        let mut scores = BestScores::with_tiers(&[10]);
        assert_eq!(
            scores.offer(11, 5.0, 5.0, Utc::now()),
            ScoreUpdate::UnknownTier
        );
        assert!(scores.get(10).unwrap().is_placeholder());
    }

    #[test]
    fn best_scores_json_shape() {
        let scores = BestScores::with_tiers(&[10]);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json[0]["questions"], 10);
        assert_eq!(json[0]["best_score"], 0.0);

        let legacy: BestScores =
            serde_json::from_str(r#"[{"questions": 25, "best_score": 41.5}]"#).unwrap();
        assert_eq!(legacy.get(25).unwrap().best_score, 41.5);
        assert!(legacy.get(25).unwrap().achieved_at.is_none());
    }
}
