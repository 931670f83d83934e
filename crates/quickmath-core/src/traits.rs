//! Collaborator traits for persistence and presentation.
//!
//! The session calls into these and never the other way round. Concrete
//! stores live in `quickmath-store`; the terminal presenter lives in the CLI.

use crate::model::{BestScores, Equation, EquationSet};
use crate::scoring::RoundResult;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Key-value persistence of the best-score collection.
pub trait ScoreStore: Send + Sync {
    /// Load stored scores. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> anyhow::Result<Option<BestScores>>;

    /// Replace the stored scores.
    fn save(&self, scores: &BestScores) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Rendering surface driven by the session.
pub trait Presenter {
    /// A new round's equations are ready.
    fn render_equation_list(&mut self, equations: &EquationSet);

    /// The equation at `index` is now the one awaiting an answer.
    fn focus_equation(&mut self, index: usize, equation: &Equation);

    /// Feedback for the answered equation: whether its displayed numbers
    /// actually multiply out.
    fn mark_answer_feedback(&mut self, index: usize, was_actually_correct: bool);

    /// Final, base and penalty times for a finished round.
    fn show_results(&mut self, result: &RoundResult);

    /// The player tried to start without choosing a question amount.
    fn show_selection_error(&mut self);

    /// Current best score for every tier.
    fn show_best_scores(&mut self, scores: &BestScores);
}

/// Presenter that renders nothing.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn render_equation_list(&mut self, _: &EquationSet) {}
    fn focus_equation(&mut self, _: usize, _: &Equation) {}
    fn mark_answer_feedback(&mut self, _: usize, _: bool) {}
    fn show_results(&mut self, _: &RoundResult) {}
    fn show_selection_error(&mut self) {}
    fn show_best_scores(&mut self, _: &BestScores) {}
}
