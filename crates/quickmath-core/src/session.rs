//! Round orchestration.
//!
//! `GameSession` walks one player through tier selection, a timed round of
//! true/false answers, scoring, and back to selection. It owns no clock and
//! no event loop: the driver forwards interactions, ticks, and the delayed
//! results reveal as method calls.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use quickmath_core::model::BestScores;
//! use quickmath_core::rng::QuizRng;
//! use quickmath_core::traits::{NoopPresenter, ScoreStore};
//! use quickmath_core::{GameSession, SessionConfig};
//!
//! struct Nowhere;
//! impl ScoreStore for Nowhere {
//!     fn load(&self) -> anyhow::Result<Option<BestScores>> { Ok(None) }
//!     fn save(&self, _: &BestScores) -> anyhow::Result<()> { Ok(()) }
//! }
//!
//! let mut session = GameSession::new(
//!     SessionConfig::default(),
//!     QuizRng::new(Some(1)),
//!     Arc::new(Nowhere),
//!     NoopPresenter,
//! );
//! session.start(10).unwrap();
//! for _ in 0..10 {
//!     session.submit_guess(true).unwrap();
//! }
//! let result = session.reveal_results().unwrap();
//! assert_eq!(result.question_amount, 10);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::equation::{EquationFactory, DEFAULT_OPERAND_BOUND};
use crate::error::SessionError;
use crate::expression::expression_holds;
use crate::model::{BestScores, RoundState, DEFAULT_TIERS};
use crate::rng::QuizRng;
use crate::round::RoundBuilder;
use crate::scoring::{RoundResult, ScoreKeeper, DEFAULT_PENALTY_SECS};
use crate::timer::{RoundTimer, TickOutcome, TimerState, DEFAULT_TICK};
use crate::traits::{Presenter, ScoreStore};

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Question amounts that keep a best score.
    pub tiers: Vec<u32>,
    /// Seconds added per wrong answer.
    pub penalty_secs: f64,
    /// Timer granularity.
    pub tick: Duration,
    /// Exclusive upper bound for equation operands.
    pub operand_bound: u32,
    /// Pause between the round ending and the results being shown.
    pub reveal_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.to_vec(),
            penalty_secs: DEFAULT_PENALTY_SECS,
            tick: DEFAULT_TICK,
            operand_bound: DEFAULT_OPERAND_BOUND,
            reveal_delay: Duration::from_millis(600),
        }
    }
}

/// Where the session is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a question amount.
    SelectingTier,
    /// A round is being answered.
    Playing,
    /// The round is scored; results may still be pending reveal.
    Finished,
}

/// Result of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessFeedback {
    /// Index of the equation that was answered.
    pub index: usize,
    /// Whether that equation's displayed numbers actually multiply out.
    pub was_actually_correct: bool,
    /// Whether this answer ended the round.
    pub round_complete: bool,
}

/// One player's quiz session.
pub struct GameSession<P> {
    config: SessionConfig,
    rng: QuizRng,
    builder: RoundBuilder,
    keeper: ScoreKeeper,
    presenter: P,
    timer: RoundTimer,
    round: RoundState,
    phase: Phase,
    selected: Option<u32>,
    current: Option<usize>,
    pending: Option<RoundResult>,
}

impl<P: Presenter> GameSession<P> {
    /// Load best scores from `store` and show them.
    pub fn new(
        config: SessionConfig,
        rng: QuizRng,
        store: Arc<dyn ScoreStore>,
        mut presenter: P,
    ) -> Self {
        let keeper = ScoreKeeper::load(store, &config.tiers, config.penalty_secs);
        presenter.show_best_scores(keeper.scores());

        Self {
            builder: RoundBuilder::new(EquationFactory::new(config.operand_bound)),
            timer: RoundTimer::new(config.tick),
            rng,
            keeper,
            presenter,
            round: RoundState::default(),
            phase: Phase::SelectingTier,
            selected: None,
            current: None,
            pending: None,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn best_scores(&self) -> &BestScores {
        self.keeper.scores()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn selected_tier(&self) -> Option<u32> {
        self.selected
    }

    /// Index of the equation awaiting an answer, if any.
    pub fn current_equation(&self) -> Option<usize> {
        self.current
    }

    /// Choose how many questions the next round asks.
    ///
    /// A missing or zero amount shows the selection error and is returned as
    /// [`SessionError::SelectionRequired`] so the driver can prompt again.
    pub fn select_tier(&mut self, amount: Option<u32>) -> Result<u32, SessionError> {
        match amount.filter(|&a| a > 0) {
            Some(amount) => {
                if !self.config.tiers.contains(&amount) {
                    tracing::debug!(amount, "question amount has no best-score tier");
                }
                self.selected = Some(amount);
                Ok(amount)
            }
            None => {
                self.selected = None;
                self.presenter.show_selection_error();
                Err(SessionError::SelectionRequired)
            }
        }
    }

    /// Start a round of `amount` questions.
    ///
    /// Builds and renders the equations and arms the timer; the timer starts
    /// running on the first [`interact`](Self::interact) or guess.
    pub fn start(&mut self, amount: u32) -> Result<(), SessionError> {
        let amount = self.select_tier(Some(amount))?;

        let equations = self.builder.build(amount, &mut self.rng);
        self.round = RoundState::new(amount, equations);
        self.timer = RoundTimer::new(self.config.tick);
        self.pending = None;
        self.phase = Phase::Playing;
        self.current = Some(0);

        self.presenter.render_equation_list(&self.round.equations);
        if let Some(first) = self.round.equations.get(0) {
            self.presenter.focus_equation(0, first);
        }
        tracing::debug!(amount, "round started");
        Ok(())
    }

    /// The player touched the game surface. Starts the timer on the first call.
    pub fn interact(&mut self) -> bool {
        self.phase == Phase::Playing && self.timer.start(&mut self.round)
    }

    /// Deliver one timer tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Ignored;
        }
        let outcome = self.timer.tick(&mut self.round);
        if outcome == TickOutcome::Stopped {
            self.complete_round();
        }
        outcome
    }

    /// Answer the current equation with "this claim is true" or "false".
    ///
    /// Feedback is computed by re-evaluating the displayed expression rather
    /// than by reading the equation's stored flag.
    pub fn submit_guess(&mut self, is_true_claim: bool) -> Result<GuessFeedback, SessionError> {
        match self.phase {
            Phase::Playing => {}
            Phase::Finished => return Err(SessionError::RoundClosed(self.round.question_amount)),
            Phase::SelectingTier => return Err(SessionError::NoActiveRound),
        }
        self.interact();

        let index = self.round.answered();
        self.keeper.record_guess(&mut self.round, is_true_claim)?;

        let was_actually_correct = self
            .round
            .equations
            .get(index)
            .is_some_and(|eq| expression_holds(&eq.expression));
        self.presenter.mark_answer_feedback(index, was_actually_correct);

        let next = index + 1;
        self.current = (next < self.round.equations.len()).then_some(next);
        if let Some(next) = self.current {
            if let Some(equation) = self.round.equations.get(next) {
                self.presenter.focus_equation(next, equation);
            }
        }

        let round_complete = self.timer.check_termination(&self.round);
        if round_complete {
            self.complete_round();
        }

        Ok(GuessFeedback {
            index,
            was_actually_correct,
            round_complete,
        })
    }

    /// Results of the finished round, if they have not been revealed yet.
    pub fn pending_results(&self) -> Option<&RoundResult> {
        self.pending.as_ref()
    }

    /// Show the finished round's results and the refreshed best scores.
    /// Returns `None` when there is nothing to reveal.
    pub fn reveal_results(&mut self) -> Option<RoundResult> {
        let result = self.pending.take()?;
        self.presenter.show_results(&result);
        self.presenter.show_best_scores(self.keeper.scores());
        Some(result)
    }

    /// Discard the round and return to tier selection.
    pub fn reset(&mut self) {
        self.round = RoundState::default();
        self.timer = RoundTimer::new(self.config.tick);
        self.phase = Phase::SelectingTier;
        self.selected = None;
        self.current = None;
        self.pending = None;
    }

    fn complete_round(&mut self) {
        let result = self.keeper.finalize(&mut self.round);
        tracing::debug!(
            round_id = %result.round_id,
            final_time = result.final_time,
            wrong = result.wrong_answers,
            "round complete"
        );
        self.current = None;
        self.phase = Phase::Finished;
        self.pending = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::{Equation, EquationSet};

    #[derive(Default)]
    struct MemStore(Mutex<Option<BestScores>>);

    impl ScoreStore for MemStore {
        fn load(&self) -> anyhow::Result<Option<BestScores>> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn save(&self, scores: &BestScores) -> anyhow::Result<()> {
            *self.0.lock().unwrap() = Some(scores.clone());
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Render(usize),
        Focus(usize),
        Feedback(usize, bool),
        Results(f64),
        SelectionError,
        BestScores,
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Presenter for Recorder {
        fn render_equation_list(&mut self, equations: &EquationSet) {
            self.0.push(Call::Render(equations.len()));
        }
        fn focus_equation(&mut self, index: usize, _: &Equation) {
            self.0.push(Call::Focus(index));
        }
        fn mark_answer_feedback(&mut self, index: usize, was_actually_correct: bool) {
            self.0.push(Call::Feedback(index, was_actually_correct));
        }
        fn show_results(&mut self, result: &RoundResult) {
            self.0.push(Call::Results(result.final_time));
        }
        fn show_selection_error(&mut self) {
            self.0.push(Call::SelectionError);
        }
        fn show_best_scores(&mut self, _: &BestScores) {
            self.0.push(Call::BestScores);
        }
    }

    fn session() -> (Arc<MemStore>, GameSession<Recorder>) {
        let store = Arc::new(MemStore::default());
        let session = GameSession::new(
            SessionConfig::default(),
            QuizRng::new(Some(2024)),
            store.clone(),
            Recorder::default(),
        );
        (store, session)
    }

    #[test]
    fn new_session_shows_best_scores() {
        let (store, session) = session();
        assert_eq!(session.presenter().0, vec![Call::BestScores]);
        assert_eq!(session.phase(), Phase::SelectingTier);
        assert_eq!(store.0.lock().unwrap().as_ref().unwrap().records().len(), 4);
    }

    #[test]
    fn selection_required() {
        let (_, mut session) = session();
        assert_eq!(session.select_tier(None), Err(SessionError::SelectionRequired));
        assert_eq!(session.select_tier(Some(0)), Err(SessionError::SelectionRequired));
        assert_eq!(session.start(0), Err(SessionError::SelectionRequired));
        assert_eq!(session.phase(), Phase::SelectingTier);
        let errors = session
            .presenter()
            .0
            .iter()
            .filter(|c| **c == Call::SelectionError)
            .count();
        assert_eq!(errors, 3);

        assert_eq!(session.select_tier(Some(25)), Ok(25));
        assert_eq!(session.selected_tier(), Some(25));
    }

    #[test]
    fn start_renders_and_focuses_first() {
        let (_, mut session) = session();
        session.start(10).unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.round().equations.len(), 10);
        assert_eq!(session.timer_state(), TimerState::Idle);
        assert_eq!(session.current_equation(), Some(0));
        assert_eq!(
            session.presenter().0[1..],
            [Call::Render(10), Call::Focus(0)]
        );
    }

    #[test]
    fn ticks_wait_for_first_interaction() {
        let (_, mut session) = session();
        session.start(10).unwrap();
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(session.interact());
        assert!(!session.interact());
        assert_eq!(session.tick(), TickOutcome::Running);
        assert_eq!(session.timer_state(), TimerState::Running);
    }

    #[test]
    fn feedback_reevaluates_displayed_expression() {
        let (_, mut session) = session();
        session.start(10).unwrap();
        let equations = session.round().equations.clone();
        for (i, eq) in equations.iter().enumerate() {
            let feedback = session.submit_guess(true).unwrap();
            assert_eq!(feedback.index, i);
            assert_eq!(feedback.was_actually_correct, expression_holds(&eq.expression));
        }
    }

    #[test]
    fn full_round_finishes_and_reveals() {
        let (store, mut session) = session();
        session.start(10).unwrap();
        session.interact();
        for _ in 0..5 {
            session.tick();
        }

        let flags: Vec<bool> = session.round().equations.iter().map(|e| e.is_correct).collect();
        let mut last = None;
        for flag in flags {
            last = Some(session.submit_guess(flag).unwrap());
        }
        assert!(last.unwrap().round_complete);
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.timer_state(), TimerState::Stopped);
        assert_eq!(session.current_equation(), None);

        let played = session.round().time_played_secs;
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.round().time_played_secs, played);
        assert_eq!(
            session.submit_guess(true),
            Err(SessionError::RoundClosed(10))
        );

        let pending = session.pending_results().cloned().unwrap();
        assert_eq!(pending.penalty_time, 0.0);
        assert_eq!(pending.final_time, 0.5);
        assert!(pending.new_best);

        let revealed = session.reveal_results().unwrap();
        assert_eq!(revealed, pending);
        assert!(session.reveal_results().is_none());
        assert_eq!(
            session.presenter().0[session.presenter().0.len() - 2..],
            [Call::Results(0.5), Call::BestScores]
        );

        let saved = store.0.lock().unwrap().clone().unwrap();
        assert_eq!(saved.get(10).unwrap().best_score, 0.5);
    }

    #[test]
    fn wrong_answers_add_penalty() {
        let (_, mut session) = session();
        session.start(10).unwrap();
        let flags: Vec<bool> = session.round().equations.iter().map(|e| e.is_correct).collect();
        for flag in flags {
            session.submit_guess(!flag).unwrap();
        }
        let result = session.reveal_results().unwrap();
        assert_eq!(result.wrong_answers, 10);
        assert_eq!(result.penalty_time, 5.0);
        assert_eq!(result.final_time, 5.0);
    }

    #[test]
    fn guess_before_start_is_rejected() {
        let (_, mut session) = session();
        assert_eq!(session.submit_guess(true), Err(SessionError::NoActiveRound));
    }

    #[test]
    fn reset_restores_initial_state() {
        let (_, mut session) = session();
        session.start(10).unwrap();
        for _ in 0..10 {
            session.submit_guess(false).unwrap();
        }
        session.reveal_results();
        session.reset();

        assert_eq!(*session.round(), RoundState::default());
        assert_eq!(session.phase(), Phase::SelectingTier);
        assert_eq!(session.timer_state(), TimerState::Idle);
        assert_eq!(session.selected_tier(), None);
        assert_eq!(session.current_equation(), None);
        assert!(session.pending_results().is_none());
    }

    #[test]
    fn off_tier_round_still_completes() {
        let (store, mut session) = session();
        session.start(3).unwrap();
        for _ in 0..3 {
            session.submit_guess(true).unwrap();
        }
        let result = session.reveal_results().unwrap();
        assert_eq!(result.question_amount, 3);
        assert!(!result.new_best);
        assert!(store.0.lock().unwrap().as_ref().unwrap().get(3).is_none());
    }
}
