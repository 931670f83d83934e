//! Terminal rendering of a game session.

use comfy_table::{Cell, Table};

use quickmath_core::model::{BestScores, Equation, EquationSet};
use quickmath_core::scoring::RoundResult;
use quickmath_core::traits::Presenter;

/// Prints the game to stdout one equation at a time.
#[derive(Default)]
pub struct TerminalPresenter {
    total: usize,
}

impl Presenter for TerminalPresenter {
    fn render_equation_list(&mut self, equations: &EquationSet) {
        self.total = equations.len();
        println!(
            "\n{} equations. Is each one right? Answer t (true) or f (false).",
            self.total
        );
    }

    fn focus_equation(&mut self, index: usize, equation: &Equation) {
        println!("[{:>2}/{}]  {equation}", index + 1, self.total);
    }

    fn mark_answer_feedback(&mut self, index: usize, was_actually_correct: bool) {
        let verdict = if was_actually_correct { "true" } else { "false" };
        println!("         #{} was {verdict}", index + 1);
    }

    fn show_results(&mut self, result: &RoundResult) {
        println!("\nFinal time: {:.1}s", result.final_time);
        println!("Base Time: {:.1}s", result.base_time);
        println!("Penalty: {:.1}s", result.penalty_time);
        if result.new_best {
            println!("New best for {} questions!", result.question_amount);
        }
    }

    fn show_selection_error(&mut self) {
        println!("Please choose an amount of questions.");
    }

    fn show_best_scores(&mut self, scores: &BestScores) {
        println!("{}", best_scores_table(scores));
    }
}

/// Table of every tier's best time.
pub fn best_scores_table(scores: &BestScores) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Questions", "Best Score", "Achieved"]);

    for record in scores {
        let achieved = record
            .achieved_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(record.questions),
            Cell::new(format!("{:.1}s", record.best_score)),
            Cell::new(achieved),
        ]);
    }

    table
}
