//! Construction of a full round of shuffled equations.

use crate::equation::EquationFactory;
use crate::model::EquationSet;
use crate::rng::QuizRng;

/// Decides the true/false split for a round and builds its equations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundBuilder {
    factory: EquationFactory,
}

impl RoundBuilder {
    pub fn new(factory: EquationFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &EquationFactory {
        &self.factory
    }

    /// Build `question_amount` equations in random order.
    ///
    /// The number of true claims is drawn from `[0, question_amount)`, so a
    /// round always contains at least one false claim.
    pub fn build(&self, question_amount: u32, rng: &mut QuizRng) -> EquationSet {
        let correct_count = rng.below(question_amount);
        let incorrect_count = question_amount - correct_count;

        let mut equations = Vec::with_capacity(question_amount as usize);
        for _ in 0..correct_count {
            equations.push(self.factory.make_correct(rng));
        }
        for _ in 0..incorrect_count {
            equations.push(self.factory.make_incorrect(rng));
        }
        rng.shuffle(&mut equations);

        tracing::debug!(
            question_amount,
            correct_count,
            incorrect_count,
            "built round"
        );
        EquationSet::from(equations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::expression_holds;

    #[test]
    fn build_returns_requested_length() {
        let builder = RoundBuilder::default();
        let mut rng = QuizRng::new(Some(1));
        for amount in [1, 2, 10, 25, 50, 99] {
            let set = builder.build(amount, &mut rng);
            assert_eq!(set.len(), amount as usize);
            assert_eq!(
                set.correct_count() + set.incorrect_count(),
                amount as usize
            );
            assert!(set.correct_count() < amount as usize);
        }
    }

    #[test]
    fn single_question_round_is_always_false() {
        let builder = RoundBuilder::default();
        let mut rng = QuizRng::new(Some(9));
        for _ in 0..50 {
            let set = builder.build(1, &mut rng);
            assert_eq!(set.correct_count(), 0);
        }
    }

    #[test]
    fn flags_agree_with_displayed_text() {
        let builder = RoundBuilder::default();
        let mut rng = QuizRng::new(Some(2));
        let set = builder.build(99, &mut rng);
        for eq in &set {
            assert_eq!(eq.is_correct, expression_holds(&eq.expression), "{eq}");
        }
    }

    #[test]
    fn order_is_mixed() {
        // With a seeded source some round must interleave true and false
        // claims rather than listing all true ones first.
        let builder = RoundBuilder::default();
        let mut rng = QuizRng::new(Some(4));
        let interleaved = (0..20).any(|_| {
            let set = builder.build(25, &mut rng);
            let flags: Vec<bool> = set.iter().map(|e| e.is_correct).collect();
            let first_false = flags.iter().position(|f| !f);
            let last_true = flags.iter().rposition(|f| *f);
            matches!((first_false, last_true), (Some(f), Some(t)) if f < t)
        });
        assert!(interleaved);
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let builder = RoundBuilder::default();
        let a = builder.build(10, &mut QuizRng::new(Some(77)));
        let b = builder.build(10, &mut QuizRng::new(Some(77)));
        assert_eq!(a, b);
    }
}
