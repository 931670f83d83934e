//! Generation of single true and false equations.

use serde::{Deserialize, Serialize};

use crate::model::Equation;
use crate::rng::QuizRng;

/// Operands are drawn from `[0, DEFAULT_OPERAND_BOUND)`.
pub const DEFAULT_OPERAND_BOUND: u32 = 9;

/// How a false equation is derived from a true product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// `a x (b+1) = a*b`
    BumpSecondOperand,
    /// `a x b = a*b - 1`
    DecrementProduct,
    /// `(a+1) x b = a*b`
    BumpFirstOperand,
}

impl Mutation {
    pub const ALL: [Mutation; 3] = [
        Mutation::BumpSecondOperand,
        Mutation::DecrementProduct,
        Mutation::BumpFirstOperand,
    ];

    /// Uniform pick among [`Mutation::ALL`].
    pub fn choose(rng: &mut QuizRng) -> Mutation {
        Mutation::ALL[rng.below(Mutation::ALL.len() as u32) as usize]
    }

    /// Whether this mutation makes `a x b` false. Bumping one operand
    /// leaves the product unchanged when the other operand is zero.
    pub fn changes_product(self, a: i64, b: i64) -> bool {
        match self {
            Mutation::BumpSecondOperand => a != 0,
            Mutation::DecrementProduct => true,
            Mutation::BumpFirstOperand => b != 0,
        }
    }

    /// Build the false equation for operands `a` and `b`.
    pub fn apply(self, a: i64, b: i64) -> Equation {
        let product = a * b;
        match self {
            Mutation::BumpSecondOperand => Equation::new(a, b + 1, product, false),
            Mutation::DecrementProduct => Equation::new(a, b, product - 1, false),
            Mutation::BumpFirstOperand => Equation::new(a + 1, b, product, false),
        }
    }
}

/// Builds one equation at a time from bounded random operands.
#[derive(Debug, Clone, Copy)]
pub struct EquationFactory {
    operand_bound: u32,
}

impl Default for EquationFactory {
    fn default() -> Self {
        Self::new(DEFAULT_OPERAND_BOUND)
    }
}

impl EquationFactory {
    pub fn new(operand_bound: u32) -> Self {
        Self { operand_bound }
    }

    pub fn operand_bound(&self) -> u32 {
        self.operand_bound
    }

    fn operands(&self, rng: &mut QuizRng) -> (i64, i64) {
        let a = rng.below(self.operand_bound) as i64;
        let b = rng.below(self.operand_bound) as i64;
        (a, b)
    }

    /// A true claim: `a x b = a*b`.
    pub fn make_correct(&self, rng: &mut QuizRng) -> Equation {
        let (a, b) = self.operands(rng);
        Equation::new(a, b, a * b, true)
    }

    /// A false claim, using one of the three mutations chosen uniformly.
    ///
    /// A zero operand turns the other operand's bump into a true claim
    /// (`0 x 5 = 0`), so that draw falls back to decrementing the product.
    /// With the default bound this shifts the final shapes to about 41%
    /// decrements (11/27) and 30% (8/27) for each operand bump.
    pub fn make_incorrect(&self, rng: &mut QuizRng) -> Equation {
        let (a, b) = self.operands(rng);
        let mut mutation = Mutation::choose(rng);
        if !mutation.changes_product(a, b) {
            tracing::trace!(a, b, ?mutation, "mutation keeps product, decrementing instead");
            mutation = Mutation::DecrementProduct;
        }
        mutation.apply(a, b)
    }
}
