//! Question generation.
//!
//! Operands are drawn from an injected random source so callers can seed a
//! `ChaCha20Rng` and replay the exact same sequence of questions.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    ADDITION_OPERAND_MAX, DIVISION_DIVISOR_MAX, DIVISION_DIVISOR_MIN, DIVISION_QUOTIENT_MAX,
    DIVISION_QUOTIENT_MIN, MULTIPLICATION_OPERAND_MAX, SUBTRACTION_OPERAND_MAX,
};
use crate::difficulty::{DifficultyCategory, classify};
use crate::operation::Operation;

/// A single arithmetic question `a op b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub a: u32,
    pub b: u32,
    pub operation: Operation,
}

impl Question {
    #[must_use]
    pub const fn new(a: u32, b: u32, operation: Operation) -> Self {
        Self { a, b, operation }
    }

    /// Draw a fresh question for `operation`.
    pub fn generate(operation: Operation, rng: &mut impl Rng) -> Self {
        let (a, b) = generate_operands(operation, rng);
        Self { a, b, operation }
    }

    /// The expected answer.
    #[must_use]
    pub fn answer(&self) -> f64 {
        self.operation.evaluate(self.a, self.b)
    }

    #[must_use]
    pub fn category(&self) -> DifficultyCategory {
        classify(self.a, self.b, self.operation)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.operation.symbol(), self.b)
    }
}

/// Produce an operand pair for `operation`.
///
/// Subtraction swaps the operands when the second draw is larger so the
/// difference is never negative; this skews differences toward small values
/// and is kept as is because the classifier buckets depend on it.
pub fn generate_operands(operation: Operation, rng: &mut impl Rng) -> (u32, u32) {
    match operation {
        Operation::Addition => (
            rng.gen_range(0..=ADDITION_OPERAND_MAX),
            rng.gen_range(0..=ADDITION_OPERAND_MAX),
        ),
        Operation::Subtraction => {
            let a = rng.gen_range(0..=SUBTRACTION_OPERAND_MAX);
            let b = rng.gen_range(0..=SUBTRACTION_OPERAND_MAX);
            if b > a { (b, a) } else { (a, b) }
        }
        Operation::Multiplication => (
            rng.gen_range(0..=MULTIPLICATION_OPERAND_MAX),
            rng.gen_range(0..=MULTIPLICATION_OPERAND_MAX),
        ),
        Operation::Division => {
            let divisor = rng.gen_range(DIVISION_DIVISOR_MIN..=DIVISION_DIVISOR_MAX);
            let quotient = rng.gen_range(DIVISION_QUOTIENT_MIN..=DIVISION_QUOTIENT_MAX);
            (divisor * quotient, divisor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const TRIALS: usize = 2_000;

    #[test]
    fn addition_and_multiplication_stay_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..TRIALS {
            let (a, b) = generate_operands(Operation::Addition, &mut rng);
            assert!(a <= 30 && b <= 30);
            let (a, b) = generate_operands(Operation::Multiplication, &mut rng);
            assert!(a <= 10 && b <= 10);
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..TRIALS {
            let (a, b) = generate_operands(Operation::Subtraction, &mut rng);
            assert!(a >= b, "{a} - {b}");
            assert!(a <= 30);
        }
    }

    #[test]
    fn subtraction_swaps_two_independent_draws() {
        let mut engine = ChaCha20Rng::seed_from_u64(0x5B7);
        let mut replay = ChaCha20Rng::seed_from_u64(0x5B7);
        for _ in 0..TRIALS {
            let a = replay.gen_range(0..=30_u32);
            let b = replay.gen_range(0..=30_u32);
            let expected = if b > a { (b, a) } else { (a, b) };
            assert_eq!(generate_operands(Operation::Subtraction, &mut engine), expected);
        }
    }

    #[test]
    fn subtraction_differences_skew_small() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let draws = 31_000;
        let mut equal = 0;
        let mut large = 0;
        for _ in 0..draws {
            let (a, b) = generate_operands(Operation::Subtraction, &mut rng);
            match a - b {
                0 => equal += 1,
                d if d >= 25 => large += 1,
                _ => {}
            }
        }
        // P(0) = 31/961 and P(>= 25) = 42/961; a uniform difference would
        // put 6/31 of draws at 25 or more.
        assert!((700..1_300).contains(&equal), "zero differences {equal}");
        assert!(large < 2_500, "large differences {large}");
    }

    #[test]
    fn division_is_always_exact() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        for _ in 0..TRIALS {
            let (a, b) = generate_operands(Operation::Division, &mut rng);
            assert!((1..=10).contains(&b));
            assert_eq!(a % b, 0);
            assert!((1..=10).contains(&(a / b)));
        }
    }

    #[test]
    fn same_seed_replays_same_questions() {
        let mut first = ChaCha20Rng::seed_from_u64(0xC0FFEE);
        let mut second = ChaCha20Rng::seed_from_u64(0xC0FFEE);
        for op in Operation::ALL.iter().copied().cycle().take(64) {
            assert_eq!(
                Question::generate(op, &mut first),
                Question::generate(op, &mut second)
            );
        }
    }

    #[test]
    fn question_reports_answer_and_display() {
        let q = Question::new(42, 6, Operation::Division);
        assert!((q.answer() - 7.0).abs() < f64::EPSILON);
        assert_eq!(q.to_string(), "42 ÷ 6");
        assert_eq!(q.category(), DifficultyCategory::Hard);
    }
}
