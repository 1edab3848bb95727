//! Difficulty classification.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    ADDITION_BOUNDS, DIVISION_BOUNDS, MULTIPLICATION_BOUNDS, SUBTRACTION_BOUNDS,
};
use crate::error::ParseCategoryError;
use crate::operation::Operation;

/// Seven ordered difficulty levels, least to most difficult.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyCategory {
    #[default]
    SuperEasy,
    Easy,
    Simple,
    Normal,
    Hard,
    ExtraHard,
    Einstein,
}

impl DifficultyCategory {
    pub const ALL: [Self; 7] = [
        Self::SuperEasy,
        Self::Easy,
        Self::Simple,
        Self::Normal,
        Self::Hard,
        Self::ExtraHard,
        Self::Einstein,
    ];

    /// Zero-based position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SuperEasy => "Super Easy",
            Self::Easy => "Easy",
            Self::Simple => "Simple",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::ExtraHard => "Extra Hard",
            Self::Einstein => "Einstein",
        }
    }
}

impl fmt::Display for DifficultyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "supereasy" => Ok(Self::SuperEasy),
            "easy" => Ok(Self::Easy),
            "simple" => Ok(Self::Simple),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "extrahard" => Ok(Self::ExtraHard),
            "einstein" => Ok(Self::Einstein),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// The quantity each operation is bucketed on.
#[must_use]
pub fn derived_quantity(a: u32, b: u32, operation: Operation) -> u64 {
    match operation {
        Operation::Addition => u64::from(a.max(b)),
        Operation::Subtraction => u64::from(a.saturating_sub(b)),
        Operation::Multiplication => u64::from(a) * u64::from(b),
        Operation::Division => u64::from(b),
    }
}

const fn bounds_for(operation: Operation) -> &'static [u32; 6] {
    match operation {
        Operation::Addition => &ADDITION_BOUNDS,
        Operation::Subtraction => &SUBTRACTION_BOUNDS,
        Operation::Multiplication => &MULTIPLICATION_BOUNDS,
        Operation::Division => &DIVISION_BOUNDS,
    }
}

/// Map a question onto exactly one category. Bounds are inclusive; anything
/// above the sixth bound is `Einstein`.
#[must_use]
pub fn classify(a: u32, b: u32, operation: Operation) -> DifficultyCategory {
    let value = derived_quantity(a, b, operation);
    bounds_for(operation)
        .iter()
        .position(|&bound| value <= u64::from(bound))
        .map_or(DifficultyCategory::Einstein, |idx| {
            DifficultyCategory::ALL[idx]
        })
}
