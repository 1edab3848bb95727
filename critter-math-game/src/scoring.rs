//! Points awarded per difficulty category.
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_POINTS;
use crate::difficulty::DifficultyCategory;

/// One point value per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    #[serde(default = "one")]
    pub super_easy: u32,
    #[serde(default = "one")]
    pub easy: u32,
    #[serde(default = "one")]
    pub simple: u32,
    #[serde(default = "one")]
    pub normal: u32,
    #[serde(default = "one")]
    pub hard: u32,
    #[serde(default = "one")]
    pub extra_hard: u32,
    #[serde(default = "one")]
    pub einstein: u32,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::tiered()
    }
}

impl ScoringTable {
    /// Harder questions are worth more: 1/1/1/2/3/4/4.
    #[must_use]
    pub const fn tiered() -> Self {
        Self {
            super_easy: 1,
            easy: 1,
            simple: 1,
            normal: 2,
            hard: 3,
            extra_hard: 4,
            einstein: 4,
        }
    }

    /// Every correct answer is worth a single point.
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            super_easy: 1,
            easy: 1,
            simple: 1,
            normal: 1,
            hard: 1,
            extra_hard: 1,
            einstein: 1,
        }
    }

    #[must_use]
    pub const fn points_for(&self, category: DifficultyCategory) -> u32 {
        match category {
            DifficultyCategory::SuperEasy => self.super_easy,
            DifficultyCategory::Easy => self.easy,
            DifficultyCategory::Simple => self.simple,
            DifficultyCategory::Normal => self.normal,
            DifficultyCategory::Hard => self.hard,
            DifficultyCategory::ExtraHard => self.extra_hard,
            DifficultyCategory::Einstein => self.einstein,
        }
    }

    /// Look up points by display label; labels that do not parse are worth 1.
    #[must_use]
    pub fn points_for_label(&self, label: &str) -> u32 {
        label
            .parse::<DifficultyCategory>()
            .map_or(FALLBACK_POINTS, |category| self.points_for(category))
    }
}

/// Points for `category` under the default tiered table.
#[must_use]
pub const fn points_for(category: DifficultyCategory) -> u32 {
    ScoringTable::tiered().points_for(category)
}

const fn one() -> u32 {
    FALLBACK_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::classify;
    use crate::operation::Operation;

    #[test]
    fn tiered_table_matches_categories() {
        let expected = [1, 1, 1, 2, 3, 4, 4];
        for (category, points) in DifficultyCategory::ALL.into_iter().zip(expected) {
            assert_eq!(points_for(category), points, "{category}");
        }
    }

    #[test]
    fn flat_table_awards_one_point() {
        let flat = ScoringTable::flat();
        assert!(DifficultyCategory::ALL.iter().all(|c| flat.points_for(*c) == 1));
    }

    #[test]
    fn unknown_label_is_worth_one_point() {
        let table = ScoringTable::tiered();
        assert_eq!(table.points_for_label("Extra Hard"), 4);
        assert_eq!(table.points_for_label("Legendary"), 1);
    }

    #[test]
    fn classified_points_are_stable() {
        assert_eq!(points_for(classify(10, 7, Operation::Multiplication)), 4);
        assert_eq!(points_for(classify(10, 7, Operation::Multiplication)), 4);
        assert_eq!(points_for(classify(20, 3, Operation::Subtraction)), 3);
        assert_eq!(points_for(classify(3, 14, Operation::Addition)), 2);
    }

    #[test]
    fn missing_fields_default_to_one() {
        let table: ScoringTable = serde_json::from_str(r#"{"einstein": 9}"#).unwrap();
        assert_eq!(table.einstein, 9);
        assert_eq!(table.hard, 1);
    }
}
