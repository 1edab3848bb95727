//! Engine configuration.
use serde::{Deserialize, Serialize};

use crate::constants::ANSWER_TOLERANCE;
use crate::difficulty::DifficultyCategory;
use crate::error::ConfigError;
use crate::scoring::ScoringTable;

const DEFAULT_GAME_DATA: &str = include_str!("../data/game.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub scoring: ScoringTable,
    #[serde(default = "default_tolerance")]
    pub answer_tolerance: f64,
    /// Categories for which a question may be skipped.
    #[serde(default = "default_skip_categories")]
    pub skip_categories: Vec<DifficultyCategory>,
}

impl Default for GameConfig {
    fn default() -> Self {
        serde_json::from_str(DEFAULT_GAME_DATA).unwrap_or_else(|_| Self {
            scoring: ScoringTable::tiered(),
            answer_tolerance: ANSWER_TOLERANCE,
            skip_categories: default_skip_categories(),
        })
    }
}

impl GameConfig {
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default()
    }

    /// Parse a config document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tolerance is not a
    /// finite positive number.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        if !cfg.answer_tolerance.is_finite() || cfg.answer_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(cfg.answer_tolerance));
        }
        Ok(cfg)
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn can_skip(&self, category: DifficultyCategory) -> bool {
        self.skip_categories.contains(&category)
    }
}

const fn default_tolerance() -> f64 {
    ANSWER_TOLERANCE
}

fn default_skip_categories() -> Vec<DifficultyCategory> {
    vec![DifficultyCategory::ExtraHard, DifficultyCategory::Einstein]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_tiered_scoring() {
        let cfg = GameConfig::load_from_static();
        assert_eq!(cfg.scoring, ScoringTable::tiered());
        assert!((cfg.answer_tolerance - ANSWER_TOLERANCE).abs() < f64::EPSILON);
        assert!(cfg.can_skip(DifficultyCategory::Einstein));
        assert!(cfg.can_skip(DifficultyCategory::ExtraHard));
        assert!(!cfg.can_skip(DifficultyCategory::Hard));
    }

    #[test]
    fn partial_document_fills_defaults() {
        let cfg = GameConfig::from_json(r#"{"skip_categories": []}"#).unwrap();
        assert!(cfg.skip_categories.is_empty());
        assert_eq!(cfg.scoring, ScoringTable::tiered());
    }

    #[test]
    fn rejects_zero_tolerance() {
        let err = GameConfig::from_json(r#"{"answer_tolerance": 0.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTolerance(_)));
    }

    #[test]
    fn rejects_negative_tolerance() {
        let err = GameConfig::from_json(r#"{"answer_tolerance": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTolerance(_)));
        assert!(matches!(
            GameConfig::from_json("{not json").unwrap_err(),
            ConfigError::Json(_)
        ));
    }
}
