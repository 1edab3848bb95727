use std::fmt;

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// What a simulated player does with the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    AnswerCorrectly,
    AnswerWrongly,
    Skip,
}

/// Built-in player profiles for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlayerProfile {
    /// Never wrong, never skips
    Perfect,
    /// Mostly right, skips whenever a skip is offered
    Steady,
    /// Often wrong, skips whenever a skip is offered
    Struggling,
    /// Fairly accurate but refuses to skip
    Stubborn,
}

impl PlayerProfile {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Steady => "Steady",
            Self::Struggling => "Struggling",
            Self::Stubborn => "Stubborn",
        }
    }

    /// Chance that any single attempt is correct.
    #[must_use]
    pub const fn accuracy(self) -> f64 {
        match self {
            Self::Perfect => 1.0,
            Self::Steady => 0.85,
            Self::Struggling => 0.45,
            Self::Stubborn => 0.7,
        }
    }

    #[must_use]
    pub const fn takes_skips(self) -> bool {
        matches!(self, Self::Steady | Self::Struggling)
    }

    #[must_use]
    pub fn create_player(self, seed: u64) -> SimulatedPlayer {
        SimulatedPlayer {
            profile: self,
            rng: ChaCha20Rng::seed_from_u64(seed ^ POLICY_SEED_SALT),
        }
    }
}

impl fmt::Display for PlayerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A profile plus its own random stream, independent of question generation.
pub struct SimulatedPlayer {
    profile: PlayerProfile,
    rng: ChaCha20Rng,
}

impl SimulatedPlayer {
    pub fn decide(&mut self, skip_offered: bool) -> PlayerAction {
        if skip_offered && self.profile.takes_skips() {
            return PlayerAction::Skip;
        }
        if self.rng.gen_bool(self.profile.accuracy()) {
            PlayerAction::AnswerCorrectly
        } else {
            PlayerAction::AnswerWrongly
        }
    }
}
