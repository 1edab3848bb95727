//! Converts a lifetime score into rank and stage position.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{POINTS_PER_RANK, RANK_METER_MAX_SLOTS};
use crate::numbers::{capped_ratio, round_f64_to_u64, u64_to_f64};
use crate::stages::{StageTable, stage_table};

/// Where a score sits on the rank line and within the stage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// `score / 10`.
    pub rank: u64,
    /// Zero-based stage, never past the final stage.
    pub stage_index: usize,
    /// Ranks earned since entering the current stage. May exceed
    /// `ranks_needed_for_stage` once the final stage is reached.
    pub ranks_into_stage: u64,
    pub ranks_needed_for_stage: u64,
    /// `score % 10`, progress toward the next rank.
    pub progress_in_rank: u64,
}

impl Position {
    /// Stage completion in `[0, 1]`.
    #[must_use]
    pub fn stage_progress_ratio(&self) -> f64 {
        capped_ratio(self.ranks_into_stage, self.ranks_needed_for_stage)
    }

    /// Rank completion in `[0, 1]`.
    #[must_use]
    pub fn rank_progress_ratio(&self) -> f64 {
        capped_ratio(self.progress_in_rank, POINTS_PER_RANK)
    }

    #[must_use]
    pub fn stage_name(&self) -> &'static str {
        stage_table().name(self.stage_index)
    }

    #[must_use]
    pub fn stage_label(&self) -> String {
        stage_table().label(self.stage_index)
    }

    #[must_use]
    pub fn rank_meter(&self) -> RankMeter {
        RankMeter::new(self.ranks_into_stage, self.ranks_needed_for_stage)
    }
}

/// Position of `score` against the shared stage table.
#[must_use]
pub fn position(score: u64) -> Position {
    position_in(stage_table(), score)
}

#[must_use]
pub fn position_in(table: &StageTable, score: u64) -> Position {
    let rank = score / POINTS_PER_RANK;
    let stage_index = table.stage_index_for_rank(rank);
    let ranks_before = table.ranks_before(stage_index);
    Position {
        rank,
        stage_index,
        ranks_into_stage: rank.saturating_sub(ranks_before),
        ranks_needed_for_stage: table.ranks_needed(stage_index),
        progress_in_rank: score % POINTS_PER_RANK,
    }
}

/// Star row for ranks earned within a stage: at most ten slots regardless of
/// how many ranks the stage spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankMeter {
    pub filled: u64,
    pub empty: u64,
}

impl RankMeter {
    #[must_use]
    pub fn new(ranks_into_stage: u64, ranks_needed: u64) -> Self {
        let slots = ranks_needed.min(RANK_METER_MAX_SLOTS);
        let filled = if ranks_needed == 0 {
            slots
        } else {
            let scaled = u64_to_f64(ranks_into_stage) / u64_to_f64(ranks_needed) * u64_to_f64(slots);
            round_f64_to_u64(scaled).min(slots)
        };
        Self {
            filled,
            empty: slots - filled,
        }
    }

    #[must_use]
    pub const fn slots(&self) -> u64 {
        self.filled + self.empty
    }
}

impl fmt::Display for RankMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.filled {
            f.write_str("⭐")?;
        }
        for _ in 0..self.empty {
            f.write_str("☆")?;
        }
        Ok(())
    }
}
