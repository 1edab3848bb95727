//! Centralized tuning constants for Critter Math game logic.
//!
//! These values define the deterministic math for question generation,
//! difficulty buckets and stage progression. Keeping them together ensures
//! that pacing can only be adjusted via code changes reviewed in version
//! control, rather than through external JSON assets.

// Operand ranges -----------------------------------------------------------
pub(crate) const ADDITION_OPERAND_MAX: u32 = 30;
pub(crate) const SUBTRACTION_OPERAND_MAX: u32 = 30;
pub(crate) const MULTIPLICATION_OPERAND_MAX: u32 = 10;
pub(crate) const DIVISION_DIVISOR_MIN: u32 = 1;
pub(crate) const DIVISION_DIVISOR_MAX: u32 = 10;
pub(crate) const DIVISION_QUOTIENT_MIN: u32 = 1;
pub(crate) const DIVISION_QUOTIENT_MAX: u32 = 10;

// Difficulty buckets (inclusive upper bounds) ------------------------------
pub(crate) const ADDITION_BOUNDS: [u32; 6] = [5, 8, 12, 16, 20, 25];
pub(crate) const SUBTRACTION_BOUNDS: [u32; 6] = [5, 8, 12, 16, 20, 25];
pub(crate) const MULTIPLICATION_BOUNDS: [u32; 6] = [10, 20, 30, 40, 50, 60];
pub(crate) const DIVISION_BOUNDS: [u32; 6] = [2, 3, 4, 5, 6, 7];

// Progression --------------------------------------------------------------
/// Points needed for one rank.
pub const POINTS_PER_RANK: u64 = 10;
/// Number of named stages.
pub const STAGE_COUNT: usize = 100;
pub(crate) const STAGE_SEED_DELTAS: [u64; 6] = [3, 5, 10, 15, 22, 28];
pub(crate) const STAGE_DELTA_BASE_STEP: u64 = 6;
pub(crate) const STAGE_DELTA_STEP_DIVISOR: usize = 5;
pub(crate) const RANK_METER_MAX_SLOTS: u64 = 10;

// Answers ------------------------------------------------------------------
/// Absolute tolerance used when comparing a submitted answer.
pub const ANSWER_TOLERANCE: f64 = 1e-4;
pub(crate) const FALLBACK_POINTS: u32 = 1;

// Log targets --------------------------------------------------------------
pub(crate) const LOG_TARGET_SESSION: &str = "critter_math::session";
pub(crate) const LOG_TARGET_STORE: &str = "critter_math::store";
