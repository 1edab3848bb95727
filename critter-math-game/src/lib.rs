//! Critter Math Game Engine
//!
//! Platform-agnostic core logic for the Critter Math arithmetic practice game.
//! This crate generates questions, grades their difficulty, awards points and
//! maps a lifetime score onto 100 named stages, without UI, audio or storage
//! dependencies. The presentation layer owns a [`PracticeSession`] and plugs
//! in its own [`ProgressStore`].

pub mod answer;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod emoji;
pub mod error;
pub mod numbers;
pub mod operation;
pub mod progression;
pub mod question;
pub mod scoring;
pub mod session;
pub mod stages;
pub mod storage;

// Re-export commonly used types
pub use answer::{is_correct, parse_answer};
pub use config::GameConfig;
pub use difficulty::{DifficultyCategory, classify, derived_quantity};
pub use emoji::{EMOJI_PALETTE, pick_emoji, pick_emoji_pair};
pub use error::{AnswerError, ConfigError, ParseCategoryError, ParseOperationError};
pub use operation::Operation;
pub use progression::{Position, RankMeter, position, position_in};
pub use question::{Question, generate_operands};
pub use scoring::{ScoringTable, points_for};
pub use session::{AnswerOutcome, IllustratedQuestion, PracticeSession, SessionStats};
pub use stages::{StageTable, stage_table};
pub use storage::{MemoryStore, NullStore, ProgressStore, SavedProgress};
