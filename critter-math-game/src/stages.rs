//! The 100 named stages and the rank thresholds that unlock them.
use std::sync::OnceLock;

use crate::constants::{
    STAGE_COUNT, STAGE_DELTA_BASE_STEP, STAGE_DELTA_STEP_DIVISOR, STAGE_SEED_DELTAS,
};
use crate::numbers::usize_to_u64;

/// Base creatures, roughly ordered from simplest to cleverest.
pub const CREATURES: [&str; 50] = [
    "Worm", "Snail", "Caterpillar", "Ant", "Bee", "Butterfly", "Ladybug", "Dragonfly",
    "Grasshopper", "Frog", "Fish", "Turtle", "Mouse", "Rabbit", "Squirrel", "Cat", "Dog", "Pig",
    "Goat", "Sheep", "Cow", "Horse", "Deer", "Fox", "Raccoon", "Kangaroo", "Leopard", "Tiger",
    "Lion", "Zebra", "Giraffe", "Rhino", "Hippo", "Panda", "Elephant", "Gorilla", "Orangutan",
    "Baboon", "Meerkat", "Wolf", "Bear", "Eagle", "Hawk", "Owl", "Crow", "Raven", "Parrot",
    "Octopus", "Dolphin", "Whale",
];

/// Modest adjectives for the first lap through the creatures.
pub const EARLY_ADJECTIVES: [&str; 50] = [
    "Tiny", "Slow", "Wiggly", "Busy", "Buzzing", "Fluttering", "Chirping", "Quacking", "Happy",
    "Leaping", "Friendly", "Curious", "Cheerful", "Squeaky", "Playful", "Loyal", "Sniffing",
    "Bleating", "Woolly", "Mooing", "Trotting", "Clever", "Cunning", "Graceful", "Bounding",
    "Spotted", "Roaring", "Purring", "Striped", "Tall", "Massive", "Chubby", "Gentle", "Strong",
    "Swinging", "Sneaky", "Alert", "Brave", "Bold", "Soaring", "Swift", "Wise", "Intelligent",
    "Astute", "Crafty", "Smart", "Giant", "Gigantic", "Soft", "Splendid",
];

/// Grand adjectives for the second lap.
pub const LATE_ADJECTIVES: [&str; 50] = [
    "Thoughtful", "Brilliant", "Genius", "Mastermind", "Legendary", "Mythical", "Majestic",
    "Spectacular", "Incredible", "Wondrous", "Amazing", "Fantastic", "Remarkable", "Exceptional",
    "Extraordinary", "Magnificent", "Marvelous", "Stupendous", "Phenomenal", "Astounding",
    "Astonishing", "Impressive", "Awesome", "Outstanding", "Supreme", "Ultimate", "Dynamic",
    "Fabulous", "Superb", "Terrific", "Wonderful", "Radiant", "Sparkling", "Dazzling",
    "Illustrious", "Noble", "Virtuous", "Honorable", "Eminent", "Prestigious", "Renowned",
    "Acclaimed", "Celebrated", "Famous", "Respected", "Esteemed", "Distinguished", "Visionary",
    "Sage", "Omniscient",
];

/// Named overrides applied after the table is generated: (creature, lap, name).
const NAME_OVERRIDES: [(&str, usize, &str); 2] =
    [("Owl", 0, "Wise Owl"), ("Elephant", 1, "Thoughtful Elephant")];

/// Precomputed stage names, per-stage rank deltas and cumulative thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTable {
    names: Vec<String>,
    deltas: Vec<u64>,
    thresholds: Vec<u64>,
}

impl StageTable {
    #[must_use]
    pub fn build() -> Self {
        let deltas = build_deltas();
        let thresholds = deltas
            .iter()
            .scan(0_u64, |acc, delta| {
                *acc += delta;
                Some(*acc)
            })
            .collect();
        Self {
            names: build_names(),
            deltas,
            thresholds,
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn deltas(&self) -> &[u64] {
        &self.deltas
    }

    /// Cumulative rank thresholds, strictly ascending.
    #[must_use]
    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Name of stage `index`, clamped to the final stage.
    #[must_use]
    pub fn name(&self, index: usize) -> &str {
        self.names
            .get(index.min(self.last_index()))
            .map_or("", String::as_str)
    }

    /// Number of thresholds reached by `rank`, capped at the final stage.
    #[must_use]
    pub fn stage_index_for_rank(&self, rank: u64) -> usize {
        let reached = self.thresholds.partition_point(|&threshold| threshold <= rank);
        reached.min(self.last_index())
    }

    /// Ranks required to enter `index` (0 for the first stage).
    #[must_use]
    pub fn ranks_before(&self, index: usize) -> u64 {
        index
            .checked_sub(1)
            .and_then(|prev| self.thresholds.get(prev))
            .copied()
            .unwrap_or(0)
    }

    /// Ranks spanned by stage `index`; past the table this is the last delta.
    #[must_use]
    pub fn ranks_needed(&self, index: usize) -> u64 {
        self.thresholds.get(index).map_or_else(
            || self.deltas.last().copied().unwrap_or(0),
            |threshold| threshold - self.ranks_before(index),
        )
    }

    /// `Stage N: Name`, 1-based.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        let index = index.min(self.last_index());
        format!("Stage {}: {}", index + 1, self.name(index))
    }
}

/// Shared table built on first use.
#[must_use]
pub fn stage_table() -> &'static StageTable {
    static TABLE: OnceLock<StageTable> = OnceLock::new();
    TABLE.get_or_init(StageTable::build)
}

fn build_deltas() -> Vec<u64> {
    let mut deltas = Vec::with_capacity(STAGE_COUNT);
    deltas.extend_from_slice(&STAGE_SEED_DELTAS);
    for index in deltas.len()..STAGE_COUNT {
        let prev = deltas[index - 1];
        let step = STAGE_DELTA_BASE_STEP + usize_to_u64(index / STAGE_DELTA_STEP_DIVISOR);
        deltas.push(prev + step);
    }
    deltas
}

fn build_names() -> Vec<String> {
    let laps = [EARLY_ADJECTIVES, LATE_ADJECTIVES];
    let mut names: Vec<String> = laps
        .iter()
        .flat_map(|adjectives| {
            adjectives
                .iter()
                .zip(CREATURES)
                .map(|(adjective, creature)| format!("{adjective} {creature}"))
        })
        .collect();
    for (creature, lap, name) in NAME_OVERRIDES {
        if let Some(pos) = CREATURES.iter().position(|c| *c == creature) {
            names[pos + lap * CREATURES.len()] = name.to_string();
        }
    }
    names
}
