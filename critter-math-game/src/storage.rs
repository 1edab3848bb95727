//! Persistence collaborator seam.
//!
//! The engine never touches storage directly: a [`ProgressStore`] is handed to
//! the session, which reads it once at start-up and writes it after every
//! change. Store failures are the store's problem; the session logs and moves on.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use crate::operation::Operation;

/// Snapshot written after every score or operation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedProgress {
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: u64,
    /// Stored as the operator symbol; names are accepted on load.
    #[serde(
        default,
        serialize_with = "operation_symbol",
        deserialize_with = "lenient_operation"
    )]
    pub operation: Operation,
}

impl SavedProgress {
    #[must_use]
    pub const fn new(score: u64, operation: Operation) -> Self {
        Self { score, operation }
    }

    /// Parse a stored document. A field that cannot be read takes its
    /// default without affecting the other; a document that is not a JSON
    /// object is a fresh start.
    #[must_use]
    pub fn from_json_lenient(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }
}

fn operation_symbol<S>(operation: &Operation, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(operation.symbol())
}

fn lenient_score<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw.as_u64().unwrap_or_default())
}

fn lenient_operation<'de, D>(deserializer: D) -> Result<Operation, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .map(Operation::from_symbol_lenient)
        .unwrap_or_default())
}

/// Trait for abstracting save/load of player progress.
/// Platform-specific implementations should provide this.
pub trait ProgressStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the previous session's progress, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<SavedProgress>, Self::Error>;

    /// Persist the current progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, progress: &SavedProgress) -> Result<(), Self::Error>;
}

/// Store that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl ProgressStore for NullStore {
    type Error = Infallible;

    fn load(&self) -> Result<Option<SavedProgress>, Self::Error> {
        Ok(None)
    }

    fn save(&self, _progress: &SavedProgress) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// In-process store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<SavedProgress>>>,
    writes: Rc<RefCell<usize>>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_progress(progress: SavedProgress) -> Self {
        let store = Self::default();
        store.slot.replace(Some(progress));
        store
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<SavedProgress> {
        *self.slot.borrow()
    }

    /// Number of saves received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl ProgressStore for MemoryStore {
    type Error = Infallible;

    fn load(&self) -> Result<Option<SavedProgress>, Self::Error> {
        Ok(self.snapshot())
    }

    fn save(&self, progress: &SavedProgress) -> Result<(), Self::Error> {
        self.slot.replace(Some(*progress));
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_operation_restores_as_addition() {
        let saved = SavedProgress::from_json_lenient(r#"{"score": 42, "operation": "%"}"#);
        assert_eq!(saved, SavedProgress::new(42, Operation::Addition));
        let saved = SavedProgress::from_json_lenient(r#"{"score": 5, "operation": "÷"}"#);
        assert_eq!(saved.operation, Operation::Division);
    }

    #[test]
    fn corrupt_operation_keeps_score() {
        let saved = SavedProgress::from_json_lenient(r#"{"score": 420, "operation": 3}"#);
        assert_eq!(saved, SavedProgress::new(420, Operation::Addition));
        let saved = SavedProgress::from_json_lenient(r#"{"score": 7, "operation": null}"#);
        assert_eq!(saved, SavedProgress::new(7, Operation::Addition));
    }

    #[test]
    fn corrupt_score_keeps_operation() {
        let saved = SavedProgress::from_json_lenient(r#"{"score": "lots", "operation": "÷"}"#);
        assert_eq!(saved, SavedProgress::new(0, Operation::Division));
        let saved = SavedProgress::from_json_lenient(r#"{"score": 1.5, "operation": "multiplication"}"#);
        assert_eq!(saved, SavedProgress::new(0, Operation::Multiplication));
    }

    #[test]
    fn garbage_restores_fresh_progress() {
        assert_eq!(SavedProgress::from_json_lenient("nope"), SavedProgress::default());
        assert_eq!(
            SavedProgress::from_json_lenient(r#"{"score": -4}"#),
            SavedProgress::default()
        );
        assert_eq!(SavedProgress::from_json_lenient("{}"), SavedProgress::default());
    }

    #[test]
    fn memory_store_shares_slot_between_clones() {
        let store = MemoryStore::default();
        let handle = store.clone();
        store.save(&SavedProgress::new(9, Operation::Subtraction)).unwrap();
        assert_eq!(handle.load().unwrap(), Some(SavedProgress::new(9, Operation::Subtraction)));
        assert_eq!(handle.write_count(), 1);
    }
}
