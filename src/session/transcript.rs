//! In-memory transcript store.
//!
//! The store owns the ordered turn log and is the single source of truth for
//! rendering. Insertion order is display order; turns are never reordered or
//! deduplicated. The store performs no I/O — persistence is owned by the
//! controller so all side effects flow through one place.

use super::types::Turn;

/// Append-only log of turns, restorable wholesale at startup.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    turns: Vec<Turn>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Add a turn at the end. Append order equals call order.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Replace the whole transcript. Used only when loading a persisted
    /// session at startup.
    pub fn restore(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    /// Read-only ordered view for rendering.
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut store = TranscriptStore::new();
        store.append(Turn::user_text("first"));
        store.append(Turn::assistant("second"));
        store.append(Turn::user_text("third"));

        let view = store.snapshot();
        assert_eq!(view.len(), 3);
        assert_eq!(view[0].text.as_deref(), Some("first"));
        assert_eq!(view[1].text.as_deref(), Some("second"));
        assert_eq!(view[2].text.as_deref(), Some("third"));
    }

    #[test]
    fn restore_replaces_wholesale() {
        let mut store = TranscriptStore::new();
        store.append(Turn::user_text("stale"));

        store.restore(vec![Turn::user_text("a"), Turn::assistant("b")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[0].text.as_deref(), Some("a"));
    }

    #[test]
    fn new_store_is_empty() {
        let store = TranscriptStore::new();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
