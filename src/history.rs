// history.rs

use crate::storage::{Store, HISTORY_KEY};

/// Command history with a recall cursor.
///
/// The cursor ranges over `[0, len]`; `len` means "not recalling, editing a
/// fresh line". Entries are persisted on every append and never pruned.
pub struct History {
    entries: Vec<String>,
    cursor: usize,
    store: Store,
}

impl History {
    /// Loads persisted history. Missing or malformed state yields an empty
    /// list rather than an error.
    pub fn load(store: Store) -> Self {
        let entries: Vec<String> = store.get(HISTORY_KEY);
        let cursor = entries.len();
        Self { entries, cursor, store }
    }

    pub fn append(&mut self, command: &str) {
        if command.is_empty() {
            return;
        }
        self.entries.push(command.to_string());
        self.cursor = self.entries.len();
        self.store.set(HISTORY_KEY, &self.entries);
    }

    /// Moves the cursor back one entry, clamped at the oldest.
    pub fn recall_previous(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Moves the cursor forward one entry. `None` signals "past the end":
    /// the caller should show a fresh empty line.
    pub fn recall_next(&mut self) -> Option<String> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.entries.get(self.cursor).cloned()
        } else {
            self.cursor = self.entries.len();
            None
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn fresh(dir: &TempDir) -> History {
        History::load(Store::new(dir.path().join("state.json")))
    }

    #[test]
    fn recall_walks_backwards_then_forwards() {
        let dir = TempDir::new().unwrap();
        let mut history = fresh(&dir);
        history.append("a");
        history.append("b");
        history.append("c");

        assert_eq!(history.recall_previous().as_deref(), Some("c"));
        assert_eq!(history.recall_previous().as_deref(), Some("b"));
        assert_eq!(history.recall_previous().as_deref(), Some("a"));
        // clamped at the oldest entry
        assert_eq!(history.recall_previous(), None);

        assert_eq!(history.recall_next().as_deref(), Some("b"));
        assert_eq!(history.recall_next().as_deref(), Some("c"));
        // past the end: fresh line
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.recall_next(), None);
    }

    #[test]
    fn recall_on_empty_history_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut history = fresh(&dir);
        assert_eq!(history.recall_previous(), None);
        assert_eq!(history.recall_next(), None);
    }

    #[test]
    fn empty_commands_are_never_recorded() {
        let dir = TempDir::new().unwrap();
        let mut history = fresh(&dir);
        history.append("");
        assert!(history.is_empty());
    }

    #[test]
    fn append_resets_the_cursor() {
        let dir = TempDir::new().unwrap();
        let mut history = fresh(&dir);
        history.append("a");
        history.append("b");
        assert_eq!(history.recall_previous().as_deref(), Some("b"));
        assert_eq!(history.recall_previous().as_deref(), Some("a"));
        history.append("c");
        assert_eq!(history.recall_previous().as_deref(), Some("c"));
    }

    #[test]
    fn history_survives_reload() {
        let dir = TempDir::new().unwrap();
        let mut history = fresh(&dir);
        history.append("ls");
        history.append("pwd");
        drop(history);

        let mut reloaded = fresh(&dir);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.recall_previous().as_deref(), Some("pwd"));
    }

    #[test]
    fn malformed_state_file_yields_empty_history() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("state.json"), "][ definitely not json").unwrap();
        let history = fresh(&dir);
        assert!(history.is_empty());
    }
}
