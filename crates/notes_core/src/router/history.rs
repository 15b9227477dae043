//! Session history contract and an in-process implementation.

/// Session history the router pushes to and reads the location from.
pub trait History {
    /// Path of the current entry, possibly with a query or fragment.
    fn current_path(&self) -> String;
    /// Pushes a new entry and makes it current, without rendering.
    fn push_state(&mut self, path: &str);
    /// Moves one entry back. Returns `false` at the first entry.
    fn back(&mut self) -> bool;
    /// Moves one entry forward. Returns `false` at the last entry.
    fn forward(&mut self) -> bool;
}

/// Vector-backed history with a cursor.
///
/// Pushing drops every entry after the cursor, like a browser does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_path.into()],
            cursor: 0,
        }
    }

    /// All entries, oldest first. Never empty: `new` seeds the initial path.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_state(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{History, MemoryHistory};

    #[test]
    fn push_after_back_discards_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push_state("/a");
        history.push_state("/b");
        assert!(history.back());
        history.push_state("/c");

        assert_eq!(history.entries(), ["/", "/a", "/c"]);
        assert!(!history.forward());
        assert_eq!(history.current_path(), "/c");
    }

    #[test]
    fn back_stops_at_first_entry() {
        let mut history = MemoryHistory::default();
        assert!(!history.back());
        assert_eq!(history.current_path(), "/");
        assert_eq!(history.entries(), ["/"]);
    }
}
