/// The host's addressable location (the URL and its fragment).
pub trait Location {
    fn current_address(&self) -> String;
    /// Adds a history entry without reloading.
    fn push_address(&mut self, address: &str);
    /// Rewrites the current entry in place.
    fn replace_address(&mut self, address: &str);
}

/// In-memory history stack with browser-style back/forward.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl Location for MemoryHistory {
    fn current_address(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_address(&mut self, address: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(address.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn replace_address(&mut self, address: &str) {
        self.entries[self.cursor] = address.to_string();
    }
}
