//! Content container the router renders into.

/// Host element whose content is replaced on every render pass.
pub trait Mount {
    fn replace_content(&mut self, markup: &str);
}

/// Keeps the last rendered markup in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryMount {
    content: String,
    renders: usize,
}

impl MemoryMount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of render passes that reached this mount.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Mount for MemoryMount {
    fn replace_content(&mut self, markup: &str) {
        self.content.clear();
        self.content.push_str(markup);
        self.renders += 1;
    }
}
