use core_state::SystemClipboard;
use tracing::trace;

/// Process-local clipboard used when no OS clipboard is wired in (tests,
/// headless hosts).
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    content: String,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
        }
    }
}

impl SystemClipboard for MemoryClipboard {
    fn get(&self) -> String {
        self.content.clone()
    }

    fn set(&mut self, text: String) {
        trace!(target: "model.clipboard", bytes = text.len(), "clipboard_set");
        self.content = text;
    }
}
