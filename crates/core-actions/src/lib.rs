//! Clipboard-history commands and the insertion engine.
//!
//! Commands mirror what a host binds to its copy/cut/paste keys:
//! * `Copy` / `Cut`: classify the selections as partial or whole-line, run the
//!   host's native command, then record the clipboard text in the history.
//! * `Paste`: re-insert the newest entry, unless the OS clipboard no longer
//!   matches it (something outside changed it), in which case the host's
//!   native paste runs and the history is not consulted.
//! * `PasteChoice`: list entry previews through a [`Chooser`] and insert the
//!   picked one.
//! * `Modified`: forward the host's document-changed notification.

pub mod dispatcher;
pub mod insert;

pub use dispatcher::{CommandContext, DispatchResult, dispatch};
pub use insert::{InsertOutcome, InsertionEngine, PREVIEW_CHARS_DEFAULT};

/// Host-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Copy,
    Cut,
    Paste,
    PasteChoice,
    /// The document changed (any cause).
    Modified,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Cut => "cut",
            Action::Paste => "paste",
            Action::PasteChoice => "paste_choice",
            Action::Modified => "modified",
        }
    }
}

/// Picker UI for `PasteChoice`. Returns the chosen row, or `None` when the
/// user dismisses it.
pub trait Chooser {
    fn choose(&mut self, items: &[String]) -> Option<usize>;
}

impl<F> Chooser for F
where
    F: FnMut(&[String]) -> Option<usize>,
{
    fn choose(&mut self, items: &[String]) -> Option<usize> {
        self(items)
    }
}
