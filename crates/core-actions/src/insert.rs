//! Context-sensitive re-insertion of history entries.
//!
//! Routing for a single selection `s` and entry `e`:
//! * Literal: `e.text` has no line break, or `s` is non-empty, or `e.partial`.
//!   The text replaces the selection (plain insert at a caret).
//! * Whole line: otherwise. The text lands at the start of the caret's line so
//!   the current line is never split. When that line has content and the text
//!   does not already end in a line break (optionally followed by whitespace),
//!   one `\n` is appended so the original line stays on its own line.
//!
//! With several selections the host's native paste does the work; spreading a
//! history entry over multiple carets has no line-aware rule here.

use core_state::{
    DocumentView, HistoryBuffer, HistoryError, NativeCommand, SystemClipboard, is_blank,
};
use core_text::Region;
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

/// Default preview length (grapheme clusters) for chooser rows.
pub const PREVIEW_CHARS_DEFAULT: usize = 100;

/// How an insert request was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No index supplied (chooser dismissed) or no selection to insert at.
    Skipped,
    /// More than one selection: handed to the host's native paste.
    Delegated,
    Literal,
    WholeLine,
}

#[derive(Debug, Clone)]
pub struct InsertionEngine {
    preview_chars: usize,
}

impl Default for InsertionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertionEngine {
    pub fn new() -> Self {
        Self::with_preview_chars(PREVIEW_CHARS_DEFAULT)
    }

    pub fn with_preview_chars(preview_chars: usize) -> Self {
        Self { preview_chars }
    }

    /// Insert history entry `index` at the view's selections and mirror it to
    /// the clipboard. `None` is the dismissed-chooser sentinel and does nothing.
    ///
    /// # Errors
    /// `HistoryError::IndexUnavailable` when the history is empty; callers
    /// normally check `is_empty()` first.
    pub fn insert<V: DocumentView + ?Sized>(
        &self,
        history: &mut HistoryBuffer,
        view: &mut V,
        edit: &mut V::Edit,
        clipboard: &mut dyn SystemClipboard,
        index: Option<usize>,
    ) -> Result<InsertOutcome, HistoryError> {
        let Some(index) = index else {
            trace!(target: "actions.insert", "insert_dismissed");
            return Ok(InsertOutcome::Skipped);
        };

        // A paste never feeds the append session.
        history.seal();

        let mut regions = view.selections();
        regions.reverse();

        let entry = history.get(index)?;
        let (text, partial) = (entry.text.clone(), entry.partial);
        clipboard.set(text.clone());

        if regions.len() > 1 {
            debug!(target: "actions.insert", index, regions = regions.len(), "insert_delegated_multi_region");
            view.run_native_command(edit, NativeCommand::Paste, clipboard);
            return Ok(InsertOutcome::Delegated);
        }
        let Some(s) = regions.first().copied() else {
            return Ok(InsertOutcome::Skipped);
        };

        let outcome = if !text.contains('\n') || !s.is_empty() || partial {
            let n = view.insert(edit, s.begin(), &text);
            view.erase(edit, Region::new(s.begin() + n, s.end() + n));
            InsertOutcome::Literal
        } else {
            let line = view.full_line(s.begin());
            let mut text = text;
            if !is_blank(&view.substr(line)) && !ends_with_line_break(&text) {
                text.push('\n');
            }
            view.insert(edit, line.begin(), &text);
            InsertOutcome::WholeLine
        };
        history.set_expect_self_modification();
        debug!(
            target: "actions.insert",
            index,
            partial,
            replaced = s.len(),
            route = ?outcome,
            "insert_applied"
        );
        Ok(outcome)
    }

    /// Chooser rows for every entry, newest first: trimmed and capped.
    pub fn choose(&self, history: &HistoryBuffer) -> Vec<String> {
        history
            .entries()
            .map(|e| e.text.trim().graphemes(true).take(self.preview_chars).collect())
            .collect()
    }
}

/// True when `text` ends with a line break followed only by whitespace.
fn ends_with_line_break(text: &str) -> bool {
    text[text.trim_end().len()..].contains('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_line_break_detection() {
        assert!(ends_with_line_break("a\n"));
        assert!(ends_with_line_break("a\n  \t"));
        assert!(ends_with_line_break("\n"));
        assert!(!ends_with_line_break("a\nb"));
        assert!(!ends_with_line_break("a  "));
        assert!(!ends_with_line_break(""));
    }

    #[test]
    fn previews_are_trimmed_and_capped() {
        let mut h = HistoryBuffer::new();
        h.push("  first\n", false);
        h.push(&"x".repeat(150), false);
        let engine = InsertionEngine::new();
        let rows = engine.choose(&h);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 100);
        assert_eq!(rows[1], "first");
    }

    #[test]
    fn preview_cap_counts_graphemes() {
        let mut h = HistoryBuffer::new();
        h.push("e\u{301}e\u{301}e\u{301}", false);
        let rows = InsertionEngine::with_preview_chars(2).choose(&h);
        assert_eq!(rows[0], "e\u{301}e\u{301}");
    }
}
