//! Capabilities the history core consumes from its host editor.
//!
//! The core never talks to a concrete editor. A host binding implements
//! [`DocumentView`] for its document type and [`SystemClipboard`] for the OS
//! clipboard; `core-model` provides in-memory implementations of both.

use core_text::Region;

/// Opaque identifier, stable for the lifetime of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Host operations the core delegates instead of reimplementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeCommand {
    Copy,
    Cut,
    /// Also covers multi-region paste: the host decides how to spread the
    /// clipboard over its selections.
    Paste,
}

impl NativeCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            NativeCommand::Copy => "copy",
            NativeCommand::Cut => "cut",
            NativeCommand::Paste => "paste",
        }
    }
}

/// Plain-text system clipboard.
pub trait SystemClipboard {
    fn get(&self) -> String;
    fn set(&mut self, text: String);
}

/// A document as seen through one editor view.
///
/// `Edit` is the host's edit handle: every mutation performed during one
/// command goes through the same handle so the host can group them (e.g. into
/// a single undo step).
pub trait DocumentView {
    type Edit;

    fn id(&self) -> DocumentId;
    /// Current selections in document order.
    fn selections(&self) -> Vec<Region>;
    /// Line containing `offset`, including its trailing line break.
    fn full_line(&self, offset: usize) -> Region;
    fn substr(&self, region: Region) -> String;
    /// Insert `text` at `offset`, returning the number of offsets inserted.
    fn insert(&mut self, edit: &mut Self::Edit, offset: usize, text: &str) -> usize;
    fn erase(&mut self, edit: &mut Self::Edit, region: Region);
    /// Run the host's own copy/cut/paste. Returns whether the document text
    /// changed (a cut with nothing under the carets edits nothing).
    fn run_native_command(
        &mut self,
        edit: &mut Self::Edit,
        command: NativeCommand,
        clipboard: &mut dyn SystemClipboard,
    ) -> bool;
}

/// True when `s` has at least one char and every char is whitespace.
pub fn is_blank(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_whitespace)
}

/// Whether the current selections copy a fragment from the middle of a line.
///
/// A non-empty selection counts as partial when the text between the start of
/// its line and the selection start holds any non-whitespace char. Empty
/// selections (whole-line copies) never do.
pub fn classify_partial<V: DocumentView + ?Sized>(view: &V) -> bool {
    view.selections().iter().filter(|s| !s.is_empty()).any(|s| {
        let line_start = view.full_line(s.begin()).begin();
        let prefix = view.substr(Region::new(line_start, s.begin()));
        prefix.chars().any(|c| !c.is_whitespace())
    })
}

/// Normalized anchor offsets used to decide whether a cut may merge.
///
/// Empty selections anchor at the start of their line so that repeated
/// whole-line kills from a collapsed caret keep the same anchor.
pub fn kill_points<V: DocumentView + ?Sized>(view: &V) -> Vec<usize> {
    view.selections()
        .iter()
        .map(|s| {
            if s.is_empty() {
                view.full_line(s.begin()).begin()
            } else {
                s.begin()
            }
        })
        .collect()
}
