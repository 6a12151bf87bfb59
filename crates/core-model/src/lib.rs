//! In-memory editor binding for the clipboard history core.
//!
//! `EditorView` implements [`DocumentView`] over a rope [`Buffer`] with any
//! number of selections, native copy/cut/paste, and snapshot undo. Hosts that
//! embed the history in a real editor implement the trait for their own view
//! type instead; this binding exists so the whole command flow (including
//! modification notices and undo) can be driven without one.
//!
//! Invariants (hold after every public call):
//! * Selections stay inside `[0, len_chars]` and are kept in document order.
//! * Every mutation through the trait shifts selections the way an editor
//!   does: points at or after an insertion move past it, points inside an
//!   erased range collapse to its start.
//! * Each edit group takes at most one undo snapshot (at its first mutation).
//! * `take_modified` reports whether the document text changed since the last
//!   call; the host forwards it as a modification notice.

use anyhow::Result;
use core_state::{DocumentId, DocumentView, NativeCommand, SystemClipboard};
use core_text::{Buffer, Region};
use tracing::trace;

mod clipboard;
pub mod undo;

pub use clipboard::MemoryClipboard;
use undo::UndoEngine;

/// Edit handle for one command. Groups its mutations into a single undo step.
#[derive(Debug, Default)]
pub struct EditGroup {
    snapshot_taken: bool,
    mutations: u32,
}

impl EditGroup {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn mutations(&self) -> u32 {
        self.mutations
    }
}

pub struct EditorView {
    id: DocumentId,
    buffer: Buffer,
    selections: Vec<Region>,
    undo: UndoEngine,
    modified: bool,
}

impl EditorView {
    /// New view with a single caret at the start of the document.
    pub fn new(id: DocumentId, text: &str) -> Result<Self> {
        Ok(Self {
            id,
            buffer: Buffer::from_str(format!("doc-{}", id.0), text)?,
            selections: vec![Region::caret(0)],
            undo: UndoEngine::new(),
            modified: false,
        })
    }

    pub fn contents(&self) -> String {
        self.buffer.contents()
    }

    /// Replace all selections (clamped, sorted by begin).
    pub fn set_selections(&mut self, selections: impl IntoIterator<Item = Region>) {
        let len = self.buffer.len_chars();
        let mut sels: Vec<Region> = selections
            .into_iter()
            .map(|r| Region::new(r.a.min(len), r.b.min(len)))
            .collect();
        sels.sort_by_key(|r| r.begin());
        self.selections = sels;
    }

    /// Returns whether the text changed since the previous call, clearing the flag.
    pub fn take_modified(&mut self) -> bool {
        std::mem::take(&mut self.modified)
    }

    pub fn undo(&mut self) -> bool {
        let done = self.undo.undo(&mut self.buffer, &mut self.selections);
        if done {
            self.modified = true;
        }
        done
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    fn begin_mutation(&mut self, edit: &mut EditGroup) {
        if !edit.snapshot_taken {
            self.undo.push_snapshot(&self.buffer, &self.selections);
            edit.snapshot_taken = true;
        }
        edit.mutations += 1;
        self.modified = true;
    }

    /// Text the native copy/cut would place on the clipboard, plus the ranges
    /// a cut removes. Non-empty selections win; with only carets, whole lines.
    fn copy_payload(&self) -> (String, Vec<Region>) {
        let non_empty: Vec<Region> = self
            .selections
            .iter()
            .copied()
            .filter(|s| !s.is_empty())
            .collect();
        if !non_empty.is_empty() {
            let text = non_empty
                .iter()
                .map(|s| self.buffer.substr(*s))
                .collect::<Vec<_>>()
                .join("\n");
            return (text, non_empty);
        }
        let mut lines: Vec<Region> = Vec::new();
        for s in &self.selections {
            let line = self.buffer.full_line(s.begin());
            if lines.last() != Some(&line) {
                lines.push(line);
            }
        }
        let mut text = String::new();
        for line in &lines {
            text.push_str(&self.buffer.substr(*line));
            if !text.ends_with('\n') {
                text.push('\n');
            }
        }
        (text, lines)
    }

    fn native_paste(&mut self, edit: &mut EditGroup, text: &str) {
        let mut targets = self.selections.clone();
        let pieces: Vec<&str> = text.lines().collect();
        let distribute = targets.len() > 1 && pieces.len() == targets.len();
        // Back to front so earlier offsets stay valid.
        targets.reverse();
        let count = targets.len();
        for (i, region) in targets.into_iter().enumerate() {
            let piece = if distribute { pieces[count - 1 - i] } else { text };
            self.erase(edit, region);
            self.insert(edit, region.begin(), piece);
        }
    }

    fn shift_after_insert(&mut self, offset: usize, n: usize) {
        let shift = |pt: usize| if pt >= offset { pt + n } else { pt };
        for r in &mut self.selections {
            *r = Region::new(shift(r.a), shift(r.b));
        }
    }

    fn shift_after_erase(&mut self, erased: Region) {
        let (start, end) = (erased.begin(), erased.end());
        let shift = |pt: usize| {
            if pt >= end {
                pt - (end - start)
            } else if pt > start {
                start
            } else {
                pt
            }
        };
        for r in &mut self.selections {
            *r = Region::new(shift(r.a), shift(r.b));
        }
        self.selections.dedup();
    }
}

impl DocumentView for EditorView {
    type Edit = EditGroup;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn selections(&self) -> Vec<Region> {
        self.selections.clone()
    }

    fn full_line(&self, offset: usize) -> Region {
        self.buffer.full_line(offset)
    }

    fn substr(&self, region: Region) -> String {
        self.buffer.substr(region)
    }

    fn insert(&mut self, edit: &mut EditGroup, offset: usize, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.begin_mutation(edit);
        let offset = offset.min(self.buffer.len_chars());
        let n = self.buffer.insert(offset, text);
        self.shift_after_insert(offset, n);
        trace!(target: "model.view", document = self.id.0, offset, chars = n, "view_insert");
        n
    }

    fn erase(&mut self, edit: &mut EditGroup, region: Region) {
        let len = self.buffer.len_chars();
        let region = Region::new(region.begin().min(len), region.end().min(len));
        if region.is_empty() {
            return;
        }
        self.begin_mutation(edit);
        self.buffer.erase(region);
        self.shift_after_erase(region);
        trace!(target: "model.view", document = self.id.0, start = region.begin(), chars = region.len(), "view_erase");
    }

    fn run_native_command(
        &mut self,
        edit: &mut EditGroup,
        command: NativeCommand,
        clipboard: &mut dyn SystemClipboard,
    ) -> bool {
        let mutations = edit.mutations;
        trace!(target: "model.view", document = self.id.0, command = command.as_str(), selections = self.selections.len(), "native_command");
        match command {
            NativeCommand::Copy => {
                let (text, _) = self.copy_payload();
                if !text.is_empty() {
                    clipboard.set(text);
                }
            }
            NativeCommand::Cut => {
                let (text, mut ranges) = self.copy_payload();
                if text.is_empty() {
                    return false;
                }
                clipboard.set(text);
                ranges.sort_by_key(|r| r.begin());
                for region in ranges.into_iter().rev() {
                    self.erase(edit, region);
                }
            }
            NativeCommand::Paste => {
                let text = clipboard.get();
                self.native_paste(edit, &text);
            }
        }
        edit.mutations != mutations
    }
}
