#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, Chooser, CommandContext, DispatchResult, InsertOutcome, InsertionEngine, dispatch};
use core_model::{EditGroup, EditorView, MemoryClipboard};
use core_state::{DocumentId, HistoryBuffer, HistoryError};
use core_text::Region;

pub const DOC: DocumentId = DocumentId(1);

/// One document, one history, one clipboard. Modification notices are
/// forwarded after every command the way a host event loop would.
pub struct Harness {
    pub history: HistoryBuffer,
    pub engine: InsertionEngine,
    pub view: EditorView,
    pub clipboard: MemoryClipboard,
}

impl Harness {
    pub fn new(text: &str) -> Self {
        Self {
            history: HistoryBuffer::new(),
            engine: InsertionEngine::new(),
            view: EditorView::new(DOC, text).unwrap(),
            clipboard: MemoryClipboard::default(),
        }
    }

    pub fn select(&mut self, selections: &[Region]) {
        self.view.set_selections(selections.iter().copied());
    }

    pub fn caret(&mut self, pt: usize) {
        self.select(&[Region::caret(pt)]);
    }

    pub fn run(&mut self, action: Action) -> DispatchResult {
        let mut dismiss = |_: &[String]| -> Option<usize> { None };
        self.run_with(action, &mut dismiss)
    }

    pub fn run_with(&mut self, action: Action, chooser: &mut dyn Chooser) -> DispatchResult {
        let mut edit = EditGroup::new();
        let result = {
            let mut ctx = CommandContext {
                history: &mut self.history,
                engine: &self.engine,
                view: &mut self.view,
                edit: &mut edit,
                clipboard: &mut self.clipboard,
            };
            dispatch(action, &mut ctx, chooser)
        };
        self.flush_modified();
        result
    }

    /// Direct engine call (bypasses top-level paste dispatch).
    pub fn insert(&mut self, index: Option<usize>) -> Result<InsertOutcome, HistoryError> {
        let mut edit = EditGroup::new();
        let result = self.engine.insert(
            &mut self.history,
            &mut self.view,
            &mut edit,
            &mut self.clipboard,
            index,
        );
        self.flush_modified();
        result
    }

    pub fn flush_modified(&mut self) {
        if self.view.take_modified() {
            self.history.on_external_modification_notice();
        }
    }

    pub fn undo(&mut self) {
        self.view.undo();
        self.flush_modified();
    }

    pub fn text(&self) -> String {
        self.view.contents()
    }

    pub fn entries(&self) -> Vec<String> {
        self.history.entries().map(|e| e.text.clone()).collect()
    }
}
