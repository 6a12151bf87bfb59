//! Partial-copy classification and anchor normalization against a stub view.

use core_state::{DocumentId, DocumentView, NativeCommand, SystemClipboard, classify_partial, kill_points};
use core_text::{Buffer, Region};

struct StubView {
    buffer: Buffer,
    selections: Vec<Region>,
}

impl StubView {
    fn new(text: &str, selections: &[Region]) -> Self {
        Self {
            buffer: Buffer::from_str("stub", text).unwrap(),
            selections: selections.to_vec(),
        }
    }
}

impl DocumentView for StubView {
    type Edit = ();

    fn id(&self) -> DocumentId {
        DocumentId(7)
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
    fn insert(&mut self, _edit: &mut (), offset: usize, text: &str) -> usize {
        self.buffer.insert(offset, text)
    }
    fn erase(&mut self, _edit: &mut (), region: Region) {
        self.buffer.erase(region);
    }
    fn run_native_command(&mut self, _edit: &mut (), _command: NativeCommand, _clipboard: &mut dyn SystemClipboard) -> bool {
        false
    }
}

const TEXT: &str = "fn main() {\n    let x = 1;\n}\n";

#[test]
fn selection_from_line_start_is_not_partial() {
    let v = StubView::new(TEXT, &[Region::new(12, 27)]);
    assert!(!classify_partial(&v));
}

#[test]
fn selection_after_indentation_is_not_partial() {
    // "    let" : selection starts after the 4 spaces
    let v = StubView::new(TEXT, &[Region::new(16, 27)]);
    assert!(!classify_partial(&v));
}

#[test]
fn selection_mid_line_is_partial() {
    // starts at "x"
    let v = StubView::new(TEXT, &[Region::new(20, 21)]);
    assert!(classify_partial(&v));
}

#[test]
fn backwards_selection_uses_its_begin() {
    let v = StubView::new(TEXT, &[Region::new(27, 16)]);
    assert!(!classify_partial(&v));
}

#[test]
fn empty_selections_never_partial() {
    let v = StubView::new(TEXT, &[Region::caret(20), Region::caret(5)]);
    assert!(!classify_partial(&v));
}

#[test]
fn any_partial_selection_marks_copy_partial() {
    let v = StubView::new(TEXT, &[Region::new(12, 16), Region::new(3, 7)]);
    assert!(classify_partial(&v));
}

#[test]
fn kill_points_anchor_carets_at_line_start() {
    let v = StubView::new(TEXT, &[Region::caret(3), Region::new(21, 18), Region::caret(25)]);
    assert_eq!(kill_points(&v), vec![0, 18, 12]);
}
