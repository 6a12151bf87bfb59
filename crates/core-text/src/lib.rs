//! Rope-based text buffer and region primitives.
//!
//! All offsets exposed here are *char* indices into the rope (not bytes), the
//! same unit the history and insertion layers use for selection anchors. Lines
//! are `\n` terminated; callers normalize other line endings before loading.

use anyhow::Result;
use ropey::Rope;

/// A selection-like span of char offsets.
///
/// `a` is where the span was anchored and `b` is where the caret sits, so `a`
/// may be greater than `b` for a backwards selection. `begin()`/`end()` give
/// the ordered bounds of the half-open range `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub a: usize,
    pub b: usize,
}

impl Region {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Empty region (a caret) at `pt`.
    pub fn caret(pt: usize) -> Self {
        Self { a: pt, b: pt }
    }

    pub fn begin(&self) -> usize {
        self.a.min(self.b)
    }

    pub fn end(&self) -> usize {
        self.a.max(self.b)
    }

    pub fn is_empty(&self) -> bool {
        self.a == self.b
    }

    pub fn len(&self) -> usize {
        self.end() - self.begin()
    }
}

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Total number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Return the requested line as an owned `String` (including trailing newline if present).
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx).to_string())
        } else {
            None
        }
    }

    /// Whole buffer contents.
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.rope.len_chars())
    }

    /// Region covering the line that contains `offset`, including its trailing
    /// newline when one exists. Offsets past the end resolve to the last line.
    pub fn full_line(&self, offset: usize) -> Region {
        let offset = self.clamp(offset);
        let line_idx = self.rope.char_to_line(offset);
        let start = self.rope.line_to_char(line_idx);
        // line_to_char accepts len_lines() and yields len_chars() there.
        let end = self.rope.line_to_char(line_idx + 1);
        Region::new(start, end)
    }

    /// Text covered by `region` (clamped to the buffer).
    pub fn substr(&self, region: Region) -> String {
        let start = self.clamp(region.begin());
        let end = self.clamp(region.end());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Insert `text` at char `offset` (clamped). Returns the number of chars inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let at = self.clamp(offset);
        self.rope.insert(at, text);
        text.chars().count()
    }

    /// Remove the chars covered by `region` (clamped).
    /// Returns the removed text for clipboard / undo integration.
    pub fn erase(&mut self, region: Region) -> String {
        let start = self.clamp(region.begin());
        let end = self.clamp(region.end());
        if start >= end {
            return String::new();
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }
}
