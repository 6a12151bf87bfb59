use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, trace};

use crate::HistoryMetrics;
use crate::view::{DocumentId, DocumentView, SystemClipboard, kill_points};

/// Number of entries retained when no capacity is configured.
pub const HISTORY_CAPACITY_DEFAULT: usize = 16;

/// One captured fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Original, untrimmed text.
    pub text: String,
    /// Copied from the middle of a line; re-inserted literally, never as whole lines.
    pub partial: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("clipboard history is empty (requested index {index})")]
    IndexUnavailable { index: usize },
}

/// What `add` did with the incoming fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended to the most recent entry (open append session).
    Merged,
    /// Stored as a new front entry.
    Pushed,
    /// Whitespace-only fragment, history unchanged.
    Rejected,
}

/// Append session state. Either closed, or open on one document with the
/// anchors recorded when its front entry was created.
#[derive(Debug, Clone, Default)]
struct AppendSession {
    document: Option<DocumentId>,
    anchors: Vec<usize>,
}

impl AppendSession {
    fn is_open(&self) -> bool {
        self.document.is_some()
    }

    fn close(&mut self) {
        self.document = None;
        self.anchors.clear();
    }
}

/// Bounded, most-recent-first history of cut/copied fragments.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    session: AppendSession,
    expect_self_modification: bool,
    metrics: HistoryMetrics,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY_DEFAULT)
    }

    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
            session: AppendSession::default(),
            expect_self_modification: false,
            metrics: HistoryMetrics::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
    pub fn front(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }
    pub fn metrics(&self) -> &HistoryMetrics {
        &self.metrics
    }

    pub fn is_session_open(&self) -> bool {
        self.session.is_open()
    }
    pub fn session_document(&self) -> Option<DocumentId> {
        self.session.document
    }
    pub fn session_anchors(&self) -> &[usize] {
        &self.session.anchors
    }

    pub fn expect_self_modification(&self) -> bool {
        self.expect_self_modification
    }
    /// Mark the next modification notice as caused by our own edit.
    pub fn set_expect_self_modification(&mut self) {
        self.expect_self_modification = true;
    }

    /// Record a cut or copy whose anchors were already normalized
    /// (see [`kill_points`]).
    ///
    /// A cut on the session's document with unchanged anchors extends the
    /// front entry and mirrors the result to `clipboard`. Anything else
    /// closes the session first; a successful cut then opens a new one.
    pub fn add<C: SystemClipboard + ?Sized>(
        &mut self,
        clipboard: &mut C,
        document: DocumentId,
        anchors: Vec<usize>,
        text: &str,
        cut: bool,
        partial: bool,
    ) -> AddOutcome {
        if self.session.document != Some(document) || !cut {
            self.close_session();
        }

        if self.session.is_open()
            && anchors == self.session.anchors
            && let Some(front) = self.entries.front_mut()
        {
            front.text.push_str(text);
            clipboard.set(front.text.clone());
            self.metrics.note_merge();
            debug!(
                target: "state.history",
                document = document.0,
                appended_bytes = text.len(),
                total_bytes = front.text.len(),
                "history_merge"
            );
            return AddOutcome::Merged;
        }

        if !self.push(text, partial) {
            return AddOutcome::Rejected;
        }
        if cut {
            trace!(target: "state.history", document = document.0, anchors = anchors.len(), "session_open");
            self.session.document = Some(document);
            self.session.anchors = anchors;
        }
        AddOutcome::Pushed
    }

    /// [`HistoryBuffer::add`] with document id and anchors taken from `view`.
    pub fn add_from_view<V, C>(
        &mut self,
        view: &V,
        clipboard: &mut C,
        text: &str,
        cut: bool,
        partial: bool,
    ) -> AddOutcome
    where
        V: DocumentView + ?Sized,
        C: SystemClipboard + ?Sized,
    {
        let anchors = kill_points(view);
        self.add(clipboard, view.id(), anchors, text, cut, partial)
    }

    /// Store `text` as the newest entry. Whitespace-only fragments are refused
    /// (returns false, entries untouched); the stored text keeps its whitespace.
    pub fn push(&mut self, text: &str, partial: bool) -> bool {
        if text.trim().is_empty() {
            self.metrics.note_rejected();
            trace!(target: "state.history", bytes = text.len(), "push_rejected_blank");
            return false;
        }
        self.entries.push_front(HistoryEntry {
            text: text.to_string(),
            partial,
        });
        let evicted = if self.entries.len() > self.capacity {
            self.entries.pop_back();
            true
        } else {
            false
        };
        self.metrics.note_push(evicted);
        debug!(
            target: "state.history",
            bytes = text.len(),
            partial,
            len = self.entries.len(),
            evicted,
            "history_push"
        );
        true
    }

    /// Close the append session without touching entries. Runs before every
    /// insertion so a paste never lets the next cut merge.
    pub fn seal(&mut self) {
        if self.session.is_open() {
            trace!(target: "state.history", "session_sealed");
        }
        self.close_session();
    }

    /// Entry at `index`, wrapping modulo capacity (cyclic picker semantics).
    /// A slot past the populated length wraps again by length.
    pub fn get(&self, index: usize) -> Result<&HistoryEntry, HistoryError> {
        if self.entries.is_empty() {
            return Err(HistoryError::IndexUnavailable { index });
        }
        let mut slot = index % self.capacity;
        if slot >= self.entries.len() {
            slot %= self.entries.len();
        }
        Ok(&self.entries[slot])
    }

    /// Host hook: the document changed. Unexpected changes (undo, typing)
    /// invalidate the session; the expectation flag is consumed either way.
    pub fn on_external_modification_notice(&mut self) {
        if !self.expect_self_modification {
            if self.session.is_open() {
                self.metrics.note_external_invalidation();
                trace!(target: "state.history", "session_invalidated_external_edit");
            }
            self.close_session();
        }
        self.expect_self_modification = false;
    }

    fn close_session(&mut self) {
        self.session.close();
    }
}
