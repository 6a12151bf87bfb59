//! Clipboard history state: bounded entry buffer, append sessions, and the
//! capabilities the core consumes from a host editor.
//!
//! Append sessions:
//! - A successful *cut* opens a session recording the document id and the
//!   normalized anchor offsets of the selections it was cut from.
//! - A later cut on the same document whose anchors are unchanged appends to
//!   the front entry instead of pushing a new one. Repeated whole-line kills
//!   from a collapsed caret therefore accumulate into one entry.
//! - Copies, cuts elsewhere, pastes (`seal`) and unexpected document
//!   modifications (undo, typing) close the session.
//!
//! Self-modification flag:
//! - Edits issued by the history layer itself (a cut, an insertion) set
//!   `expect_self_modification` so the host's next modification notice does
//!   not close the session. The flag is consumed by that notice.
//!
//! Single-threaded by contract: one `HistoryBuffer` per host, owned by the
//! host integration layer and passed by `&mut` into every command.

pub mod history;
pub mod view;

pub use history::{AddOutcome, HISTORY_CAPACITY_DEFAULT, HistoryBuffer, HistoryEntry, HistoryError};
pub use view::{
    DocumentId, DocumentView, NativeCommand, SystemClipboard, classify_partial, is_blank,
    kill_points,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryMetricsSnapshot {
    pub pushes: u64,
    pub merges: u64,
    pub rejected: u64,
    pub evictions: u64,
    pub external_invalidations: u64,
}

// Plain counters: mutated on the command thread only.
#[derive(Debug, Default, Clone)]
pub struct HistoryMetrics {
    pushes: u64,
    merges: u64,
    rejected: u64,
    evictions: u64,
    external_invalidations: u64,
}

impl HistoryMetrics {
    pub fn snapshot(&self) -> HistoryMetricsSnapshot {
        HistoryMetricsSnapshot {
            pushes: self.pushes,
            merges: self.merges,
            rejected: self.rejected,
            evictions: self.evictions,
            external_invalidations: self.external_invalidations,
        }
    }
    pub fn note_push(&mut self, evicted: bool) {
        self.pushes += 1;
        if evicted {
            self.evictions += 1;
        }
    }
    pub fn note_merge(&mut self) {
        self.merges += 1;
    }
    pub fn note_rejected(&mut self) {
        self.rejected += 1;
    }
    pub fn note_external_invalidation(&mut self) {
        self.external_invalidations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_snapshot_counts_evictions_with_pushes() {
        let mut m = HistoryMetrics::default();
        m.note_push(false);
        m.note_push(true);
        m.note_merge();
        let snap = m.snapshot();
        assert_eq!(snap.pushes, 2);
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.merges, 1);
        assert_eq!(snap.rejected, 0);
    }
}
