use core_text::{Buffer, Region};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Full-state snapshot (coarse clone; documents handled here are small).
#[derive(Clone)]
pub struct EditSnapshot {
    pub buffer: Buffer,
    pub selections: Vec<Region>,
    /// Content hash of the buffer at snapshot capture.
    pub hash: u64,
}

#[derive(Default)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn push_snapshot(&mut self, buffer: &Buffer, selections: &[Region]) {
        let current_hash = buffer_hash(buffer);
        if let Some(last) = self.undo_stack.last()
            && last.hash == current_hash
        {
            trace!(target: "model.undo", undo_depth = self.undo_stack.len(), hash = current_hash, "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            selections: selections.to_vec(),
            hash: current_hash,
        });
        trace!(target: "model.undo", undo_depth = self.undo_stack.len(), hash = current_hash, "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            let _ = self.undo_stack.remove(0);
            trace!(target: "model.undo", "undo_stack_trimmed");
        }
    }

    /// Restore the previous snapshot into `buffer`/`selections`. Returns false
    /// when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut Buffer, selections: &mut Vec<Region>) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "model.undo", undo_depth = self.undo_stack.len(), "undo_pop");
        *buffer = last.buffer;
        *selections = last.selections;
        true
    }
}

fn buffer_hash(buf: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    for i in 0..buf.line_count() {
        if let Some(l) = buf.line(i) {
            h.write(l.as_bytes());
        }
    }
    h.finish()
}
