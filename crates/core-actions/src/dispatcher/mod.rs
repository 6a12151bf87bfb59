//! Dispatcher applying an [`Action`] to the history and a document view.
//!
//! Sub-modules:
//! * `kill`  - copy / cut recording
//! * `paste` - top-level paste and paste-from-chooser
//!
//! Every failure path degrades to the host's native behaviour; nothing here
//! aborts the user's command.

use crate::insert::{InsertOutcome, InsertionEngine};
use crate::{Action, Chooser};
use core_state::{AddOutcome, DocumentView, HistoryBuffer, SystemClipboard};
use tracing::trace;

mod kill;
mod paste;

pub use kill::{copy, cut};
pub use paste::{paste, paste_choice};

/// Everything a command needs for one dispatch.
pub struct CommandContext<'a, V: DocumentView + ?Sized> {
    pub history: &'a mut HistoryBuffer,
    pub engine: &'a InsertionEngine,
    pub view: &'a mut V,
    pub edit: &'a mut V::Edit,
    pub clipboard: &'a mut dyn SystemClipboard,
}

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Recorded(AddOutcome),
    Inserted(InsertOutcome),
    /// The host's native paste ran instead of a history insert.
    NativePaste,
    Noop,
}

pub fn dispatch<V: DocumentView + ?Sized>(
    action: Action,
    ctx: &mut CommandContext<'_, V>,
    chooser: &mut dyn Chooser,
) -> DispatchResult {
    trace!(target: "actions.dispatch", action = action.as_str(), entries = ctx.history.len(), "dispatch");
    match action {
        Action::Copy => copy(ctx),
        Action::Cut => cut(ctx),
        Action::Paste => paste(ctx),
        Action::PasteChoice => paste_choice(ctx, chooser),
        Action::Modified => {
            ctx.history.on_external_modification_notice();
            DispatchResult::Noop
        }
    }
}
