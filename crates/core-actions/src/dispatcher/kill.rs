//! Copy / cut recording.
//!
//! Partial classification runs before the native command (a cut destroys the
//! selection it classifies); anchors are read after it, from the carets the
//! native command leaves behind.

use super::{CommandContext, DispatchResult};
use core_state::{DocumentView, NativeCommand, classify_partial};
use tracing::debug;

pub fn copy<V: DocumentView + ?Sized>(ctx: &mut CommandContext<'_, V>) -> DispatchResult {
    record(ctx, false).0
}

/// A cut that edits the document expects the next modification notice; it
/// must not close the session this cut may have opened. A cut that removed
/// nothing produces no notice and leaves the expectation unset.
pub fn cut<V: DocumentView + ?Sized>(ctx: &mut CommandContext<'_, V>) -> DispatchResult {
    let (result, edited) = record(ctx, true);
    if edited {
        ctx.history.set_expect_self_modification();
    }
    result
}

fn record<V: DocumentView + ?Sized>(
    ctx: &mut CommandContext<'_, V>,
    cut: bool,
) -> (DispatchResult, bool) {
    let partial = classify_partial(&*ctx.view);
    let command = if cut { NativeCommand::Cut } else { NativeCommand::Copy };
    let edited = ctx.view.run_native_command(ctx.edit, command, ctx.clipboard);
    let text = ctx.clipboard.get();
    let outcome = ctx
        .history
        .add_from_view(&*ctx.view, ctx.clipboard, &text, cut, partial);
    debug!(
        target: "actions.command",
        command = command.as_str(),
        partial,
        bytes = text.len(),
        edited,
        outcome = ?outcome,
        entries = ctx.history.len(),
        "kill_recorded"
    );
    (DispatchResult::Recorded(outcome), edited)
}
