//! Paste dispatch.

use super::{CommandContext, DispatchResult};
use crate::Chooser;
use core_state::{DocumentView, NativeCommand};
use tracing::{debug, warn};

/// Insert the newest entry, or run the native paste when the history is
/// empty or the OS clipboard has diverged from it (the OS clipboard wins).
pub fn paste<V: DocumentView + ?Sized>(ctx: &mut CommandContext<'_, V>) -> DispatchResult {
    let current = ctx.clipboard.get();
    let in_sync = ctx.history.front().is_some_and(|e| e.text == current);
    if !in_sync {
        debug!(
            target: "actions.command",
            history_empty = ctx.history.is_empty(),
            "paste_native_clipboard_authoritative"
        );
        return native_paste(ctx);
    }
    insert_index(ctx, Some(0))
}

/// Show previews and insert the chosen entry. Empty history shows nothing.
pub fn paste_choice<V: DocumentView + ?Sized>(
    ctx: &mut CommandContext<'_, V>,
    chooser: &mut dyn Chooser,
) -> DispatchResult {
    let items = ctx.engine.choose(ctx.history);
    if items.is_empty() {
        return DispatchResult::Noop;
    }
    let picked = chooser.choose(&items);
    debug!(target: "actions.command", rows = items.len(), picked = ?picked, "paste_choice");
    insert_index(ctx, picked)
}

fn insert_index<V: DocumentView + ?Sized>(
    ctx: &mut CommandContext<'_, V>,
    index: Option<usize>,
) -> DispatchResult {
    match ctx
        .engine
        .insert(ctx.history, ctx.view, ctx.edit, ctx.clipboard, index)
    {
        Ok(outcome) => DispatchResult::Inserted(outcome),
        Err(err) => {
            warn!(target: "actions.command", %err, "insert_failed_native_fallback");
            native_paste(ctx)
        }
    }
}

fn native_paste<V: DocumentView + ?Sized>(ctx: &mut CommandContext<'_, V>) -> DispatchResult {
    ctx.view
        .run_native_command(ctx.edit, NativeCommand::Paste, ctx.clipboard);
    DispatchResult::NativePaste
}
