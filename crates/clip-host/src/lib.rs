//! Host integration layer.
//!
//! Owns the one `HistoryBuffer` a process uses together with the insertion
//! engine and the system clipboard, and routes editor commands to
//! `core-actions`. Nothing here is global: an embedding editor constructs a
//! `Host` at startup and keeps it next to its views.

use anyhow::Result;
use core_actions::{Action, Chooser, CommandContext, DispatchResult, InsertionEngine, dispatch};
use core_config::Config;
use core_model::{EditGroup, EditorView};
use core_state::{DocumentView, HistoryBuffer, SystemClipboard};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

mod logging;

pub use logging::{LOG_FILE_NAME, configure_logging};

pub struct Host<C: SystemClipboard> {
    history: HistoryBuffer,
    engine: InsertionEngine,
    clipboard: C,
    log_guard: Option<WorkerGuard>,
}

impl<C: SystemClipboard> Host<C> {
    pub fn new(config: &Config, clipboard: C) -> Self {
        let capacity = config.history_capacity();
        let preview_chars = config.preview_chars();
        info!(target: "host", capacity, preview_chars, "host_ready");
        Self {
            history: HistoryBuffer::with_capacity(capacity),
            engine: InsertionEngine::with_preview_chars(preview_chars),
            clipboard,
            log_guard: None,
        }
    }

    /// Write logs to `dir/clipring.log` for the lifetime of this host.
    /// Returns false when another subscriber already owns the process.
    pub fn start_logging(&mut self, dir: &Path) -> Result<bool> {
        self.log_guard = configure_logging(dir, LOG_FILE_NAME)?;
        Ok(self.log_guard.is_some())
    }

    /// Load configuration (`None` discovers `clipring.toml`) and build a host.
    pub fn from_config_path(path: Option<PathBuf>, clipboard: C) -> Result<Self> {
        let config = core_config::load_from(path)?;
        Ok(Self::new(&config, clipboard))
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Run `action` against any view binding with a caller-supplied edit handle.
    /// The caller forwards modification notices via [`Host::notify_modified`].
    pub fn run<V: DocumentView + ?Sized>(
        &mut self,
        action: Action,
        view: &mut V,
        edit: &mut V::Edit,
        chooser: &mut dyn Chooser,
    ) -> DispatchResult {
        let mut ctx = CommandContext {
            history: &mut self.history,
            engine: &self.engine,
            view,
            edit,
            clipboard: &mut self.clipboard,
        };
        dispatch(action, &mut ctx, chooser)
    }

    /// Run `action` on an in-memory view: one edit group per command, and the
    /// view's modification flag forwarded afterwards like a host event loop.
    pub fn run_editor(
        &mut self,
        action: Action,
        view: &mut EditorView,
        chooser: &mut dyn Chooser,
    ) -> DispatchResult {
        let mut edit = EditGroup::new();
        let result = self.run(action, view, &mut edit, chooser);
        if view.take_modified() {
            self.notify_modified();
        }
        debug!(target: "host", action = action.as_str(), result = ?result, entries = self.history.len(), "command_done");
        result
    }

    /// The document changed (typing, undo, our own edits).
    pub fn notify_modified(&mut self) {
        self.history.on_external_modification_notice();
    }
}
