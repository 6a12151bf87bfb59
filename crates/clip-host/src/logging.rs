use anyhow::Result;
use std::path::Path;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;

/// Default log file written next to the host's working files.
pub const LOG_FILE_NAME: &str = "clipring.log";

/// Start file logging in `dir` and route panics through tracing.
///
/// A previous log file is replaced. Filtering follows `RUST_LOG`. Returns
/// `None` when some other global subscriber is already installed; the
/// returned guard must outlive every event that should reach the file.
pub fn configure_logging(dir: &Path, file_name: &str) -> Result<Option<WorkerGuard>> {
    let path = dir.join(file_name);
    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .is_ok();
    if !installed {
        return Ok(None);
    }
    install_panic_hook();
    tracing::info!(target: "host", path = %path.display(), "logging_ready");
    Ok(Some(guard))
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "host.panic", ?info, "panic");
            previous(info);
        }));
    });
}
