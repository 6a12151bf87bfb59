//! Configuration loading and parsing.
//!
//! Parses `clipring.toml` (or an override path supplied by the host):
//!
//! ```toml
//! [history]
//! capacity = 16
//! preview_chars = 100
//! ```
//!
//! Missing fields take their defaults. Unknown fields are ignored and a file
//! that fails to parse falls back to defaults. A capacity of zero is clamped
//! to one (logged on the `config` target); the raw parsed value is retained.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "clipring.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_capacity")]
    pub capacity: usize,
    #[serde(default = "HistoryConfig::default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            preview_chars: Self::default_preview_chars(),
        }
    }
}

impl HistoryConfig {
    const fn default_capacity() -> usize {
        16
    }
    const fn default_preview_chars() -> usize {
        100
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("clipring").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Effective history capacity (at least one).
    pub fn history_capacity(&self) -> usize {
        let raw = self.file.history.capacity;
        if raw == 0 {
            info!(target: "config", raw, clamped = 1, "history_capacity_clamped");
            return 1;
        }
        raw
    }

    pub fn preview_chars(&self) -> usize {
        self.file.history.preview_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.history_capacity(), 16);
        assert_eq!(cfg.preview_chars(), 100);
    }

    #[test]
    fn parses_history_section() {
        let tmp = write_config("[history]\ncapacity = 4\npreview_chars = 20\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.history_capacity(), 4);
        assert_eq!(cfg.preview_chars(), 20);
        assert!(cfg.raw.is_some());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let tmp = write_config("[history]\ncapacity = 32\n[unknown]\nfield = true\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.history_capacity(), 32);
        assert_eq!(cfg.preview_chars(), 100);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = write_config("[history\ncapacity = \n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.file.history, HistoryConfig::default());
    }

    #[test]
    fn zero_capacity_clamp_logs_on_config_target() {
        let tmp = write_config("[history]\ncapacity = 0\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let effective = with_default(subscriber, || cfg.history_capacity());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(effective, 1);
        assert_eq!(cfg.file.history.capacity, 0);
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("history_capacity_clamped"));
    }
}
