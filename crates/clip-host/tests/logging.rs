use clip_host::{Host, LOG_FILE_NAME};
use core_config::Config;
use core_model::MemoryClipboard;
use tracing::error;

#[test]
fn host_log_file_receives_events_until_dropped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(LOG_FILE_NAME), "stale run\n").unwrap();

    let mut host = Host::new(&Config::default(), MemoryClipboard::default());
    assert!(host.start_logging(dir.path()).unwrap());
    error!(target: "host", "log_probe");
    drop(host);

    let body = std::fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
    assert!(body.contains("log_probe"));
    assert!(!body.contains("stale run"));
}
