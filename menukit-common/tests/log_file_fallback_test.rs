//! A log file that cannot be created falls back to stderr instead of failing

use menukit_common::{init_tracing, LogTarget};
use std::fs;

#[test]
fn test_unwritable_log_file_falls_back_to_stderr() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "plain file").unwrap();
    let path = blocker.join("menukit.log");

    init_tracing("info", LogTarget::File(path.clone())).unwrap();
    assert!(!path.exists());

    tracing::info!("still logging after the fallback");
    assert!(init_tracing("info", LogTarget::Stderr).is_err());
}
