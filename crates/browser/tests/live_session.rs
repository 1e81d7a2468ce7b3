//! End-to-end checks that need a real Chromium install and a display.
//!
//! Run with `cargo test -p fishbowl-browser -- --ignored`.

use std::path::Path;

use {
    fishbowl_browser::{BrowserSession, SessionConfig},
    tokio_util::sync::CancellationToken,
};

fn live_config(root: &Path) -> SessionConfig {
    SessionConfig {
        workspace_root: root.to_path_buf(),
        extension_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../extension/error_capture"),
        ..SessionConfig::default()
    }
}

#[tokio::test]
#[ignore = "needs a Chromium install and a display"]
async fn launch_creates_profile_and_shuts_down_on_cancel() {
    let workspace = tempfile::tempdir().unwrap();
    let config = live_config(workspace.path());

    let session = BrowserSession::launch(&config).await.unwrap();
    assert!(config.profile_dir().is_dir());

    let cancel = CancellationToken::new();
    cancel.cancel();
    session.run_until_cancelled(cancel).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a Chromium install and a display"]
async fn profile_lock_refuses_second_session() {
    let workspace = tempfile::tempdir().unwrap();
    let config = live_config(workspace.path());

    let first = BrowserSession::launch(&config).await.unwrap();

    // The engine holds the profile lock; a second session against the same
    // profile directory must fail rather than silently fork state.
    let second = BrowserSession::launch(&config).await;
    assert!(second.is_err());

    let cancel = CancellationToken::new();
    cancel.cancel();
    first.run_until_cancelled(cancel).await.unwrap();
}
