//! Launch configuration for the supervised browser session.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Remote-debugging port exposed by the session.
///
/// Fixed: external tooling attaches here, and there is deliberately no
/// fallback to another port.
pub const DEBUG_PORT: u16 = 9222;

/// Bundled extension directory, relative to the fishbowl executable.
const EXTENSION_SUBDIR: &str = "extension/error_capture";

/// Launch configuration for the browser session.
///
/// Built once per process invocation, immutable afterwards, and consumed by
/// [`BrowserSession::launch`](crate::session::BrowserSession::launch).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Root for persisted browser state, from the deployment resolver.
    pub workspace_root: PathBuf,
    /// Viewport width in CSS pixels.
    pub viewport_width: u32,
    /// Viewport height in CSS pixels.
    pub viewport_height: u32,
    /// Directory containing the unpacked error-capture extension.
    ///
    /// Must exist and be readable before launch; manifest validation is left
    /// to the engine.
    pub extension_dir: PathBuf,
    /// Remote-debugging port.
    pub debug_port: u16,
    /// Whether to run headless. Always false for this use case: the session
    /// exists to be watched and interacted with.
    pub headless: bool,
    /// Path to the browser binary (auto-detected if not set).
    pub chrome_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from(fishbowl_config::LOCAL_WORKSPACE_ROOT),
            viewport_width: 1280,
            viewport_height: 720,
            extension_dir: default_extension_dir(),
            debug_port: DEBUG_PORT,
            headless: false,
            chrome_path: None,
        }
    }
}

impl SessionConfig {
    /// Persistent profile directory under the workspace root.
    ///
    /// Cookies, local storage, and extension state survive across runs, so
    /// the session keeps a stable automation identity instead of starting
    /// fresh each launch.
    pub fn profile_dir(&self) -> PathBuf {
        self.workspace_root.join("browser").join("user_data")
    }

    /// Command-line flags for the browser process, in dependency order.
    ///
    /// Four groups plus the debugging port. Order is fixed: the extension
    /// allow-list must accompany the load flag, and the port flag goes last.
    /// The security-relaxation pair is repeated after the extension group;
    /// the duplication is carried over verbatim from the known-good flag set
    /// and is harmless to the engine.
    pub fn chrome_args(&self) -> Vec<String> {
        let ext = self.extension_dir.display();
        vec![
            // Automation stealth and UX suppression.
            "--no-sandbox".into(),
            "--disable-blink-features=AutomationControlled".into(),
            "--disable-infobars".into(),
            "--disable-background-timer-throttling".into(),
            "--disable-popup-blocking".into(),
            "--disable-backgrounding-occluded-windows".into(),
            "--disable-renderer-backgrounding".into(),
            "--disable-window-activation".into(),
            "--disable-focus-on-load".into(),
            "--no-first-run".into(),
            "--no-default-browser-check".into(),
            // Window geometry.
            "--window-position=0,0".into(),
            // Security relaxation: the error-capture extension and attached
            // tooling must observe and script across origin boundaries.
            "--disable-web-security".into(),
            "--disable-site-isolation-trials".into(),
            "--disable-features=IsolateOrigins,site-per-process".into(),
            // Extension loading: allow-list exactly the bundled extension,
            // then force-load it.
            format!("--disable-extensions-except={ext}"),
            format!("--load-extension={ext}"),
            "--disable-web-security".into(),
            "--disable-site-isolation-trials".into(),
            // Remote debugging for external attach.
            format!("--remote-debugging-port={}", self.debug_port),
        ]
    }
}

/// Resolve the bundled extension directory next to the running executable,
/// falling back to a cwd-relative path for `cargo run`.
fn default_extension_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(EXTENSION_SUBDIR)))
        .filter(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from(EXTENSION_SUBDIR))
}
