//! Browser binary detection and install guidance.

use std::path::{Path, PathBuf};

use crate::error::SessionError;

/// Chromium-based executables searched on `PATH`, in preference order.
///
/// Chromium builds come first: recent branded Chrome releases ignore
/// `--load-extension`, and force-loading the error-capture extension is the
/// whole point of this session.
const CHROMIUM_EXECUTABLES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "msedge",
    "microsoft-edge-stable",
    "brave-browser",
];

/// macOS app bundles, same preference order.
#[cfg(target_os = "macos")]
const MACOS_APP_PATHS: &[&str] = &[
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
];

/// Windows install locations.
#[cfg(target_os = "windows")]
const WINDOWS_PATHS: &[&str] = &[
    r"C:\Program Files\Chromium\Application\chrome.exe",
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
];

/// Locate a Chromium-based browser binary.
///
/// Checks (in order):
/// 1. Explicit override from the launch configuration
/// 2. `CHROME` environment variable
/// 3. Platform install paths (app bundles before `PATH`, which can carry
///    broken wrapper scripts)
/// 4. Known executable names on `PATH`
///
/// A missing override falls through to auto-detection.
pub fn locate_browser(override_path: Option<&Path>) -> Result<PathBuf, SessionError> {
    if let Some(path) = override_path
        && path.exists()
    {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("CHROME") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        }
    }

    #[cfg(target_os = "macos")]
    for path in MACOS_APP_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    #[cfg(target_os = "windows")]
    for path in WINDOWS_PATHS {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    for name in CHROMIUM_EXECUTABLES {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    Err(SessionError::BrowserNotFound {
        hint: install_instructions(),
    })
}

/// Platform-specific install instructions, appended to launch failures.
pub fn install_instructions() -> String {
    let instructions = if cfg!(target_os = "macos") {
        "  brew install --cask chromium\n  \
         # Alternatives: google-chrome, microsoft-edge, brave-browser"
    } else if cfg!(target_os = "linux") {
        "  Debian/Ubuntu: sudo apt install chromium-browser\n  \
         Fedora:         sudo dnf install chromium\n  \
         Arch:           sudo pacman -S chromium"
    } else if cfg!(target_os = "windows") {
        "  winget install Hibbiki.Chromium\n  \
         # Alternatives: Google.Chrome, Microsoft.Edge"
    } else {
        "  Download from https://www.chromium.org/getting-involved/download-chromium/"
    };

    format!(
        "No Chromium-based browser found. Install one:\n\n\
         {instructions}\n\n\
         Prefer a Chromium build over branded Chrome, which ignores \
         --load-extension.\n\
         Or point fishbowl at a binary with --chrome-path or the CHROME \
         environment variable."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_path_takes_precedence() {
        let temp_dir = std::env::temp_dir();
        let fake_browser = temp_dir.join("fake-chromium-for-test");
        std::fs::write(&fake_browser, "fake").unwrap();

        let found = locate_browser(Some(&fake_browser)).unwrap();
        assert_eq!(found, fake_browser);

        std::fs::remove_file(&fake_browser).unwrap();
    }

    #[test]
    fn missing_override_falls_through() {
        // Whether detection succeeds depends on the host; it must either find
        // a real browser or return the install hint, never the bogus path.
        match locate_browser(Some(Path::new("/nonexistent/browser"))) {
            Ok(path) => assert_ne!(path, PathBuf::from("/nonexistent/browser")),
            Err(SessionError::BrowserNotFound { hint }) => {
                assert!(hint.contains("Chromium"));
            },
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn chromium_preferred_over_branded_chrome() {
        let chromium = CHROMIUM_EXECUTABLES
            .iter()
            .position(|n| *n == "chromium")
            .unwrap();
        let chrome = CHROMIUM_EXECUTABLES
            .iter()
            .position(|n| *n == "google-chrome")
            .unwrap();
        assert!(chromium < chrome);
    }

    #[test]
    fn install_instructions_platform_specific() {
        let hint = install_instructions();
        assert!(!hint.is_empty());

        #[cfg(target_os = "macos")]
        assert!(hint.contains("brew"));

        #[cfg(target_os = "linux")]
        assert!(hint.contains("apt") || hint.contains("dnf") || hint.contains("pacman"));

        #[cfg(target_os = "windows")]
        assert!(hint.contains("winget"));
    }
}
