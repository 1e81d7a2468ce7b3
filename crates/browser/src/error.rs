//! Session error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while launching or supervising the browser session.
///
/// Every variant is fatal: the launcher logs and propagates, it never retries
/// or falls back to a different profile or port.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("extension directory not found or unreadable: {path}")]
    ExtensionMissing { path: PathBuf },

    #[error("cannot create profile directory {path}: {source}")]
    ProfileDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("browser not available: no Chromium-based browser found\n{hint}")]
    BrowserNotFound { hint: String },

    #[error("browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("browser closed unexpectedly")]
    BrowserClosed,

    #[error("CDP error: {0}")]
    Cdp(String),
}

impl From<chromiumoxide::error::CdpError> for SessionError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        SessionError::Cdp(err.to_string())
    }
}
