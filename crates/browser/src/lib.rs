//! Single supervised Chromium session with remote debugging.
//!
//! Launches one persistent-profile browser with the bundled error-capture
//! extension force-loaded and CDP exposed on a fixed port, reports every page
//! the browser opens, and keeps the process alive until cancelled.
//!
//! # Example
//!
//! ```ignore
//! use fishbowl_browser::{BrowserSession, SessionConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = SessionConfig {
//!     workspace_root: deployment.workspace_root(),
//!     ..SessionConfig::default()
//! };
//! let session = BrowserSession::launch(&config).await?;
//! session.run_until_cancelled(CancellationToken::new()).await?;
//! ```

pub mod config;
pub mod detect;
pub mod error;
pub mod session;

pub use {
    config::{DEBUG_PORT, SessionConfig},
    error::SessionError,
    session::BrowserSession,
};
