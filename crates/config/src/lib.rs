//! Deployment environment detection and workspace root resolution.
//!
//! Fishbowl runs either inside a managed project container or on a
//! developer machine. The only difference that matters to the rest of the
//! workspace is where persisted browser state lives, so this crate exposes a
//! single [`Deployment`] value resolved once at process start and passed down
//! explicitly. Nothing here touches the filesystem.

use std::path::PathBuf;

/// Environment variable marking a managed deployment.
///
/// Any non-empty value selects the managed workspace root; empty or absent
/// means a local run.
pub const PROJECT_MARKER_ENV: &str = "FISHBOWL_PROJECT";

/// Workspace root reserved for managed deployments.
pub const MANAGED_WORKSPACE_ROOT: &str = "/workspace";

/// Workspace root for local runs, relative to the working directory.
pub const LOCAL_WORKSPACE_ROOT: &str = "./workspace";

/// Where the process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Managed project container ([`PROJECT_MARKER_ENV`] set).
    Managed,
    /// Local developer machine.
    Local,
}

impl Deployment {
    /// Resolve the deployment from an explicit marker value.
    ///
    /// Pure function over its argument so tests can inject either outcome;
    /// the binary reads the environment exactly once via [`Deployment::detect`].
    pub fn from_project_marker(marker: Option<&str>) -> Self {
        match marker {
            Some(value) if !value.is_empty() => Self::Managed,
            _ => Self::Local,
        }
    }

    /// Read [`PROJECT_MARKER_ENV`] and resolve the deployment.
    pub fn detect() -> Self {
        Self::from_project_marker(std::env::var(PROJECT_MARKER_ENV).ok().as_deref())
    }

    /// Whether this is a managed deployment.
    pub fn is_managed(self) -> bool {
        matches!(self, Self::Managed)
    }

    /// Filesystem root for persisted browser state.
    ///
    /// Logical path only; the session launcher creates it on first use.
    pub fn workspace_root(self) -> PathBuf {
        match self {
            Self::Managed => PathBuf::from(MANAGED_WORKSPACE_ROOT),
            Self::Local => PathBuf::from(LOCAL_WORKSPACE_ROOT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_marker_is_local() {
        let deployment = Deployment::from_project_marker(None);
        assert_eq!(deployment, Deployment::Local);
        assert!(!deployment.is_managed());
    }

    #[test]
    fn empty_marker_is_local() {
        assert_eq!(
            Deployment::from_project_marker(Some("")),
            Deployment::Local
        );
    }

    #[test]
    fn any_non_empty_marker_is_managed() {
        for value in ["prod-7", "1", "  ", "x"] {
            let deployment = Deployment::from_project_marker(Some(value));
            assert_eq!(deployment, Deployment::Managed, "marker {value:?}");
            assert!(deployment.is_managed());
        }
    }

    #[test]
    fn managed_root_is_fixed_absolute_path() {
        assert_eq!(
            Deployment::Managed.workspace_root(),
            PathBuf::from("/workspace")
        );
    }

    #[test]
    fn local_root_is_relative_to_cwd() {
        assert_eq!(
            Deployment::Local.workspace_root(),
            PathBuf::from("./workspace")
        );
    }

    // Exercising `detect()` itself would mean mutating process environment
    // variables, which is unsafe in edition 2024; it is a one-line wrapper
    // over `from_project_marker`, which the tests above cover.
}
