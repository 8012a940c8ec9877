//! Enablement symlink inspection and mutation.

use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::PathsConfig;
use crate::error::SvError;

/// Enablement symlinks between the configuration root and the service root.
#[derive(Debug, Clone)]
pub struct ServiceLinks {
    config_root: PathBuf,
    service_root: PathBuf,
}

impl ServiceLinks {
    pub fn new(config_root: impl Into<PathBuf>, service_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
            service_root: service_root.into(),
        }
    }

    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(&paths.config_root, &paths.service_root)
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    /// Service definition directory, e.g. `/etc/sv/nginx`.
    pub fn definition_path(&self, name: &str) -> PathBuf {
        self.config_root.join(name)
    }

    /// Enablement link, e.g. `/var/service/nginx`.
    pub fn link_path(&self, name: &str) -> PathBuf {
        self.service_root.join(name)
    }

    /// Whether the service is enabled. Read from the filesystem every time.
    ///
    /// Only a symlink counts; a dangling one still marks the service enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        let enabled = fs::symlink_metadata(self.link_path(name))
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        debug!(service = %name, enabled = enabled, "Checked enablement");
        enabled
    }

    /// Create the enablement link.
    pub fn enable(&self, name: &str) -> Result<(), SvError> {
        let src = self.definition_path(name);
        let dest = self.link_path(name);

        unix_fs::symlink(&src, &dest).map_err(|e| SvError::execution(e.to_string()))?;

        info!(
            service = %name,
            definition = %src.display(),
            link = %dest.display(),
            "Enabled service"
        );
        Ok(())
    }

    /// Remove the enablement link. Refuses to delete anything but a symlink.
    pub fn disable(&self, name: &str) -> Result<(), SvError> {
        let link = self.link_path(name);

        let metadata =
            fs::symlink_metadata(&link).map_err(|e| SvError::execution(e.to_string()))?;
        if !metadata.file_type().is_symlink() {
            return Err(SvError::execution(format!(
                "{} is not a symlink. Refusing to delete.",
                link.display()
            )));
        }

        fs::remove_file(&link).map_err(|e| SvError::execution(e.to_string()))?;

        info!(service = %name, link = %link.display(), "Disabled service");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout() -> (TempDir, ServiceLinks) {
        let dir = TempDir::new().unwrap();
        let etc = dir.path().join("etc/sv");
        let var = dir.path().join("var/service");
        fs::create_dir_all(etc.join("nginx")).unwrap();
        fs::create_dir_all(&var).unwrap();
        (dir, ServiceLinks::new(etc, var))
    }

    #[test]
    fn test_enable_then_disable() {
        let (_dir, links) = layout();
        assert!(!links.is_enabled("nginx"));

        links.enable("nginx").unwrap();
        assert!(links.is_enabled("nginx"));
        assert_eq!(
            fs::read_link(links.link_path("nginx")).unwrap(),
            links.definition_path("nginx")
        );

        links.disable("nginx").unwrap();
        assert!(!links.is_enabled("nginx"));
        assert!(links.definition_path("nginx").is_dir());
    }

    #[test]
    fn test_enable_twice_fails_with_os_error() {
        let (_dir, links) = layout();
        links.enable("nginx").unwrap();

        let err = links.enable("nginx").unwrap_err();
        assert_eq!(err.code(), "EXECUTION_FAILED");
        assert!(err.to_string().contains("exists"));
    }

    #[test]
    fn test_regular_directory_is_not_enabled() {
        let (_dir, links) = layout();
        fs::create_dir(links.link_path("nginx")).unwrap();
        assert!(!links.is_enabled("nginx"));
    }

    #[test]
    fn test_disable_refuses_non_symlink() {
        let (_dir, links) = layout();
        fs::write(links.link_path("nginx"), "not a link").unwrap();

        assert!(links.disable("nginx").is_err());
        assert!(links.link_path("nginx").exists());
    }

    #[test]
    fn test_disable_missing_link() {
        let (_dir, links) = layout();
        let err = links.disable("nginx").unwrap_err();
        assert_eq!(err.code(), "EXECUTION_FAILED");
    }

    #[test]
    fn test_enable_without_service_root() {
        let dir = TempDir::new().unwrap();
        let links = ServiceLinks::new(dir.path().join("etc/sv"), dir.path().join("missing"));
        assert!(links.enable("nginx").is_err());
    }
}
