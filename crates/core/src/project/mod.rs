//! Output tree layout shared by the vendoring and group-resource pipelines.

use crate::error::{ObjgenError, Result};
use std::path::{Path, PathBuf};

/// Directory, under the source root, receiving vendored apimachinery files.
pub const APIMACHINERY_DIR: &str = "apimachinery";

/// Checks if a path is a source file with the given extension.
pub fn is_source_path(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext == extension)
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct Project {
    pub output_dir: PathBuf,
    /// Module root; every package path is resolved against it.
    pub root: PathBuf,
    /// Module path of the generated library, e.g. `github.com/kubewarden/k8s-objects`.
    pub git_repo: String,
    pub kubernetes_version: Option<String>,
}

impl Project {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        git_repo: impl Into<String>,
        kubernetes_version: Option<String>,
    ) -> Self {
        let output_dir = output_dir.into();
        let kubernetes_version = kubernetes_version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self {
            root: output_dir.join("src"),
            output_dir,
            git_repo: git_repo.into(),
            kubernetes_version,
        }
    }

    /// Directory of a `/`-separated package path such as `api/events/v1`.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        join_segments(&self.root, package)
    }

    /// Destination of a vendored upstream file such as `/pkg/types/uid.go`.
    pub fn vendored_path(&self, location: &str) -> PathBuf {
        join_segments(&self.root.join(APIMACHINERY_DIR), location)
    }

    /// Destination directory of a vendored upstream file.
    pub fn vendored_dir(&self, location: &str) -> PathBuf {
        let path = self.vendored_path(location);
        path.parent().map(Path::to_path_buf).unwrap_or(path)
    }

    /// Branch of the apimachinery repository matching the Kubernetes version:
    /// `1.24` and `v1.24.3` both give `release-1.24`. `None` when no version
    /// was configured.
    pub fn apimachinery_release(&self) -> Result<Option<String>> {
        let Some(version) = &self.kubernetes_version else {
            return Ok(None);
        };
        let trimmed = version.strip_prefix('v').unwrap_or(version);
        let mut parts = trimmed.split('.');
        let major = parts.next().and_then(|p| p.parse::<u64>().ok());
        let minor = parts.next().and_then(|p| p.parse::<u64>().ok());
        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Some(format!("release-{}.{}", major, minor))),
            _ => Err(ObjgenError::Config(format!(
                "cannot derive an apimachinery release from kubernetes version '{}'",
                version
            ))),
        }
    }
}

fn join_segments(base: &Path, location: &str) -> PathBuf {
    location
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let project = Project::new("/testout", "github.com/kubewarden/k8s-objects", None);
        assert_eq!(project.root, PathBuf::from("/testout/src"));
        assert_eq!(
            project.package_dir("api/events/v1"),
            PathBuf::from("/testout/src/api/events/v1")
        );
        assert_eq!(
            project.vendored_path("/pkg/runtime/schema/group_version.go"),
            PathBuf::from("/testout/src/apimachinery/pkg/runtime/schema/group_version.go")
        );
        assert_eq!(
            project.vendored_dir("/pkg/types/uid.go"),
            PathBuf::from("/testout/src/apimachinery/pkg/types")
        );
    }

    #[test]
    fn test_apimachinery_release() {
        let release = |v: Option<&str>| {
            Project::new("/out", "", v.map(str::to_string)).apimachinery_release()
        };
        assert_eq!(release(Some("1.24")).unwrap(), Some("release-1.24".to_string()));
        assert_eq!(release(Some("v1.27.3")).unwrap(), Some("release-1.27".to_string()));
        assert_eq!(release(None).unwrap(), None);
        assert_eq!(release(Some("  ")).unwrap(), None);
        assert!(matches!(release(Some("latest")), Err(ObjgenError::Config(_))));
    }

    #[test]
    fn test_is_source_path() {
        assert!(is_source_path(Path::new("a/types.go"), "go"));
        assert!(!is_source_path(Path::new("a/types.go.orig"), "go"));
        assert!(!is_source_path(Path::new("a/Makefile"), "go"));
    }
}
