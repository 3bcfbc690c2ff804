use crate::error::{ObjgenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_APIMACHINERY_REPO: &str = "https://raw.githubusercontent.com/kubernetes/apimachinery/";
pub const DEFAULT_MODULE_PREFIX: &str = "k8s.io";

/// Upstream apimachinery files vendored into every generated library.
pub const DEFAULT_STATIC_FILES: &[&str] = &[
    "/pkg/types/namespacedname.go",
    "/pkg/types/patch.go",
    "/pkg/types/uid.go",
    "/pkg/runtime/interfaces.go",
    "/pkg/runtime/types.go",
    "/pkg/runtime/schema/group_version.go",
    "/pkg/runtime/schema/interfaces.go",
    "/pkg/apis/meta/v1/types.go",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Raw-content base URL; the release branch and file location are appended.
    pub apimachinery_repo: String,
    /// Upstream file locations relative to the repository root.
    pub static_files: Vec<String>,
    /// Import prefix replaced by the project module path in vendored files.
    pub module_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            apimachinery_repo: DEFAULT_APIMACHINERY_REPO.to_string(),
            static_files: DEFAULT_STATIC_FILES.iter().map(|s| s.to_string()).collect(),
            module_prefix: DEFAULT_MODULE_PREFIX.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.module_prefix.trim_matches('/').is_empty() {
            return Err(ObjgenError::Config("module_prefix must not be empty".to_string()));
        }
        if let Some(bad) = self.static_files.iter().find(|f| !f.starts_with('/')) {
            return Err(ObjgenError::Config(format!(
                "static file location '{}' must start with '/'",
                bad
            )));
        }
        Ok(())
    }

    /// Full download URL of a vendored file.
    pub fn file_url(&self, release: &str, location: &str) -> String {
        format!("{}{}{}", self.apimachinery_repo, release, location)
    }

    pub fn module_substitution(&self, module_path: &str) -> ModuleSubstitution {
        ModuleSubstitution::new(&self.module_prefix, module_path)
    }
}

/// Replaces the leading module path of import paths, whole segments only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSubstitution {
    pub old_prefix: String,
    pub new_prefix: String,
}

impl ModuleSubstitution {
    pub fn new(old_prefix: impl Into<String>, new_prefix: impl Into<String>) -> Self {
        Self {
            old_prefix: old_prefix.into().trim_end_matches('/').to_string(),
            new_prefix: new_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// The rewritten path, or `None` when `path` is outside `old_prefix`.
    /// `k8s.io` matches `k8s.io` and `k8s.io/api` but never `k8s.io2/api`.
    pub fn apply(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.old_prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(format!("{}{}", self.new_prefix, rest))
        } else {
            None
        }
    }
}
