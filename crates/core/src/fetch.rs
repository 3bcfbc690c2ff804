//! Retrieval of upstream files. The generator never talks to the network
//! itself; callers plug in a [`Fetcher`].

use crate::error::{ObjgenError, Result};
use std::path::PathBuf;

pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Serves URLs below `base_url` from a local directory with the same layout,
/// e.g. a checkout holding one sub-directory per apimachinery release branch.
#[derive(Debug, Clone)]
pub struct MirrorFetcher {
    base_url: String,
    root: PathBuf,
}

impl MirrorFetcher {
    pub fn new(base_url: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            root: root.into(),
        }
    }

    /// Local path mirroring `url`, `None` for URLs outside the base.
    pub fn local_path(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(self.base_url.as_str())?;
        let mut path = self.root.clone();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }
}

impl Fetcher for MirrorFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.local_path(url).ok_or_else(|| ObjgenError::Fetch {
            url: url.to_string(),
            message: format!("not below mirrored base {}", self.base_url),
        })?;
        std::fs::read(&path).map_err(|e| ObjgenError::Fetch {
            url: url.to_string(),
            message: format!("{}: {}", path.display(), e),
        })
    }
}
