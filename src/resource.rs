// src/resource.rs
//! Filesystem-backed asset provider.
//!
//! Loads image assets relative to a base directory, typically the
//! directory the template lives in. Keys are validated so a crafted
//! key like `../../etc/passwd` cannot escape the base directory.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use stencil_traits::{ResourceError, ResourceProvider, SharedResourceData};

/// A resource provider that loads assets from the local filesystem,
/// confined to a base directory.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base used for escape checks.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a key against the base directory, rejecting absolute
    /// keys and anything that would escape it.
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        if Path::new(key).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(key);
        if let (Ok(canonical), Some(base)) =
            (full_path.canonicalize(), self.canonical_base.as_ref())
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // The file may not exist yet; reject `..` components outright.
        if Path::new(key)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }
        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, key: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve(key)
            .ok_or_else(|| ResourceError::NotFound(format!("{key} (outside base directory)")))?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(key.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: key.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, key: &str) -> bool {
        self.resolve(key).map(|p| p.exists()).unwrap_or(false)
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
