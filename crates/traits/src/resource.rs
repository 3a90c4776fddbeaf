//! ResourceProvider trait for abstracting image-asset loading.
//!
//! Image placeholders name their content by a key (a relative path or an
//! opaque identifier); this trait lets the engine fetch the raw bytes
//! without being tied to filesystem access.

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of raw asset bytes, keyed by path or identifier.
///
/// Implementations exist for the local filesystem (in the integration
/// crate) and for pre-populated memory (below, useful in tests and
/// sandboxed environments).
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load an asset by its key.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Check whether an asset exists without loading it.
    fn exists(&self, path: &str) -> bool;

    /// Base path for resolving relative keys, when the provider has one.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Human-readable provider name for logging.
    fn name(&self) -> &'static str;
}

/// An in-memory provider. Assets are stored under their key and must be
/// pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    assets: std::sync::RwLock<std::collections::HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an asset under `path`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let path_string = path.into();
        let mut assets = self.assets.write().map_err(|_| ResourceError::LoadFailed {
            path: path_string.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(path_string, Arc::new(data));
        Ok(())
    }

    /// Remove an asset, returning its bytes if it was present.
    pub fn remove(&self, path: &str) -> Option<SharedResourceData> {
        self.assets.write().ok()?.remove(path)
    }

    /// The number of stored assets. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Whether the store holds no assets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let assets = self.assets.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.assets
            .read()
            .map(|a| a.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
