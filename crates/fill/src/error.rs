use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning or applying placeholder fills.
#[derive(Error, Debug)]
pub enum FillError {
    /// A field's value has a shape its filler kind cannot resolve, e.g.
    /// a text field carrying records.
    #[error("field '{field}' has an unsupported {shape} value for {kind} filling")]
    UnresolvedValueType {
        field: String,
        shape: &'static str,
        kind: &'static str,
    },

    #[error("image file not found: {path}")]
    ImageMissing { path: PathBuf },

    #[error("image file too large: {path} is {size} bytes (limit {limit})")]
    ImageTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// An edit produced by a scan no longer resolves against the
    /// document it is being applied to.
    #[error("edit target vanished: {0}")]
    StaleEdit(String),
}
