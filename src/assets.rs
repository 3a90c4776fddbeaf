// src/assets.rs
//! Scoped image assets.
//!
//! An image placeholder's value must be a local raster file by the time
//! the filler runs. [`ImageAsset`] materializes caller-supplied bytes
//! into a PNG-normalized temporary file that is deleted when the asset
//! is dropped, on every path — success, fill error, or panic unwind —
//! so a failed insertion cannot leak the file.

use crate::error::PipelineError;
use image::ImageFormat;
use log::debug;
use std::io::{BufWriter, Write};
use std::path::Path;
use stencil_fill::MAX_IMAGE_BYTES;
use stencil_traits::ResourceProvider;
use stencil_types::FieldValue;
use tempfile::NamedTempFile;

/// A materialized, validated, PNG-normalized image on disk. The backing
/// temporary file lives exactly as long as this value.
#[derive(Debug)]
pub struct ImageAsset {
    file: NamedTempFile,
}

impl ImageAsset {
    /// Load an asset's bytes from a provider and materialize them.
    pub fn materialize(
        provider: &dyn ResourceProvider,
        key: &str,
    ) -> Result<Self, PipelineError> {
        let bytes = provider.load(key)?;
        Self::from_bytes(&bytes)
            .map_err(|e| PipelineError::Image(format!("asset '{key}': {e}")))
    }

    /// Decode raw image bytes and re-encode them as a PNG temp file.
    /// Rejects bytes over the engine's size bound and anything the
    /// decoder does not recognize as an image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PipelineError> {
        if bytes.len() as u64 > MAX_IMAGE_BYTES {
            return Err(PipelineError::Image(format!(
                "image is {} bytes, limit {}",
                bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }
        let decoded =
            image::load_from_memory(bytes).map_err(|e| PipelineError::Image(e.to_string()))?;

        let file = tempfile::Builder::new()
            .prefix("stencil-image-")
            .suffix(".png")
            .tempfile()?;
        let mut writer = BufWriter::new(file.as_file());
        decoded
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| PipelineError::Image(e.to_string()))?;
        writer.flush()?;
        drop(writer);

        debug!("materialized image asset at {}", file.path().display());
        Ok(Self { file })
    }

    /// Path of the materialized file, valid while the asset is alive.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The field value referencing this asset. The asset must outlive
    /// the fill that consumes the value.
    pub fn value(&self) -> FieldValue {
        FieldValue::Image(self.path().to_path_buf())
    }
}
