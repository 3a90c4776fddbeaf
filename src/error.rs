// src/error.rs
//! Defines the unified error type for all fill-pipeline operations.

use stencil_doc::DocError;
use stencil_fill::FillError;
use stencil_traits::ResourceError;
use stencil_types::SchemaError;
use thiserror::Error;

/// A comprehensive error type for the entire fill pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Fill failed: {0}")]
    Fill(#[from] FillError),

    #[error("Document error: {0}")]
    Doc(#[from] DocError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Image processing failed: {0}")]
    Image(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
