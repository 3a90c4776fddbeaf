//! Stencil fills structured data into document templates.
//!
//! Placeholders like `${name}` are located even when editors have split
//! their text across arbitrary fragment boundaries, then resolved as
//! plain text, embedded images, or dynamically expanded table rows. One
//! fill produces two persisted artifacts: the *record* document (all
//! available substitutions applied, unresolved tokens intact) and the
//! *clean* document (every remaining token blanked), the latter being
//! the input for downstream format conversion.
//!
//! ```no_run
//! use stencil::{FieldDescriptor, FieldValue, FillPipeline, TemplateSchema, ValueMap};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), stencil::PipelineError> {
//! let schema = TemplateSchema::builder()
//!     .field(FieldDescriptor::text("name"))
//!     .field(FieldDescriptor::image("signature", 80.0, 40.0))
//!     .build()?;
//!
//! let mut values = ValueMap::new();
//! values.insert("name".into(), FieldValue::Text("An".into()));
//!
//! let pipeline = FillPipeline::new(schema);
//! let artifacts = pipeline.fill_template(
//!     &values,
//!     Path::new("template.json"),
//!     Path::new("record.json"),
//!     Path::new("clean.json"),
//! )?;
//! println!("convert {}", artifacts.clean.display());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod error;
pub mod pipeline;
pub mod resource;

pub use assets::ImageAsset;
pub use error::PipelineError;
pub use pipeline::{FillArtifacts, FillPipeline, PipelineBuilder};
pub use resource::FilesystemResourceProvider;

// Re-export the building blocks callers assemble fills from.
pub use stencil_doc as doc;
pub use stencil_executor::ExecutorImpl;
pub use stencil_fill as fill;
pub use stencil_traits::{Executor, InMemoryResourceProvider, ResourceProvider};
pub use stencil_types::{
    Delimiters, FieldDescriptor, FieldValue, ImageSize, PlaceholderKind, SchemaError,
    TemplateSchema, ValueMap,
};
