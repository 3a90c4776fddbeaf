//! Foundation types for the stencil fill engine: placeholder schemas,
//! delimiters, and caller-supplied value maps.

pub mod field;
pub mod value;

pub use field::{
    Delimiters, FieldDescriptor, ImageSize, PlaceholderKind, SchemaBuilder, SchemaError,
    TemplateSchema,
};
pub use value::{FieldValue, ValueMap};
