//! Placeholder schema types.
//!
//! A [`TemplateSchema`] describes every placeholder a template data class
//! carries: the field name, which filler kind claims it, and the per-kind
//! metadata (image display size, dynamic-row member names, splicing
//! headers). Schemas are validated once at build time and are immutable
//! for the duration of a fill.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a [`TemplateSchema`].
///
/// All of these are configuration errors: they fail fast, before any
/// document is opened or mutated.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("image field '{field}' must declare a positive width and height (got {width}x{height})")]
    InvalidImageSize {
        field: String,
        width: f64,
        height: f64,
    },

    #[error("dynamic-row field '{field}' must declare the member field names of its row shape")]
    MissingRowShape { field: String },

    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },

    #[error("placeholder delimiters must not be empty")]
    EmptyDelimiter,
}

/// The closed set of placeholder kinds. Every field belongs to exactly
/// one kind, which is what makes the three fillers' write sets disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderKind {
    /// Plain text substitution (scalar or spliced multi-value).
    Text,
    /// An embedded image replacing the token.
    Image,
    /// A table row cloned once per list element.
    DynamicRow,
}

/// Display size for an inserted image, in device units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

/// The delimiter pair that turns a field name into its canonical
/// placeholder text. Two tokens are equal iff their canonical text is
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub prefix: String,
    pub suffix: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            prefix: "${".to_string(),
            suffix: "}".to_string(),
        }
    }
}

impl Delimiters {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Canonical placeholder text for a field name, `prefix + name + suffix`.
    pub fn token(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }
}

/// One placeholder field of a template data class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: PlaceholderKind,
    /// Required when `kind` is [`PlaceholderKind::Image`].
    pub image_size: Option<ImageSize>,
    /// Member field names of the list element type. Required when `kind`
    /// is [`PlaceholderKind::DynamicRow`].
    pub row_shape: Vec<String>,
    /// Ordered header labels interleaved into multi-value text fields.
    pub splicing: Vec<String>,
}

impl FieldDescriptor {
    /// A plain text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlaceholderKind::Text,
            image_size: None,
            row_shape: Vec::new(),
            splicing: Vec::new(),
        }
    }

    /// A text field whose list values are spliced with the given headers.
    pub fn text_spliced<I, S>(name: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            splicing: headers.into_iter().map(Into::into).collect(),
            ..Self::text(name)
        }
    }

    /// An image field with its declared display size.
    pub fn image(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            kind: PlaceholderKind::Image,
            image_size: Some(ImageSize { width, height }),
            row_shape: Vec::new(),
            splicing: Vec::new(),
        }
    }

    /// A dynamic-row field with the member names of its element type.
    pub fn dynamic_row<I, S>(name: impl Into<String>, row_shape: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: PlaceholderKind::DynamicRow,
            image_size: None,
            row_shape: row_shape.into_iter().map(Into::into).collect(),
            splicing: Vec::new(),
        }
    }
}

/// The validated, immutable description of a template's placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSchema {
    delimiters: Delimiters,
    fields: Vec<FieldDescriptor>,
}

impl TemplateSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The fields claimed by one filler kind.
    pub fn fields_of(&self, kind: PlaceholderKind) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.kind == kind)
    }

    /// Canonical placeholder text for a field name.
    pub fn token_for(&self, name: &str) -> String {
        self.delimiters.token(name)
    }
}

/// Builder for [`TemplateSchema`]. Validation happens in [`build`],
/// rejecting invalid image sizes, missing row shapes, and duplicate
/// field names (the explicit partition-invariant check: a name claimed
/// twice could be claimed by two filler kinds at once).
///
/// [`build`]: SchemaBuilder::build
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    delimiters: Delimiters,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<TemplateSchema, SchemaError> {
        if self.delimiters.prefix.is_empty() || self.delimiters.suffix.is_empty() {
            return Err(SchemaError::EmptyDelimiter);
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name.clone(),
                });
            }
            match field.kind {
                PlaceholderKind::Image => {
                    let size = field.image_size.unwrap_or(ImageSize {
                        width: 0.0,
                        height: 0.0,
                    });
                    if size.width <= 0.0 || size.height <= 0.0 {
                        return Err(SchemaError::InvalidImageSize {
                            field: field.name.clone(),
                            width: size.width,
                            height: size.height,
                        });
                    }
                }
                PlaceholderKind::DynamicRow => {
                    if field.row_shape.is_empty() {
                        return Err(SchemaError::MissingRowShape {
                            field: field.name.clone(),
                        });
                    }
                }
                PlaceholderKind::Text => {}
            }
        }

        Ok(TemplateSchema {
            delimiters: self.delimiters,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiters_token() {
        let delims = Delimiters::default();
        assert_eq!(delims.token("name"), "${name}");
    }

    #[test]
    fn test_custom_delimiters_token() {
        let delims = Delimiters::new("{{", "}}");
        assert_eq!(delims.token("address"), "{{address}}");
    }

    #[test]
    fn test_build_valid_schema() {
        let schema = TemplateSchema::builder()
            .field(FieldDescriptor::text("name"))
            .field(FieldDescriptor::image("signature", 80.0, 40.0))
            .field(FieldDescriptor::dynamic_row("children", ["childName", "birthday"]))
            .build()
            .unwrap();

        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.token_for("name"), "${name}");
        assert_eq!(schema.fields_of(PlaceholderKind::Text).count(), 1);
    }

    #[test]
    fn test_image_field_requires_positive_size() {
        let result = TemplateSchema::builder()
            .field(FieldDescriptor::image("photo", 0.0, 40.0))
            .build();
        assert!(matches!(result, Err(SchemaError::InvalidImageSize { .. })));
    }

    #[test]
    fn test_image_field_without_size_rejected() {
        let mut field = FieldDescriptor::image("photo", 80.0, 40.0);
        field.image_size = None;
        let result = TemplateSchema::builder().field(field).build();
        assert!(matches!(result, Err(SchemaError::InvalidImageSize { .. })));
    }

    #[test]
    fn test_dynamic_row_requires_shape() {
        let result = TemplateSchema::builder()
            .field(FieldDescriptor::dynamic_row("children", Vec::<String>::new()))
            .build();
        assert!(matches!(result, Err(SchemaError::MissingRowShape { .. })));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = TemplateSchema::builder()
            .field(FieldDescriptor::text("name"))
            .field(FieldDescriptor::image("name", 10.0, 10.0))
            .build();
        assert!(matches!(result, Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let result = TemplateSchema::builder()
            .with_delimiters(Delimiters::new("", "}"))
            .build();
        assert!(matches!(result, Err(SchemaError::EmptyDelimiter)));
    }
}
