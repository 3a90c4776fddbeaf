//! Image filler.
//!
//! An image field's value is a materialized local file; the filler
//! blanks the token's fragments and anchors an inline image on the last
//! fragment of the matched run, preserving the surrounding formatting
//! context. A field intended to appear once (a signature, a seal) is not
//! duplicated when the template accidentally repeats the token: every
//! occurrence is blanked, only the first receives the image.

use crate::edit::{DocEdit, FillPlan};
use crate::error::FillError;
use crate::locator;
use log::debug;
use std::path::Path;
use stencil_doc::Document;
use stencil_types::{FieldValue, PlaceholderKind, TemplateSchema, ValueMap};

/// Upper bound on a materialized image file.
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Resolve every image-kind field that has data.
pub fn scan(
    doc: &Document,
    schema: &TemplateSchema,
    values: &ValueMap,
) -> Result<FillPlan, FillError> {
    let mut plan = FillPlan::new();

    for field in schema.fields_of(PlaceholderKind::Image) {
        let Some(value) = values.get(&field.name) else {
            continue;
        };
        let FieldValue::Image(path) = value else {
            return Err(FillError::UnresolvedValueType {
                field: field.name.clone(),
                shape: value.shape(),
                kind: "image",
            });
        };
        // Schema validation guarantees the size is present and positive.
        let Some(size) = field.image_size else {
            continue;
        };

        let token = schema.token_for(&field.name);
        let mut validated = false;
        let mut filled = false;

        for (addr, para) in doc.paragraphs() {
            if !locator::paragraph_contains(para, &token) {
                continue;
            }
            if !validated {
                validate_image_file(path)?;
                validated = true;
            }
            if filled {
                plan.push(DocEdit::TakeToken {
                    para: addr,
                    token: token.clone(),
                });
            } else {
                filled = true;
                plan.push(DocEdit::InsertImage {
                    para: addr,
                    token: token.clone(),
                    source: path.display().to_string(),
                    width: size.width,
                    height: size.height,
                });
            }
        }
    }

    Ok(plan)
}

fn validate_image_file(path: &Path) -> Result<(), FillError> {
    let metadata = std::fs::metadata(path).map_err(|_| FillError::ImageMissing {
        path: path.to_path_buf(),
    })?;
    let size = metadata.len();
    debug!("image file {} is {} KB", path.display(), size / 1024);
    if size > MAX_IMAGE_BYTES {
        return Err(FillError::ImageTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}
