//! Filler kinds and dispatch.
//!
//! Each placeholder kind has exactly one filler, selected by a closed
//! enum rather than virtual dispatch. A filler exposes two read-only
//! scans: `scan` resolves fields that received data, `blank` produces
//! the second-pass edits that blank whatever is still unresolved.

use crate::dynamic_row;
use crate::edit::FillPlan;
use crate::error::FillError;
use crate::image;
use crate::locator;
use crate::text;
use stencil_doc::Document;
use stencil_types::{PlaceholderKind, TemplateSchema, ValueMap};

/// The value an unresolved scalar placeholder is blanked to.
pub const BLANK_SPACER: &str = "\t\t\t";

/// One of the three filler kinds. The set is closed: every field's
/// descriptor kind maps to exactly one variant, which is what keeps the
/// fillers' write sets disjoint when they scan in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillerKind {
    Text,
    Image,
    DynamicRow,
}

impl FillerKind {
    pub const ALL: [FillerKind; 3] = [FillerKind::Text, FillerKind::Image, FillerKind::DynamicRow];

    /// The placeholder kind this filler claims.
    pub fn claims(&self) -> PlaceholderKind {
        match self {
            FillerKind::Text => PlaceholderKind::Text,
            FillerKind::Image => PlaceholderKind::Image,
            FillerKind::DynamicRow => PlaceholderKind::DynamicRow,
        }
    }

    /// Read-only scan over the document, producing this filler's edit
    /// plan for every claimed field that has data in `values`.
    pub fn scan(
        &self,
        doc: &Document,
        schema: &TemplateSchema,
        values: &ValueMap,
    ) -> Result<FillPlan, FillError> {
        match self {
            FillerKind::Text => text::scan(doc, schema, values),
            FillerKind::Image => image::scan(doc, schema, values),
            FillerKind::DynamicRow => dynamic_row::scan(doc, schema, values),
        }
    }

    /// Blanking scan: edits that erase this filler's tokens from a
    /// document where they went unresolved.
    pub fn blank(&self, doc: &Document, schema: &TemplateSchema) -> Result<FillPlan, FillError> {
        match self {
            FillerKind::Text | FillerKind::Image => Ok(blank_tokens(doc, schema, self.claims())),
            FillerKind::DynamicRow => dynamic_row::blank(doc, schema),
        }
    }
}

/// Blank every remaining token of the given kind to the spacer value.
fn blank_tokens(doc: &Document, schema: &TemplateSchema, kind: PlaceholderKind) -> FillPlan {
    let mut plan = FillPlan::new();
    for field in schema.fields_of(kind) {
        let token = schema.token_for(&field.name);
        if locator::document_contains(doc, &token) {
            plan.push(crate::edit::DocEdit::ReplaceAll {
                find: token,
                replace: BLANK_SPACER.to_string(),
            });
        }
    }
    plan
}
