//! Core placeholder resolution for the stencil fill engine.
//!
//! The engine locates placeholder tokens whose delimiter text may be
//! fragmented arbitrarily across a paragraph's text spans, substitutes
//! caller-supplied values for three placeholder kinds (text, image,
//! dynamic table row), and blanks whatever received no data.
//!
//! Fillers scan read-only and emit [`FillPlan`]s; the orchestrating
//! caller fans the scans out, joins them, and applies the plans with
//! [`apply_plans`] before persisting.

pub mod dynamic_row;
pub mod edit;
pub mod error;
pub mod filler;
pub mod image;
pub mod locator;
pub mod matcher;
pub mod splice;
pub mod text;

pub use edit::{DocEdit, FillPlan, apply_plans};
pub use error::FillError;
pub use filler::{BLANK_SPACER, FillerKind};
pub use image::MAX_IMAGE_BYTES;
