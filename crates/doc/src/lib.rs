//! In-memory document model.
//!
//! This crate defines the tree the fill engine operates on: blocks
//! (paragraphs and tables), inline content (text fragments and images),
//! and table rows/cells. It is a dumb structure — it knows how to read
//! and write its own pieces and how to persist itself, but carries no
//! placeholder logic.
//!
//! The one structural rule that matters to callers: a paragraph's text
//! fragments partition its visible text with no gaps, and a fragment
//! boundary carries no semantic meaning. Editors split text into
//! fragments at unpredictable offsets, so anything searching for a
//! substring must be prepared for it to straddle fragments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while persisting or reloading a document.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inline content inside a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// A contiguous span of text, the smallest editable unit.
    Run { text: String },
    /// An embedded image with its display size in device units.
    Image {
        source: String,
        width: f64,
        height: f64,
    },
}

impl Inline {
    pub fn run(text: impl Into<String>) -> Self {
        Inline::Run { text: text.into() }
    }

    /// The visible text this inline contributes. Images contribute none.
    pub fn text(&self) -> &str {
        match self {
            Inline::Run { text } => text,
            Inline::Image { .. } => "",
        }
    }
}

/// A paragraph: an ordered list of inline children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding one text fragment.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            inlines: vec![Inline::run(text)],
        }
    }

    /// A paragraph pre-split into the given fragments.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inlines: fragments.into_iter().map(Inline::run).collect(),
        }
    }

    /// Concatenated visible text across all fragments.
    pub fn text(&self) -> String {
        self.inlines.iter().map(Inline::text).collect()
    }

    /// The text fragments in order, each with its child index.
    pub fn runs(&self) -> impl Iterator<Item = (usize, &str)> {
        self.inlines.iter().enumerate().filter_map(|(i, inline)| match inline {
            Inline::Run { text } => Some((i, text.as_str())),
            Inline::Image { .. } => None,
        })
    }

    /// Overwrite the text of the fragment at child index `idx`.
    /// No-op if the child is not a text fragment.
    pub fn set_run_text(&mut self, idx: usize, text: impl Into<String>) {
        if let Some(Inline::Run { text: t }) = self.inlines.get_mut(idx) {
            *t = text.into();
        }
    }

    /// Insert an inline child at `idx`, shifting later children right.
    pub fn insert_inline(&mut self, idx: usize, inline: Inline) {
        let idx = idx.min(self.inlines.len());
        self.inlines.insert(idx, inline);
    }
}

/// A table cell holding block paragraphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::from_text(text)],
        }
    }

    pub fn text(&self) -> String {
        self.paragraphs.iter().map(|p| p.text()).collect()
    }
}

/// A table row. Cloning a row is a deep clone of all its cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::from_text).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.text()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Insert `row` immediately before the row at `idx`.
    pub fn insert_row_before(&mut self, idx: usize, row: Row) {
        let idx = idx.min(self.rows.len());
        self.rows.insert(idx, row);
    }

    /// Remove and return the row at `idx`, if present.
    pub fn remove_row(&mut self, idx: usize) -> Option<Row> {
        if idx < self.rows.len() {
            Some(self.rows.remove(idx))
        } else {
            None
        }
    }
}

/// A block-level element in the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// The address of a paragraph anywhere in the document: either directly
/// in the body, or nested inside a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParaAddr {
    pub block: usize,
    /// `(row, cell, paragraph)` when the paragraph lives in a table cell.
    pub cell: Option<(usize, usize, usize)>,
}

impl fmt::Display for ParaAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell {
            None => write!(f, "block {}", self.block),
            Some((row, cell, para)) => write!(
                f,
                "block {} row {} cell {} paragraph {}",
                self.block, row, cell, para
            ),
        }
    }
}

/// A document: an ordered list of blocks, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn push_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Every paragraph in document order, body paragraphs and table-cell
    /// paragraphs alike, each with its address.
    pub fn paragraphs(&self) -> Vec<(ParaAddr, &Paragraph)> {
        let mut out = Vec::new();
        for (b, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Paragraph(p) => out.push((ParaAddr { block: b, cell: None }, p)),
                Block::Table(table) => {
                    for (r, row) in table.rows.iter().enumerate() {
                        for (c, cell) in row.cells.iter().enumerate() {
                            for (p, para) in cell.paragraphs.iter().enumerate() {
                                out.push((
                                    ParaAddr {
                                        block: b,
                                        cell: Some((r, c, p)),
                                    },
                                    para,
                                ));
                            }
                        }
                    }
                }
            }
        }
        out
    }

    /// Resolve a paragraph address to a mutable paragraph.
    pub fn paragraph_mut(&mut self, addr: ParaAddr) -> Option<&mut Paragraph> {
        match (self.blocks.get_mut(addr.block)?, addr.cell) {
            (Block::Paragraph(p), None) => Some(p),
            (Block::Table(table), Some((r, c, p))) => table
                .rows
                .get_mut(r)?
                .cells
                .get_mut(c)?
                .paragraphs
                .get_mut(p),
            _ => None,
        }
    }

    /// Every table in document order, with its block index.
    pub fn tables(&self) -> impl Iterator<Item = (usize, &Table)> {
        self.blocks.iter().enumerate().filter_map(|(i, b)| match b {
            Block::Table(t) => Some((i, t)),
            Block::Paragraph(_) => None,
        })
    }

    pub fn table_mut(&mut self, block: usize) -> Option<&mut Table> {
        match self.blocks.get_mut(block)? {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }

    /// Concatenated visible text of the whole document.
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .map(|(_, p)| p.text())
            .collect()
    }

    /// Persist this document as JSON.
    pub fn save(&self, path: &Path) -> Result<(), DocError> {
        let file = File::create(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Reload a persisted document.
    pub fn load(path: &Path) -> Result<Self, DocError> {
        let file = File::open(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
