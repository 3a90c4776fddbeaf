// src/pipeline.rs
//! The fill orchestrator.
//!
//! One fill is two phases over two document trees. First the three
//! fillers scan the template as an unordered parallel group, each
//! producing an edit plan for its own field subset; the joined plans are
//! applied and the result persisted as the *record* document (all
//! available substitutions applied, unresolved tokens intact). Then the
//! record is reparsed from disk and the fillers' blanking scans erase
//! whatever is still unresolved, producing the *clean* document. The
//! blanking pass never touches the tree the fillers just wrote to, so no
//! locking is needed within a fill.
//!
//! Fills are independent of each other: a pipeline holds only the
//! immutable schema and an executor, and the filler set is rebuilt from
//! the stateless [`FillerKind`] constants on every invocation.

use crate::error::PipelineError;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stencil_doc::Document;
use stencil_executor::ExecutorImpl;
use stencil_fill::{FillPlan, FillerKind, apply_plans};
use stencil_traits::Executor;
use stencil_types::{TemplateSchema, ValueMap};

/// The two artifacts of a completed fill. Both are write-once; deleting
/// them when done is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct FillArtifacts {
    /// All available substitutions applied, unresolved tokens intact.
    pub record: PathBuf,
    /// Derived from the record with every remaining token blanked; the
    /// only artifact eligible for downstream format conversion.
    pub clean: PathBuf,
}

/// Progress of one fill. Transitions only move forward; a scan or
/// persistence failure aborts the whole fill with no partial recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillStage {
    Initialized,
    Scanning,
    RecordPersisted,
    ScanningForBlanking,
    CleanPersisted,
    Done,
}

fn advance(stage: &mut FillStage, next: FillStage) {
    debug!("fill stage: {:?} -> {:?}", stage, next);
    *stage = next;
}

/// Builder for [`FillPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    schema: Option<TemplateSchema>,
    executor: Option<ExecutorImpl>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: TemplateSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn build(self) -> Result<FillPipeline, PipelineError> {
        let schema = self
            .schema
            .ok_or_else(|| PipelineError::Config("no template schema provided".to_string()))?;
        Ok(FillPipeline {
            schema: Arc::new(schema),
            executor: self.executor.unwrap_or_default(),
        })
    }
}

/// Fills templates described by one schema.
pub struct FillPipeline {
    schema: Arc<TemplateSchema>,
    executor: ExecutorImpl,
}

impl FillPipeline {
    pub fn new(schema: TemplateSchema) -> Self {
        Self {
            schema: Arc::new(schema),
            executor: ExecutorImpl::default(),
        }
    }

    pub fn schema(&self) -> &TemplateSchema {
        &self.schema
    }

    /// One fill pass in memory: every filler scans the template, the
    /// joined plans are applied, and the record document is returned.
    /// Unresolved placeholders stay intact.
    pub fn fill(&self, template: &Document, values: &ValueMap) -> Result<Document, PipelineError> {
        let plans = self.fan_out(template, Some(values))?;
        let mut record = template.clone();
        apply_plans(&mut record, plans)?;
        Ok(record)
    }

    /// Blank every unresolved placeholder of a record document,
    /// producing the clean document.
    pub fn blank(&self, record: &Document) -> Result<Document, PipelineError> {
        let plans = self.fan_out(record, None)?;
        let mut clean = record.clone();
        apply_plans(&mut clean, plans)?;
        Ok(clean)
    }

    /// The full two-phase fill: load the template, fill and persist the
    /// record document, reopen it, blank it, and persist the clean
    /// document.
    pub fn fill_template(
        &self,
        values: &ValueMap,
        template_path: &Path,
        record_path: &Path,
        clean_path: &Path,
    ) -> Result<FillArtifacts, PipelineError> {
        let mut stage = FillStage::Initialized;

        let template = Document::load(template_path)?;
        advance(&mut stage, FillStage::Scanning);
        let record = self.fill(&template, values)?;
        record.save(record_path)?;
        advance(&mut stage, FillStage::RecordPersisted);
        info!("document record generated: {}", record_path.display());

        // Fresh parse of the persisted record; the blanking scans never
        // see the tree the fillers mutated.
        let reopened = Document::load(record_path)?;
        advance(&mut stage, FillStage::ScanningForBlanking);
        let clean = self.blank(&reopened)?;
        clean.save(clean_path)?;
        advance(&mut stage, FillStage::CleanPersisted);
        info!("clean document generated: {}", clean_path.display());

        advance(&mut stage, FillStage::Done);
        Ok(FillArtifacts {
            record: record_path.to_path_buf(),
            clean: clean_path.to_path_buf(),
        })
    }

    /// Fan the three fillers out over the shared document and join their
    /// plans. With `values` present this is the fill scan, without it
    /// the blanking scan.
    fn fan_out(
        &self,
        doc: &Document,
        values: Option<&ValueMap>,
    ) -> Result<Vec<FillPlan>, PipelineError> {
        debug!(
            "scanning with {} ({} workers)",
            self.executor.name(),
            self.executor.parallelism()
        );
        let doc = Arc::new(doc.clone());
        let schema = Arc::clone(&self.schema);
        let values = values.map(|v| Arc::new(v.clone()));

        let results = self
            .executor
            .execute_all_fallible(FillerKind::ALL.to_vec(), move |kind| match &values {
                Some(values) => kind.scan(&doc, &schema, values),
                None => kind.blank(&doc, &schema),
            });

        let mut plans = Vec::with_capacity(results.len());
        for result in results {
            plans.push(result?);
        }
        Ok(plans)
    }
}
