pub mod builder;

use std::{collections::HashSet, path::Path};

use tracing::{info, warn};

use crate::{
    drawing::{Drawing, index::LabelIndex},
    error::Result,
    io::{BundleEmitter, BundleSet, EmitReport},
    options::ExtractOptions,
    traits::AssetExtractor,
};

/// Totals of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub extractors: Vec<&'static str>,
    pub bundles: usize,
    pub emitted: EmitReport,
}

/// Runs a list of extractors over one drawing and writes their bundle sets
pub struct Pipeline {
    extractors: Vec<Box<dyn AssetExtractor>>,
    options: ExtractOptions,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(extractors: Vec<Box<dyn AssetExtractor>>, options: ExtractOptions) -> Self {
        Self { extractors, options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Resolve every bundle set without touching the filesystem
    pub fn extract<'i>(&self, index: &'i LabelIndex<'_>) -> Result<Vec<BundleSet<'i>>> {
        let mut sets = Vec::new();
        for extractor in &self.extractors {
            sets.extend(extractor.extract(index, &self.options)?);
        }

        let mut seen = HashSet::new();
        for set in &sets {
            if !seen.insert(&set.directory) {
                warn!(
                    "Directory {} is targeted by more than one bundle set; the last one wins",
                    set.directory.display()
                );
            }
        }
        Ok(sets)
    }

    /// Extract everything from `drawing`, then emit under `destination`.
    ///
    /// A malformed drawing fails before any directory is touched.
    pub fn run(&self, drawing: &Drawing, destination: &Path) -> Result<PipelineReport> {
        let index = LabelIndex::build(drawing)?;
        let sets = self.extract(&index)?;

        let emitter = BundleEmitter::new(destination, self.options.clone());
        let mut report = PipelineReport {
            extractors: self.extractors.iter().map(|e| e.name()).collect(),
            ..PipelineReport::default()
        };
        for set in &sets {
            report.bundles += set.len();
            report.emitted.merge(emitter.emit(set)?);
        }

        info!(
            "Drawing '{}': {} bundles in {} directories",
            drawing.name,
            report.bundles,
            report.emitted.directories.len()
        );
        Ok(report)
    }

    /// Parse `source` and [`run`](Self::run) it
    pub fn process_file(&self, source: &Path, destination: &Path) -> Result<PipelineReport> {
        let drawing = Drawing::from_file(source)?;
        self.run(&drawing, destination)
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        let names: Vec<_> = self.extractors.iter().map(|e| e.name()).collect();
        format!(
            "Pipeline: extractors [{}], {} descriptors, {} fragments",
            names.join(", "),
            self.options.descriptor_format,
            if self.options.wrap_fragments { "wrapped" } else { "bare" }
        )
    }
}
