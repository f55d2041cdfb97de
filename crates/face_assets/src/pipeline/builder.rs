use crate::{
    drawing::label::AssetCategory,
    options::{DescriptorFormat, ExtractOptions},
    pipeline::Pipeline,
    resolvers::{CategoryExtractor, FeatureExtractor, SkullExtractor},
    traits::AssetExtractor,
};

/// Builder for creating extraction pipelines with a fluent API
pub struct PipelineBuilder {
    extractors: Vec<Box<dyn AssetExtractor>>,
    options: ExtractOptions,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
            options: ExtractOptions::default(),
        }
    }

    /// Add an extractor; extractors run in insertion order
    pub fn add_extractor<E>(mut self, extractor: E) -> Self
    where
        E: AssetExtractor + 'static,
    {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Pair guides with numbered feature layers
    pub fn with_features(self) -> Self {
        self.add_extractor(FeatureExtractor::new())
    }

    /// Extract skull template geometry
    pub fn with_skulls(self) -> Self {
        self.add_extractor(SkullExtractor::new())
    }

    /// Emit category assets. An empty list uses the configured categories.
    pub fn with_assets(self, categories: Vec<AssetCategory>) -> Self {
        if categories.is_empty() {
            self.add_extractor(CategoryExtractor::new())
        } else {
            self.add_extractor(CategoryExtractor::with_categories(categories))
        }
    }

    /// Replace all options
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn descriptor_format(mut self, format: DescriptorFormat) -> Self {
        self.options.descriptor_format = format;
        self
    }

    pub fn wrap_fragments(mut self, wrap: bool) -> Self {
        self.options.wrap_fragments = wrap;
        self
    }

    pub fn atomic_writes(mut self, atomic: bool) -> Self {
        self.options.atomic_writes = atomic;
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline::new(self.extractors, self.options)
    }

    /// Build a pipeline running only the feature extractor
    pub fn build_features() -> Pipeline {
        Self::new().with_features().build()
    }

    /// Build a pipeline running only the skull extractor
    pub fn build_skulls() -> Pipeline {
        Self::new().with_skulls().build()
    }

    /// Build a pipeline emitting every configured category
    pub fn build_assets() -> Pipeline {
        Self::new().with_assets(Vec::new()).build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
