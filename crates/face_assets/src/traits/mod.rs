use crate::{
    drawing::{Element, index::LabelIndex},
    error::Result,
    io::BundleSet,
    options::ExtractOptions,
    types::Geometry,
};

/// Trait for reducing one authoring shape to canonical geometry
pub trait ShapeNormalizer: Send + Sync {
    /// Normalize `element`, failing on shape kinds this normalizer does not accept
    fn normalize(&self, element: &Element) -> Result<Geometry>;
}

/// Trait for turning labeled groups of a drawing into output bundles
pub trait AssetExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Resolve every bundle this extractor produces, without touching the filesystem
    fn extract<'i>(
        &self,
        index: &'i LabelIndex<'_>,
        options: &ExtractOptions,
    ) -> Result<Vec<BundleSet<'i>>>;
}
