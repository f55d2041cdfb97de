use tracing::{debug, info};

use crate::{
    drawing::{
        index::{LabelIndex, MatchRule},
        label::{AssetCategory, Label},
    },
    error::Result,
    io::{AssetBundle, BundleSet, Fragment, check_file_stem},
    options::ExtractOptions,
    traits::AssetExtractor,
};

/// Style forced onto every emitted asset root; authoring hides inactive layers
pub const VISIBLE_STYLE: &str = "display:inline";

/// Asset pipeline: one fragment per `<category>_<identifier>` group
#[derive(Debug, Clone, Default)]
pub struct CategoryExtractor {
    /// Overrides `ExtractOptions::categories` when set
    categories: Option<Vec<AssetCategory>>,
}

impl CategoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<AssetCategory>) -> Self {
        Self { categories: Some(categories) }
    }

    fn categories<'o>(&'o self, options: &'o ExtractOptions) -> &'o [AssetCategory] {
        self.categories.as_deref().unwrap_or(options.categories.as_slice())
    }
}

impl AssetExtractor for CategoryExtractor {
    fn name(&self) -> &'static str {
        "assets"
    }

    fn extract<'i>(
        &self,
        index: &'i LabelIndex<'_>,
        options: &ExtractOptions,
    ) -> Result<Vec<BundleSet<'i>>> {
        let mut sets = Vec::new();

        for &category in self.categories(options) {
            let directory: &'static str = category.into();
            let mut set = BundleSet::new(directory);
            for entry in index.query(&MatchRule::Category(category)) {
                let Label::Category { identifier, .. } = entry.label else {
                    continue;
                };
                check_file_stem(entry.raw, identifier)?;
                set.push(AssetBundle {
                    name: identifier.clone(),
                    subdir: None,
                    descriptor: None,
                    fragment: Some(Fragment::new(entry.element).with_style(VISIBLE_STYLE)),
                });
            }
            debug!("Category '{}' has {} assets", category, set.len());
            sets.push(set);
        }

        info!(
            "Resolved {} assets across {} categories",
            sets.iter().map(BundleSet::len).sum::<usize>(),
            sets.len()
        );
        Ok(sets)
    }
}
