use tracing::{debug, info};

use crate::{
    algorithms::QuadNormalizer,
    drawing::{
        index::{IndexedElement, LabelIndex, MatchRule},
        label::Side,
    },
    error::{MalformedAsset, Result},
    io::{AssetBundle, BundleSet, Descriptor, Fragment},
    options::ExtractOptions,
    traits::{AssetExtractor, ShapeNormalizer},
    types::Geometry,
};

/// How guides are paired with numbered layers, fixed once per drawing
#[derive(Debug, Clone, Copy)]
pub enum GuideMode<'i> {
    /// A single guide governs every numbered layer
    Unsided(IndexedElement<'i>),
    /// `guide_left` and `guide_right` each govern their own suffix
    Sided {
        left: IndexedElement<'i>,
        right: IndexedElement<'i>,
    },
}

impl<'i> GuideMode<'i> {
    pub fn detect(index: &'i LabelIndex<'_>) -> Result<Self> {
        let guides = index.query(&MatchRule::AnyGuide);
        match guides.as_slice() {
            [] => Err(missing("guide")),
            [guide] => Ok(GuideMode::Unsided(*guide)),
            _ => {
                let left = index
                    .find(&MatchRule::Guide(Some(Side::Left)))
                    .ok_or_else(|| missing("guide_left"))?;
                let right = index
                    .find(&MatchRule::Guide(Some(Side::Right)))
                    .ok_or_else(|| missing("guide_right"))?;
                if let Some(unsided) = index.find(&MatchRule::Guide(None)) {
                    return Err(MalformedAsset::SideMismatch {
                        label: unsided.raw.to_string(),
                        guide: format!("{} / {}", left.raw, right.raw),
                    }
                    .into());
                }
                Ok(GuideMode::Sided { left, right })
            }
        }
    }
}

fn missing(label: &str) -> crate::error::AssetError {
    MalformedAsset::MissingLabel { label: label.to_string() }.into()
}

/// Feature pipeline: broadcasts each guide shape to the numbered layers it governs
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    normalizer: QuadNormalizer,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn guide_geometry(&self, guide: &IndexedElement<'_>) -> Result<Geometry> {
        let shape = guide
            .element
            .child_elements()
            .next()
            .ok_or_else(|| MalformedAsset::EmptyGuide { label: guide.raw.to_string() })?;
        self.normalizer.normalize(shape)
    }

    fn pair<'i>(
        &self,
        guide: &IndexedElement<'i>,
        features: Vec<IndexedElement<'i>>,
        set: &mut BundleSet<'i>,
    ) -> Result<()> {
        let geometry = self.guide_geometry(guide)?;
        debug!("Guide '{}' governs {} layers", guide.raw, features.len());

        for feature in features {
            set.push(AssetBundle {
                name: feature.raw.to_string(),
                subdir: None,
                descriptor: Some(Descriptor::Guide(geometry.clone())),
                fragment: Some(Fragment::new(feature.element)),
            });
        }
        Ok(())
    }
}

impl AssetExtractor for FeatureExtractor {
    fn name(&self) -> &'static str {
        "features"
    }

    fn extract<'i>(
        &self,
        index: &'i LabelIndex<'_>,
        _options: &ExtractOptions,
    ) -> Result<Vec<BundleSet<'i>>> {
        let mut set = BundleSet::new(index.drawing_name());

        match GuideMode::detect(index)? {
            GuideMode::Unsided(guide) => {
                let features = index.require(&MatchRule::AnyFeature, "numbered feature layers")?;
                let expected = guide.label.side();
                if let Some(stray) = features.iter().find(|f| f.label.side() != expected) {
                    return Err(MalformedAsset::SideMismatch {
                        label: stray.raw.to_string(),
                        guide: guide.raw.to_string(),
                    }
                    .into());
                }
                self.pair(&guide, features, &mut set)?;
            }
            GuideMode::Sided { left, right } => {
                if let Some(stray) = index.find(&MatchRule::Feature(None)) {
                    return Err(MalformedAsset::SideMismatch {
                        label: stray.raw.to_string(),
                        guide: format!("{} / {}", left.raw, right.raw),
                    }
                    .into());
                }
                for (guide, side) in [(left, Side::Left), (right, Side::Right)] {
                    let what = format!("numbered feature layers carrying '{}'", side.suffix());
                    let features = index.require(&MatchRule::Feature(Some(side)), &what)?;
                    self.pair(&guide, features, &mut set)?;
                }
            }
        }

        info!("Resolved {} features in '{}'", set.len(), index.drawing_name());
        Ok(vec![set])
    }
}
