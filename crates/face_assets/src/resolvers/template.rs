use std::{collections::HashMap, str::FromStr};

use tracing::{debug, info};

use crate::{
    algorithms::{OutlineNormalizer, QuadNormalizer},
    drawing::{
        Element,
        index::{LabelIndex, MatchRule},
        label::{Label, SkullComponent},
    },
    error::{MalformedAsset, Result},
    io::{AssetBundle, BundleSet, Descriptor, check_file_stem},
    options::ExtractOptions,
    traits::{AssetExtractor, ShapeNormalizer},
    types::{Geometry, HeadShape, SkullGeometry},
};

/// Directory under the destination root holding every template
pub const SKULLS_DIR: &str = "skulls";

/// Direct children of one template, keyed by their exact component label
struct Components<'a> {
    template: &'a str,
    by_name: HashMap<SkullComponent, &'a Element>,
}

impl<'a> Components<'a> {
    fn collect(template: &'a str, element: &'a Element) -> Result<Self> {
        let mut by_name = HashMap::new();
        for child in element.child_elements() {
            let Some(component) = child.label().and_then(|raw| SkullComponent::from_str(raw).ok()) else {
                continue;
            };
            if by_name.insert(component, child).is_some() {
                return Err(MalformedAsset::DuplicateLabel {
                    label: component.to_string(),
                    scope: format!("template '{}'", template),
                }
                .into());
            }
        }
        Ok(Self { template, by_name })
    }

    fn get(&self, component: SkullComponent) -> Option<&'a Element> {
        self.by_name.get(&component).copied()
    }

    fn require(&self, component: SkullComponent) -> Result<&'a Element> {
        self.get(component).ok_or_else(|| {
            MalformedAsset::MissingComponent {
                template: self.template.to_string(),
                component: component.to_string(),
            }
            .into()
        })
    }
}

/// Skull pipeline: anchor geometry of every `skull_<name>` template
#[derive(Debug, Clone, Default)]
pub struct SkullExtractor {
    quads: QuadNormalizer,
    outlines: OutlineNormalizer,
}

impl SkullExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn head(&self, components: &Components<'_>) -> Result<HeadShape> {
        let outline = components.get(SkullComponent::Skull);
        let has_skeletal = SkullComponent::SKELETAL
            .iter()
            .any(|c| components.get(*c).is_some());

        match (outline, has_skeletal) {
            (Some(_), true) => Err(MalformedAsset::MixedSkullSchema {
                template: components.template.to_string(),
            }
            .into()),
            (Some(skull), false) => match self.outlines.normalize(skull)? {
                Geometry::Outline(outline) => Ok(HeadShape::Outline { outline }),
                _ => Err(MalformedAsset::UnsupportedShape {
                    label: skull.display_name(),
                    tag: skull.name.qualified(),
                }
                .into()),
            },
            (None, true) => Ok(HeadShape::Skeletal {
                skull_cap: self.quads.normalize(components.require(SkullComponent::SkullCap)?)?,
                cheek_bones: self.quads.normalize(components.require(SkullComponent::CheekBones)?)?,
                mandible: self.quads.normalize(components.require(SkullComponent::Mandible)?)?,
            }),
            (None, false) => Err(MalformedAsset::MissingComponent {
                template: components.template.to_string(),
                component: SkullComponent::Skull.to_string(),
            }
            .into()),
        }
    }

    pub fn resolve(&self, template: &str, element: &Element) -> Result<SkullGeometry> {
        let components = Components::collect(template, element)?;
        let [eyeball_left, eyeball_right, ear_left, ear_right, mouth, nose, hair] = SkullComponent::REQUIRED
            .map(|component| components.require(component).and_then(|e| self.quads.normalize(e)));

        Ok(SkullGeometry {
            eyeball_left: eyeball_left?,
            eyeball_right: eyeball_right?,
            ear_left: ear_left?,
            ear_right: ear_right?,
            mouth: mouth?,
            nose: nose?,
            hair: hair?,
            head: self.head(&components)?,
        })
    }
}

impl AssetExtractor for SkullExtractor {
    fn name(&self) -> &'static str {
        "skulls"
    }

    fn extract<'i>(
        &self,
        index: &'i LabelIndex<'_>,
        _options: &ExtractOptions,
    ) -> Result<Vec<BundleSet<'i>>> {
        let mut set = BundleSet::new(SKULLS_DIR);

        for entry in index.require(&MatchRule::Template, "skull templates")? {
            let Label::Template { name } = entry.label else {
                continue;
            };
            check_file_stem(entry.raw, name)?;
            let skull = self.resolve(name, entry.element)?;
            debug!("Template '{}' uses the {} head schema", name, schema_name(&skull.head));
            set.push(AssetBundle {
                name: "skull".to_string(),
                subdir: Some(name.clone()),
                descriptor: Some(Descriptor::Skull(skull)),
                fragment: None,
            });
        }

        info!("Resolved {} skull templates", set.len());
        Ok(vec![set])
    }
}

fn schema_name(head: &HeadShape) -> &'static str {
    match head {
        HeadShape::Outline { .. } => "outline",
        HeadShape::Skeletal { .. } => "skeletal",
    }
}
