use std::collections::HashMap;

use tracing::debug;

use crate::{
    drawing::{
        Drawing, Element,
        label::{AssetCategory, Label, Side},
    },
    error::{MalformedAsset, Result},
};

/// One labeled group of the drawing
#[derive(Debug, Clone, Copy)]
pub struct IndexedElement<'a> {
    pub raw: &'a str,
    pub element: &'a Element,
    pub is_layer: bool,
    pub label: &'a Label,
}

/// Matching rules understood by [`LabelIndex::query`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Raw substring containment, layers only
    Contains(String),
    /// Guide layer of exactly this side
    Guide(Option<Side>),
    AnyGuide,
    /// Numbered layer of exactly this side
    Feature(Option<Side>),
    AnyFeature,
    /// Skull template groups, layer or not
    Template,
    /// Category groups, layer or not
    Category(AssetCategory),
}

impl MatchRule {
    fn matches(&self, label: &Label, raw: &str, is_layer: bool) -> bool {
        match self {
            MatchRule::Contains(needle) => is_layer && raw.contains(needle.as_str()),
            MatchRule::Guide(side) => {
                is_layer && matches!(label, Label::Guide { side: s } if s == side)
            }
            MatchRule::AnyGuide => is_layer && label.is_guide(),
            MatchRule::Feature(side) => {
                is_layer && matches!(label, Label::Feature { side: s, .. } if s == side)
            }
            MatchRule::AnyFeature => is_layer && label.is_feature(),
            MatchRule::Template => matches!(label, Label::Template { .. }),
            MatchRule::Category(category) => {
                matches!(label, Label::Category { category: c, .. } if c == category)
            }
        }
    }
}

/// Labeled groups of a drawing, in document order, parsed once.
///
/// Structured keys are unique: building the index fails on a duplicated
/// guide, feature, template or category label.
#[derive(Debug)]
pub struct LabelIndex<'a> {
    drawing_name: &'a str,
    entries: Vec<(&'a str, &'a Element, bool)>,
    labels: Vec<Label>,
}

impl<'a> LabelIndex<'a> {
    pub fn build(drawing: &'a Drawing) -> Result<Self> {
        let mut entries = Vec::new();
        let mut labels = Vec::new();
        let mut seen: HashMap<Label, &'a str> = HashMap::new();

        for element in drawing.root.descendants() {
            if !element.is_group() {
                continue;
            }
            let Some(raw) = element.label() else {
                continue;
            };
            let label = Label::parse(raw);
            let is_layer = element.is_layer();

            let keyed = match &label {
                Label::Guide { .. } | Label::Feature { .. } => is_layer,
                Label::Template { .. } | Label::Category { .. } => true,
                Label::Component(_) | Label::Other(_) => false,
            };
            if keyed && seen.insert(label.clone(), raw).is_some() {
                return Err(MalformedAsset::DuplicateLabel {
                    label: raw.to_string(),
                    scope: format!("drawing '{}'", drawing.name),
                }
                .into());
            }

            entries.push((raw, element, is_layer));
            labels.push(label);
        }

        debug!("Indexed {} labeled groups in '{}'", entries.len(), drawing.name);
        Ok(Self { drawing_name: &drawing.name, entries, labels })
    }

    /// Stem of the source file the index was built from
    pub fn drawing_name(&self) -> &'a str {
        self.drawing_name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IndexedElement<'_>> {
        self.entries
            .iter()
            .zip(&self.labels)
            .map(|(&(raw, element, is_layer), label)| IndexedElement { raw, element, is_layer, label })
    }

    /// Entries satisfying `rule`, in document order
    pub fn query(&self, rule: &MatchRule) -> Vec<IndexedElement<'_>> {
        self.iter()
            .filter(|entry| rule.matches(entry.label, entry.raw, entry.is_layer))
            .collect()
    }

    /// Like [`query`](Self::query) but at least one match is required
    pub fn require(&self, rule: &MatchRule, what: &str) -> Result<Vec<IndexedElement<'_>>> {
        let found = self.query(rule);
        if found.is_empty() {
            return Err(MalformedAsset::NoMatches { what: what.to_string() }.into());
        }
        Ok(found)
    }

    /// The single entry satisfying `rule`, if any
    pub fn find(&self, rule: &MatchRule) -> Option<IndexedElement<'_>> {
        self.iter()
            .find(|entry| rule.matches(entry.label, entry.raw, entry.is_layer))
    }
}
