//! Structured form of the `inkscape:label` naming convention.
//!
//! Every label is parsed exactly once; downstream code matches on [`Label`]
//! instead of re-inspecting strings.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

static FEATURE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<number>[0-9]+)(?P<side>_left|_right)?(?P<back>_back)?$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// `_left` / `_right`
    pub fn suffix(self) -> &'static str {
        match self {
            Side::Left => "_left",
            Side::Right => "_right",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "_left" => Some(Side::Left),
            "_right" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Face-part categories of the asset pipeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssetCategory {
    Face,
    Ears,
    Nose,
    Mouth,
    Eyes,
    Eyebrows,
    Hair,
}

/// Fixed child names inside a skull template
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Display, EnumString, EnumIter, IntoStaticStr, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SkullComponent {
    EyeballLeft,
    EyeballRight,
    EarLeft,
    EarRight,
    Mouth,
    Nose,
    Hair,
    Skull,
    SkullCap,
    CheekBones,
    Mandible,
}

impl SkullComponent {
    /// Components every template must carry regardless of head schema
    pub const REQUIRED: [SkullComponent; 7] = [
        SkullComponent::EyeballLeft,
        SkullComponent::EyeballRight,
        SkullComponent::EarLeft,
        SkullComponent::EarRight,
        SkullComponent::Mouth,
        SkullComponent::Nose,
        SkullComponent::Hair,
    ];

    pub const SKELETAL: [SkullComponent; 3] = [
        SkullComponent::SkullCap,
        SkullComponent::CheekBones,
        SkullComponent::Mandible,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Guide { side: Option<Side> },
    /// `number` keeps the digits as written, so `1` and `01` are distinct.
    /// `back` marks the layer drawn behind the face for the same slot.
    Feature { number: String, side: Option<Side>, back: bool },
    Component(SkullComponent),
    Template { name: String },
    Category { category: AssetCategory, identifier: String },
    Other(String),
}

impl Label {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "guide" => return Label::Guide { side: None },
            "guide_left" => return Label::Guide { side: Some(Side::Left) },
            "guide_right" => return Label::Guide { side: Some(Side::Right) },
            _ => {}
        }

        if let Some(caps) = FEATURE_LABEL.captures(raw) {
            return Label::Feature {
                number: caps["number"].to_string(),
                side: caps.name("side").and_then(|m| Side::from_suffix(m.as_str())),
                back: caps.name("back").is_some(),
            };
        }

        if let Ok(component) = SkullComponent::from_str(raw) {
            return Label::Component(component);
        }

        if let Some((prefix, rest)) = raw.split_once('_') {
            if prefix == "skull" {
                return Label::Template { name: rest.to_string() };
            }
            if let Ok(category) = AssetCategory::from_str(prefix) {
                return Label::Category { category, identifier: rest.to_string() };
            }
        }

        Label::Other(raw.to_string())
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Label::Guide { side } | Label::Feature { side, .. } => *side,
            _ => None,
        }
    }

    pub fn is_guide(&self) -> bool {
        matches!(self, Label::Guide { .. })
    }

    pub fn is_feature(&self) -> bool {
        matches!(self, Label::Feature { .. })
    }

    pub fn is_back(&self) -> bool {
        matches!(self, Label::Feature { back: true, .. })
    }
}
