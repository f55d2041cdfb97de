use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoEnumIterator, VariantNames};

use crate::drawing::label::AssetCategory;

/// How geometry descriptors are written
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DescriptorFormat {
    /// Every geometry carries an explicit `kind`
    #[default]
    Tagged,
    /// Positional arrays, circles padded with nulls
    Legacy,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ExtractOptions {
    pub descriptor_format: DescriptorFormat,
    /// Wrap fragments in a fixed-viewport `<svg>` container
    pub wrap_fragments: bool,
    /// Side length of the wrapper viewBox
    pub viewport: u32,
    /// Text of the comment marking where the renderer injects its palette
    pub palette_placeholder: String,
    /// Populate each output directory in a staging directory and swap it in
    pub atomic_writes: bool,
    /// Categories emitted by the asset pipeline
    pub categories: Vec<AssetCategory>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            descriptor_format: DescriptorFormat::Tagged,
            wrap_fragments: false,
            viewport: 210,
            palette_placeholder: "palette".to_string(),
            atomic_writes: true,
            categories: AssetCategory::iter().collect(),
        }
    }
}
