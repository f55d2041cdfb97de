use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{drawing::label::AssetCategory, pipeline::builder::PipelineBuilder};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum ExtractCommand {
    /// Pair guide shapes with numbered feature layers
    #[serde(rename = "features")]
    Features,

    /// Extract anchor geometry of every skull template
    #[serde(rename = "skulls")]
    Skulls,

    /// Emit one fragment per category asset group
    #[serde(rename = "assets")]
    Assets {
        /// Categories to emit; empty means the configured default
        #[serde(default)]
        categories: Vec<AssetCategory>,
    },
}

impl ExtractCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExtractCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// Get a description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Self::Features => "Write <drawing>/<label>.json and <label>.svg for every numbered layer, using its guide's geometry",
            Self::Skulls => "Write skulls/<template>/skull.json with the normalized components of each skull template",
            Self::Assets { .. } => "Write <category>/<identifier>.svg for every category group, forced visible",
        }
    }

    /// Add the extractor this command runs to `builder`
    pub fn apply(&self, builder: PipelineBuilder) -> PipelineBuilder {
        match self {
            Self::Features => builder.with_features(),
            Self::Skulls => builder.with_skulls(),
            Self::Assets { categories } => builder.with_assets(categories.clone()),
        }
    }
}
