use face_assets::{AssetError, ExtractCommand, ExtractOptions, Pipeline, PipelineBuilder, PipelineReport};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    AssetError(#[from] AssetError),
    #[error("Job has no commands")]
    NoCommands,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// One source drawing, the commands to run on it and where to write
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub commands: Vec<ExtractCommand>,
    #[serde(default)]
    pub options: ExtractOptions,
}

/// Parse `path` as TOML or JSON depending on its extension
fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, CliError> {
    let path_ref = path.as_ref();
    match path_ref.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&fs::read_to_string(path_ref)?)?),
        Some("json") => Ok(serde_json::from_str(&fs::read_to_string(path_ref)?)?),
        _ => Err(CliError::UnsupportedFileFormat),
    }
}

/// Load extraction options from a TOML or JSON file
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<ExtractOptions, CliError> {
    load(path)
}

impl ExtractJob {
    /// Load ExtractJob configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        let job: ExtractJob = toml::from_str(content)?;
        Ok(job)
    }

    /// Load ExtractJob configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, CliError> {
        let job: ExtractJob = serde_json::from_str(content)?;
        Ok(job)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        load(path)
    }

    /// Convert ExtractJob to TOML string
    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Convert ExtractJob to JSON string
    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// One pipeline running every command over a single parse of the source
    pub fn pipeline(&self) -> Result<Pipeline, CliError> {
        if self.commands.is_empty() {
            return Err(CliError::NoCommands);
        }
        let builder = self
            .commands
            .iter()
            .fold(PipelineBuilder::new(), |builder, command| command.apply(builder));
        Ok(builder.with_options(self.options.clone()).build())
    }

    pub fn run(&self) -> Result<PipelineReport, CliError> {
        Ok(self.pipeline()?.process_file(&self.source, &self.destination)?)
    }
}
