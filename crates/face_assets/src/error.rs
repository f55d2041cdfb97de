use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Malformed asset: {0}")]
    Malformed(#[from] MalformedAsset),

    #[error("Failed to parse drawing: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A source drawing that does not follow the labeling and shape conventions.
///
/// Always fatal: the run aborts and nothing is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedAsset {
    #[error("required label '{label}' not found")]
    MissingLabel { label: String },

    #[error("template '{template}' is missing component '{component}'")]
    MissingComponent { template: String, component: String },

    #[error("label '{label}' appears more than once in {scope}")]
    DuplicateLabel { label: String, scope: String },

    #[error("'{label}' decodes to {found} points, expected {expected}")]
    PointCount { label: String, expected: usize, found: usize },

    #[error("unknown component type '{tag}' for '{label}'")]
    UnsupportedShape { label: String, tag: String },

    #[error("'{label}' has no '{attribute}' attribute")]
    MissingAttribute { label: String, attribute: String },

    #[error("'{label}' has a non-numeric '{attribute}': '{value}'")]
    InvalidNumber { label: String, attribute: String, value: String },

    #[error("'{label}' has invalid path data: {message}")]
    InvalidPathData { label: String, message: String },

    #[error("template '{template}' mixes the outline and skeletal head schemas")]
    MixedSkullSchema { template: String },

    #[error("feature '{label}' does not match the side of guide '{guide}'")]
    SideMismatch { label: String, guide: String },

    #[error("guide layer '{label}' has no shape")]
    EmptyGuide { label: String },

    #[error("'{label}' cannot name an output file: {reason}")]
    InvalidIdentifier { label: String, reason: String },

    #[error("no {what} found")]
    NoMatches { what: String },
}

pub type Result<T> = std::result::Result<T, AssetError>;
