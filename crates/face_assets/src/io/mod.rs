pub mod descriptor;
pub mod emit;
pub mod fragment;

pub use descriptor::Descriptor;
pub use emit::{BundleEmitter, EmitReport};
pub use fragment::render_fragment;

use std::path::PathBuf;

use crate::{
    drawing::Element,
    error::{MalformedAsset, Result},
};

/// Rejects label-derived names that would not stay a single path component
/// inside their output directory.
pub fn check_file_stem(label: &str, identifier: &str) -> Result<()> {
    let reason = if identifier.is_empty() {
        "empty name"
    } else if identifier.contains(['/', '\\']) {
        "contains a path separator"
    } else if identifier == "." || identifier == ".." {
        "names a relative directory"
    } else {
        return Ok(());
    };
    Err(MalformedAsset::InvalidIdentifier {
        label: label.to_string(),
        reason: reason.to_string(),
    }
    .into())
}

/// A subtree of the drawing written as a standalone `.svg`
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    pub element: &'a Element,
    /// Replaces the root's `style` attribute
    pub style: Option<&'static str>,
}

impl<'a> Fragment<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element, style: None }
    }

    pub fn with_style(mut self, style: &'static str) -> Self {
        self.style = Some(style);
        self
    }
}

/// One output unit: `<name>.json` and/or `<name>.svg`
#[derive(Debug, Clone)]
pub struct AssetBundle<'a> {
    pub name: String,
    /// Subdirectory of the owning set, if any
    pub subdir: Option<String>,
    pub descriptor: Option<Descriptor>,
    pub fragment: Option<Fragment<'a>>,
}

/// Bundles sharing one destination directory, which is reset before writing
#[derive(Debug, Clone)]
pub struct BundleSet<'a> {
    /// Relative to the destination root
    pub directory: PathBuf,
    pub bundles: Vec<AssetBundle<'a>>,
}

impl<'a> BundleSet<'a> {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            bundles: Vec::new(),
        }
    }

    pub fn push(&mut self, bundle: AssetBundle<'a>) {
        self.bundles.push(bundle);
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
