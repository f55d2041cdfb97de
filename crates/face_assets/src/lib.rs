//! # Face Asset Extraction Library
//!
//! Turns layered, hand-authored SVG drawings into per-asset fragment files
//! for a face compositor: drawable SVG fragments plus small JSON geometry
//! descriptors.
//!
//! ## Core Features
//!
//! - **Label Index**: every `inkscape:label` is parsed once into a structured [`Label`]
//! - **Geometry Normalization**: rectangles, circles and 4-point paths become quads or circles
//! - **Feature, Skull and Asset Pipelines**: composable [`AssetExtractor`]s
//! - **Safe Output**: bundle sets are staged and swapped into place, and nothing is
//!   written when any asset is malformed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use face_assets::Pipeline;
//! use std::path::Path;
//!
//! let pipeline = Pipeline::builder()
//!     .with_features()
//!     .build();
//!
//! pipeline.process_file(Path::new("eyes.svg"), Path::new("out"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Legacy Output
//!
//! ```rust,no_run
//! use face_assets::{DescriptorFormat, Pipeline};
//! use std::path::Path;
//!
//! let pipeline = Pipeline::builder()
//!     .with_skulls()
//!     .descriptor_format(DescriptorFormat::Legacy)
//!     .wrap_fragments(true)
//!     .build();
//! pipeline.process_file(Path::new("skulls.svg"), Path::new("out"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod drawing;
pub mod algorithms;
pub mod resolvers;
pub mod pipeline;
pub mod io;
pub mod options;
pub mod command;

// Re-exports for convenience
pub use error::{AssetError, MalformedAsset, Result};
pub use types::{Circle, Geometry, HeadShape, Outline, Point, Quad, SkullGeometry};
pub use traits::*;
pub use drawing::{
    Drawing, Element,
    index::{LabelIndex, MatchRule},
    label::{AssetCategory, Label, Side, SkullComponent},
};
pub use algorithms::{OutlineNormalizer, QuadNormalizer};
pub use resolvers::{CategoryExtractor, FeatureExtractor, SkullExtractor};
pub use pipeline::{Pipeline, PipelineReport, builder::PipelineBuilder};
pub use io::{AssetBundle, BundleEmitter, BundleSet, Descriptor, EmitReport, Fragment};
pub use options::{DescriptorFormat, ExtractOptions};
pub use command::ExtractCommand;
