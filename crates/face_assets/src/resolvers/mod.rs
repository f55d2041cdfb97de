//! Turn labeled groups into bundle sets.
//!
//! Each resolver implements [`AssetExtractor`](crate::traits::AssetExtractor)
//! and never touches the filesystem.

pub mod category;
pub mod guide;
pub mod template;

pub use category::CategoryExtractor;
pub use guide::{FeatureExtractor, GuideMode};
pub use template::{SKULLS_DIR, SkullExtractor};
