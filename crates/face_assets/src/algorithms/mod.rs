pub mod normalize;
pub mod path;

pub use normalize::*;
pub use path::*;
