//! Build-time observations about one project.

pub mod inspector;
pub mod probe;
pub mod types;

pub use inspector::ProjectInspector;
pub use probe::{FileProbe, FsProbe};
pub use types::*;
