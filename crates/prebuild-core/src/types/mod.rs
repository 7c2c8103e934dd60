//! Shared collection aliases and lifecycle types.

pub mod collections;
pub mod stage;

pub use collections::{BTreeMap, FxHashMap, FxHashSet, SmallVec4};
pub use stage::Stage;
