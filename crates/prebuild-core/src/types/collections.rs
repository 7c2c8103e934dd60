//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for candidate file lists (usually 1-2 entries).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
