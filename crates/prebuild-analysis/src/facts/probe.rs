//! File existence checks.

use std::path::Path;

/// The only blocking operation the resolver performs. Results may be stale
/// by the time they are used; callers re-probe before acting on them.
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
