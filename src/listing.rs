use std::path::PathBuf;

/// The immediate children of one directory, as reported by a
/// [`Source`](crate::traits::Source).
///
/// Paths are whatever the source produces, usually `dir.join(name)`, so a
/// relative root gives relative paths. Order is the source's own order; the
/// engine never sorts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Immediate subdirectories. Queued for later listing in recursive searches.
    pub dirs: Vec<PathBuf>,

    /// Immediate non-directory entries. These are the match candidates.
    pub files: Vec<PathBuf>,
}
