//! # filesift
//!
//! Lazy filesystem search: exact, substring, wildcard and regex matching
//! over file names, directory names or full paths.
//!
//! A search is an ordinary [`Iterator`]: nothing is read from disk until the
//! first item is pulled, and a consumer that stops early (say, after the
//! first hit) never pays for the rest of the tree.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//! use filesift::{MatchTarget, MatchType};
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.log"), "").unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("sub").join("b.log"), "").unwrap();
//! fs::write(dir.path().join("sub").join("c.txt"), "").unwrap();
//!
//! let logs: Vec<_> = filesift::find_files(
//!     dir.path(),
//!     "*.log",
//!     true,
//!     MatchType::Wildcards,
//!     MatchTarget::File,
//! )
//! .unwrap()
//! .collect::<Result<_, _>>()
//! .unwrap();
//!
//! assert_eq!(logs, vec![dir.path().join("a.log"), dir.path().join("sub").join("b.log")]);
//! ```
//!
//! # Match types
//!
//! | [`MatchType`] | pattern `ab*` matches |
//! |---|---|
//! | `Exact`     | only `ab*` (any case) |
//! | `Contains`  | anything containing the literal `ab*` |
//! | `Wildcards` | anything containing `ab` (`*` and `?` are wildcards) |
//! | `Regex`     | anything containing `a` followed by zero or more `b` |
//!
//! All matching is case-insensitive. `Wildcards` and `Regex` are **not
//! anchored**: the expression only has to match somewhere in the candidate.
//!
//! # Custom Sources and Matchers
//!
//! Implement [`Matcher`] (or pass a closure or [`regex::Regex`]) for custom
//! matching, and [`Source`] to search something other than the local disk:
//!
//! ```rust
//! use std::path::{Path, PathBuf};
//! use filesift::{Listing, SearchError, Source};
//!
//! struct Fixed;
//!
//! impl Source for Fixed {
//!     fn list(&self, dir: &Path) -> Result<Listing, SearchError> {
//!         Ok(Listing {
//!             dirs:  vec![],
//!             files: vec![dir.join("Cargo.toml"), dir.join("README.md")],
//!         })
//!     }
//! }
//!
//! let hits: Vec<PathBuf> = filesift::search()
//!     .directory("/project")
//!     .source(Fixed)
//!     .with_matcher(|name: &str| name.ends_with(".toml"))
//!     .run()
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(hits, vec![PathBuf::from("/project/Cargo.toml")]);
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod error;
mod listing;
mod pattern;
mod results;
mod target;
mod traits;

use std::path::Path;
use std::sync::Arc;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use engine::{DirSource, Search};
pub use error::SearchError;
pub use listing::Listing;
pub use pattern::{MatchType, Pattern};
pub use results::ScanStats;
pub use target::{MatchTarget, PathGrammar};
pub use traits::{Matcher, Source};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure a search.
///
/// # Example
///
/// ```rust
/// use filesift::MatchType;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("invoice.txt"), "").unwrap();
/// std::fs::write(dir.path().join("report.txt"), "").unwrap();
///
/// let mut hits = filesift::search()
///     .directory(dir.path())
///     .pattern("INVOICE")
///     .match_type(MatchType::Contains)
///     .run()
///     .unwrap();
///
/// assert_eq!(hits.next().unwrap().unwrap(), dir.path().join("invoice.txt"));
/// assert!(hits.next().is_none());
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}

/// Search `directory` for files matching `pattern`.
///
/// An empty `directory` means the current directory; an empty `pattern`
/// matches every file.
///
/// # Errors
///
/// [`SearchError::InvalidPattern`] if `match_type` is `Regex` and
/// `pattern` does not parse. Traversal errors are yielded by the iterator.
pub fn find_files(
    directory: impl AsRef<Path>,
    pattern: &str,
    recursive: bool,
    match_type: MatchType,
    match_target: MatchTarget,
) -> Result<Search, SearchError> {
    search()
        .directory(directory.as_ref())
        .pattern(pattern)
        .recursive(recursive)
        .match_type(match_type)
        .match_target(match_target)
        .run()
}

/// Search `directory` with an already compiled matcher.
///
/// The matcher is shared, not consumed. Hold on to the `Arc` and reuse it
/// for as many searches as needed.
pub fn find_files_with(
    directory: impl AsRef<Path>,
    matcher: Arc<dyn Matcher>,
    recursive: bool,
    match_target: MatchTarget,
) -> Search {
    Search::new(engine::EngineOptions {
        root: builder::normalize_root(directory.as_ref().to_path_buf()),
        source: Box::new(DirSource),
        matcher,
        target: match_target,
        grammar: PathGrammar::default(),
        recursive,
    })
}
