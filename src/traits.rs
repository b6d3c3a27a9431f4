use std::path::Path;

use crate::error::SearchError;
use crate::listing::Listing;

/// A source of directory listings to search through.
///
/// Implement this to make filesift search anything shaped like a tree:
/// the local filesystem (see [`DirSource`](crate::DirSource)), an archive,
/// an in-memory fixture, or a remote store.
///
/// # Contract
///
/// `list()` returns the *immediate* children of `dir`, split into
/// subdirectories and files. The engine calls it at most once per
/// directory per search, and only when the consumer pulls far enough to
/// need that directory.
///
/// A failure must be returned as `Err` rather than an empty listing. The
/// engine surfaces it to the consumer and ends the search.
///
/// # Example
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use filesift::{Listing, SearchError, Source};
///
/// struct FlatSource(Vec<&'static str>);
///
/// impl Source for FlatSource {
///     fn list(&self, dir: &Path) -> Result<Listing, SearchError> {
///         Ok(Listing {
///             dirs:  Vec::new(),
///             files: self.0.iter().map(|name| dir.join(name)).collect(),
///         })
///     }
/// }
/// ```
pub trait Source: Send {
    /// List the immediate subdirectories and files of `dir`.
    fn list(&self, dir: &Path) -> Result<Listing, SearchError>;
}

/// Decides whether a single string (file name, path segment or full path)
/// is a match.
///
/// Matchers are immutable: the same matcher gives the same answer for the
/// same input on every call, so one matcher can drive any number of
/// searches. [`Pattern`](crate::Pattern) is the built-in implementation;
/// [`regex::Regex`] and plain closures work too.
///
/// # Example
///
/// ```rust
/// use filesift::Matcher;
///
/// struct ExtensionMatcher(&'static str);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, candidate: &str) -> bool {
///         candidate
///             .rsplit_once('.')
///             .map(|(_, ext)| ext.eq_ignore_ascii_case(self.0))
///             .unwrap_or(false)
///     }
/// }
///
/// assert!(ExtensionMatcher("rs").is_match("main.RS"));
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if `candidate` is accepted.
    fn is_match(&self, candidate: &str) -> bool;
}

impl Matcher for regex::Regex {
    fn is_match(&self, candidate: &str) -> bool {
        regex::Regex::is_match(self, candidate)
    }
}

impl<F> Matcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_match(&self, candidate: &str) -> bool {
        self(candidate)
    }
}
