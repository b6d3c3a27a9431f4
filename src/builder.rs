use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::{DirSource, EngineOptions, Search};
use crate::error::SearchError;
use crate::pattern::{MatchType, Pattern};
use crate::target::{MatchTarget, PathGrammar};
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a filesift search.
///
/// Created via [`filesift::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to get a lazy
/// [`Search`] iterator.
///
/// Defaults: current directory, non-recursive, empty pattern (match all),
/// [`MatchType::Wildcards`], [`MatchTarget::File`], the local filesystem,
/// [`PathGrammar::portable`].
///
/// # Example
///
/// ```rust,no_run
/// let logs = filesift::search()
///     .directory("/var/log")
///     .pattern("*.log")
///     .recursive(true)
///     .run()?;
///
/// for path in logs.take(10) {
///     println!("{}", path?.display());
/// }
/// # Ok::<(), filesift::SearchError>(())
/// ```
pub struct SearchBuilder {
    directory:   PathBuf,
    pattern:     String,
    match_type:  Result<MatchType, SearchError>,
    target:      Result<MatchTarget, SearchError>,
    matcher:     Option<Arc<dyn Matcher>>,
    source:      Option<Box<dyn Source>>,
    grammar:     PathGrammar,
    recursive:   bool,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            directory:  PathBuf::from("."),
            pattern:    String::new(),
            match_type: Ok(MatchType::default()),
            target:     Ok(MatchTarget::default()),
            matcher:    None,
            source:     None,
            grammar:    PathGrammar::default(),
            recursive:  false,
        }
    }
}

impl SearchBuilder {
    // ── Where ─────────────────────────────────────────────────────────────

    /// Directory to search. An empty path means the current directory.
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = normalize_root(dir.into());
        self
    }

    /// Descend into subdirectories, breadth-first.
    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    /// Search a custom [`Source`] instead of the local filesystem.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── What ──────────────────────────────────────────────────────────────

    /// Pattern to compile with the configured [`MatchType`]. Empty matches
    /// everything.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// How the pattern is compiled. Defaults to [`MatchType::Wildcards`].
    pub fn match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Ok(match_type);
        self
    }

    /// Set the match type by name (`"exact"`, `"contains"`, `"wildcards"`,
    /// `"regex"`). An unknown name makes [`run()`](Self::run) fail before
    /// any directory is listed.
    pub fn match_type_named(mut self, name: &str) -> Self {
        self.match_type = name.parse();
        self
    }

    /// Which part of each path is matched. Defaults to [`MatchTarget::File`].
    pub fn match_target(mut self, target: MatchTarget) -> Self {
        self.target = Ok(target);
        self
    }

    /// Set the match target by name. See [`MatchTarget`]'s `FromStr`.
    pub fn match_target_named(mut self, name: &str) -> Self {
        self.target = name.parse();
        self
    }

    /// Use a ready-made matcher. Pattern and match type are ignored.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Arc::new(m));
        self
    }

    /// Use a matcher shared with other searches.
    pub fn with_shared_matcher(mut self, m: Arc<dyn Matcher>) -> Self {
        self.matcher = Some(m);
        self
    }

    /// How paths are split into segments for the `Directory` and
    /// `FileOrDirectory` targets.
    pub fn path_grammar(mut self, grammar: PathGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Compile the pattern and return the lazy result sequence.
    ///
    /// No directory is listed here. Traversal starts on the first
    /// [`next()`](Iterator::next).
    ///
    /// # Errors
    ///
    /// Configuration errors only: an unknown match type or target name, or
    /// an invalid regular expression. Traversal errors come out of the
    /// iterator.
    pub fn run(self) -> Result<Search, SearchError> {
        let match_type = self.match_type?;
        let target = self.target?;

        let matcher: Arc<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Arc::new(Pattern::compile(&self.pattern, match_type)?),
        };

        let source: Box<dyn Source> = match self.source {
            Some(s) => s,
            None    => Box::new(DirSource),
        };

        Ok(Search::new(EngineOptions {
            root: self.directory,
            source,
            matcher,
            target,
            grammar: self.grammar,
            recursive: self.recursive,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// An empty directory means the current one.
pub(crate) fn normalize_root(dir: PathBuf) -> PathBuf {
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir
    }
}
