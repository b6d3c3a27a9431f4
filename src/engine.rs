use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use tracing::{debug, trace, warn};

use crate::error::SearchError;
use crate::listing::Listing;
use crate::results::ScanStats;
use crate::target::{MatchTarget, PathGrammar};
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// DirSource
// ---------------------------------------------------------------------------

/// Lists real directories on the local filesystem.
///
/// Every filter `ignore` would normally apply (`.gitignore`, hidden files,
/// parent ignore files) is switched off, so a listing is exactly what the
/// directory contains. Symlinks to directories are reported as directories
/// and are descended into by recursive searches; there is no cycle
/// detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirSource;

impl Source for DirSource {
    fn list(&self, dir: &Path) -> Result<Listing, SearchError> {
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .max_depth(Some(1));

        let mut listing = Listing::default();

        for res in builder.build() {
            let entry = res.map_err(|e| map_ignore_error(dir, e))?;

            // The root itself: only make sure it really is a directory
            if entry.depth() == 0 {
                if !entry.path().is_dir() {
                    return Err(SearchError::NotADirectory(dir.to_path_buf()));
                }
                continue;
            }

            let is_dir = match entry.file_type() {
                Some(ft) if ft.is_dir()     => true,
                Some(ft) if ft.is_symlink() => entry.path().is_dir(),
                _                           => false,
            };

            let path = entry.into_path();
            if is_dir {
                listing.dirs.push(path);
            } else {
                listing.files.push(path);
            }
        }

        Ok(listing)
    }
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to [`Search::new`].
pub(crate) struct EngineOptions {
    pub root:      PathBuf,
    pub source:    Box<dyn Source>,
    pub matcher:   Arc<dyn Matcher>,
    pub target:    MatchTarget,
    pub grammar:   PathGrammar,
    pub recursive: bool,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A lazy, single-pass sequence of matching file paths.
///
/// Nothing touches the filesystem until the first call to
/// [`next()`](Iterator::next); each call lists at most as many directories
/// as it needs to find the next match. Dropping a `Search` abandons the
/// rest of the traversal.
///
/// Recursive searches are breadth-first: every file of a directory is
/// considered before any file of its subdirectories. Within one directory
/// the order is whatever the [`Source`] returns.
///
/// If a directory cannot be listed the error is yielded once and the
/// sequence ends. Paths yielded before the error remain valid.
pub struct Search {
    root:     PathBuf,
    source:   Box<dyn Source>,
    matcher:  Arc<dyn Matcher>,
    target:   MatchTarget,
    grammar:  PathGrammar,

    /// Non-recursive mode: the single directory still to be listed.
    pending:  Option<PathBuf>,
    /// Recursive mode: directories discovered but not yet listed.
    frontier: Option<VecDeque<PathBuf>>,
    /// Files of the most recently listed directory not yet tested.
    files:    std::vec::IntoIter<PathBuf>,

    stats:    ScanStats,
}

impl Search {
    pub(crate) fn new(opts: EngineOptions) -> Self {
        debug!(
            root = %opts.root.display(),
            recursive = opts.recursive,
            target = %opts.target,
            "starting search"
        );

        let (pending, frontier) = if opts.recursive {
            (None, Some(VecDeque::from([opts.root.clone()])))
        } else {
            (Some(opts.root.clone()), None)
        };

        Self {
            root: opts.root,
            source: opts.source,
            matcher: opts.matcher,
            target: opts.target,
            grammar: opts.grammar,
            pending,
            frontier,
            files: Vec::new().into_iter(),
            stats: ScanStats::default(),
        }
    }

    /// The directory this search started from.
    pub fn directory(&self) -> &Path {
        &self.root
    }

    /// The part of each path the matcher is tested against.
    pub fn target(&self) -> MatchTarget {
        self.target
    }

    /// Work done so far.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn next_dir(&mut self) -> Option<PathBuf> {
        match &mut self.frontier {
            Some(queue) => queue.pop_front(),
            None        => self.pending.take(),
        }
    }

    /// Drop all remaining work so the iterator stays exhausted.
    fn abort(&mut self) {
        self.pending = None;
        self.frontier = None;
        self.files = Vec::new().into_iter();
    }
}

impl Iterator for Search {
    type Item = Result<PathBuf, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for file in self.files.by_ref() {
                self.stats.files += 1;
                if self.target.is_match(&file, self.matcher.as_ref(), &self.grammar) {
                    self.stats.matches += 1;
                    trace!(path = %file.display(), "match");
                    return Some(Ok(file));
                }
            }

            let Some(dir) = self.next_dir() else {
                debug!(
                    root = %self.root.display(),
                    dirs = self.stats.dirs,
                    files = self.stats.files,
                    matches = self.stats.matches,
                    match_ratio = self.stats.match_ratio(),
                    "search finished"
                );
                return None;
            };

            let listing = match self.source.list(&dir) {
                Ok(listing) => listing,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "listing failed, ending search");
                    self.abort();
                    return Some(Err(e));
                }
            };

            self.stats.dirs += 1;
            trace!(
                dir = %dir.display(),
                dirs = listing.dirs.len(),
                files = listing.files.len(),
                "listed directory"
            );

            if let Some(queue) = &mut self.frontier {
                queue.extend(listing.dirs);
            }
            self.files = listing.files.into_iter();
        }
    }
}

impl FusedIterator for Search {}

// ---------------------------------------------------------------------------
// Map ignore::Error to SearchError
// ---------------------------------------------------------------------------

fn map_ignore_error(dir: &Path, e: ignore::Error) -> SearchError {
    match e {
        ignore::Error::WithDepth { err, .. } => map_ignore_error(dir, *err),
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => SearchError::from_io(&path, io_err),
            other                     => map_ignore_error(&path, other),
        },
        ignore::Error::Io(io_err) => SearchError::from_io(dir, io_err),
        other                     => SearchError::Source(other.to_string()),
    }
}
