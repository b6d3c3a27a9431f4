use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::SearchError;
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// MatchTarget
// ---------------------------------------------------------------------------

/// Which part of a candidate file's path the matcher is tested against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchTarget {
    /// The file name only.
    #[default]
    File,

    /// Each segment of the containing directory, separately.
    Directory,

    /// Each segment of the full path, file name included.
    FileOrDirectory,

    /// The whole path as one string.
    FullPath,
}

impl MatchTarget {
    /// Kebab-case name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File            => "file",
            Self::Directory       => "directory",
            Self::FileOrDirectory => "file-or-directory",
            Self::FullPath        => "full-path",
        }
    }

    /// Test `path` against `matcher` according to this target.
    pub fn is_match(&self, path: &Path, matcher: &dyn Matcher, grammar: &PathGrammar) -> bool {
        match self {
            Self::File => path
                .file_name()
                .map(|name| matcher.is_match(&name.to_string_lossy()))
                .unwrap_or(false),
            Self::Directory => path
                .parent()
                .map(|dir| grammar.any_segment(&dir.to_string_lossy(), matcher))
                .unwrap_or(false),
            Self::FileOrDirectory => grammar.any_segment(&path.to_string_lossy(), matcher),
            Self::FullPath => matcher.is_match(&path.to_string_lossy()),
        }
    }
}

impl fmt::Display for MatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchTarget {
    type Err = SearchError;

    /// Accepts the kebab-case names from [`as_str`](MatchTarget::as_str)
    /// and the bare variant names (`FileOrDirectory`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "file"            => Ok(Self::File),
            "directory"       => Ok(Self::Directory),
            "fileordirectory" => Ok(Self::FileOrDirectory),
            "fullpath"        => Ok(Self::FullPath),
            _                 => Err(SearchError::UnknownMatchTarget(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PathGrammar
// ---------------------------------------------------------------------------

/// How path strings are split into segments for the `Directory` and
/// `FileOrDirectory` targets.
///
/// Segments containing the volume separator (`C:` on Windows) are never
/// tested, so a drive letter cannot produce a match by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGrammar {
    separators:       Vec<char>,
    volume_separator: Option<char>,
}

impl Default for PathGrammar {
    fn default() -> Self {
        Self::portable()
    }
}

impl PathGrammar {
    /// `/` and `\` both split, `:` marks a volume. Same behaviour on every
    /// platform.
    pub fn portable() -> Self {
        Self {
            separators:       vec!['/', '\\'],
            volume_separator: Some(':'),
        }
    }

    /// The running platform's rules: `/` only on Unix, `\` and `/` with a
    /// `:` volume marker on Windows.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::portable()
        } else {
            Self {
                separators:       vec!['/'],
                volume_separator: None,
            }
        }
    }

    /// A custom grammar. An empty `separators` list treats the whole string
    /// as one segment.
    pub fn new(separators: impl IntoIterator<Item = char>, volume_separator: Option<char>) -> Self {
        Self {
            separators: separators.into_iter().collect(),
            volume_separator,
        }
    }

    /// Non-empty segments of `path`, volume segments removed.
    pub fn segments<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        path.split(move |c: char| self.separators.contains(&c))
            .filter(|seg| !seg.is_empty())
            .filter(move |seg| match self.volume_separator {
                Some(v) => !seg.contains(v),
                None    => true,
            })
    }

    /// `true` if `matcher` accepts any segment of `path`. Stops at the first hit.
    pub fn any_segment(&self, path: &str, matcher: &dyn Matcher) -> bool {
        self.segments(path).any(|seg| matcher.is_match(seg))
    }
}
