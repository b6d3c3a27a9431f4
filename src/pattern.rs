use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::SearchError;
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// MatchType
// ---------------------------------------------------------------------------

/// How a raw pattern string is turned into a [`Pattern`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Whole-string equality.
    Exact,

    /// Literal substring.
    Contains,

    /// `*` and `?` wildcards, everything else literal.
    #[default]
    Wildcards,

    /// Regular expression.
    Regex,
}

impl MatchType {
    /// Canonical lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact     => "exact",
            Self::Contains  => "contains",
            Self::Wildcards => "wildcards",
            Self::Regex     => "regex",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = SearchError;

    /// Parse a match type name, ignoring ASCII case. `wildcard` and `glob`
    /// are not accepted, only the four canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact"     => Ok(Self::Exact),
            "contains"  => Ok(Self::Contains),
            "wildcards" => Ok(Self::Wildcards),
            "regex"     => Ok(Self::Regex),
            _           => Err(SearchError::UnknownMatchType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A compiled, case-insensitive matcher.
///
/// Built by [`Pattern::compile`]. Cloning is cheap (the compiled regex is
/// reference counted), so one pattern can be handed to many searches.
///
/// `Wildcards` and `Regex` patterns are **not anchored**: `a?c` matches
/// `xabcx`, and `*.txt` matches `notes.txt.bak`. Add `^`/`$` to a `Regex`
/// pattern when a whole-string match is wanted.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Empty pattern, accepts everything.
    Any,

    /// Escaped literal anchored at both ends.
    Exact(Regex),

    /// Escaped literal, unanchored.
    Contains(Regex),

    /// Wildcard expression translated to a regex.
    Wildcards(Regex),

    /// User-supplied regex.
    Regex(Regex),
}

impl Pattern {
    /// Compile `pattern` according to `match_type`.
    ///
    /// An empty pattern always yields [`Pattern::Any`], whatever the match
    /// type.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPattern`] if a `Regex` pattern does not parse.
    pub fn compile(pattern: &str, match_type: MatchType) -> Result<Self, SearchError> {
        if pattern.is_empty() {
            debug!(%match_type, "empty pattern, matching everything");
            return Ok(Self::Any);
        }

        let compiled = match match_type {
            MatchType::Exact     => Self::Exact(build_regex(pattern, &format!("^{}$", regex::escape(pattern)))?),
            MatchType::Contains  => Self::Contains(build_regex(pattern, &regex::escape(pattern))?),
            MatchType::Wildcards => Self::Wildcards(build_regex(pattern, &wildcards_to_regex(pattern))?),
            MatchType::Regex     => Self::Regex(build_regex(pattern, pattern)?),
        };

        debug!(pattern, %match_type, "compiled pattern");
        Ok(compiled)
    }

    /// The match type this pattern was compiled with, or `None` for [`Pattern::Any`].
    pub fn match_type(&self) -> Option<MatchType> {
        match self {
            Self::Any          => None,
            Self::Exact(_)     => Some(MatchType::Exact),
            Self::Contains(_)  => Some(MatchType::Contains),
            Self::Wildcards(_) => Some(MatchType::Wildcards),
            Self::Regex(_)     => Some(MatchType::Regex),
        }
    }
}

impl Matcher for Pattern {
    fn is_match(&self, candidate: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(r) | Self::Contains(r) | Self::Wildcards(r) | Self::Regex(r) => {
                r.is_match(candidate)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Translate a wildcard pattern into regex source: every character is
/// escaped, then `*` becomes `(?s:.)*` and `?` becomes `(?s:.)`. The `s`
/// flag lets wildcards match `\n`, which is legal in Unix file names.
fn wildcards_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str("(?s:.)*"),
            '?' => out.push_str("(?s:.)"),
            _   => out.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
        }
    }
    out
}

fn build_regex(pattern: &str, source: &str) -> Result<Regex, SearchError> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|source| SearchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, match_type: MatchType, candidate: &str) -> bool {
        Pattern::compile(pattern, match_type).unwrap().is_match(candidate)
    }

    #[test]
    fn empty_pattern_matches_everything() {
        for mt in [MatchType::Exact, MatchType::Contains, MatchType::Wildcards, MatchType::Regex] {
            let p = Pattern::compile("", mt).unwrap();
            assert!(matches!(p, Pattern::Any));
            assert!(p.is_match(""));
            assert!(p.is_match("anything.bin"));
        }
    }

    #[test]
    fn exact_is_case_insensitive_full_equality() {
        assert!(matches("a.txt", MatchType::Exact, "A.TXT"));
        assert!(!matches("a.txt", MatchType::Exact, "a.txt.bak"));
        assert!(!matches("a.txt", MatchType::Exact, "abtxt"));
    }

    #[test]
    fn contains_is_literal_substring() {
        for name in ["app.log", "LOG_1.txt", "catalog.csv"] {
            assert!(matches("log", MatchType::Contains, name), "{name}");
        }
        assert!(!matches("log", MatchType::Contains, "lgo.txt"));
        assert!(matches("a+b", MatchType::Contains, "xA+By"));
        assert!(!matches("a+b", MatchType::Contains, "aab"));
    }

    #[test]
    fn wildcards_are_not_anchored() {
        assert!(matches("*.txt", MatchType::Wildcards, "a.txt"));
        assert!(matches("*.txt", MatchType::Wildcards, "folder.TXT"));
        assert!(matches("a?c", MatchType::Wildcards, "xabcx"));
        assert!(!matches("a?c", MatchType::Wildcards, "ac"));
        assert!(!matches("*.txt", MatchType::Wildcards, "atxt"));
    }

    #[test]
    fn wildcards_match_newlines() {
        assert!(matches("a*b", MatchType::Wildcards, "a\nb"));
        assert!(matches("a?b", MatchType::Wildcards, "a\nb"));
        assert!(!matches("a.b", MatchType::Regex, "a\nb"));
    }

    #[test]
    fn literal_kinds_fold_case_like_regex() {
        let cases = [("ΟΔΟΣ", "οδοσ"), ("ΟΔΟΣ", "οδος"), ("i", "İ"), ("straße", "STRASSE")];
        for (pattern, candidate) in cases {
            let re = regex::escape(pattern);
            let unanchored = matches(&re, MatchType::Regex, candidate);
            let anchored = matches(&format!("^{re}$"), MatchType::Regex, candidate);
            assert_eq!(matches(pattern, MatchType::Contains, candidate), unanchored, "{pattern} / {candidate}");
            assert_eq!(matches(pattern, MatchType::Exact, candidate), anchored, "{pattern} / {candidate}");
        }
        assert!(matches("ΟΔΟΣ", MatchType::Exact, "οδος"));
        assert!(!matches("i", MatchType::Contains, "İ"));
    }

    #[test]
    fn wildcards_escape_regex_metacharacters() {
        assert!(matches("file[1]*", MatchType::Wildcards, "FILE[1].log"));
        assert!(!matches("file[1]*", MatchType::Wildcards, "file1.log"));
        assert!(matches("(a)", MatchType::Wildcards, "x(a)y"));
    }

    #[test]
    fn regex_is_case_insensitive_and_unanchored() {
        assert!(matches(r"\d{3}", MatchType::Regex, "report_123.csv"));
        assert!(matches("^report", MatchType::Regex, "REPORT.csv"));
        assert!(!matches("^report$", MatchType::Regex, "report.csv"));
    }

    #[test]
    fn invalid_regex_is_a_pattern_error() {
        let err = Pattern::compile("(unclosed", MatchType::Regex).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn match_type_names_parse() {
        assert_eq!("Exact".parse::<MatchType>().unwrap(), MatchType::Exact);
        assert_eq!(" regex ".parse::<MatchType>().unwrap(), MatchType::Regex);
        assert_eq!(MatchType::default(), MatchType::Wildcards);
        assert_eq!(MatchType::Contains.to_string(), "contains");

        let err = "fuzzy".parse::<MatchType>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownMatchType(ref s) if s == "fuzzy"));
    }

    #[test]
    fn compiled_pattern_is_reusable() {
        let p = Pattern::compile("*.rs", MatchType::Wildcards).unwrap();
        let q = p.clone();
        for _ in 0..3 {
            assert!(p.is_match("lib.rs"));
            assert!(q.is_match("main.rs"));
        }
        assert_eq!(p.match_type(), Some(MatchType::Wildcards));
    }
}
