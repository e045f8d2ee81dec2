use std::fmt;

use regex::Regex;

/// Lines searched for a nested marker after an outer anchor.
pub const DEFAULT_WINDOW: usize = 30;

/// What a line must contain to count as an anchor.
#[derive(Debug, Clone)]
pub enum Marker {
    /// Plain substring match
    Literal(String),
    /// Regular expression match
    Pattern(Regex),
}

impl Marker {
    pub fn literal(text: impl Into<String>) -> Self {
        Marker::Literal(text.into())
    }

    /// Compile a pattern marker.
    ///
    /// # Errors
    /// Returns the regex compile error for an invalid pattern.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Marker::Pattern)
    }

    /// The text matched in `line`, if any.
    pub fn find_in<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self {
            Marker::Literal(text) => {
                line.find(text.as_str()).map(|start| &line[start..start + text.len()])
            }
            Marker::Pattern(re) => re.find(line).map(|m| m.as_str()),
        }
    }
}

impl From<&str> for Marker {
    fn from(text: &str) -> Self {
        Marker::literal(text)
    }
}

impl From<String> for Marker {
    fn from(text: String) -> Self {
        Marker::Literal(text)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Literal(text) => write!(f, "{text:?}"),
            Marker::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// Half-open range of line indices `[start, end)` a search may examine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: usize,
    pub end: usize,
}

impl SearchWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Every line of a document with `len` lines.
    pub fn whole(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// `size` lines starting at `start`.
    pub fn starting_at(start: usize, size: usize) -> Self {
        Self { start, end: start.saturating_add(size) }
    }

    /// Clamp to a document with `len` lines. `None` when nothing is left.
    pub fn clamp(self, len: usize) -> Option<Self> {
        let end = self.end.min(len);
        (self.start < end).then_some(Self { start: self.start, end })
    }
}

/// A resolved marker position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Index of the matching line
    pub line: usize,
    /// The text the marker matched on that line
    pub matched: String,
    /// First line the search examined
    pub window_start: usize,
    /// One past the last line the search could examine
    pub window_end: usize,
}
