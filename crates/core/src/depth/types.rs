use serde::Deserialize;

/// Lines a boundary search examines before giving up.
pub const DEFAULT_LOOKAHEAD: usize = 50;

/// An open/close token pair, e.g. `<div` and `</div`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub open: String,
    pub close: String,
}

impl TokenPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self { open: open.into(), close: close.into() }
    }

    /// Net depth change contributed by one line: opens minus closes.
    ///
    /// Counting is per occurrence, so `<div><div>` is `+2` and a self-closing
    /// `<div id="x"></div>` is `0`. When one token is a substring of the
    /// other, occurrences inside the longer token are not also counted as
    /// the shorter one. Empty tokens never match.
    pub fn net(&self, line: &str) -> i64 {
        let mut opens = count(line, &self.open);
        let mut closes = count(line, &self.close);

        if !self.open.is_empty() && !self.close.is_empty() && self.open != self.close {
            if self.close.contains(self.open.as_str()) {
                opens = opens.saturating_sub(closes * count(&self.close, &self.open));
            } else if self.open.contains(self.close.as_str()) {
                closes = closes.saturating_sub(opens * count(&self.open, &self.close));
            }
        }

        to_i64(opens) - to_i64(closes)
    }
}

fn count(haystack: &str, token: &str) -> usize {
    if token.is_empty() { 0 } else { haystack.matches(token).count() }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
