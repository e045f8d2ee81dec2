//! Balanced open/close tracking over line sequences.
//!
//! Depth is paired-token arithmetic only. A line's content never decides
//! whether it opens or closes a block; its token counts do.

use tracing::debug;

use super::types::TokenPair;

/// Running nesting depth over a stream of lines.
#[derive(Debug, Clone)]
pub struct DepthTracker<'t> {
    tokens: &'t TokenPair,
    depth: i64,
}

impl<'t> DepthTracker<'t> {
    pub fn new(tokens: &'t TokenPair) -> Self {
        Self { tokens, depth: 0 }
    }

    /// Feed one line and return the depth after it.
    pub fn observe(&mut self, line: &str) -> i64 {
        self.depth += self.tokens.net(line);
        self.depth
    }
}

/// Index of the line closing the first block opened at or after `start`.
///
/// Examines at most `max_lookahead` lines, `[start, start + max_lookahead)`.
/// Lines before the first net-opening line are skipped; if one of them
/// closes an enclosing block the walk has left its scope and gives up.
pub fn find_boundary<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    tokens: &TokenPair,
    max_lookahead: usize,
) -> Option<usize> {
    let end = start.saturating_add(max_lookahead).min(lines.len());
    if start >= end {
        return None;
    }

    let mut tracker = DepthTracker::new(tokens);
    let mut opened = false;

    for (offset, line) in lines[start..end].iter().enumerate() {
        let depth = tracker.observe(line.as_ref());
        if opened {
            if depth <= 0 {
                let idx = start + offset;
                debug!(start, boundary = idx, "block boundary resolved");
                return Some(idx);
            }
        } else if depth > 0 {
            opened = true;
        } else if depth < 0 {
            debug!(start, line = start + offset, "left enclosing scope before any open");
            return None;
        }
    }

    debug!(start, max_lookahead, "block boundary not found");
    None
}

/// Index of the line closing the block that contains `start`.
///
/// The walk begins on the line after `start` and examines at most
/// `max_lookahead` lines. Blocks opened and closed along the way are
/// stepped over.
pub fn find_enclosing_close<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    tokens: &TokenPair,
    max_lookahead: usize,
) -> Option<usize> {
    let first = start.saturating_add(1);
    let end = first.saturating_add(max_lookahead).min(lines.len());
    if first >= end {
        return None;
    }

    let mut tracker = DepthTracker::new(tokens);
    let found = lines[first..end]
        .iter()
        .position(|line| tracker.observe(line.as_ref()) < 0)
        .map(|offset| first + offset);

    debug!(start, boundary = ?found, "enclosing close");
    found
}

/// Index of the line opening the block that contains `start`.
///
/// Walks backwards from the line before `start`, examining at most
/// `max_lookbehind` lines.
pub fn find_enclosing_open<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    tokens: &TokenPair,
    max_lookbehind: usize,
) -> Option<usize> {
    let end = start.min(lines.len());
    let first = end.saturating_sub(max_lookbehind);

    let mut depth = 0i64;
    let found = (first..end).rev().find(|&idx| {
        depth += tokens.net(lines[idx].as_ref());
        depth > 0
    });

    debug!(start, boundary = ?found, "enclosing open");
    found
}
