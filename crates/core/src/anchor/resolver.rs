//! Marker search over line sequences.
//!
//! Every search is bounded by a [`SearchWindow`] and only touches lines
//! inside it. "Not found" is a normal outcome, reported as `None`.

use tracing::debug;

use super::types::{Anchor, Marker, SearchWindow};

/// First line in the whole document containing `marker`.
pub fn find_anchor<S: AsRef<str>>(lines: &[S], marker: &Marker) -> Option<Anchor> {
    find_anchor_in(lines, marker, SearchWindow::whole(lines.len()))
}

/// First line inside `window` containing `marker`.
///
/// Callers that need the next occurrence start a new window past the
/// previous match.
pub fn find_anchor_in<S: AsRef<str>>(
    lines: &[S],
    marker: &Marker,
    window: SearchWindow,
) -> Option<Anchor> {
    let window = window.clamp(lines.len())?;

    let found = lines[window.start..window.end].iter().enumerate().find_map(|(offset, line)| {
        marker.find_in(line.as_ref()).map(|matched| Anchor {
            line: window.start + offset,
            matched: matched.to_string(),
            window_start: window.start,
            window_end: window.end,
        })
    });

    match &found {
        Some(a) => debug!(marker = %marker, line = a.line, "anchor resolved"),
        None => debug!(marker = %marker, start = window.start, end = window.end, "anchor not found"),
    }
    found
}

/// The `n`th (1-based) occurrence of `marker` in the document.
pub fn find_nth<S: AsRef<str>>(lines: &[S], marker: &Marker, n: usize) -> Option<Anchor> {
    if n == 0 {
        return None;
    }
    let mut start = 0;
    let mut last = None;
    for _ in 0..n {
        let anchor = find_anchor_in(lines, marker, SearchWindow::new(start, lines.len()))?;
        start = anchor.line + 1;
        last = Some(anchor);
    }
    last
}

/// Search the `window` lines beginning at the outer anchor line for a nested
/// marker.
///
/// The outer line itself is included. Keeping the window small stops a
/// marker repeated in a sibling block further down from being picked up.
pub fn find_within<S: AsRef<str>>(
    lines: &[S],
    outer: usize,
    marker: &Marker,
    window: usize,
) -> Option<Anchor> {
    find_anchor_in(lines, marker, SearchWindow::starting_at(outer, window))
}

/// Nearest line above `from` containing `marker`, looking back at most
/// `window` lines. `from` itself is not examined.
pub fn find_anchor_before<S: AsRef<str>>(
    lines: &[S],
    marker: &Marker,
    from: usize,
    window: usize,
) -> Option<Anchor> {
    let end = from.min(lines.len());
    let start = end.saturating_sub(window);

    let found = (start..end).rev().find_map(|idx| {
        marker.find_in(lines[idx].as_ref()).map(|matched| Anchor {
            line: idx,
            matched: matched.to_string(),
            window_start: start,
            window_end: end,
        })
    });

    if found.is_none() {
        debug!(marker = %marker, from, window, "anchor not found looking back");
    }
    found
}

/// Every match inside `window`, in document order.
pub fn find_all<S: AsRef<str>>(lines: &[S], marker: &Marker, window: SearchWindow) -> Vec<Anchor> {
    let Some(window) = window.clamp(lines.len()) else {
        return Vec::new();
    };

    lines[window.start..window.end]
        .iter()
        .enumerate()
        .filter_map(|(offset, line)| {
            marker.find_in(line.as_ref()).map(|matched| Anchor {
                line: window.start + offset,
                matched: matched.to_string(),
                window_start: window.start,
                window_end: window.end,
            })
        })
        .collect()
}
