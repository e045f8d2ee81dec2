use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A declarative line edit against a [`Document`](crate::document::Document).
///
/// Only the insert variants are idempotent on their own. `ReplaceRange` and
/// `ReindentRange` change already-patched content again if re-applied;
/// callers check document state before issuing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Insert `content` as new line(s) right after `index`
    InsertAfter { index: usize, content: String, signature: Option<String> },
    /// Insert `content` as new line(s) right before `index`
    InsertBefore { index: usize, content: String, signature: Option<String> },
    /// Replace the inclusive range `[start, end]` with the lines of `content`
    ReplaceRange { start: usize, end: usize, content: String },
    /// Shift indentation of `[start, end]` by `delta` units, never below zero
    ReindentRange { start: usize, end: usize, delta: i32 },
    /// Replace the first `find` in line `index` with `replace`
    EditLine { index: usize, find: String, replace: String },
}

impl Patch {
    pub fn insert_after(index: usize, content: impl Into<String>) -> Self {
        Patch::InsertAfter { index, content: content.into(), signature: None }
    }

    pub fn insert_before(index: usize, content: impl Into<String>) -> Self {
        Patch::InsertBefore { index, content: content.into(), signature: None }
    }

    pub fn replace_range(start: usize, end: usize, content: impl Into<String>) -> Self {
        Patch::ReplaceRange { start, end, content: content.into() }
    }

    pub fn reindent_range(start: usize, end: usize, delta: i32) -> Self {
        Patch::ReindentRange { start, end, delta }
    }

    pub fn edit_line(index: usize, find: impl Into<String>, replace: impl Into<String>) -> Self {
        Patch::EditLine { index, find: find.into(), replace: replace.into() }
    }

    /// Set the duplicate-detection signature of an insert. No effect on
    /// other kinds.
    #[must_use]
    pub fn with_signature(mut self, value: impl Into<String>) -> Self {
        if let Patch::InsertAfter { signature, .. } | Patch::InsertBefore { signature, .. } =
            &mut self
        {
            *signature = Some(value.into());
        }
        self
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Patch::InsertAfter { .. } => "insert-after",
            Patch::InsertBefore { .. } => "insert-before",
            Patch::ReplaceRange { .. } => "replace-range",
            Patch::ReindentRange { .. } => "reindent-range",
            Patch::EditLine { .. } => "edit-line",
        }
    }
}

/// Why a patch step did or did not change the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    Matched,
    AlreadyPresent,
    AnchorNotFound,
    BoundaryNotFound,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Matched => "matched",
            Reason::AlreadyPresent => "already-present",
            Reason::AnchorNotFound => "anchor-not-found",
            Reason::BoundaryNotFound => "boundary-not-found",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of one patch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub applied: bool,
    pub reason: Reason,
}

impl PatchOutcome {
    pub fn applied() -> Self {
        Self { applied: true, reason: Reason::Matched }
    }

    pub fn skipped(reason: Reason) -> Self {
        Self { applied: false, reason }
    }
}

/// Contract violations. Lookups that simply find nothing are outcomes, not
/// errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("invalid line range {start}..={end} for a document of {len} lines")]
    Range { start: usize, end: usize, len: usize },
}
