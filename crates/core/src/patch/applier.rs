use tracing::{debug, info};

use crate::document::Document;

use super::guard::{DEFAULT_GUARD_RADIUS, IdempotencyGuard};
use super::indent::IndentUnit;
use super::types::{Patch, PatchError, PatchOutcome, Reason};

/// Applies [`Patch`]es to a document in memory.
///
/// Inserts are guarded: if a copy already sits around the spot the content
/// would land, the insert is skipped as `already-present`. Range
/// patches are validated before anything is touched, so a failed patch
/// leaves the document as it was.
#[derive(Debug, Clone, Copy)]
pub struct PatchApplier {
    guard_radius: usize,
    indent: IndentUnit,
}

impl Default for PatchApplier {
    fn default() -> Self {
        Self { guard_radius: DEFAULT_GUARD_RADIUS, indent: IndentUnit::default() }
    }
}

impl PatchApplier {
    pub fn new(guard_radius: usize, indent: IndentUnit) -> Self {
        Self { guard_radius, indent }
    }

    /// Apply one patch.
    ///
    /// # Errors
    /// * `Range` - an index is outside the document, or `start > end`
    pub fn apply(&self, doc: &mut Document, patch: &Patch) -> Result<PatchOutcome, PatchError> {
        let len = doc.len();
        match patch {
            Patch::InsertAfter { index, content, signature } => {
                check_range(*index, *index, len)?;
                let new_lines = content_lines(content, true);
                let first = index + 1;
                let last = index + new_lines.len();
                if self.already_present(doc, content, signature.as_deref(), first, last) {
                    return Ok(PatchOutcome::skipped(Reason::AlreadyPresent));
                }
                doc.lines_mut().splice(first..first, new_lines);
                info!(kind = patch.kind(), line = first, "patch applied");
            }
            Patch::InsertBefore { index, content, signature } => {
                check_range(*index, *index, len)?;
                let new_lines = content_lines(content, true);
                let first = index.saturating_sub(new_lines.len());
                let last = index.saturating_sub(1);
                if self.already_present(doc, content, signature.as_deref(), first, last) {
                    return Ok(PatchOutcome::skipped(Reason::AlreadyPresent));
                }
                doc.lines_mut().splice(*index..*index, new_lines);
                info!(kind = patch.kind(), line = *index, "patch applied");
            }
            Patch::ReplaceRange { start, end, content } => {
                check_range(*start, *end, len)?;
                doc.lines_mut().splice(*start..=*end, content_lines(content, false));
                info!(kind = patch.kind(), start = *start, end = *end, "patch applied");
            }
            Patch::ReindentRange { start, end, delta } => {
                check_range(*start, *end, len)?;
                for line in &mut doc.lines_mut()[*start..=*end] {
                    if !line.trim().is_empty() {
                        *line = self.indent.reindent(line, *delta);
                    }
                }
                info!(kind = patch.kind(), start = *start, end = *end, delta = *delta, "patch applied");
            }
            Patch::EditLine { index, find, replace } => {
                check_range(*index, *index, len)?;
                let line = &mut doc.lines_mut()[*index];
                if find.is_empty() || !line.contains(find.as_str()) {
                    debug!(line = *index, find = %find, "text to replace is absent");
                    return Ok(PatchOutcome::skipped(Reason::AlreadyPresent));
                }
                *line = line.replacen(find.as_str(), replace, 1);
                info!(kind = patch.kind(), line = *index, "patch applied");
            }
        }
        Ok(PatchOutcome::applied())
    }

    fn already_present(
        &self,
        doc: &Document,
        content: &str,
        explicit: Option<&str>,
        first: usize,
        last: usize,
    ) -> bool {
        let Some(guard) = IdempotencyGuard::for_insert(content, explicit, self.guard_radius) else {
            return false;
        };
        let present = guard.is_present(doc.lines(), first, last);
        if present {
            debug!(first, last, "insert skipped, copy already present");
        }
        present
    }
}

fn check_range(start: usize, end: usize, len: usize) -> Result<(), PatchError> {
    if start > end || end >= len {
        return Err(PatchError::Range { start, end, len });
    }
    Ok(())
}

/// Split patch content into lines. Inserting empty content adds one blank
/// line; replacing with empty content deletes the range.
fn content_lines(content: &str, keep_blank: bool) -> Vec<String> {
    let lines: Vec<String> = content.lines().map(str::to_owned).collect();
    if lines.is_empty() && keep_blank { vec![String::new()] } else { lines }
}
