//! Duplicate detection for inserts.

/// Lines either side of an insertion point searched for an existing copy.
pub const DEFAULT_GUARD_RADIUS: usize = 3;

/// What counts as an existing copy of an insert.
#[derive(Debug, Clone)]
enum Needle<'a> {
    /// Any line containing this text
    Signature(&'a str),
    /// The content's lines, trimmed, as one contiguous run
    Block(Vec<&'a str>),
}

/// "Does a copy of this insert already sit near this spot?"
///
/// With an explicit signature a single line containing it is enough. Without
/// one the whole content must already be there, line for line, ignoring
/// indentation, so a neighbouring block that only shares an opening tag does
/// not count.
#[derive(Debug, Clone)]
pub struct IdempotencyGuard<'a> {
    needle: Needle<'a>,
    radius: usize,
}

impl<'a> IdempotencyGuard<'a> {
    /// Guard matching any line that contains `signature`.
    pub fn new(signature: &'a str, radius: usize) -> Self {
        Self { needle: Needle::Signature(signature), radius }
    }

    /// Guard for inserting `content`. `None` when the content is all blank,
    /// which is never treated as present.
    pub fn for_insert(content: &'a str, explicit: Option<&'a str>, radius: usize) -> Option<Self> {
        if let Some(signature) = explicit.filter(|s| !s.trim().is_empty()) {
            return Some(Self::new(signature, radius));
        }
        let block: Vec<&str> = content.lines().map(str::trim).collect();
        if block.iter().all(|l| l.is_empty()) {
            return None;
        }
        Some(Self { needle: Needle::Block(block), radius })
    }

    /// True if a copy lies inside `[first - radius, last + radius]`.
    /// `first..=last` is the span the insert would occupy relative to the
    /// current lines.
    pub fn is_present<S: AsRef<str>>(&self, lines: &[S], first: usize, last: usize) -> bool {
        if lines.is_empty() {
            return false;
        }
        let lo = first.saturating_sub(self.radius);
        let hi = last.saturating_add(self.radius).min(lines.len() - 1);
        if lo > hi {
            return false;
        }
        let around = &lines[lo..=hi];

        match &self.needle {
            Needle::Signature(sig) => around.iter().any(|l| l.as_ref().contains(sig)),
            Needle::Block(block) => around.windows(block.len()).any(|run| {
                run.iter().zip(block).all(|(line, want)| line.as_ref().trim() == *want)
            }),
        }
    }
}
