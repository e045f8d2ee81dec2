//! Content fingerprints for change detection.

use std::hash::{DefaultHasher, Hash, Hasher};

use super::types::Document;

/// Fingerprint a document's rendered form.
/// Uses DefaultHasher for speed (non-cryptographic, fast).
/// Returns hex-encoded hash string.
pub fn fingerprint(doc: &Document) -> String {
    let mut hasher = DefaultHasher::new();

    for line in doc.lines() {
        line.hash(&mut hasher);
    }
    doc.line_ending().as_str().hash(&mut hasher);
    doc.has_trailing_newline().hash(&mut hasher);

    format!("{:016x}", hasher.finish())
}

/// Fingerprint raw text (for testing).
pub fn fingerprint_str(content: &str) -> String {
    fingerprint(&Document::parse(content))
}
