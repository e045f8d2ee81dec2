//! Documents as line sequences, and the boundary that loads and saves them.

pub mod hasher;
pub mod store;
pub mod types;

pub use hasher::{fingerprint, fingerprint_str};
pub use store::{DocumentError, DocumentStore, FsStore};
pub use types::{Document, LineEnding};
