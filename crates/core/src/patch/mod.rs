//! Patches and the applier that executes them.

pub mod applier;
pub mod guard;
pub mod indent;
pub mod types;

// Re-export primary API
pub use applier::PatchApplier;
pub use guard::{DEFAULT_GUARD_RADIUS, IdempotencyGuard};
pub use indent::{IndentUnit, leading_whitespace};
pub use types::{Patch, PatchError, PatchOutcome, Reason};
