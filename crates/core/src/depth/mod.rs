//! Nesting-depth tracking for locating block boundaries.

pub mod tracker;
pub mod types;

pub use tracker::{DepthTracker, find_boundary, find_enclosing_close, find_enclosing_open};
pub use types::{DEFAULT_LOOKAHEAD, TokenPair};
