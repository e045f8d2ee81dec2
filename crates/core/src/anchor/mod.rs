pub mod resolver;
pub mod types;

// Re-export primary API
pub use resolver::{find_all, find_anchor, find_anchor_before, find_anchor_in, find_nth, find_within};
pub use types::{Anchor, DEFAULT_WINDOW, Marker, SearchWindow};
