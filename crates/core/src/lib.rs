#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod anchor;
pub mod config;
pub mod depth;
pub mod document;
pub mod patch;
pub mod recipe;
