use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::anchor::DEFAULT_WINDOW;
use crate::depth::DEFAULT_LOOKAHEAD;
use crate::patch::{DEFAULT_GUARD_RADIUS, IndentUnit};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Directory that relative recipe targets are resolved against
    pub document_root: String,
    pub recipes_dir: String,
}

/// Search bounds shared by every recipe step.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Lines searched for a nested marker after its outer anchor (default: 30)
    #[serde(default = "default_window")]
    pub window: usize,
    /// Lines a boundary search may examine (default: 50)
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
    /// Lines either side of an insert checked for an existing copy (default: 3)
    #[serde(default = "default_guard_radius")]
    pub guard_radius: usize,
    #[serde(default)]
    pub indent: IndentUnit,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            lookahead: default_lookahead(),
            guard_radius: default_guard_radius(),
            indent: IndentUnit::default(),
        }
    }
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

fn default_guard_radius() -> usize {
    DEFAULT_GUARD_RADIUS
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub document_root: PathBuf,
    pub recipes_dir: PathBuf,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}
