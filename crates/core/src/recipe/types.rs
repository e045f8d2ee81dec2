use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::anchor::Marker;
use crate::patch::{PatchError, PatchOutcome};

use super::render::placeholders;

/// A recipe loaded from a YAML file
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSpec {
    /// Logical name of the recipe
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Document the steps run against
    pub target: RecipeTarget,

    /// Steps, applied in order
    pub steps: Vec<StepSpec>,
}

impl RecipeSpec {
    /// Every `{{var}}` the recipe uses, sorted.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = placeholders(&self.target.file);
        for step in &self.steps {
            let texts = [
                step.content.as_deref(),
                step.signature.as_deref(),
                step.find.as_deref(),
                step.replace.as_deref(),
                step.unless.as_deref(),
            ];
            for text in texts.into_iter().flatten() {
                vars.extend(placeholders(text));
            }
            let nested = [&step.within, &step.before];
            let markers = nested.into_iter().flatten().map(|n| &n.marker);
            for marker in std::iter::once(&step.anchor).chain(markers) {
                if let MarkerSpec::Literal(text) = marker {
                    vars.extend(placeholders(text));
                }
            }
        }
        vars
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeTarget {
    /// Path to the target file (supports {{var}} placeholders)
    pub file: String,
}

/// A marker as written in YAML: a bare string is a literal, a map with
/// `pattern` is a regular expression.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MarkerSpec {
    Literal(String),
    Pattern { pattern: String },
}

impl MarkerSpec {
    pub fn as_str(&self) -> &str {
        match self {
            MarkerSpec::Literal(s) | MarkerSpec::Pattern { pattern: s } => s,
        }
    }

    /// Build the runtime marker. `render` is applied to literals only.
    pub fn compile(&self, render: impl Fn(&str) -> String) -> Result<Marker, regex::Error> {
        match self {
            MarkerSpec::Literal(s) => Ok(Marker::literal(render(s))),
            MarkerSpec::Pattern { pattern } => Marker::pattern(pattern),
        }
    }
}

/// A secondary marker searched relative to the anchor.
#[derive(Debug, Clone, Deserialize)]
pub struct NestedSpec {
    pub marker: MarkerSpec,
    /// Lines searched (default: engine window)
    #[serde(default)]
    pub window: Option<usize>,
}

/// Which structural boundary a step targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Close of the first block opened at or after the line
    #[default]
    Block,
    /// Close of the block containing the line
    Enclosing,
    /// Open of the block containing the line
    EnclosingOpen,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoundarySpec {
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub mode: BoundaryMode,
    /// Lines examined (default: engine lookahead)
    #[serde(default)]
    pub lookahead: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOp {
    InsertAfter,
    InsertBefore,
    Replace,
    Reindent,
    EditLine,
}

impl StepOp {
    pub fn as_str(self) -> &'static str {
        match self {
            StepOp::InsertAfter => "insert_after",
            StepOp::InsertBefore => "insert_before",
            StepOp::Replace => "replace",
            StepOp::Reindent => "reindent",
            StepOp::EditLine => "edit_line",
        }
    }
}

/// How inserted or replacement content is indented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentMode {
    /// Content is used as written
    #[default]
    Verbatim,
    /// Each content line is prefixed with the target line's leading whitespace
    Inherit,
}

/// One step of a recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct StepSpec {
    #[serde(default)]
    pub name: Option<String>,

    /// Outer marker, searched over the whole document
    pub anchor: MarkerSpec,

    /// Which occurrence of the anchor to use, 1-based (default: 1)
    #[serde(default = "default_occurrence")]
    pub occurrence: usize,

    /// Nested marker searched from the anchor line downwards
    #[serde(default)]
    pub within: Option<NestedSpec>,

    /// Marker searched upwards from the current line
    #[serde(default)]
    pub before: Option<NestedSpec>,

    #[serde(default)]
    pub boundary: Option<BoundarySpec>,

    /// Lines to shift the resolved target by
    #[serde(default)]
    pub offset: isize,

    pub op: StepOp,

    #[serde(default)]
    pub content: Option<String>,

    /// Duplicate-detection text for inserts (default: first content line)
    #[serde(default)]
    pub signature: Option<String>,

    #[serde(default)]
    pub indent: IndentMode,

    /// Indentation units for `reindent`
    #[serde(default)]
    pub delta: Option<i32>,

    #[serde(default)]
    pub find: Option<String>,

    #[serde(default)]
    pub replace: Option<String>,

    /// Skip the step as already applied when this text is anywhere in the
    /// document
    #[serde(default)]
    pub unless: Option<String>,
}

fn default_occurrence() -> usize {
    1
}

impl StepSpec {
    /// Display label: the step name, or its 1-based position.
    pub fn label(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("step {}", index + 1))
    }
}

/// Information about a discovered recipe file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInfo {
    /// Logical name (filename without .yaml extension)
    pub logical_name: String,
    /// Full path to the YAML file
    pub path: PathBuf,
}

/// A fully loaded recipe ready for execution
#[derive(Debug, Clone)]
pub struct LoadedRecipe {
    pub logical_name: String,
    pub path: PathBuf,
    pub spec: RecipeSpec,
}

/// Result of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub op: StepOp,
    /// Line the patch targeted, when resolution got that far
    pub line: Option<usize>,
    #[serde(flatten)]
    pub outcome: PatchOutcome,
}

/// Result of a whole recipe run.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReport {
    pub recipe: String,
    pub steps: Vec<StepReport>,
}

impl RecipeReport {
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.applied).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.steps.len() - self.applied_count()
    }
}

#[derive(Debug, Error)]
pub enum RecipeDiscoveryError {
    #[error("recipes directory does not exist: {0}")]
    MissingDir(String),

    #[error("failed to read recipes directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

#[derive(Debug, Error)]
pub enum RecipeRepoError {
    #[error(transparent)]
    Discovery(#[from] RecipeDiscoveryError),

    #[error("recipe not found: {0}")]
    NotFound(String),

    #[error("failed to read recipe file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipe YAML {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("{step}: {reason}")]
    InvalidStep { step: String, reason: String },

    #[error("{step}: invalid pattern: {source}")]
    InvalidPattern {
        step: String,
        #[source]
        source: regex::Error,
    },

    #[error("{step}: offset {offset} moves line {line} outside the document")]
    OffsetOutOfRange { step: String, line: usize, offset: isize },

    #[error("{step}: {source}")]
    Patch {
        step: String,
        #[source]
        source: PatchError,
    },
}
