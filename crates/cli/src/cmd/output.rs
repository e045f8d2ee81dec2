//! Report formatting for `apply`.

use std::path::Path;

use linepatch_core::recipe::{RecipeReport, StepReport};
use serde::Serialize;
use tabled::Tabled;

/// Row for the step table. Line numbers are 1-based.
#[derive(Tabled)]
pub struct StepRow {
    #[tabled(rename = "Step")]
    pub step: String,
    #[tabled(rename = "Op")]
    pub op: String,
    #[tabled(rename = "Line")]
    pub line: String,
    #[tabled(rename = "Result")]
    pub result: String,
}

impl From<&StepReport> for StepRow {
    fn from(r: &StepReport) -> Self {
        Self {
            step: r.step.clone(),
            op: r.op.as_str().to_string(),
            line: r.line.map_or_else(|| "-".to_string(), |l| (l + 1).to_string()),
            result: r.outcome.reason.as_str().to_string(),
        }
    }
}

/// JSON shape of an `apply` run.
#[derive(Debug, Serialize)]
pub struct ApplyOutput {
    pub recipe: String,
    pub target: String,
    pub changed: bool,
    pub dry_run: bool,
    pub applied: usize,
    pub skipped: usize,
    pub steps: Vec<StepOutput>,
}

#[derive(Debug, Serialize)]
pub struct StepOutput {
    pub step: String,
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub applied: bool,
    pub reason: &'static str,
}

impl ApplyOutput {
    pub fn new(report: &RecipeReport, target: &Path, changed: bool, dry_run: bool) -> Self {
        Self {
            recipe: report.recipe.clone(),
            target: target.to_string_lossy().to_string(),
            changed,
            dry_run,
            applied: report.applied_count(),
            skipped: report.skipped_count(),
            steps: report
                .steps
                .iter()
                .map(|s| StepOutput {
                    step: s.step.clone(),
                    op: s.op.as_str(),
                    line: s.line.map(|l| l + 1),
                    applied: s.outcome.applied,
                    reason: s.outcome.reason.as_str(),
                })
                .collect(),
        }
    }
}
