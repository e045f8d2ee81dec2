//! Drives recipe steps through anchor resolution, boundary tracking and the
//! patch applier.
//!
//! The runner works on a copy of the document and only hands it back when
//! every step finished without a hard error, so a failed run never leaves a
//! half-patched document behind.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::anchor::{Marker, find_anchor_before, find_nth, find_within};
use crate::config::types::EngineConfig;
use crate::depth::{TokenPair, find_boundary, find_enclosing_close, find_enclosing_open};
use crate::document::Document;
use crate::patch::{Patch, PatchApplier, PatchOutcome, Reason, leading_whitespace};

use super::render::render_string;
use super::types::{
    BoundaryMode, IndentMode, NestedSpec, RecipeError, RecipeReport, RecipeSpec, StepOp,
    StepReport, StepSpec,
};

/// Runs recipes against in-memory documents.
#[derive(Debug, Clone, Copy)]
pub struct RecipeRunner {
    engine: EngineConfig,
    applier: PatchApplier,
}

impl Default for RecipeRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RecipeRunner {
    pub fn new(engine: EngineConfig) -> Self {
        Self { engine, applier: PatchApplier::new(engine.guard_radius, engine.indent) }
    }

    /// Apply every step of `spec` to `doc`, in order.
    ///
    /// Steps whose anchor or boundary cannot be found are reported and
    /// skipped; later steps still run.
    ///
    /// # Errors
    /// Invalid steps are rejected before anything runs. A patch that violates
    /// its range contract aborts the run and `doc` is left unchanged.
    pub fn run(
        &self,
        doc: &mut Document,
        spec: &RecipeSpec,
        vars: &HashMap<String, String>,
    ) -> Result<RecipeReport, RecipeError> {
        let steps = spec
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.compile(i, step, vars))
            .collect::<Result<Vec<_>, _>>()?;

        let mut working = doc.clone();
        let mut reports = Vec::with_capacity(steps.len());
        for step in &steps {
            let report = self.run_step(&mut working, step)?;
            info!(
                recipe = %spec.name,
                step = %report.step,
                applied = report.outcome.applied,
                reason = %report.outcome.reason,
                "step finished"
            );
            reports.push(report);
        }

        *doc = working;
        Ok(RecipeReport { recipe: spec.name.clone(), steps: reports })
    }

    fn compile(
        &self,
        index: usize,
        step: &StepSpec,
        vars: &HashMap<String, String>,
    ) -> Result<CompiledStep, RecipeError> {
        let label = step.label(index);
        let invalid = |reason: &str| RecipeError::InvalidStep {
            step: label.clone(),
            reason: reason.to_string(),
        };
        let render = |s: &str| render_string(s, vars);
        let compile_marker = |spec: &super::types::MarkerSpec| {
            if spec.as_str().is_empty() {
                return Err(invalid("markers must not be empty"));
            }
            spec.compile(render)
                .map_err(|source| RecipeError::InvalidPattern { step: label.clone(), source })
        };
        let nested = |spec: &NestedSpec| -> Result<(Marker, usize), RecipeError> {
            let window = spec.window.unwrap_or(self.engine.window);
            if window == 0 {
                return Err(invalid("window must be at least 1"));
            }
            Ok((compile_marker(&spec.marker)?, window))
        };

        if step.occurrence == 0 {
            return Err(invalid("occurrence is 1-based"));
        }

        let boundary = match &step.boundary {
            None => None,
            Some(b) => {
                if b.open.is_empty() || b.close.is_empty() {
                    return Err(invalid("boundary tokens must not be empty"));
                }
                let lookahead = b.lookahead.unwrap_or(self.engine.lookahead);
                Some((TokenPair::new(b.open.clone(), b.close.clone()), b.mode, lookahead))
            }
        };

        let content = || {
            step.content.as_deref().map(render).ok_or_else(|| invalid("`content` is required"))
        };
        let action = match step.op {
            StepOp::InsertAfter | StepOp::InsertBefore => Action::Insert {
                content: content()?,
                signature: step.signature.as_deref().map(render),
            },
            StepOp::Replace => Action::Replace { content: content()? },
            StepOp::Reindent => Action::Reindent {
                delta: step.delta.ok_or_else(|| invalid("`delta` is required"))?,
            },
            StepOp::EditLine => {
                let find = step.find.as_deref().map(render).unwrap_or_default();
                if find.is_empty() {
                    return Err(invalid("`find` is required"));
                }
                Action::Edit { find, replace: step.replace.as_deref().map(render).unwrap_or_default() }
            }
        };

        Ok(CompiledStep {
            label: label.clone(),
            op: step.op,
            anchor: compile_marker(&step.anchor)?,
            occurrence: step.occurrence,
            within: step.within.as_ref().map(&nested).transpose()?,
            before: step.before.as_ref().map(&nested).transpose()?,
            boundary,
            offset: step.offset,
            indent: step.indent,
            unless: step.unless.as_deref().map(render),
            action,
        })
    }

    fn run_step(&self, doc: &mut Document, step: &CompiledStep) -> Result<StepReport, RecipeError> {
        let report = |line: Option<usize>, outcome: PatchOutcome| StepReport {
            step: step.label.clone(),
            op: step.op,
            line,
            outcome,
        };

        if let Some(marker) = &step.unless {
            if doc.contains(marker) {
                return Ok(report(None, PatchOutcome::skipped(Reason::AlreadyPresent)));
            }
        }

        let target = match self.resolve(doc.lines(), step) {
            Ok(t) => t,
            Err(reason) => {
                warn!(step = %step.label, %reason, "step skipped");
                return Ok(report(None, PatchOutcome::skipped(reason)));
            }
        };

        let shift = |line: usize| {
            line.checked_add_signed(step.offset).ok_or_else(|| RecipeError::OffsetOutOfRange {
                step: step.label.clone(),
                line,
                offset: step.offset,
            })
        };
        let point = shift(target.point)?;
        let (start, end) = (shift(target.start)?, shift(target.end)?);

        let prefix_of = |line: usize| match step.indent {
            IndentMode::Inherit => doc.line(line).map(leading_whitespace).unwrap_or("").to_string(),
            IndentMode::Verbatim => String::new(),
        };

        let (patch, line) = match &step.action {
            Action::Insert { content, signature } => {
                let content = indent_content(content, &prefix_of(point));
                let patch = if step.op == StepOp::InsertBefore {
                    Patch::InsertBefore { index: point, content, signature: signature.clone() }
                } else {
                    Patch::InsertAfter { index: point, content, signature: signature.clone() }
                };
                (patch, point)
            }
            Action::Replace { content } => {
                let content = indent_content(content, &prefix_of(start));
                (Patch::replace_range(start, end, content), start)
            }
            Action::Reindent { delta } => (Patch::reindent_range(start, end, *delta), start),
            Action::Edit { find, replace } => (Patch::edit_line(point, find, replace), point),
        };

        let outcome = self
            .applier
            .apply(doc, &patch)
            .map_err(|source| RecipeError::Patch { step: step.label.clone(), source })?;
        Ok(report(Some(line), outcome))
    }

    /// Resolve the lines a step targets, or the reason it cannot run.
    fn resolve(&self, lines: &[String], step: &CompiledStep) -> Result<Target, Reason> {
        let anchor =
            find_nth(lines, &step.anchor, step.occurrence).ok_or(Reason::AnchorNotFound)?;
        let mut line = anchor.line;

        if let Some((marker, window)) = &step.within {
            line = find_within(lines, line, marker, *window).ok_or(Reason::AnchorNotFound)?.line;
        }
        if let Some((marker, window)) = &step.before {
            line = find_anchor_before(lines, marker, line, *window)
                .ok_or(Reason::AnchorNotFound)?
                .line;
        }

        let Some((tokens, mode, lookahead)) = &step.boundary else {
            return Ok(Target { point: line, start: line, end: line });
        };
        let boundary = match mode {
            BoundaryMode::Block => find_boundary(lines, line, tokens, *lookahead),
            BoundaryMode::Enclosing => find_enclosing_close(lines, line, tokens, *lookahead),
            BoundaryMode::EnclosingOpen => find_enclosing_open(lines, line, tokens, *lookahead),
        }
        .ok_or(Reason::BoundaryNotFound)?;

        Ok(Target { point: boundary, start: line.min(boundary), end: line.max(boundary) })
    }
}

#[derive(Debug)]
struct CompiledStep {
    label: String,
    op: StepOp,
    anchor: Marker,
    occurrence: usize,
    within: Option<(Marker, usize)>,
    before: Option<(Marker, usize)>,
    boundary: Option<(TokenPair, BoundaryMode, usize)>,
    offset: isize,
    indent: IndentMode,
    unless: Option<String>,
    action: Action,
}

#[derive(Debug)]
enum Action {
    Insert { content: String, signature: Option<String> },
    Replace { content: String },
    Reindent { delta: i32 },
    Edit { find: String, replace: String },
}

/// Resolved lines for a step: `point` for single-line patches, `start..=end`
/// for ranges.
#[derive(Debug, Clone, Copy)]
struct Target {
    point: usize,
    start: usize,
    end: usize,
}

fn indent_content(content: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return content.to_string();
    }
    content
        .lines()
        .map(|l| if l.trim().is_empty() { l.to_string() } else { format!("{prefix}{l}") })
        .collect::<Vec<_>>()
        .join("\n")
}
