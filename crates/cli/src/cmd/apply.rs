use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use linepatch_core::config::types::ResolvedConfig;
use linepatch_core::document::{DocumentStore, FsStore, fingerprint};
use linepatch_core::recipe::{RecipeRepoError, RecipeRepository, RecipeRunner, render_string};
use tabled::{Table, settings::Style};
use tracing::{debug, info};

use super::output::{ApplyOutput, StepRow};
use crate::ApplyArgs;

/// Variables every recipe can use without `--var`.
pub(crate) const BUILTIN_VARS: [&str; 3] = ["date", "time", "document_root"];

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ApplyArgs) {
    let cfg = super::load_config(config, profile, "apply");

    let repo = match RecipeRepository::new(&cfg.recipes_dir) {
        Ok(r) => r,
        Err(e) => super::fail("apply", e),
    };

    let loaded = match repo.get_by_name(&args.recipe) {
        Ok(r) => r,
        Err(RecipeRepoError::NotFound(name)) => {
            eprintln!("FAIL linepatch apply");
            eprintln!("Recipe not found: {name}");
            eprintln!("Available recipes:");
            for r in repo.list_all() {
                eprintln!("  - {}", r.logical_name);
            }
            crate::logging::flush();
            std::process::exit(1);
        }
        Err(e) => super::fail("apply", format!("Failed to load recipe: {e}")),
    };

    let mut ctx = build_context(&cfg);
    for (key, value) in &args.vars {
        ctx.insert(key.clone(), value.clone());
    }

    let target = match &args.file {
        Some(path) => path.clone(),
        None => resolve_target_path(
            &cfg.document_root,
            &render_string(&loaded.spec.target.file, &ctx),
        ),
    };
    debug!(recipe = %loaded.logical_name, target = %target.display(), "target resolved");

    let store = FsStore;
    let mut doc = match store.load(&target) {
        Ok(d) => d,
        Err(e) => super::fail(
            "apply",
            format!("Failed to read target file: {e}\nHint: the target file must exist before patching it."),
        ),
    };

    let before = fingerprint(&doc);
    let runner = RecipeRunner::new(cfg.engine);
    let report = match runner.run(&mut doc, &loaded.spec, &ctx) {
        Ok(r) => r,
        Err(e) => super::fail("apply", format!("{e}\n{} left unchanged", target.display())),
    };
    let changed = fingerprint(&doc) != before;

    if changed && !args.dry_run {
        if let Err(e) = store.save(&target, &doc) {
            super::fail("apply", e);
        }
        info!(target = %target.display(), "document written");
    }

    if args.json {
        let out = ApplyOutput::new(&report, &target, changed, args.dry_run);
        match serde_json::to_string_pretty(&out) {
            Ok(json) => println!("{json}"),
            Err(e) => super::fail("apply", e),
        }
        return;
    }

    println!("OK   linepatch apply");
    println!("recipe: {}", loaded.logical_name);
    println!("target: {}", target.display());

    let rows: Vec<StepRow> = report.steps.iter().map(StepRow::from).collect();
    if !rows.is_empty() {
        let table = Table::new(&rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    println!("applied: {}, skipped: {}", report.applied_count(), report.skipped_count());
    if !changed {
        println!("unchanged");
    } else if args.dry_run {
        println!("dry run: changes not written");
    }
}

fn build_context(cfg: &ResolvedConfig) -> HashMap<String, String> {
    let now = Local::now();
    let mut ctx = HashMap::new();
    ctx.insert("date".into(), now.format("%Y-%m-%d").to_string());
    ctx.insert("time".into(), now.format("%H:%M").to_string());
    ctx.insert("document_root".into(), cfg.document_root.to_string_lossy().to_string());
    ctx
}

fn resolve_target_path(document_root: &Path, target: &str) -> PathBuf {
    let path = Path::new(target);
    if path.is_absolute() { path.to_path_buf() } else { document_root.join(path) }
}
