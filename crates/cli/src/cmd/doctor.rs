use linepatch_core::config::loader::{ConfigLoader, default_config_path};
use linepatch_core::patch::IndentUnit;
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc.logging);
            tracing::debug!(profile = %rc.active_profile, "configuration resolved");

            println!("OK   linepatch doctor");
            println!("core: {}", linepatch_core::version());
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("document_root: {}", rc.document_root.display());
            println!("recipes_dir: {}", rc.recipes_dir.display());
            if !rc.recipes_dir.is_dir() {
                println!("  (missing)");
            }
            println!("engine.window: {}", rc.engine.window);
            println!("engine.lookahead: {}", rc.engine.lookahead);
            println!("engine.guard_radius: {}", rc.engine.guard_radius);
            let indent = match rc.engine.indent {
                IndentUnit::Tab => "tab".to_string(),
                IndentUnit::Spaces(n) => format!("{n} spaces"),
            };
            println!("engine.indent: {indent}");
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL linepatch doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
