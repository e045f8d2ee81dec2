pub mod apply;
pub mod doctor;
pub mod inspect;
pub mod list;
pub mod output;

use linepatch_core::config::loader::{ConfigLoader, default_config_path};
use linepatch_core::config::types::ResolvedConfig;
use std::path::Path;

/// Load config and start logging, or print `FAIL linepatch <name>` and exit.
pub(crate) fn load_config(config: Option<&Path>, profile: Option<&str>, name: &str) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc.logging);
            rc
        }
        Err(e) => {
            eprintln!("FAIL linepatch {name}");
            eprintln!("{e}");
            if config.is_none() {
                eprintln!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

/// Print `FAIL linepatch <name>` with a message and exit with status 1.
pub(crate) fn fail(name: &str, message: impl std::fmt::Display) -> ! {
    eprintln!("FAIL linepatch {name}");
    eprintln!("{message}");
    crate::logging::flush();
    std::process::exit(1);
}
