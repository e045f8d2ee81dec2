mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "linepatch", version, about = "Anchor-based, idempotent line patching")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List logical recipe names discovered under recipes_dir
    List,

    /// Run a recipe against its target file
    Apply(ApplyArgs),

    /// Show every line matching a marker, with the lines that follow it
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Logical recipe name (e.g. "admin_reset" or "admin/status")
    pub recipe: String,

    /// Template variable, repeatable (key=value)
    #[arg(long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Patch this file instead of the recipe's target
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// File to search
    #[arg(long)]
    pub file: PathBuf,

    /// Literal text to look for
    #[arg(long)]
    pub marker: String,

    /// Treat the marker as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Lines shown after each match
    #[arg(long, default_value_t = 5)]
    pub context: usize,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::List => cmd::list::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::Apply(args) => {
            cmd::apply::run(cli.config.as_deref(), cli.profile.as_deref(), &args);
        }
        Commands::Inspect(args) => {
            cmd::inspect::run(cli.config.as_deref(), cli.profile.as_deref(), &args);
        }
    }

    logging::flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_pairs() {
        assert_eq!(parse_key_val("prefix=admin-reset"), Ok(("prefix".into(), "admin-reset".into())));
        assert_eq!(parse_key_val("empty="), Ok(("empty".into(), String::new())));
        assert_eq!(parse_key_val("a=b=c"), Ok(("a".into(), "b=c".into())));
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
