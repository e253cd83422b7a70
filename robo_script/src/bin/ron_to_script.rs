#![warn(clippy::pedantic)]
//! Render a compiled RON program back into script source.
//! Usage: cargo run -p robo_script --bin ron_to_script -- patrol.ron > patrol.robo

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use robo_data::validate_program;
use robo_script::program_from_ron;

#[derive(Parser)]
#[command(author, version, about = "Render a compiled RON program as script text.")]
struct Cli {
    /// Compiled program (`robo_script compile` output).
    path: PathBuf,
    /// Skip structural validation before rendering.
    #[arg(long)]
    no_validate: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let text = fs::read_to_string(&cli.path).with_context(|| format!("reading '{}'", cli.path.display()))?;
    let program =
        program_from_ron(&text).with_context(|| format!("parsing program RON from '{}'", cli.path.display()))?;
    if !cli.no_validate {
        let errors = validate_program(&program);
        if !errors.is_empty() {
            for err in &errors {
                eprintln!("  - {err}");
            }
            bail!("{} validation error(s) in '{}'", errors.len(), cli.path.display());
        }
    }
    println!("{program}");
    Ok(())
}
