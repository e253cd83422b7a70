#![warn(clippy::pedantic)]
//! CLI entry point for robo_script.
//! Usage: cargo run -p robo_script -- compile scripts/patrol.robo --out patrol.ron

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use robo_script::{ParseError, compile_program_to_ron, parse_program_fresh};

#[derive(Parser)]
#[command(author, version, about = "Check, render, and compile arena actor scripts.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and report the first error, if any.
    Check { path: PathBuf },
    /// Print a script in canonical form.
    Render { path: PathBuf },
    /// Compile a script to RON for the engine.
    Compile {
        path: PathBuf,
        /// Write the RON here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(parse_err) = err.downcast_ref::<ParseError>() {
                eprintln!("Parser error:\n{parse_err}");
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        },
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Check { path } => {
            let (program, vars) = parse_file(&path)?;
            println!(
                "{}: ok ({} statements, {} variables)",
                path.display(),
                program.statements.len(),
                vars.len()
            );
        },
        Commands::Render { path } => {
            let (program, _) = parse_file(&path)?;
            println!("{program}");
        },
        Commands::Compile { path, out } => {
            let (program, _) = parse_file(&path)?;
            let ron = compile_program_to_ron(&program).context("while compiling to RON")?;
            match out {
                Some(out) => {
                    fs::write(&out, ron).with_context(|| format!("writing '{}'", out.display()))?;
                    info!("compiled {} -> {}", path.display(), out.display());
                },
                None => println!("{ron}"),
            }
        },
    }
    Ok(())
}

fn parse_file(path: &Path) -> Result<(robo_data::Program, robo_data::Variables)> {
    let src = fs::read_to_string(path).with_context(|| format!("unable to read '{}'", path.display()))?;
    info!("parsing '{}'", path.display());
    Ok(parse_program_fresh(&src)?)
}
