#![warn(clippy::pedantic)]
//! Command-line runner for arena actor scripts.
//! Usage: cargo run -p robo_engine -- run scripts/patrol.robo --ticks 10

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;
use robo_engine::{ROBO_VERSION, ScriptedActor, config_for, load_program, run_ticks};
use robo_script::ParseError;

#[derive(Parser)]
#[command(author, version, about = "Run arena actor scripts against a scripted host.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script or compiled program and print what the actor did.
    Run {
        path: PathBuf,
        /// Engine configuration (defaults to ./robo.toml when present).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the configured number of ticks.
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    info!("robo_engine {ROBO_VERSION}");
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { path, config, ticks } => run(&path, config.as_deref(), ticks),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(parse_err) = err.downcast_ref::<ParseError>() {
                eprintln!("{}\n{parse_err}", "Parser error:".red().bold());
            } else {
                eprintln!("{} {err:#}", "error:".red().bold());
            }
            ExitCode::FAILURE
        },
    }
}

fn run(path: &Path, config_path: Option<&Path>, ticks: Option<u64>) -> Result<()> {
    let mut config = config_for(config_path, Path::new("."));
    if let Some(ticks) = ticks {
        config.run.ticks = ticks;
    }
    let mut instance = load_program(path)?;
    let mut actor = ScriptedActor::new(config.sensors.clone());
    let report = run_ticks(&mut instance, &mut actor, &config.run)
        .with_context(|| format!("while running '{}'", path.display()))?;

    println!("{}", "Actions".bright_yellow().underline());
    if actor.log().is_empty() {
        println!("  (none)");
    }
    for (i, action) in actor.log().iter().enumerate() {
        println!("  {:>4}  {action}", i + 1);
    }
    println!("\n{}", "Variables".bright_yellow().underline());
    if report.vars.is_empty() {
        println!("  (none)");
    }
    for (name, value) in &report.vars {
        println!("  {} = {value}", name.bright_blue());
    }
    println!(
        "\n{} tick(s), {} action(s), shield {}",
        report.ticks,
        report.actions,
        if actor.shield_on() { "on".green() } else { "off".normal() }
    );
    Ok(())
}
