#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! robo_engine: runs arena actor scripts.
//!
//! Programs come from script source or compiled RON (see [`loader`]), execute
//! by walking the tree ([`interpreter`]) against an [`Actor`] host, and are
//! re-invoked once per tick by the [`driver`].

pub const ROBO_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod actor;
pub mod config;
pub mod driver;
pub mod host;
pub mod interpreter;
pub mod loader;

pub use actor::{Actor, HostAction};
pub use config::{EngineConfig, RunConfig, config_for, load_config};
pub use driver::{RunReport, run_ticks};
pub use host::{ScriptedActor, SensorReadings};
pub use interpreter::{ExecError, Interpreter, LoopPolicy, rounded_div, run_program};
pub use loader::{LoadedProgram, load_program};
