#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! robo_script: tokenizer, parser, and compiler for arena actor scripts.
//!
//! A script is a list of statements driving one actor:
//! - `loop { ... }`, `while (cond) { ... }`
//! - `if (cond) { ... } elif (cond) { ... } else { ... }`
//! - `$var = expr;`
//! - actions such as `move;`, `move(3);`, `turnL;`, `shieldOn;`, `wait(2);`
//!
//! Parsing produces a `robo_data::Program`, which `robo_engine` executes and
//! which can be compiled to RON for loading without the parser.

mod parser;
pub mod tokenizer;

pub use parser::{
    CONTEXT_TOKENS, MAX_NESTING, ParseError, ParseErrorKind, parse_condition, parse_expression, parse_program,
    parse_program_fresh,
};

use robo_data::Program;
use ron::Options;
use ron::ser::PrettyConfig;
use thiserror::Error;

/// RON nesting allowed when writing or reading compiled programs. One level of
/// program nesting takes several RON levels (enum, struct, sequence), so this
/// leaves room for anything the parser accepts.
pub const RON_RECURSION_LIMIT: usize = MAX_NESTING * 8;

/// RON settings shared by every reader and writer of compiled programs.
pub fn ron_options() -> Options {
    Options::default().with_recursion_limit(RON_RECURSION_LIMIT)
}

/// Read a compiled program from RON text.
///
/// # Errors
/// Returns the RON error if the text is malformed or nests too deeply.
pub fn program_from_ron(text: &str) -> Result<Program, ron::error::SpannedError> {
    ron_options().from_str(text)
}

/// Errors produced while emitting a compiled program.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),
}

/// Serialize a parsed program as pretty-printed RON.
///
/// # Errors
/// Returns [`CompileError::Ron`] if serialization fails.
pub fn compile_program_to_ron(program: &Program) -> Result<String, CompileError> {
    let config = PrettyConfig::new().depth_limit(64).indentor("  ".to_string());
    Ok(ron_options().to_string_pretty(program, config)?)
}

/// Parse and re-render a source text in canonical form.
///
/// # Errors
/// Returns a [`ParseError`] if the source does not parse.
pub fn canonicalize(source: &str) -> Result<String, ParseError> {
    let (program, _) = parse_program_fresh(source)?;
    Ok(program.to_string())
}
