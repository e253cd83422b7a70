//! Recursive-descent parser for actor scripts.
//!
//! Builds `robo_data` program trees straight from the token stream. Every
//! choice point peeks the next token and dispatches on the first alternative
//! whose leading keyword or pattern matches. Assignments declare their target
//! in the caller's [`Variables`], and a variable reference is only accepted
//! once such a declaration has been parsed.

use log::debug;
use robo_data::{Condition, Expression, Program, Variables};

use crate::tokenizer::Tokenizer;

mod conditions;
mod expressions;
mod helpers;
mod statements;

/// Number of upcoming tokens captured in a parse error.
pub const CONTEXT_TOKENS: usize = 5;

/// Deepest combined nesting of statements, conditions, and expressions the
/// parser accepts.
pub const MAX_NESTING: usize = 100;

/// What kind of expectation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A keyword, punctuation mark, or pattern was missing.
    Syntax,
    /// A variable was read before any assignment to it.
    UnboundVariable,
}

/// A failed parse. Parsing stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}\n   @ ...{}...", snippet(.context))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Up to [`CONTEXT_TOKENS`] tokens starting where parsing stopped.
    pub context: Vec<String>,
    /// Index of the token where parsing stopped.
    pub position: usize,
}

fn snippet(context: &[String]) -> String {
    context.iter().map(|tok| format!(" {tok}")).collect()
}

pub(crate) struct Parser<'a, 'v> {
    tokens: Tokenizer<'a>,
    vars: &'v mut Variables,
    depth: usize,
}

impl<'a, 'v> Parser<'a, 'v> {
    pub(crate) fn new(source: &'a str, vars: &'v mut Variables) -> Self {
        Self {
            tokens: Tokenizer::new(source),
            vars,
            depth: 0,
        }
    }

    /// `PROG ::= STMT+`, consuming every token.
    fn program(&mut self) -> Result<Program, ParseError> {
        if !self.tokens.has_next() {
            return self.fail("program must contain at least one statement");
        }
        let mut statements = Vec::new();
        while self.tokens.has_next() {
            statements.push(self.statement()?);
        }
        debug!(
            "parsed program: {} top-level statements, {} variables declared",
            statements.len(),
            self.vars.len()
        );
        Ok(Program { statements })
    }

    fn finish(&self) -> Result<(), ParseError> {
        if self.tokens.has_next() {
            return self.fail("unexpected tokens after the end of input");
        }
        Ok(())
    }
}

/// Parse a complete program, declaring assigned variables in `vars`.
///
/// # Errors
/// Returns a [`ParseError`] at the first unmet expectation; no partial program
/// is produced. Names declared before the failure stay in `vars`.
pub fn parse_program(source: &str, vars: &mut Variables) -> Result<Program, ParseError> {
    Parser::new(source, vars).program()
}

/// Parse a program as a new instance with its own empty variable store.
///
/// # Errors
/// Returns a [`ParseError`] if the source is not a valid program.
pub fn parse_program_fresh(source: &str) -> Result<(Program, Variables), ParseError> {
    let mut vars = Variables::new();
    let program = parse_program(source, &mut vars)?;
    Ok((program, vars))
}

/// Parse a single condition that spans the whole source (helper/testing).
///
/// # Errors
/// Returns a [`ParseError`] if the source is not exactly one condition.
pub fn parse_condition(source: &str, vars: &mut Variables) -> Result<Condition, ParseError> {
    let mut parser = Parser::new(source, vars);
    let cond = parser.condition()?;
    parser.finish()?;
    Ok(cond)
}

/// Parse a single expression that spans the whole source (helper/testing).
///
/// # Errors
/// Returns a [`ParseError`] if the source is not exactly one expression.
pub fn parse_expression(source: &str, vars: &mut Variables) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(source, vars);
    let expr = parser.expression()?;
    parser.finish()?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use robo_data::{Action, Block, Operator, Sensor, Statement};

    #[test]
    fn error_display_includes_snippet() {
        let err = parse_program_fresh("move ( 3 ; turnL ; wait ;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert_eq!(err.context, [";", "turnL", ";", "wait", ";"]);
        assert_eq!(err.position, 3);
        assert_eq!(
            err.to_string(),
            format!("{}\n   @ ... ; turnL ; wait ;...", err.message)
        );
    }

    #[test]
    fn snippet_is_capped_at_five_tokens() {
        let err = parse_program_fresh("} a b c d e f g").unwrap_err();
        assert_eq!(err.context.len(), CONTEXT_TOKENS);
        assert_eq!(err.position, 0);
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = parse_program_fresh("   \n ").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert!(err.context.is_empty());
    }

    #[test]
    fn nesting_limit_is_an_error_not_a_crash() {
        let depth = 10_000;
        let src = format!("{}move;{}", "loop {".repeat(depth), "}".repeat(depth));
        let err = parse_program_fresh(&src).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert!(err.message.contains("nesting"));
        assert_eq!(err.context.first().map(String::as_str), Some("loop"));
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let depth = MAX_NESTING - 1;
        let src = format!("{}move;{}", "loop {".repeat(depth), "}".repeat(depth));
        assert!(parse_program_fresh(&src).is_ok());
        let src = format!("{}move;{}", "loop {".repeat(MAX_NESTING), "}".repeat(MAX_NESTING));
        assert!(parse_program_fresh(&src).is_err());
    }

    #[test]
    fn punctuation_needs_no_spaces() {
        let (program, _) = parse_program_fresh("loop{move(2);turnL;}").expect("parse ok");
        assert_eq!(
            program.statements,
            vec![Statement::Loop(Block::new(vec![
                Statement::Action(Action::Move(Some(Expression::Number(2)))),
                Statement::Action(Action::TurnLeft),
            ]))]
        );
    }

    #[test]
    fn standalone_expression_and_condition() {
        let mut vars = Variables::new();
        let expr = parse_expression("mul(barrelLR, 2)", &mut vars).expect("expr");
        assert_eq!(
            expr,
            Expression::op(
                Operator::Mul,
                Expression::Sensor(Sensor::BarrelLR(None)),
                Expression::Number(2)
            )
        );
        let cond = parse_condition("not(eq(wallDist, 0))", &mut vars).expect("cond");
        assert_eq!(cond.to_string(), "not(eq(wallDist, 0))");
        assert!(parse_expression("add(1, 2) 3", &mut vars).is_err());
    }
}
