use robo_data::Expression;

use super::{CONTEXT_TOKENS, MAX_NESTING, ParseError, ParseErrorKind, Parser};
use crate::tokenizer::TokenPattern;

impl<'a> Parser<'a, '_> {
    /// Build an error carrying a snippet of the tokens that follow.
    pub(super) fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            context: self.tokens.upcoming(CONTEXT_TOKENS),
            position: self.tokens.position(),
        }
    }

    pub(super) fn fail<T>(&self, message: impl Into<String>) -> Result<T, ParseError> {
        Err(self.error(ParseErrorKind::Syntax, message))
    }

    /// Run `parse` one nesting level deeper, failing once [`MAX_NESTING`] is reached.
    pub(super) fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return self.fail(format!("nesting too deep (more than {MAX_NESTING} levels)"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Consume a token matching `pattern`, or fail with `message`.
    pub(super) fn expect<P: TokenPattern + ?Sized>(&mut self, pattern: &P, message: &str) -> Result<(), ParseError> {
        if self.tokens.gobble(pattern) {
            Ok(())
        } else {
            self.fail(message)
        }
    }

    /// Consume and return a token matching `pattern`, or fail with `message`.
    pub(super) fn require<P: TokenPattern + ?Sized>(&mut self, pattern: &P, message: &str) -> Result<&'a str, ParseError> {
        if self.tokens.has_next_matching(pattern)
            && let Some(tok) = self.tokens.next()
        {
            return Ok(tok);
        }
        self.fail(message)
    }

    /// `[ "(" EXPR ")" ]` after a keyword that takes an optional argument.
    pub(super) fn optional_argument(&mut self, owner: &str) -> Result<Option<Expression>, ParseError> {
        if !self.tokens.gobble("(") {
            return Ok(None);
        }
        let arg = self.expression()?;
        self.expect(")", &format!("')' expected after {owner}'s argument"))?;
        Ok(Some(arg))
    }

    /// `"(" EXPR "," EXPR ")"` after an operator or comparison keyword.
    pub(super) fn expression_pair(&mut self, owner: &str) -> Result<(Expression, Expression), ParseError> {
        self.expect("(", &format!("'(' expected after {owner}"))?;
        let lhs = self.expression()?;
        self.expect(",", &format!("',' expected between {owner}'s arguments"))?;
        let rhs = self.expression()?;
        self.expect(")", &format!("')' expected after {owner}'s arguments"))?;
        Ok((lhs, rhs))
    }
}
