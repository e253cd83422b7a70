use log::{debug, trace};
use robo_data::{
    ACTION_KEYWORDS, Action, Block, Branch, Condition, ELIF_KEYWORD, ELSE_KEYWORD, IF_KEYWORD, IfChain, LOOP_KEYWORD,
    Statement, WHILE_KEYWORD,
};

use super::{ParseError, Parser};
use crate::tokenizer::VARIABLE;

impl Parser<'_, '_> {
    /// `STMT ::= LOOP | IF | WHILE | ASSGN | ACT`
    pub(super) fn statement(&mut self) -> Result<Statement, ParseError> {
        self.nested(Self::dispatch_statement)
    }

    fn dispatch_statement(&mut self) -> Result<Statement, ParseError> {
        let stmt = if self.tokens.has_next_matching(LOOP_KEYWORD) {
            self.loop_statement()?
        } else if self.tokens.has_next_matching(IF_KEYWORD) {
            self.if_statement()?
        } else if self.tokens.has_next_matching(WHILE_KEYWORD) {
            self.while_statement()?
        } else if self.tokens.has_next_matching(&*VARIABLE) {
            self.assignment()?
        } else if self.tokens.has_next_matching(&ACTION_KEYWORDS[..]) {
            Statement::Action(self.action()?)
        } else {
            return self.fail("expected a statement (loop, if, while, assignment, or action)");
        };
        trace!("parsed statement: {stmt}");
        Ok(stmt)
    }

    /// `BLOCK ::= "{" STMT+ "}"`
    fn block(&mut self, owner: &str) -> Result<Block, ParseError> {
        self.expect("{", &format!("'{{' expected to open {owner} block"))?;
        let mut statements = vec![self.statement()?];
        while !self.tokens.gobble("}") {
            if !self.tokens.has_next() {
                return self.fail(format!("'}}' expected to close {owner} block"));
            }
            statements.push(self.statement()?);
        }
        Ok(Block::new(statements))
    }

    fn loop_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(LOOP_KEYWORD, "'loop' expected")?;
        Ok(Statement::Loop(self.block(LOOP_KEYWORD)?))
    }

    fn while_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(WHILE_KEYWORD, "'while' expected")?;
        let condition = self.guard(WHILE_KEYWORD)?;
        let body = self.block(WHILE_KEYWORD)?;
        Ok(Statement::While { condition, body })
    }

    /// `IF ::= "if" "(" COND ")" BLOCK ("elif" "(" COND ")" BLOCK)* ["else" BLOCK]`
    fn if_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(IF_KEYWORD, "'if' expected")?;
        let condition = self.guard(IF_KEYWORD)?;
        let body = self.block(IF_KEYWORD)?;
        let mut branches = vec![Branch { condition, body }];
        while self.tokens.gobble(ELIF_KEYWORD) {
            let condition = self.guard(ELIF_KEYWORD)?;
            let body = self.block(ELIF_KEYWORD)?;
            branches.push(Branch { condition, body });
        }
        let otherwise = if self.tokens.gobble(ELSE_KEYWORD) {
            Some(self.block(ELSE_KEYWORD)?)
        } else {
            None
        };
        Ok(Statement::If(IfChain { branches, otherwise }))
    }

    /// Parenthesized condition after `if`, `elif`, or `while`.
    fn guard(&mut self, owner: &str) -> Result<Condition, ParseError> {
        self.expect("(", &format!("'(' expected after {owner}"))?;
        let condition = self.condition()?;
        self.expect(")", &format!("')' expected after {owner}'s condition"))?;
        Ok(condition)
    }

    /// `ASSGN ::= VAR "=" EXPR ";"`
    ///
    /// The target is declared only after the whole statement has parsed, so the
    /// right-hand side cannot be the first mention of the name.
    fn assignment(&mut self) -> Result<Statement, ParseError> {
        let name = self.require(&*VARIABLE, "invalid variable name")?;
        self.expect("=", "'=' expected after variable name")?;
        let value = self.expression()?;
        self.expect(";", "';' expected after assignment")?;
        if self.vars.declare(name) {
            debug!("declared variable {name}");
        }
        Ok(Statement::Assign {
            name: name.to_string(),
            value,
        })
    }

    fn action(&mut self) -> Result<Action, ParseError> {
        let word = self.require(&ACTION_KEYWORDS[..], "expected an action")?;
        let action = match word {
            "move" => Action::Move(self.optional_argument(word)?),
            "wait" => Action::Wait(self.optional_argument(word)?),
            other => match Action::from_bare_keyword(other) {
                Some(action) => action,
                None => return self.fail(format!("unknown action '{other}'")),
            },
        };
        self.expect(";", &format!("';' expected after {word}"))?;
        Ok(action)
    }
}
