use robo_data::{Expression, OPERATOR_KEYWORDS, Operator, SENSOR_KEYWORDS, Sensor, Value};

use super::{ParseError, ParseErrorKind, Parser};
use crate::tokenizer::{NUMBER, VARIABLE};

impl Parser<'_, '_> {
    /// `EXPR ::= OP | SEN | NUM | VAR`
    pub(super) fn expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(Self::dispatch_expression)
    }

    fn dispatch_expression(&mut self) -> Result<Expression, ParseError> {
        if self.tokens.has_next_matching(&OPERATOR_KEYWORDS[..]) {
            self.operator()
        } else if self.tokens.has_next_matching(&SENSOR_KEYWORDS[..]) {
            Ok(Expression::Sensor(self.sensor()?))
        } else if self.tokens.has_next_matching(&*NUMBER) {
            self.number()
        } else if self.tokens.has_next_matching(&*VARIABLE) {
            self.variable()
        } else {
            self.fail("expected an expression (operator, sensor, number, or variable)")
        }
    }

    fn operator(&mut self) -> Result<Expression, ParseError> {
        let word = self.require(&OPERATOR_KEYWORDS[..], "expected an operator")?;
        let Some(op) = Operator::from_keyword(word) else {
            return self.fail(format!("unknown operator '{word}'"));
        };
        let (lhs, rhs) = self.expression_pair(word)?;
        Ok(Expression::op(op, lhs, rhs))
    }

    /// `SEN ::= fuelLeft | oppLR | oppFB | numBarrels | wallDist | barrelLR ["(" EXPR ")"] | barrelFB ["(" EXPR ")"]`
    fn sensor(&mut self) -> Result<Sensor, ParseError> {
        let word = self.require(&SENSOR_KEYWORDS[..], "expected a sensor")?;
        let sensor = match word {
            "barrelLR" => Sensor::BarrelLR(self.optional_argument(word)?.map(Box::new)),
            "barrelFB" => Sensor::BarrelFB(self.optional_argument(word)?.map(Box::new)),
            other => match Sensor::from_bare_keyword(other) {
                Some(sensor) => sensor,
                None => return self.fail(format!("unknown sensor '{other}'")),
            },
        };
        Ok(sensor)
    }

    fn number(&mut self) -> Result<Expression, ParseError> {
        let Some(tok) = self.tokens.peek().filter(|tok| NUMBER.is_match(tok)) else {
            return self.fail("expected a number");
        };
        let Ok(value) = tok.parse::<Value>() else {
            return self.fail(format!("integer literal '{tok}' is out of range"));
        };
        self.tokens.next();
        Ok(Expression::Number(value))
    }

    /// A variable reference; the name must already have been assigned earlier in the source.
    fn variable(&mut self) -> Result<Expression, ParseError> {
        let Some(name) = self.tokens.peek() else {
            return self.fail("expected a variable");
        };
        if !self.vars.is_declared(name) {
            return Err(self.error(
                ParseErrorKind::UnboundVariable,
                format!("variable '{name}' must be assigned before it is used"),
            ));
        }
        self.tokens.next();
        Ok(Expression::Var(name.to_string()))
    }
}
