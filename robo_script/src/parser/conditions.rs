use robo_data::{CONDITION_KEYWORDS, Condition};

use super::{ParseError, Parser};

impl Parser<'_, '_> {
    /// `COND ::= lt|gt|eq "(" EXPR "," EXPR ")" | and|or "(" COND "," COND ")" | not "(" COND ")"`
    pub(super) fn condition(&mut self) -> Result<Condition, ParseError> {
        self.nested(Self::dispatch_condition)
    }

    fn dispatch_condition(&mut self) -> Result<Condition, ParseError> {
        let word = self.require(
            &CONDITION_KEYWORDS[..],
            "expected a condition (lt, gt, eq, and, or, not)",
        )?;
        match word {
            "lt" => {
                let (lhs, rhs) = self.expression_pair(word)?;
                Ok(Condition::Lt(lhs, rhs))
            },
            "gt" => {
                let (lhs, rhs) = self.expression_pair(word)?;
                Ok(Condition::Gt(lhs, rhs))
            },
            "eq" => {
                let (lhs, rhs) = self.expression_pair(word)?;
                Ok(Condition::Eq(lhs, rhs))
            },
            "and" => {
                let (lhs, rhs) = self.condition_pair(word)?;
                Ok(Condition::And(Box::new(lhs), Box::new(rhs)))
            },
            "or" => {
                let (lhs, rhs) = self.condition_pair(word)?;
                Ok(Condition::Or(Box::new(lhs), Box::new(rhs)))
            },
            "not" => {
                self.expect("(", "'(' expected after not")?;
                let inner = self.condition()?;
                self.expect(")", "')' expected after not's argument")?;
                Ok(Condition::Not(Box::new(inner)))
            },
            other => self.fail(format!("unknown condition '{other}'")),
        }
    }

    fn condition_pair(&mut self, owner: &str) -> Result<(Condition, Condition), ParseError> {
        self.expect("(", &format!("'(' expected after {owner}"))?;
        let lhs = self.condition()?;
        self.expect(",", &format!("',' expected between {owner}'s arguments"))?;
        let rhs = self.condition()?;
        self.expect(")", &format!("')' expected after {owner}'s arguments"))?;
        Ok((lhs, rhs))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParseErrorKind, parse_condition};
    use robo_data::{Condition, Expression, Sensor, Variables};

    #[test]
    fn comparisons_take_expressions() {
        let mut vars = Variables::new();
        let cond = parse_condition("gt(fuelLeft, 10)", &mut vars).expect("parse ok");
        assert_eq!(
            cond,
            Condition::Gt(Expression::Sensor(Sensor::FuelLeft), Expression::Number(10))
        );
    }

    #[test]
    fn connectives_nest() {
        let mut vars = Variables::new();
        let cond = parse_condition("and(not(eq(oppLR, 0)), or(lt(1, 2), gt(wallDist, 3)))", &mut vars)
            .expect("parse ok");
        let Condition::And(lhs, rhs) = cond else {
            panic!("expected and");
        };
        assert!(matches!(*lhs, Condition::Not(_)));
        assert!(matches!(*rhs, Condition::Or(..)));
    }

    #[test]
    fn connectives_reject_expression_operands() {
        let mut vars = Variables::new();
        assert!(parse_condition("and(1, 2)", &mut vars).is_err());
        assert!(parse_condition("lt(eq(1, 1), 2)", &mut vars).is_err());
    }

    #[test]
    fn deeply_negated_condition_fails_cleanly() {
        let mut vars = Variables::new();
        let depth = 10_000;
        let src = format!("{}eq(1, 1){}", "not(".repeat(depth), ")".repeat(depth));
        let err = parse_condition(&src, &mut vars).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert!(err.message.contains("nesting"));
    }

    #[test]
    fn missing_comma_is_reported() {
        let mut vars = Variables::new();
        let err = parse_condition("eq(1 2)", &mut vars).unwrap_err();
        assert!(err.message.contains("','"));
        assert_eq!(err.context, ["2", ")"]);
    }
}
