//! Condition and expression evaluation.

use robo_data::{Condition, Expression, Operator, Sensor, Value};

use super::{ExecError, Interpreter};
use crate::actor::Actor;

impl<A: Actor + ?Sized> Interpreter<'_, A> {
    /// Evaluate a condition. `and`/`or` skip their right operand once the
    /// left one decides the result.
    ///
    /// # Errors
    /// Propagates faults from the expressions inside.
    pub fn evaluate_condition(&mut self, cond: &Condition) -> Result<bool, ExecError> {
        Ok(match cond {
            Condition::Lt(lhs, rhs) => self.evaluate_expression(lhs)? < self.evaluate_expression(rhs)?,
            Condition::Gt(lhs, rhs) => self.evaluate_expression(lhs)? > self.evaluate_expression(rhs)?,
            Condition::Eq(lhs, rhs) => self.evaluate_expression(lhs)? == self.evaluate_expression(rhs)?,
            Condition::And(lhs, rhs) => self.evaluate_condition(lhs)? && self.evaluate_condition(rhs)?,
            Condition::Or(lhs, rhs) => self.evaluate_condition(lhs)? || self.evaluate_condition(rhs)?,
            Condition::Not(inner) => !self.evaluate_condition(inner)?,
        })
    }

    /// # Errors
    /// [`ExecError::DivisionByZero`] or [`ExecError::UnboundVariable`].
    pub fn evaluate_expression(&mut self, expr: &Expression) -> Result<Value, ExecError> {
        match expr {
            Expression::Number(n) => Ok(*n),
            Expression::Var(name) => self
                .vars
                .get(name)
                .ok_or_else(|| ExecError::UnboundVariable { name: name.clone() }),
            Expression::Sensor(sensor) => self.read_sensor(sensor),
            Expression::Op { op, lhs, rhs } => {
                let lhs = self.evaluate_expression(lhs)?;
                let rhs = self.evaluate_expression(rhs)?;
                apply_operator(*op, lhs, rhs)
            },
        }
    }

    /// Query the host for one sensor reading.
    ///
    /// # Errors
    /// Propagates faults from a barrel index expression.
    pub fn read_sensor(&mut self, sensor: &Sensor) -> Result<Value, ExecError> {
        Ok(match sensor {
            Sensor::FuelLeft => self.actor.fuel(),
            Sensor::OppLR => self.actor.opponent_lr(),
            Sensor::OppFB => self.actor.opponent_fb(),
            Sensor::NumBarrels => self.actor.num_barrels(),
            Sensor::WallDist => self.actor.wall_distance(),
            Sensor::BarrelLR(index) => {
                let index = self.barrel_index(index.as_deref())?;
                self.actor.barrel_lr(index)
            },
            Sensor::BarrelFB(index) => {
                let index = self.barrel_index(index.as_deref())?;
                self.actor.barrel_fb(index)
            },
        })
    }

    /// The bare barrel sensors address the closest barrel.
    fn barrel_index(&mut self, index: Option<&Expression>) -> Result<Value, ExecError> {
        match index {
            Some(expr) => self.evaluate_expression(expr),
            None => Ok(0),
        }
    }
}

/// Apply an arithmetic operator. Overflow wraps.
///
/// # Errors
/// [`ExecError::DivisionByZero`] when `op` is `div` and `rhs` is zero.
pub fn apply_operator(op: Operator, lhs: Value, rhs: Value) -> Result<Value, ExecError> {
    match op {
        Operator::Add => Ok(lhs.wrapping_add(rhs)),
        Operator::Sub => Ok(lhs.wrapping_sub(rhs)),
        Operator::Mul => Ok(lhs.wrapping_mul(rhs)),
        Operator::Div => rounded_div(lhs, rhs),
    }
}

/// Integer division rounded to the nearest integer, halves away from zero.
///
/// ```
/// use robo_engine::rounded_div;
/// assert_eq!(rounded_div(7, 2), Ok(4));
/// assert_eq!(rounded_div(5, 2), Ok(3));
/// assert_eq!(rounded_div(-7, 2), Ok(-4));
/// assert_eq!(rounded_div(10, 4), Ok(3));
/// assert_eq!(rounded_div(9, 4), Ok(2));
/// ```
///
/// # Errors
/// [`ExecError::DivisionByZero`] when `divisor` is zero.
#[allow(clippy::cast_possible_truncation)]
pub fn rounded_div(dividend: Value, divisor: Value) -> Result<Value, ExecError> {
    if divisor == 0 {
        return Err(ExecError::DivisionByZero { dividend });
    }
    let (n, d) = (i64::from(dividend), i64::from(divisor));
    let quotient = n / d;
    let remainder = n % d;
    let rounded = if 2 * remainder.abs() >= d.abs() {
        quotient + n.signum() * d.signum()
    } else {
        quotient
    };
    // Only i32::MIN / -1 leaves the i32 range; wrap it like the other operators.
    Ok(rounded as Value)
}
