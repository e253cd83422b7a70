//! Tree-walking interpreter.
//!
//! Executes a program tree directly against an [`Actor`]. There is no separate
//! runtime representation: statements run by walking the tree, conditions and
//! expressions evaluate recursively, and the only mutable state outside the
//! host is the program instance's [`Variables`].

pub mod eval;

pub use eval::{apply_operator, rounded_div};

use log::trace;
use robo_data::{Action, Block, Expression, Program, Statement, Value, Variables};
use thiserror::Error;

use crate::actor::{Actor, HostAction};

/// Faults raised while running a program. None of them are recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("division by zero ({dividend} / 0)")]
    DivisionByZero { dividend: Value },
    #[error("variable '{name}' has no value")]
    UnboundVariable { name: String },
}

/// How a `loop` statement repeats its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPolicy {
    /// One pass over the body each time the statement runs. Repetition comes
    /// from the driver invoking the whole program again on the next tick.
    #[default]
    SinglePass,
    /// Repeat the body inside the statement, at most `limit` passes
    /// (`None` never stops).
    Repeat { limit: Option<u64> },
}

/// Runs program trees against one actor and one variable store.
pub struct Interpreter<'a, A: Actor + ?Sized> {
    actor: &'a mut A,
    vars: &'a mut Variables,
    loop_policy: LoopPolicy,
    actions: u64,
}

impl<'a, A: Actor + ?Sized> Interpreter<'a, A> {
    pub fn new(actor: &'a mut A, vars: &'a mut Variables) -> Self {
        Self {
            actor,
            vars,
            loop_policy: LoopPolicy::default(),
            actions: 0,
        }
    }

    #[must_use]
    pub fn with_loop_policy(mut self, policy: LoopPolicy) -> Self {
        self.loop_policy = policy;
        self
    }

    /// Number of host actions performed so far.
    pub fn actions_performed(&self) -> u64 {
        self.actions
    }

    /// Execute every top-level statement once, in order.
    ///
    /// # Errors
    /// Stops at the first [`ExecError`].
    pub fn run(&mut self, program: &Program) -> Result<(), ExecError> {
        self.execute_all(&program.statements)
    }

    /// # Errors
    /// Stops at the first [`ExecError`].
    pub fn execute_block(&mut self, block: &Block) -> Result<(), ExecError> {
        self.execute_all(&block.statements)
    }

    fn execute_all(&mut self, statements: &[Statement]) -> Result<(), ExecError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns an [`ExecError`] raised by the statement or anything nested in it.
    pub fn execute(&mut self, stmt: &Statement) -> Result<(), ExecError> {
        match stmt {
            Statement::Loop(body) => self.run_loop(body),
            Statement::If(chain) => {
                for branch in &chain.branches {
                    if self.evaluate_condition(&branch.condition)? {
                        return self.execute_block(&branch.body);
                    }
                }
                match &chain.otherwise {
                    Some(otherwise) => self.execute_block(otherwise),
                    None => Ok(()),
                }
            },
            Statement::While { condition, body } => {
                while self.evaluate_condition(condition)? {
                    self.execute_block(body)?;
                }
                Ok(())
            },
            Statement::Assign { name, value } => {
                let value = self.evaluate_expression(value)?;
                trace!("{name} <- {value}");
                self.vars.set(name, value);
                Ok(())
            },
            Statement::Action(action) => self.act(action),
        }
    }

    fn run_loop(&mut self, body: &Block) -> Result<(), ExecError> {
        match self.loop_policy {
            LoopPolicy::SinglePass => self.execute_block(body),
            LoopPolicy::Repeat { limit } => {
                let mut passes = 0u64;
                while limit.is_none_or(|max| passes < max) {
                    self.execute_block(body)?;
                    passes += 1;
                }
                Ok(())
            },
        }
    }

    fn act(&mut self, action: &Action) -> Result<(), ExecError> {
        match action {
            Action::Move(count) => {
                let times = self.repeat_count(count.as_ref())?;
                self.perform_times(HostAction::Move, times);
            },
            Action::Wait(count) => {
                let times = self.repeat_count(count.as_ref())?;
                self.perform_times(HostAction::IdleWait, times);
            },
            Action::TurnLeft => self.perform(HostAction::TurnLeft),
            Action::TurnRight => self.perform(HostAction::TurnRight),
            Action::TurnAround => self.perform(HostAction::TurnAround),
            Action::TakeFuel => self.perform(HostAction::TakeFuel),
            Action::ShieldOn => self.perform(HostAction::Shield(true)),
            Action::ShieldOff => self.perform(HostAction::Shield(false)),
        }
        Ok(())
    }

    /// The omitted form means one unit; an explicit count below one means none.
    fn repeat_count(&mut self, count: Option<&Expression>) -> Result<u32, ExecError> {
        match count {
            None => Ok(1),
            Some(expr) => Ok(u32::try_from(self.evaluate_expression(expr)?).unwrap_or(0)),
        }
    }

    fn perform_times(&mut self, action: HostAction, times: u32) {
        for _ in 0..times {
            self.perform(action);
        }
    }

    fn perform(&mut self, action: HostAction) {
        trace!("host action: {action}");
        self.actions += 1;
        action.apply(&mut *self.actor);
    }
}

/// Run a program once with the default loop policy.
///
/// # Errors
/// Returns the first [`ExecError`] raised.
pub fn run_program<A: Actor + ?Sized>(program: &Program, vars: &mut Variables, actor: &mut A) -> Result<(), ExecError> {
    Interpreter::new(actor, vars).run(program)
}
