use std::collections::BTreeSet;
use std::fmt;

use crate::vars::is_valid_var_name;
use crate::*;

/// Structural problem found in a program tree that did not come from the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyProgram,
    EmptyBlock { context: String },
    EmptyIf,
    InvalidVariableName { name: String },
    UndeclaredVariable { name: String, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyProgram => write!(f, "program has no statements"),
            ValidationError::EmptyBlock { context } => write!(f, "empty block ({context})"),
            ValidationError::EmptyIf => write!(f, "if statement has no branches"),
            ValidationError::InvalidVariableName { name } => write!(f, "invalid variable name '{name}'"),
            ValidationError::UndeclaredVariable { name, context } => {
                write!(f, "variable '{name}' used before it is assigned ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a program tree against the rules the parser enforces.
///
/// Names become declared once their whole assignment has been seen, walking the
/// tree in source order, so a variable may only be read after an assignment to
/// it appears earlier in the text.
///
/// ```
/// use robo_data::{Action, Expression, Program, Statement, validate_program};
///
/// let program = Program {
///     statements: vec![
///         Statement::Assign { name: "$n".into(), value: Expression::Number(2) },
///         Statement::Action(Action::Move(Some(Expression::Var("$n".into())))),
///     ],
/// };
/// assert!(validate_program(&program).is_empty());
/// ```
pub fn validate_program(program: &Program) -> Vec<ValidationError> {
    let mut checker = Checker::default();
    if program.statements.is_empty() {
        checker.errors.push(ValidationError::EmptyProgram);
    }
    checker.statements(&program.statements);
    checker.errors
}

/// Every variable name assigned anywhere in the program, sorted.
pub fn declared_names(program: &Program) -> Vec<String> {
    let mut checker = Checker::default();
    checker.statements(&program.statements);
    checker.declared.into_iter().collect()
}

#[derive(Default)]
struct Checker {
    declared: BTreeSet<String>,
    errors: Vec<ValidationError>,
}

impl Checker {
    fn statements(&mut self, stmts: &[Statement]) {
        for stmt in stmts {
            self.statement(stmt);
        }
    }

    fn block(&mut self, block: &Block, context: &str) {
        if block.statements.is_empty() {
            self.errors.push(ValidationError::EmptyBlock {
                context: context.to_string(),
            });
        }
        self.statements(&block.statements);
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Loop(body) => self.block(body, LOOP_KEYWORD),
            Statement::If(chain) => {
                if chain.branches.is_empty() {
                    self.errors.push(ValidationError::EmptyIf);
                }
                for (i, branch) in chain.branches.iter().enumerate() {
                    let kw = if i == 0 { IF_KEYWORD } else { ELIF_KEYWORD };
                    self.condition(&branch.condition, kw);
                    self.block(&branch.body, kw);
                }
                if let Some(otherwise) = &chain.otherwise {
                    self.block(otherwise, ELSE_KEYWORD);
                }
            },
            Statement::While { condition, body } => {
                self.condition(condition, WHILE_KEYWORD);
                self.block(body, WHILE_KEYWORD);
            },
            Statement::Assign { name, value } => {
                self.expression(value, name);
                if is_valid_var_name(name) {
                    self.declared.insert(name.clone());
                } else {
                    self.errors.push(ValidationError::InvalidVariableName { name: name.clone() });
                }
            },
            Statement::Action(action) => match action {
                Action::Move(Some(arg)) | Action::Wait(Some(arg)) => self.expression(arg, action.keyword()),
                _ => {},
            },
        }
    }

    fn condition(&mut self, cond: &Condition, context: &str) {
        match cond {
            Condition::Lt(a, b) | Condition::Gt(a, b) | Condition::Eq(a, b) => {
                self.expression(a, context);
                self.expression(b, context);
            },
            Condition::And(a, b) | Condition::Or(a, b) => {
                self.condition(a, context);
                self.condition(b, context);
            },
            Condition::Not(c) => self.condition(c, context),
        }
    }

    fn expression(&mut self, expr: &Expression, context: &str) {
        match expr {
            Expression::Number(_) => {},
            Expression::Var(name) => {
                if !is_valid_var_name(name) {
                    self.errors.push(ValidationError::InvalidVariableName { name: name.clone() });
                } else if !self.declared.contains(name) {
                    self.errors.push(ValidationError::UndeclaredVariable {
                        name: name.clone(),
                        context: context.to_string(),
                    });
                }
            },
            Expression::Sensor(Sensor::BarrelLR(Some(index)) | Sensor::BarrelFB(Some(index))) => {
                self.expression(index, context);
            },
            Expression::Sensor(_) => {},
            Expression::Op { lhs, rhs, .. } => {
                self.expression(lhs, context);
                self.expression(rhs, context);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expression {
        Expression::Var(name.into())
    }

    fn assign(name: &str, value: Expression) -> Statement {
        Statement::Assign {
            name: name.into(),
            value,
        }
    }

    #[test]
    fn use_before_assignment_is_reported() {
        let program = Program {
            statements: vec![
                Statement::Action(Action::Move(Some(var("$x")))),
                assign("$x", Expression::Number(1)),
            ],
        };
        let errors = validate_program(&program);
        assert_eq!(
            errors,
            vec![ValidationError::UndeclaredVariable {
                name: "$x".into(),
                context: "move".into()
            }]
        );
    }

    #[test]
    fn self_reference_in_first_assignment_is_undeclared() {
        let program = Program {
            statements: vec![assign("$x", Expression::op(Operator::Add, var("$x"), Expression::Number(1)))],
        };
        assert!(matches!(
            validate_program(&program).as_slice(),
            [ValidationError::UndeclaredVariable { name, .. }] if name == "$x"
        ));
    }

    #[test]
    fn assignment_inside_untaken_branch_still_declares() {
        let program = Program {
            statements: vec![
                Statement::If(IfChain {
                    branches: vec![Branch {
                        condition: Condition::Lt(Expression::Number(1), Expression::Number(0)),
                        body: Block::new(vec![assign("$late", Expression::Number(9))]),
                    }],
                    otherwise: None,
                }),
                Statement::Action(Action::Wait(Some(var("$late")))),
            ],
        };
        assert!(validate_program(&program).is_empty());
        assert_eq!(declared_names(&program), vec!["$late".to_string()]);
    }

    #[test]
    fn empty_shapes_are_reported() {
        let program = Program {
            statements: vec![
                Statement::Loop(Block::default()),
                Statement::If(IfChain {
                    branches: Vec::new(),
                    otherwise: None,
                }),
                assign("count", Expression::Number(0)),
            ],
        };
        let errors = validate_program(&program);
        assert!(errors.contains(&ValidationError::EmptyBlock {
            context: "loop".into()
        }));
        assert!(errors.contains(&ValidationError::EmptyIf));
        assert!(errors.contains(&ValidationError::InvalidVariableName { name: "count".into() }));
        assert_eq!(validate_program(&Program::default()), vec![ValidationError::EmptyProgram]);
    }
}
