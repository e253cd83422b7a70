use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer type shared by expressions, sensors, and the variable store.
pub type Value = i32;

/// Marker character every variable name starts with.
pub const VAR_SIGIL: char = '$';

/// Keywords that open a statement other than an action or assignment.
pub const LOOP_KEYWORD: &str = "loop";
pub const IF_KEYWORD: &str = "if";
pub const ELIF_KEYWORD: &str = "elif";
pub const ELSE_KEYWORD: &str = "else";
pub const WHILE_KEYWORD: &str = "while";

/// Root of a compiled actor script: an ordered, non-empty list of statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A braced statement list used as the body of `loop`, `while`, and `if` branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// Executable statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `loop { ... }`
    Loop(Block),
    /// `if (..) { .. } elif (..) { .. } else { .. }`
    If(IfChain),
    /// `while (..) { .. }`
    While { condition: Condition, body: Block },
    /// `$name = <expr>;`
    Assign { name: String, value: Expression },
    /// One of the primitive actor actions.
    Action(Action),
}

/// An `if` with its `elif` cascade and optional `else`.
///
/// `branches[0]` is the `if` itself; the remaining branches are the `elif`s in
/// source order. Execution runs the first branch whose condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfChain {
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub otherwise: Option<Block>,
}

/// A single condition/body pair of an [`IfChain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub condition: Condition,
    pub body: Block,
}

/// Primitive actions, each backed by a host capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// `move;` moves one step, `move(n);` moves `n` steps.
    Move(Option<Expression>),
    TurnLeft,
    TurnRight,
    TurnAround,
    TakeFuel,
    ShieldOn,
    ShieldOff,
    /// `wait;` idles one tick, `wait(n);` idles `n` ticks.
    Wait(Option<Expression>),
}

/// Action keywords in dispatch order.
pub const ACTION_KEYWORDS: [&str; 8] = [
    "move",
    "wait",
    "turnAround",
    "turnL",
    "turnR",
    "shieldOn",
    "shieldOff",
    "takeFuel",
];

impl Action {
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::TurnLeft => "turnL",
            Action::TurnRight => "turnR",
            Action::TurnAround => "turnAround",
            Action::TakeFuel => "takeFuel",
            Action::ShieldOn => "shieldOn",
            Action::ShieldOff => "shieldOff",
            Action::Wait(_) => "wait",
        }
    }

    /// The keyword-only form for actions that never take an argument.
    pub fn from_bare_keyword(word: &str) -> Option<Self> {
        match word {
            "turnL" => Some(Action::TurnLeft),
            "turnR" => Some(Action::TurnRight),
            "turnAround" => Some(Action::TurnAround),
            "takeFuel" => Some(Action::TakeFuel),
            "shieldOn" => Some(Action::ShieldOn),
            "shieldOff" => Some(Action::ShieldOff),
            _ => None,
        }
    }
}

/// Boolean conditions used by `if`, `elif`, and `while`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Lt(Expression, Expression),
    Gt(Expression, Expression),
    Eq(Expression, Expression),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

/// Condition keywords in dispatch order.
pub const CONDITION_KEYWORDS: [&str; 6] = ["lt", "gt", "eq", "and", "or", "not"];

impl Condition {
    pub fn keyword(&self) -> &'static str {
        match self {
            Condition::Lt(..) => "lt",
            Condition::Gt(..) => "gt",
            Condition::Eq(..) => "eq",
            Condition::And(..) => "and",
            Condition::Or(..) => "or",
            Condition::Not(_) => "not",
        }
    }
}

/// Integer-valued expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Number(Value),
    Var(String),
    Sensor(Sensor),
    Op {
        op: Operator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

impl Expression {
    pub fn op(op: Operator, lhs: Expression, rhs: Expression) -> Self {
        Expression::Op {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    /// Division rounded to the nearest integer.
    Div,
}

/// Operator keywords in dispatch order.
pub const OPERATOR_KEYWORDS: [&str; 4] = ["add", "sub", "mul", "div"];

impl Operator {
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Mul => "mul",
            Operator::Div => "div",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "add" => Some(Operator::Add),
            "sub" => Some(Operator::Sub),
            "mul" => Some(Operator::Mul),
            "div" => Some(Operator::Div),
            _ => None,
        }
    }
}

/// Read-only queries against the actor host.
///
/// The barrel sensors take an optional barrel index; an omitted index is kept
/// as `None` so rendering reproduces the source form, and reads barrel 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sensor {
    FuelLeft,
    OppLR,
    OppFB,
    NumBarrels,
    WallDist,
    BarrelLR(Option<Box<Expression>>),
    BarrelFB(Option<Box<Expression>>),
}

/// Sensor keywords in dispatch order.
pub const SENSOR_KEYWORDS: [&str; 7] = [
    "fuelLeft",
    "oppLR",
    "oppFB",
    "numBarrels",
    "barrelLR",
    "barrelFB",
    "wallDist",
];

impl Sensor {
    pub fn keyword(&self) -> &'static str {
        match self {
            Sensor::FuelLeft => "fuelLeft",
            Sensor::OppLR => "oppLR",
            Sensor::OppFB => "oppFB",
            Sensor::NumBarrels => "numBarrels",
            Sensor::WallDist => "wallDist",
            Sensor::BarrelLR(_) => "barrelLR",
            Sensor::BarrelFB(_) => "barrelFB",
        }
    }

    /// Sensors that never take an argument.
    pub fn from_bare_keyword(word: &str) -> Option<Self> {
        match word {
            "fuelLeft" => Some(Sensor::FuelLeft),
            "oppLR" => Some(Sensor::OppLR),
            "oppFB" => Some(Sensor::OppFB),
            "numBarrels" => Some(Sensor::NumBarrels),
            "wallDist" => Some(Sensor::WallDist),
            _ => None,
        }
    }
}

// Canonical text rendering. Every form below parses back to an equal tree.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.statements {
            write!(f, " {stmt}")?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Loop(body) => write!(f, "{LOOP_KEYWORD} {body}"),
            Statement::If(chain) => write!(f, "{chain}"),
            Statement::While { condition, body } => write!(f, "{WHILE_KEYWORD} ({condition}) {body}"),
            Statement::Assign { name, value } => write!(f, "{name} = {value};"),
            Statement::Action(action) => write!(f, "{action}"),
        }
    }
}

impl fmt::Display for IfChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, branch) in self.branches.iter().enumerate() {
            let keyword = if i == 0 { IF_KEYWORD } else { ELIF_KEYWORD };
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{keyword} ({}) {}", branch.condition, branch.body)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " {ELSE_KEYWORD} {otherwise}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(Some(n)) | Action::Wait(Some(n)) => write!(f, "{}({n});", self.keyword()),
            _ => write!(f, "{};", self.keyword()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = self.keyword();
        match self {
            Condition::Lt(a, b) | Condition::Gt(a, b) | Condition::Eq(a, b) => write!(f, "{kw}({a}, {b})"),
            Condition::And(a, b) | Condition::Or(a, b) => write!(f, "{kw}({a}, {b})"),
            Condition::Not(c) => write!(f, "{kw}({c})"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{n}"),
            Expression::Var(name) => write!(f, "{name}"),
            Expression::Sensor(sensor) => write!(f, "{sensor}"),
            Expression::Op { op, lhs, rhs } => write!(f, "{}({lhs}, {rhs})", op.keyword()),
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensor::BarrelLR(Some(index)) | Sensor::BarrelFB(Some(index)) => {
                write!(f, "{}({index})", self.keyword())
            },
            _ => write!(f, "{}", self.keyword()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: Value) -> Expression {
        Expression::Number(n)
    }

    #[test]
    fn actions_render_with_and_without_argument() {
        assert_eq!(Action::Move(None).to_string(), "move;");
        assert_eq!(Action::Move(Some(num(3))).to_string(), "move(3);");
        assert_eq!(Action::Wait(None).to_string(), "wait;");
        assert_eq!(Action::TurnAround.to_string(), "turnAround;");
        assert_eq!(Action::ShieldOff.to_string(), "shieldOff;");
    }

    #[test]
    fn if_chain_renders_every_branch_in_order() {
        let chain = IfChain {
            branches: vec![
                Branch {
                    condition: Condition::Lt(num(1), num(2)),
                    body: Block::new(vec![Statement::Action(Action::Move(None))]),
                },
                Branch {
                    condition: Condition::Eq(num(1), num(1)),
                    body: Block::new(vec![Statement::Action(Action::Wait(None))]),
                },
            ],
            otherwise: Some(Block::new(vec![Statement::Action(Action::TurnLeft)])),
        };
        assert_eq!(
            Statement::If(chain).to_string(),
            "if (lt(1, 2)) { move; } elif (eq(1, 1)) { wait; } else { turnL; }"
        );
    }

    #[test]
    fn nested_expressions_render_prefix_form() {
        let expr = Expression::op(
            Operator::Div,
            Expression::op(Operator::Add, Expression::Var("$a".into()), num(-2)),
            Expression::Sensor(Sensor::BarrelFB(Some(Box::new(num(1))))),
        );
        assert_eq!(expr.to_string(), "div(add($a, -2), barrelFB(1))");
        assert_eq!(Expression::Sensor(Sensor::BarrelLR(None)).to_string(), "barrelLR");
    }

    #[test]
    fn program_statements_are_newline_separated() {
        let program = Program {
            statements: vec![
                Statement::Assign {
                    name: "$f".into(),
                    value: num(3),
                },
                Statement::While {
                    condition: Condition::Gt(Expression::Var("$f".into()), num(0)),
                    body: Block::new(vec![Statement::Assign {
                        name: "$f".into(),
                        value: Expression::op(Operator::Sub, Expression::Var("$f".into()), num(1)),
                    }]),
                },
            ],
        };
        assert_eq!(
            program.to_string(),
            "$f = 3;\nwhile (gt($f, 0)) { $f = sub($f, 1); }"
        );
    }

    #[test]
    fn keyword_tables_agree_with_variants() {
        for kw in ACTION_KEYWORDS {
            let rendered = match Action::from_bare_keyword(kw) {
                Some(action) => action.keyword(),
                None => kw,
            };
            assert_eq!(rendered, kw);
        }
        for kw in OPERATOR_KEYWORDS {
            assert_eq!(Operator::from_keyword(kw).map(Operator::keyword), Some(kw));
        }
        assert_eq!(Sensor::from_bare_keyword("barrelLR"), None);
    }

    #[test]
    fn program_survives_ron_round_trip() {
        let program = Program {
            statements: vec![Statement::Loop(Block::new(vec![Statement::Action(Action::Move(Some(
                Expression::Sensor(Sensor::WallDist),
            )))]))],
        };
        let text = ron::to_string(&program).expect("serialize");
        let back: Program = ron::from_str(&text).expect("deserialize");
        assert_eq!(back, program);
    }
}
