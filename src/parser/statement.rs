use compact_str::CompactString;

use super::expression::Expression;
use crate::token::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Import(ImportStatement),
    Assign(AssignStatement),
    Print(PrintStatement),
    If(IfStatement),
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::Import(stmt) => stmt.position,
            Statement::Assign(stmt) => stmt.position,
            Statement::Print(stmt) => stmt.position,
            Statement::If(stmt) => stmt.position,
        }
    }
}

/// `import <module>`. Recorded only.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub module: CompactString,
    pub position: Position,
}

/// `<target> = <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub target: CompactString,
    pub value: Expression,
    pub position: Position,
}

/// `sonus.dic(<argument>)`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub argument: Expression,
    pub position: Position,
}

/// `si` / `aliosi` / `alio` chain. Only the last branch may lack a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub branches: Vec<IfBranch>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    /// `None` for the `alio` branch.
    pub condition: Option<Expression>,
    pub body: Vec<Statement>,
    pub position: Position,
}
