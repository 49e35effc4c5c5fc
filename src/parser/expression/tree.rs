use compact_str::CompactString;

use super::{InfixOperator, InfixShortCircuitOperator, PrefixOperator};
use crate::token::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionAtomKind {
    Integer(i32),
    Bool(bool),
    Null,
    Identifier(CompactString),
    StringLiteral(CompactString),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionAtom {
    pub kind: ExpressionAtomKind,
    pub position: Position,
}

/// Expression tree. Every node owns its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Atom(ExpressionAtom),
    Prefix {
        operator: PrefixOperator,
        rhs: Box<Expression>,
        position: Position,
    },
    Infix {
        operator: InfixOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        position: Position,
    },
    InfixShortCircuit {
        operator: InfixShortCircuitOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        position: Position,
    },
}

impl Expression {
    /// Position of the token that introduced the node: the literal or name
    /// for atoms, the operator otherwise.
    pub fn position(&self) -> Position {
        match self {
            Expression::Atom(ExpressionAtom { position, .. })
            | Expression::Prefix { position, .. }
            | Expression::Infix { position, .. }
            | Expression::InfixShortCircuit { position, .. } => *position,
        }
    }
}
