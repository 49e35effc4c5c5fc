mod operator;
mod tree;

pub use operator::{InfixOperator, InfixShortCircuitOperator, PrefixOperator};
pub use tree::{Expression, ExpressionAtom, ExpressionAtomKind};
