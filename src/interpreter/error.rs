use compact_str::CompactString;
use thiserror::Error;

use crate::diagnostic::{Reportable, Stage};
use crate::token::Position;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(CompactString),
    #[error("type error: cannot negate {0}")]
    NonNegatable(&'static str),
    #[error("type error: cannot add {0} and {1}")]
    NonAddable(&'static str, &'static str),
    #[error("type error: operator '{operator}' expects integers, found {lhs} and {rhs}")]
    NonIntegers {
        operator: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("too many variables")]
    TooManyVariables,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: u32,
    pub column: u32,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, position: Position) -> Self {
        Self {
            kind,
            line: position.line,
            column: position.column,
        }
    }
}

impl Reportable for RuntimeError {
    fn stage(&self) -> Stage {
        Stage::Runtime
    }

    fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::UndefinedVariable(_) => "RT001",
            RuntimeErrorKind::NonNegatable(_) => "RT002",
            RuntimeErrorKind::NonAddable(_, _) => "RT003",
            RuntimeErrorKind::NonIntegers { .. } => "RT004",
            RuntimeErrorKind::DivisionByZero => "RT005",
            RuntimeErrorKind::ModuloByZero => "RT006",
            RuntimeErrorKind::TooManyVariables => "RT007",
        }
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }
}
