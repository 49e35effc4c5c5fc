use crate::diagnostic::{Reportable, Stage};
use crate::lexer::LexicalError;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("{expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: CompactString,
    },
    #[error("expected expression (number, string, identifier, verum/falsum/nulla), found {0}")]
    NonExpression(CompactString),
    #[error("expected assignment or call, found {0}")]
    NonStatement(CompactString),
    #[error("unexpected token {0}")]
    InvalidStatement(CompactString),
    #[error("unexpected indentation")]
    UnexpectedIndent,
    #[error("unexpected dedent")]
    UnexpectedDedent,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected end of input inside block")]
    UnterminatedBlock,
    #[error("integer literal out of range: {0}")]
    IntegerOutOfRange(CompactString),
    #[error("expression too deeply nested")]
    TooDeeplyNested,
    #[error(transparent)]
    LexicalError(#[from] LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub line: u32,
    pub column: u32,
}

impl From<LexicalError> for ParserError {
    fn from(value: LexicalError) -> Self {
        Self {
            line: value.line,
            column: value.column,
            kind: ParserErrorKind::LexicalError(value),
        }
    }
}

impl ParserError {
    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, ParserErrorKind::LexicalError(_))
    }
}

impl Reportable for ParserError {
    fn stage(&self) -> Stage {
        match self.kind {
            ParserErrorKind::LexicalError(_) => Stage::Lexer,
            _ => Stage::Parser,
        }
    }

    fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "PS001",
            ParserErrorKind::NonExpression(_) => "PS002",
            ParserErrorKind::NonStatement(_) => "PS003",
            ParserErrorKind::InvalidStatement(_) => "PS004",
            ParserErrorKind::UnexpectedIndent => "PS005",
            ParserErrorKind::UnexpectedDedent => "PS006",
            ParserErrorKind::UnexpectedEof => "PS007",
            ParserErrorKind::UnterminatedBlock => "PS008",
            ParserErrorKind::IntegerOutOfRange(_) => "PS009",
            ParserErrorKind::TooDeeplyNested => "PS010",
            ParserErrorKind::LexicalError(ref e) => e.code(),
        }
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }
}
