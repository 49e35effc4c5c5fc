use super::{MAX_LINE_LENGTH, MAX_TOKEN_LENGTH};
use crate::diagnostic::{Reportable, Stage};
use crate::token::{Token, TokenKind};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexicalErrorKind {
    #[error("tab character is not allowed (use 4 spaces)")]
    Tab,
    #[error("indentation must be multiple of 4 spaces")]
    IndentWidth,
    #[error("inconsistent dedent")]
    InconsistentDedent,
    #[error("indent stack overflow")]
    IndentOverflow,
    #[error("unterminated string literal")]
    UnclosedString,
    #[error("unexpected character '{0}'")]
    Unrecognized(char),
    #[error("unexpected '!'")]
    LoneBang,
    #[error("line exceeds maximum length of {} characters", MAX_LINE_LENGTH)]
    LineTooLong,
    #[error("token exceeds maximum length of {} characters", MAX_TOKEN_LENGTH)]
    TokenTooLong,
    #[error("failed to read input: {0}")]
    Read(CompactString),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct LexicalError {
    #[source]
    pub kind: LexicalErrorKind,
    pub line: u32,
    pub column: u32,
    /// The offending input, when there is any.
    pub lexeme: CompactString,
}

impl LexicalError {
    /// The offending input as an `INVALID` token.
    pub fn to_token(&self) -> Token {
        Token::new(TokenKind::Invalid, self.lexeme.clone(), self.line, self.column)
    }
}

impl Reportable for LexicalError {
    fn stage(&self) -> Stage {
        Stage::Lexer
    }

    fn code(&self) -> &'static str {
        match self.kind {
            LexicalErrorKind::Tab => "LX001",
            LexicalErrorKind::IndentWidth => "LX002",
            LexicalErrorKind::InconsistentDedent => "LX003",
            LexicalErrorKind::IndentOverflow => "LX004",
            LexicalErrorKind::UnclosedString => "LX005",
            LexicalErrorKind::Unrecognized(_) => "LX006",
            LexicalErrorKind::LoneBang => "LX007",
            LexicalErrorKind::LineTooLong => "LX008",
            LexicalErrorKind::TokenTooLong => "LX009",
            LexicalErrorKind::Read(_) => "LX010",
        }
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }
}
