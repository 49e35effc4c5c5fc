use crate::diagnostic::Reportable;
use crate::lexer::LexicalError;
use crate::token::Token;
use compact_str::CompactString;

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_lexical_error(&self, error: &LexicalError) -> String;
}

/// `line:column  KIND         text`, one token per line.
pub struct BasicFormatter {
    path: Option<CompactString>,
}

impl BasicFormatter {
    pub fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(CompactString::from),
        }
    }
}

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        format!(
            "{}:{}  {:<11}  {}",
            token.line,
            token.column,
            token.kind.to_string(),
            token.text
        )
    }

    fn format_lexical_error(&self, error: &LexicalError) -> String {
        error.to_diagnostic(self.path.as_deref()).to_string()
    }
}
