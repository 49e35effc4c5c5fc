mod cursor;
mod error;
pub mod formatter;

use compact_str::CompactString;
use cursor::SourceLine;
pub use error::{LexicalError, LexicalErrorKind};
use std::io::BufRead;

use crate::token::{ArithmeticOperator, Comparator, Parenthesis, Token, TokenKind, KEYWORD_HASHMAP};

/// Number of spaces making up one indentation level.
pub const INDENT_WIDTH: usize = 4;
/// Maximum number of entries on the indentation stack, base level included.
pub const INDENT_STACK_CAPACITY: usize = 256;
/// Maximum number of bytes on a line, not counting the newline.
pub const MAX_LINE_LENGTH: usize = 1023;
/// Maximum number of bytes in the text of a single token.
pub const MAX_TOKEN_LENGTH: usize = 255;

/// Line-oriented tokenizer for indentation-sensitive source.
///
/// Layout is reported through synthetic `NEWLINE`, `INDENT` and `DEDENT`
/// tokens. The first error is latched: the call that hits it returns `Err`,
/// and every later call returns `EOF`.
#[derive(Debug)]
pub struct Lexer<R> {
    reader: R,
    line: SourceLine,
    line_number: u32,
    /// Absolute indentation levels, strictly increasing, never empty.
    indent_stack: Vec<usize>,
    pending_indents: usize,
    pending_dedents: usize,
    paren_depth: usize,
    lookahead: Option<Result<Token, LexicalError>>,
    error: Option<LexicalError>,
}

impl<'src> Lexer<&'src [u8]> {
    pub fn from_source(source: &'src str) -> Self {
        Self::new(source.as_bytes())
    }
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: SourceLine::default(),
            line_number: 0,
            indent_stack: vec![0],
            pending_indents: 0,
            pending_dedents: 0,
            paren_depth: 0,
            lookahead: None,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&LexicalError> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        match self.lookahead.take() {
            Some(token_or_error) => token_or_error,
            None => self.scan(),
        }
    }

    pub fn peek(&mut self) -> Result<Token, LexicalError> {
        match self.lookahead {
            Some(ref token_or_error) => token_or_error.clone(),
            None => {
                let token_or_error = self.scan();
                self.lookahead = Some(token_or_error.clone());
                token_or_error
            }
        }
    }
}

// Error latching
impl<R: BufRead> Lexer<R> {
    fn scan(&mut self) -> Result<Token, LexicalError> {
        if self.error.is_some() {
            return Ok(Token::eof(self.line_number, self.line.column()));
        }
        let token_or_error = self.scan_token();
        if let Err(ref e) = token_or_error {
            log::debug!("lexer latched error at {}:{}: {e}", e.line, e.column);
            self.error = Some(e.clone());
        }
        token_or_error
    }

    fn error_at(
        &self,
        kind: LexicalErrorKind,
        column: u32,
        lexeme: impl Into<CompactString>,
    ) -> LexicalError {
        LexicalError {
            kind,
            line: self.line_number,
            column,
            lexeme: lexeme.into(),
        }
    }
}

// Line handling and indentation
impl<R: BufRead> Lexer<R> {
    fn current_level(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Reads the next physical line. Returns `false` at end of input.
    fn read_line(&mut self) -> Result<bool, LexicalError> {
        let mut buffer = std::mem::take(self.line.buffer_mut());
        buffer.clear();
        let read = self.reader.read_until(b'\n', &mut buffer).map_err(|e| {
            self.error_at(
                LexicalErrorKind::Read(e.to_string().into()),
                0,
                CompactString::default(),
            )
        })?;
        self.line.reset(buffer);
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;

        if self.line.content_length() > MAX_LINE_LENGTH {
            return Err(self.error_at(
                LexicalErrorKind::LineTooLong,
                (MAX_LINE_LENGTH + 1) as u32,
                CompactString::default(),
            ));
        }
        Ok(true)
    }

    /// Closes every open level at end of input.
    fn flush_levels(&mut self) -> Token {
        let open = self.current_level();
        self.indent_stack.truncate(1);
        if open > 0 {
            log::trace!("end of input closes {open} indentation level(s)");
            self.pending_dedents = open - 1;
            Token::layout(TokenKind::Dedent, self.line_number, 1)
        } else {
            Token::eof(self.line_number, 1)
        }
    }

    /// Measures the leading spaces of a fresh line against the indentation
    /// stack. Returns the first layout token the change produces, if any.
    fn measure_indentation(&mut self) -> Result<Option<Token>, LexicalError> {
        let mut spaces = 0;
        loop {
            match self.line.peek() {
                Some(b' ') => {
                    spaces += 1;
                    self.line.bump();
                }
                Some(b'\t') => {
                    return Err(self.error_at(LexicalErrorKind::Tab, self.line.column(), "\t"));
                }
                _ => break,
            }
        }

        if spaces % INDENT_WIDTH != 0 {
            return Err(self.error_at(LexicalErrorKind::IndentWidth, 1, " ".repeat(spaces)));
        }

        let level = spaces / INDENT_WIDTH;
        let current = self.current_level();

        if level > current {
            // Unreachable while a line cannot hold INDENT_STACK_CAPACITY levels of
            // indentation; MAX_LINE_LENGTH rejects such a line first.
            if self.indent_stack.len() >= INDENT_STACK_CAPACITY {
                return Err(self.error_at(
                    LexicalErrorKind::IndentOverflow,
                    1,
                    CompactString::default(),
                ));
            }
            log::trace!("line {}: indent {current} -> {level}", self.line_number);
            self.indent_stack.push(level);
            self.pending_indents = level - current - 1;
            return Ok(Some(Token::layout(TokenKind::Indent, self.line_number, 1)));
        }

        if level < current {
            while self.indent_stack.len() > 1 && self.current_level() > level {
                self.indent_stack.pop();
            }
            if self.current_level() != level {
                return Err(self.error_at(
                    LexicalErrorKind::InconsistentDedent,
                    1,
                    CompactString::default(),
                ));
            }
            log::trace!("line {}: dedent {current} -> {level}", self.line_number);
            self.pending_dedents = current - level - 1;
            return Ok(Some(Token::layout(TokenKind::Dedent, self.line_number, 1)));
        }

        Ok(None)
    }

    fn skip_inline_whitespace(&mut self) -> Result<(), LexicalError> {
        loop {
            match self.line.peek() {
                Some(b' ') => {
                    self.line.bump();
                }
                Some(b'\t') => {
                    return Err(self.error_at(LexicalErrorKind::Tab, self.line.column(), "\t"));
                }
                _ => return Ok(()),
            }
        }
    }
}

// Tokenization
impl<R: BufRead> Lexer<R> {
    fn scan_token(&mut self) -> Result<Token, LexicalError> {
        if self.pending_indents > 0 {
            self.pending_indents -= 1;
            return Ok(Token::layout(TokenKind::Indent, self.line_number, 1));
        }
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return Ok(Token::layout(TokenKind::Dedent, self.line_number, 1));
        }

        loop {
            while self.line.is_consumed() {
                if !self.read_line()? {
                    return Ok(self.flush_levels());
                }

                if self.line.is_blank_or_comment() {
                    self.line.consume_all();
                    continue;
                }

                if self.paren_depth == 0 {
                    if let Some(token) = self.measure_indentation()? {
                        return Ok(token);
                    }
                }
            }

            self.skip_inline_whitespace()?;

            let column = self.line.column();
            match self.line.peek() {
                // Comments and line ends only terminate logical lines outside parentheses
                Some(b'#') => {
                    self.line.consume_all();
                    if self.paren_depth == 0 {
                        return Ok(Token::layout(TokenKind::Newline, self.line_number, column));
                    }
                }
                None | Some(b'\n') => {
                    self.line.consume_all();
                    if self.paren_depth == 0 {
                        return Ok(Token::layout(TokenKind::Newline, self.line_number, column));
                    }
                }
                Some(b'"') => return self.lex_string(column),
                Some(c) if c.is_ascii_digit() => return self.lex_number(column),
                Some(c) if c.is_ascii_alphabetic() || c == b'_' => {
                    return self.lex_identifier_or_keyword(column)
                }
                Some(c) => return self.lex_operator_or_punctuation(c, column),
            }
        }
    }

    fn make_token(
        &self,
        kind: TokenKind,
        start: usize,
        column: u32,
    ) -> Result<Token, LexicalError> {
        let bytes = self.line.slice(start);
        let text = String::from_utf8_lossy(bytes);
        if bytes.len() > MAX_TOKEN_LENGTH {
            return Err(self.error_at(LexicalErrorKind::TokenTooLong, column, text));
        }
        Ok(Token::new(kind, text, self.line_number, column))
    }

    fn lex_string(&mut self, column: u32) -> Result<Token, LexicalError> {
        let _ = self.line.bump();
        let start = self.line.position();
        loop {
            match self.line.peek() {
                None | Some(b'\n') => {
                    let partial = String::from_utf8_lossy(self.line.slice(start)).into_owned();
                    return Err(self.error_at(
                        LexicalErrorKind::UnclosedString,
                        column,
                        format!("\"{}", partial.trim_end_matches('\n')),
                    ));
                }
                Some(b'"') => break,
                Some(_) => {
                    self.line.bump();
                }
            }
        }
        let token = self.make_token(TokenKind::StringLiteral, start, column);
        let _ = self.line.bump();
        token
    }

    fn lex_number(&mut self, column: u32) -> Result<Token, LexicalError> {
        let start = self.line.position();
        while matches!(self.line.peek(), Some(c) if c.is_ascii_digit()) {
            self.line.bump();
        }
        self.make_token(TokenKind::NumericLiteral, start, column)
    }

    fn lex_identifier_or_keyword(&mut self, column: u32) -> Result<Token, LexicalError> {
        let start = self.line.position();
        while matches!(self.line.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_' || c == b'.')
        {
            self.line.bump();
        }
        let mut token = self.make_token(TokenKind::Identifier, start, column)?;
        if let Some(keyword) = KEYWORD_HASHMAP.get(token.text.as_str()) {
            token.kind = TokenKind::Keyword(*keyword);
        }
        Ok(token)
    }

    fn lex_operator_or_punctuation(&mut self, c: u8, column: u32) -> Result<Token, LexicalError> {
        let start = self.line.position();
        self.line.bump();

        let followed_by_equal = self.line.peek() == Some(b'=');
        let kind = match c {
            b'=' if followed_by_equal => TokenKind::Comparator(Comparator::EqualEqual),
            b'=' => TokenKind::Assign,
            b'!' if followed_by_equal => TokenKind::Comparator(Comparator::BangEqual),
            b'!' => return Err(self.error_at(LexicalErrorKind::LoneBang, column, "!")),
            b'<' if followed_by_equal => TokenKind::Comparator(Comparator::LessThanEqual),
            b'<' => TokenKind::Comparator(Comparator::LessThan),
            b'>' if followed_by_equal => TokenKind::Comparator(Comparator::GreaterThanEqual),
            b'>' => TokenKind::Comparator(Comparator::GreaterThan),
            b'+' => TokenKind::Operator(ArithmeticOperator::Plus),
            b'-' => TokenKind::Operator(ArithmeticOperator::Minus),
            b'*' => TokenKind::Operator(ArithmeticOperator::Star),
            b'/' => TokenKind::Operator(ArithmeticOperator::Slash),
            b'%' => TokenKind::Operator(ArithmeticOperator::Percent),
            b'(' => {
                self.paren_depth += 1;
                TokenKind::Parenthesis(Parenthesis::Left)
            }
            b')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                TokenKind::Parenthesis(Parenthesis::Right)
            }
            b':' => TokenKind::Colon,
            _ => {
                let rest = String::from_utf8_lossy(&[&[c][..], self.line.rest()].concat())
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(self.error_at(
                    LexicalErrorKind::Unrecognized(rest),
                    column,
                    rest.to_string(),
                ));
            }
        };

        if matches!(kind, TokenKind::Comparator(_)) && followed_by_equal {
            self.line.bump();
        }
        self.make_token(kind, start, column)
    }
}
