pub mod error;
pub mod expression;
pub mod formatter;
pub mod program;
pub mod statement;

use std::io::BufRead;

use crate::{
    lexer::Lexer,
    token::{
        ArithmeticOperator, Comparator, Keyword, Parenthesis, Token, TokenKind, PRINT_IDENTIFIER,
    },
};
pub use error::{ParserError, ParserErrorKind};
use expression::{
    Expression, ExpressionAtom, ExpressionAtomKind, InfixOperator, InfixShortCircuitOperator,
    PrefixOperator,
};
pub use program::Program;
use statement::{
    AssignStatement, IfBranch, IfStatement, ImportStatement, PrintStatement, Statement,
};

enum PeekedOperator {
    Infix(InfixOperator),
    ShortCircuit(InfixShortCircuitOperator),
}

impl PeekedOperator {
    fn get_binding_power(&self) -> (u8, u8) {
        match self {
            PeekedOperator::Infix(operator) => operator.get_binding_power(),
            PeekedOperator::ShortCircuit(operator) => operator.get_binding_power(),
        }
    }
}

/// Deepest expression the parser accepts, counting both the height of the
/// built tree and the nesting of brackets and prefix operators.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Recursive descent parser over a single token of lookahead.
///
/// Parsing stops at the first error. A lexical error always wins over the
/// syntax error it may have caused.
pub struct Parser<R> {
    lexer: Lexer<R>,
    error: Option<ParserError>,
    nesting: usize,
}

impl<'src> Parser<&'src [u8]> {
    pub fn from_source(source: &'src str) -> Self {
        Self::new(Lexer::from_source(source))
    }
}

impl<R: BufRead> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        Self {
            lexer,
            error: None,
            nesting: 0,
        }
    }

    pub fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    fn peek(&mut self) -> Result<Token, ParserError> {
        Ok(self.lexer.peek()?)
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        Ok(self.lexer.next_token()?)
    }

    fn expect(&mut self, expected: TokenKind, message: &'static str) -> Result<Token, ParserError> {
        let next_token = self.next_token()?;
        if next_token.kind != expected {
            Err(Self::unexpected(&next_token, message))
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Result<Option<Token>, ParserError> {
        let next_token = self.peek()?;
        if next_token.kind != next {
            Ok(None)
        } else {
            self.next_token().map(Some)
        }
    }

    fn unexpected(token: &Token, expected: &'static str) -> ParserError {
        Self::error_at(
            token,
            ParserErrorKind::UnexpectedToken {
                expected,
                found: token.describe(),
            },
        )
    }

    fn error_at(token: &Token, kind: ParserErrorKind) -> ParserError {
        ParserError {
            kind,
            line: token.line,
            column: token.column,
        }
    }

    /// Skips to the next statement boundary after an error.
    fn synchronize(&mut self) {
        while let Ok(token) = self.peek() {
            if matches!(token.kind, TokenKind::Newline | TokenKind::Dedent | TokenKind::Eof) {
                return;
            }
            if self.next_token().is_err() {
                return;
            }
        }
    }
}

// Pratt parser for expressions
impl<R: BufRead> Parser<R> {
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        self.nesting = 0;
        let (expression, _) = self.parse_expression_pratt(0)?;
        Ok(expression)
    }

    fn peek_binary_operator(&mut self) -> Result<Option<PeekedOperator>, ParserError> {
        let token = self.peek()?;

        let operator = match token.kind {
            TokenKind::Operator(ArithmeticOperator::Plus) => {
                PeekedOperator::Infix(InfixOperator::Add)
            }
            TokenKind::Operator(ArithmeticOperator::Minus) => {
                PeekedOperator::Infix(InfixOperator::Subtract)
            }
            TokenKind::Operator(ArithmeticOperator::Star) => {
                PeekedOperator::Infix(InfixOperator::Multiply)
            }
            TokenKind::Operator(ArithmeticOperator::Slash) => {
                PeekedOperator::Infix(InfixOperator::Divide)
            }
            TokenKind::Operator(ArithmeticOperator::Percent) => {
                PeekedOperator::Infix(InfixOperator::Modulo)
            }
            TokenKind::Comparator(Comparator::LessThan) => {
                PeekedOperator::Infix(InfixOperator::LessThan)
            }
            TokenKind::Comparator(Comparator::LessThanEqual) => {
                PeekedOperator::Infix(InfixOperator::LessThanEqual)
            }
            TokenKind::Comparator(Comparator::GreaterThan) => {
                PeekedOperator::Infix(InfixOperator::GreaterThan)
            }
            TokenKind::Comparator(Comparator::GreaterThanEqual) => {
                PeekedOperator::Infix(InfixOperator::GreaterThanEqual)
            }
            TokenKind::Comparator(Comparator::EqualEqual) => {
                PeekedOperator::Infix(InfixOperator::EqualEqual)
            }
            TokenKind::Comparator(Comparator::BangEqual) => {
                PeekedOperator::Infix(InfixOperator::BangEqual)
            }
            TokenKind::Keyword(Keyword::Et) => {
                PeekedOperator::ShortCircuit(InfixShortCircuitOperator::Et)
            }
            TokenKind::Keyword(Keyword::Aut) => {
                PeekedOperator::ShortCircuit(InfixShortCircuitOperator::Aut)
            }
            _ => return Ok(None),
        };
        Ok(Some(operator))
    }

    /// Parses an operand and returns it with the height of its tree.
    fn expect_left_expression(&mut self) -> Result<(Expression, usize), ParserError> {
        let token = self.next_token()?;
        let position = token.position();

        let atom = |kind: ExpressionAtomKind| -> Result<(Expression, usize), ParserError> {
            Ok((Expression::Atom(ExpressionAtom { kind, position }), 1))
        };

        match token.kind {
            TokenKind::Eof => Err(Self::error_at(&token, ParserErrorKind::UnexpectedEof)),
            TokenKind::NumericLiteral => match token.text.parse::<i32>() {
                Ok(value) => atom(ExpressionAtomKind::Integer(value)),
                Err(_) => Err(Self::error_at(
                    &token,
                    ParserErrorKind::IntegerOutOfRange(token.text.clone()),
                )),
            },
            TokenKind::StringLiteral => atom(ExpressionAtomKind::StringLiteral(token.text)),
            TokenKind::Identifier => atom(ExpressionAtomKind::Identifier(token.text)),
            TokenKind::Keyword(Keyword::Verum) => atom(ExpressionAtomKind::Bool(true)),
            TokenKind::Keyword(Keyword::Falsum) => atom(ExpressionAtomKind::Bool(false)),
            TokenKind::Keyword(Keyword::Nulla) => atom(ExpressionAtomKind::Null),
            // Unary operators
            TokenKind::Keyword(Keyword::Non) => self.parse_prefix(PrefixOperator::Non, &token),
            TokenKind::Operator(ArithmeticOperator::Minus) => {
                self.parse_prefix(PrefixOperator::Minus, &token)
            }
            // Bracketed expression
            TokenKind::Parenthesis(Parenthesis::Left) => {
                let inner = self.parse_expression_pratt(0)?;
                self.expect(
                    TokenKind::Parenthesis(Parenthesis::Right),
                    "expected ')' after expression",
                )?;
                Ok(inner)
            }
            _ => Err(Self::error_at(
                &token,
                ParserErrorKind::NonExpression(token.describe()),
            )),
        }
    }

    fn parse_prefix(
        &mut self,
        operator: PrefixOperator,
        token: &Token,
    ) -> Result<(Expression, usize), ParserError> {
        let rbp = operator.get_binding_power();
        let (rhs, rhs_height) = self.parse_expression_pratt(rbp)?;
        let expression = Expression::Prefix {
            operator,
            rhs: Box::new(rhs),
            position: token.position(),
        };
        Ok((expression, Self::check_height(token, rhs_height + 1)?))
    }

    fn check_height(token: &Token, height: usize) -> Result<usize, ParserError> {
        if height > MAX_EXPRESSION_DEPTH {
            Err(Self::error_at(token, ParserErrorKind::TooDeeplyNested))
        } else {
            Ok(height)
        }
    }

    fn parse_expression_pratt(&mut self, min_bp: u8) -> Result<(Expression, usize), ParserError> {
        self.nesting += 1;
        if self.nesting > MAX_EXPRESSION_DEPTH {
            let token = self.peek()?;
            return Err(Self::error_at(&token, ParserErrorKind::TooDeeplyNested));
        }
        let parsed = self.parse_operands(min_bp);
        self.nesting -= 1;
        parsed
    }

    fn parse_operands(&mut self, min_bp: u8) -> Result<(Expression, usize), ParserError> {
        let (mut lhs, mut height) = self.expect_left_expression()?;

        while let Some(operator) = self.peek_binary_operator()? {
            let (lbp, rbp) = operator.get_binding_power();
            if lbp < min_bp {
                break;
            }
            let token = self.next_token()?;
            let position = token.position();
            let (rhs, rhs_height) = self.parse_expression_pratt(rbp)?;
            height = Self::check_height(&token, height.max(rhs_height) + 1)?;
            let lhs_box = Box::new(lhs);
            let rhs = Box::new(rhs);

            lhs = match operator {
                PeekedOperator::Infix(operator) => Expression::Infix {
                    operator,
                    lhs: lhs_box,
                    rhs,
                    position,
                },
                PeekedOperator::ShortCircuit(operator) => Expression::InfixShortCircuit {
                    operator,
                    lhs: lhs_box,
                    rhs,
                    position,
                },
            };
        }
        Ok((lhs, height))
    }
}

// Parse program/statements
impl<R: BufRead> Parser<R> {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        if let Some(ref error) = self.error {
            return Err(error.clone());
        }

        match self.parse_program() {
            Ok(program) => {
                log::debug!("parsed {} top-level statement(s)", program.len());
                Ok(program)
            }
            Err(error) => {
                self.synchronize();
                let error = match self.lexer.error() {
                    Some(lexical) => ParserError::from(lexical.clone()),
                    None => error,
                };
                log::debug!("parser latched error at {}:{}: {error}", error.line, error.column);
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    fn parse_program(&mut self) -> Result<Program, ParserError> {
        let mut statements = Vec::new();

        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    self.next_token()?;
                }
                TokenKind::Indent => {
                    return Err(Self::error_at(&token, ParserErrorKind::UnexpectedIndent))
                }
                TokenKind::Dedent => {
                    return Err(Self::error_at(&token, ParserErrorKind::UnexpectedDedent))
                }
                _ => statements.push(self.parse_statement()?),
            }
        }

        Ok(Program::new(statements))
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let first = self.next_token()?;
        let position = first.position();

        match first.kind {
            TokenKind::Keyword(Keyword::Import) => {
                let module =
                    self.expect(TokenKind::Identifier, "expected module name after 'import'")?;
                self.expect_end_of_statement()?;
                Ok(Statement::Import(ImportStatement {
                    module: module.text,
                    position,
                }))
            }
            TokenKind::Keyword(Keyword::Si) => self.parse_if_statement(&first),
            TokenKind::Identifier if first.text == PRINT_IDENTIFIER => {
                self.expect(
                    TokenKind::Parenthesis(Parenthesis::Left),
                    "expected '(' after sonus.dic",
                )?;
                let argument = self.parse_expression()?;
                self.expect(
                    TokenKind::Parenthesis(Parenthesis::Right),
                    "expected ')' after argument",
                )?;
                self.expect_end_of_statement()?;
                Ok(Statement::Print(PrintStatement { argument, position }))
            }
            TokenKind::Identifier => {
                if self.eat_if(TokenKind::Assign)?.is_none() {
                    let next = self.peek()?;
                    return Err(Self::error_at(
                        &next,
                        ParserErrorKind::NonStatement(next.describe()),
                    ));
                }
                let value = self.parse_expression()?;
                self.expect_end_of_statement()?;
                Ok(Statement::Assign(AssignStatement {
                    target: first.text,
                    value,
                    position,
                }))
            }
            TokenKind::Indent => Err(Self::error_at(&first, ParserErrorKind::UnexpectedIndent)),
            TokenKind::Dedent => Err(Self::error_at(&first, ParserErrorKind::UnexpectedDedent)),
            TokenKind::Eof => Err(Self::error_at(&first, ParserErrorKind::UnexpectedEof)),
            _ => Err(Self::error_at(
                &first,
                ParserErrorKind::InvalidStatement(first.describe()),
            )),
        }
    }

    /// Simple statements end at a NEWLINE. End of input and the DEDENT that
    /// closes a block also end them but are left for the caller.
    fn expect_end_of_statement(&mut self) -> Result<(), ParserError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Newline => {
                self.next_token()?;
                Ok(())
            }
            TokenKind::Eof | TokenKind::Dedent => Ok(()),
            _ => Err(Self::unexpected(&token, "expected end of line")),
        }
    }

    fn parse_if_statement(&mut self, si: &Token) -> Result<Statement, ParserError> {
        let mut branches = Vec::new();

        let condition = self.parse_expression()?;
        let body = self.parse_block("expected ':' after condition")?;
        branches.push(IfBranch {
            condition: Some(condition),
            body,
            position: si.position(),
        });

        loop {
            let token = self.peek()?;
            if token.is_keyword(Keyword::Aliosi) {
                self.next_token()?;
                let condition = self.parse_expression()?;
                let body = self.parse_block("expected ':' after condition")?;
                branches.push(IfBranch {
                    condition: Some(condition),
                    body,
                    position: token.position(),
                });
            } else if token.is_keyword(Keyword::Alio) {
                self.next_token()?;
                let body = self.parse_block("expected ':' after 'alio'")?;
                branches.push(IfBranch {
                    condition: None,
                    body,
                    position: token.position(),
                });
                break;
            } else {
                break;
            }
        }

        Ok(Statement::If(IfStatement {
            branches,
            position: si.position(),
        }))
    }

    /// `: NEWLINE INDENT <statements> DEDENT`
    fn parse_block(&mut self, colon_message: &'static str) -> Result<Vec<Statement>, ParserError> {
        self.expect(TokenKind::Colon, colon_message)?;
        self.expect(TokenKind::Newline, "expected newline after ':'")?;
        self.expect(TokenKind::Indent, "expected an indented block")?;

        let mut body = Vec::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Dedent => {
                    self.next_token()?;
                    break;
                }
                TokenKind::Eof => {
                    return Err(Self::error_at(&token, ParserErrorKind::UnterminatedBlock))
                }
                TokenKind::Newline => {
                    self.next_token()?;
                }
                TokenKind::Indent => {
                    return Err(Self::error_at(&token, ParserErrorKind::UnexpectedIndent))
                }
                _ => body.push(self.parse_statement()?),
            }
        }
        Ok(body)
    }
}
