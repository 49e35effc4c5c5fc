use super::{
    expression::{Expression, ExpressionAtom, ExpressionAtomKind, PrefixOperator},
    statement::Statement,
    ParserError, Program,
};
use crate::{diagnostic::Reportable, token::PRINT_IDENTIFIER};
use compact_str::CompactString;
use std::fmt::Write;

const WRITE_FMT_MSG: &str =
    "Encountered an error while attempting to write format string to buffer.";

/// Spaces added per level of block nesting in the statement dump.
const NESTING_WIDTH: usize = 2;

pub trait ExpressionFormatter {
    fn format(&self, tree: &Expression) -> String;
}

pub trait ProgramFormatter {
    /// Formats a program, one line per statement header.
    fn format(&self, program: &Program) -> String;
    fn format_error(&self, error: &ParserError) -> String;
}

/// Fully parenthesised expressions and an indented statement outline.
pub struct StructuralFormatter {
    path: Option<CompactString>,
}

impl StructuralFormatter {
    pub fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(CompactString::from),
        }
    }
}

impl StructuralFormatter {
    fn format_atom(atom: &ExpressionAtom) -> String {
        match atom.kind {
            ExpressionAtomKind::Integer(v) => format!("{v}"),
            ExpressionAtomKind::Bool(true) => "verum".into(),
            ExpressionAtomKind::Bool(false) => "falsum".into(),
            ExpressionAtomKind::Null => "nulla".into(),
            ExpressionAtomKind::Identifier(ref name) => name.to_string(),
            ExpressionAtomKind::StringLiteral(ref v) => format!("\"{v}\""),
        }
    }

    fn format_expression(tree: &Expression) -> String {
        match tree {
            Expression::Atom(atom) => Self::format_atom(atom),
            Expression::Prefix {
                operator: PrefixOperator::Non,
                rhs,
                ..
            } => format!("non {}", Self::format_expression(rhs)),
            Expression::Prefix {
                operator: PrefixOperator::Minus,
                rhs,
                ..
            } => format!("(-{})", Self::format_expression(rhs)),
            Expression::Infix {
                operator, lhs, rhs, ..
            } => Self::format_binary(lhs, operator, rhs),
            Expression::InfixShortCircuit {
                operator, lhs, rhs, ..
            } => Self::format_binary(lhs, operator, rhs),
        }
    }

    fn format_binary(
        lhs: &Expression,
        operator: &dyn std::fmt::Display,
        rhs: &Expression,
    ) -> String {
        format!(
            "({} {} {})",
            Self::format_expression(lhs),
            operator,
            Self::format_expression(rhs)
        )
    }

    fn format_statement(buffer: &mut String, statement: &Statement, depth: usize) {
        let indent = " ".repeat(depth * NESTING_WIDTH);
        match statement {
            Statement::Import(stmt) => {
                writeln!(buffer, "{indent}IMPORT {}", stmt.module).expect(WRITE_FMT_MSG);
            }
            Statement::Assign(stmt) => {
                writeln!(
                    buffer,
                    "{indent}ASSIGN {} = {}",
                    stmt.target,
                    Self::format_expression(&stmt.value)
                )
                .expect(WRITE_FMT_MSG);
            }
            Statement::Print(stmt) => {
                writeln!(
                    buffer,
                    "{indent}CALL {PRINT_IDENTIFIER}({})",
                    Self::format_expression(&stmt.argument)
                )
                .expect(WRITE_FMT_MSG);
            }
            Statement::If(stmt) => {
                for (index, branch) in stmt.branches.iter().enumerate() {
                    match (index, &branch.condition) {
                        (0, Some(condition)) => writeln!(
                            buffer,
                            "{indent}SI {}:",
                            Self::format_expression(condition)
                        ),
                        (_, Some(condition)) => writeln!(
                            buffer,
                            "{indent}ALIOSI {}:",
                            Self::format_expression(condition)
                        ),
                        (_, None) => writeln!(buffer, "{indent}ALIO:"),
                    }
                    .expect(WRITE_FMT_MSG);
                    for inner in &branch.body {
                        Self::format_statement(buffer, inner, depth + 1);
                    }
                }
            }
        }
    }
}

impl ExpressionFormatter for StructuralFormatter {
    fn format(&self, tree: &Expression) -> String {
        Self::format_expression(tree)
    }
}

impl ProgramFormatter for StructuralFormatter {
    fn format(&self, program: &Program) -> String {
        let mut buffer = String::new();
        for statement in program {
            Self::format_statement(&mut buffer, statement, 0);
        }
        buffer
    }

    fn format_error(&self, error: &ParserError) -> String {
        error.to_diagnostic(self.path.as_deref()).to_string()
    }
}
