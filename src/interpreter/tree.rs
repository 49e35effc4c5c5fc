use super::{
    environment::Environment,
    error::{RuntimeError, RuntimeErrorKind},
    value::Value,
    SystemContext,
};
use crate::parser::{
    expression::{
        Expression, ExpressionAtom, ExpressionAtomKind, InfixOperator, InfixShortCircuitOperator,
        PrefixOperator,
    },
    statement::{AssignStatement, IfStatement, PrintStatement, Statement},
    Program,
};

/// Executes a program statement by statement, stopping at the first error.
pub struct TreeWalkInterpreter<C: SystemContext> {
    environment: Environment,
    context: C,
}

impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    pub fn new(context: C) -> Self {
        Self {
            environment: Environment::new(),
            context,
        }
    }

    pub fn run(mut self, program: &Program) -> Result<C, RuntimeError> {
        for stmt in program {
            self.interpret_statement(stmt)?;
        }
        Ok(self.context)
    }

    pub fn interpret_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        log::trace!(
            "executing statement at {}:{}",
            statement.position().line,
            statement.position().column
        );
        match statement {
            Statement::Import(stmt) => {
                log::debug!("import of '{}' is recorded only", stmt.module);
                Ok(())
            }
            Statement::Assign(stmt) => self.interpret_assign_statement(stmt),
            Statement::Print(stmt) => self.interpret_print_statement(stmt),
            Statement::If(stmt) => self.interpret_if_statement(stmt),
        }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Atom(atom) => self.evaluate_atom(atom),
            Expression::Prefix {
                operator,
                rhs,
                position,
            } => {
                let rhs = self.evaluate(rhs)?;
                let result = match operator {
                    PrefixOperator::Non => Ok(rhs.logical_not()),
                    PrefixOperator::Minus => rhs.numeric_negate(),
                };
                result.map_err(|kind| RuntimeError::new(kind, *position))
            }
            Expression::Infix {
                operator,
                lhs,
                rhs,
                position,
            } => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                Self::evaluate_infix(operator, &lhs, &rhs)
                    .map_err(|kind| RuntimeError::new(kind, *position))
            }
            Expression::InfixShortCircuit {
                operator, lhs, rhs, ..
            } => {
                let lhs = self.evaluate(lhs)?.is_truthy();
                let result = match (operator, lhs) {
                    (InfixShortCircuitOperator::Et, false) => false,
                    (InfixShortCircuitOperator::Aut, true) => true,
                    _ => self.evaluate(rhs)?.is_truthy(),
                };
                Ok(Value::Bool(result))
            }
        }
    }
}

// Statement interpreter
impl<C: SystemContext> TreeWalkInterpreter<C> {
    fn interpret_assign_statement(&mut self, stmt: &AssignStatement) -> Result<(), RuntimeError> {
        let value = self.evaluate(&stmt.value)?;
        self.environment
            .assign(&stmt.target, value)
            .map_err(|kind| RuntimeError::new(kind, stmt.position))
    }

    fn interpret_print_statement(&mut self, stmt: &PrintStatement) -> Result<(), RuntimeError> {
        let value = self.evaluate(&stmt.argument)?;
        self.context.writeln(&value.to_string());
        Ok(())
    }

    fn interpret_if_statement(&mut self, stmt: &IfStatement) -> Result<(), RuntimeError> {
        for branch in &stmt.branches {
            let taken = match branch.condition {
                Some(ref condition) => self.evaluate(condition)?.is_truthy(),
                None => true,
            };
            if taken {
                for inner in &branch.body {
                    self.interpret_statement(inner)?;
                }
                break;
            }
        }
        Ok(())
    }
}

// Expression evaluator
impl<C: SystemContext> TreeWalkInterpreter<C> {
    fn evaluate_atom(&self, atom: &ExpressionAtom) -> Result<Value, RuntimeError> {
        let value = match atom.kind {
            ExpressionAtomKind::Integer(v) => Value::Int(v),
            ExpressionAtomKind::Bool(v) => Value::Bool(v),
            ExpressionAtomKind::Null => Value::Null,
            ExpressionAtomKind::StringLiteral(ref v) => Value::String(v.clone()),
            ExpressionAtomKind::Identifier(ref name) => {
                self.environment.access(name).ok_or_else(|| {
                    RuntimeError::new(
                        RuntimeErrorKind::UndefinedVariable(name.clone()),
                        atom.position,
                    )
                })?
            }
        };
        Ok(value)
    }

    fn evaluate_infix(
        operator: &InfixOperator,
        lhs: &Value,
        rhs: &Value,
    ) -> Result<Value, RuntimeErrorKind> {
        match operator {
            InfixOperator::Add => lhs.add(rhs),
            InfixOperator::Subtract => lhs.subtract(rhs),
            InfixOperator::Multiply => lhs.multiply(rhs),
            InfixOperator::Divide => lhs.divide(rhs),
            InfixOperator::Modulo => lhs.modulo(rhs),
            InfixOperator::LessThan => lhs.less_than(rhs),
            InfixOperator::LessThanEqual => lhs.less_than_or_equal(rhs),
            InfixOperator::GreaterThan => lhs.greater_than(rhs),
            InfixOperator::GreaterThanEqual => lhs.greater_than_or_equal(rhs),
            InfixOperator::EqualEqual => Ok(Value::Bool(lhs.is_equal(rhs))),
            InfixOperator::BangEqual => Ok(Value::Bool(lhs.is_not_equal(rhs))),
        }
    }
}
