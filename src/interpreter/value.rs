use compact_str::{CompactString, CompactStringExt};

use super::error::RuntimeErrorKind;

/// A runtime value. Strings are owned, so every copy is independent.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    String(CompactString),
    Bool(bool),
    Null,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::Bool(true) => write!(f, "verum"),
            Self::Bool(false) => write!(f, "falsum"),
            Self::Null => write!(f, "nulla"),
        }
    }
}

impl Value {
    /// Kind name used in type errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "nulla",
        }
    }

    fn expect_integers(
        &self,
        other: &Value,
        operator: &'static str,
    ) -> Result<(i32, i32), RuntimeErrorKind> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => Ok((*lhs, *rhs)),
            (lhs, rhs) => Err(RuntimeErrorKind::NonIntegers {
                operator,
                lhs: lhs.kind_name(),
                rhs: rhs.kind_name(),
            }),
        }
    }
}

// Unary operators
impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(v) => *v,
            Value::Int(v) => *v != 0,
            Value::String(v) => !v.is_empty(),
        }
    }

    pub fn logical_not(&self) -> Value {
        Value::Bool(!self.is_truthy())
    }

    pub fn numeric_negate(&self) -> Result<Value, RuntimeErrorKind> {
        match self {
            Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
            v => Err(RuntimeErrorKind::NonNegatable(v.kind_name())),
        }
    }
}

impl Value {
    // Arithmetic + string concatenation
    pub fn add(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => Ok(Value::Int(lhs.wrapping_add(*rhs))),
            (Value::String(lhs), Value::String(rhs)) => {
                Ok(Value::String([lhs, rhs].concat_compact()))
            }
            (lhs, rhs) => Err(RuntimeErrorKind::NonAddable(
                lhs.kind_name(),
                rhs.kind_name(),
            )),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.expect_integers(other, "-")?;
        Ok(Value::Int(lhs.wrapping_sub(rhs)))
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.expect_integers(other, "*")?;
        Ok(Value::Int(lhs.wrapping_mul(rhs)))
    }

    pub fn divide(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match self.expect_integers(other, "/")? {
            (_, 0) => Err(RuntimeErrorKind::DivisionByZero),
            (lhs, rhs) => Ok(Value::Int(lhs.wrapping_div(rhs))),
        }
    }

    pub fn modulo(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match self.expect_integers(other, "%")? {
            (_, 0) => Err(RuntimeErrorKind::ModuloByZero),
            (lhs, rhs) => Ok(Value::Int(lhs.wrapping_rem(rhs))),
        }
    }

    // Comparison
    pub fn less_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.expect_integers(other, "<")?;
        Ok(Value::Bool(lhs < rhs))
    }

    pub fn less_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.expect_integers(other, "<=")?;
        Ok(Value::Bool(lhs <= rhs))
    }

    pub fn greater_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.expect_integers(other, ">")?;
        Ok(Value::Bool(lhs > rhs))
    }

    pub fn greater_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.expect_integers(other, ">=")?;
        Ok(Value::Bool(lhs >= rhs))
    }

    // Equality
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            (Value::Null, Value::Null) => true,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    pub fn is_not_equal(&self, other: &Value) -> bool {
        !self.is_equal(other)
    }
}
