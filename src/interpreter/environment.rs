use compact_str::CompactString;
use std::collections::HashMap;

use super::{error::RuntimeErrorKind, value::Value};

/// Upper bound on distinct variable names in one run.
pub const MAX_VARIABLES: usize = 1000;

/// Single flat scope of name/value bindings.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<CompactString, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the bound value.
    pub fn access(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Creates the binding if absent, otherwise overwrites it.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeErrorKind> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if self.values.len() >= MAX_VARIABLES {
            return Err(RuntimeErrorKind::TooManyVariables);
        }
        self.values.insert(name.into(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
