use core::fmt;
use std::cell::RefCell;
use std::fmt::Display;

use hashbrown::HashMap;

use super::Value;
use crate::error::{Error, Result};

/// Variable bindings of a script session
#[derive(Debug, Default)]
pub struct Environment {
    values: RefCell<HashMap<String, Value>>,
}

impl Environment {
    pub fn get(&self, name: &str) -> Result<Value> {
        self.values
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::VariableNotFound(name.to_string()))
    }

    pub fn insert(&self, name: String, value: Value) {
        self.values.borrow_mut().insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all bound variables, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<environment [{}]>", self.names().join(", "))
    }
}
