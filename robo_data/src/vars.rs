//! Variable store shared by the parser and the interpreter.
//!
//! One `Variables` value belongs to one program instance. The parser declares
//! every assigned name in it (so later references can be checked), and the
//! interpreter reads and overwrites values in it on every run. Nothing resets it
//! implicitly; a new instance starts from [`Variables::new`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{VAR_SIGIL, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    values: HashMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a name, leaving an existing value untouched.
    ///
    /// Returns true if the name was not declared before.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        self.values.insert(name.to_string(), 0);
        true
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Overwrite (or create) the value bound to `name`.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            },
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name/value pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        let mut pairs: Vec<_> = self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs.into_iter()
    }

    /// Forget every name. Never called by the parser or interpreter.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// True if `name` is a sigil followed by a letter and then letters or digits.
pub fn is_valid_var_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(VAR_SIGIL) else {
        return false;
    };
    let mut chars = rest.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}
