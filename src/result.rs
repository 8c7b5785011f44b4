//! Parser output: the expression tree plus the bindings it is rendered against.

use std::collections::HashMap;

use crate::ast::Condition;
use crate::value::Value;

/// Name-to-value table for the placeholders of the generated SQL.
///
/// Keys are unique and keep their insertion order: captured variables
/// first, then the synthetic `auto_var_<n>` entries added while dumping.
/// Entries are never overwritten or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Adds a binding unless the key is already bound.
    ///
    /// Returns `false`, leaving the existing value in place, when it is.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (key, value) in iter {
            bindings.insert(key, value.into());
        }
        bindings
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Everything one parse produces.
///
/// `variables` starts out as the captured free variables. The dumper is the
/// only thing that adds to it afterwards, and it never removes entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationResult {
    pub expression: Condition,
    /// Declared formal parameters, in order
    pub param_names: Vec<String>,
    pub variables: Bindings,
}

impl CompilationResult {
    pub fn new(expression: Condition, param_names: Vec<String>, variables: Bindings) -> Self {
        CompilationResult {
            expression,
            param_names,
            variables,
        }
    }
}
