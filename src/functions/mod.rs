//! Function registry
//!
//! Each function owns both halves of its behaviour: the grammar of its
//! argument list and its SQL rendering. Adding a function means adding a
//! module with a `register` hook; the parser and dumper dispatch by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::ast::{FunctionCall, ParamExpression};
use crate::dumper::{DumpError, SqlDumper};
use crate::parser::{ParseError, Parser};
use crate::result::Bindings;

mod in_array;

pub use in_array::InArray;

/// A function usable in call position of a predicate expression.
pub trait SqlFunction: Send + Sync {
    /// Identifier the function is called by
    fn name(&self) -> &'static str;

    /// Parses the argument list, starting at the opening parenthesis.
    fn parse_arguments(&self, parser: &mut Parser<'_>) -> Result<Vec<ParamExpression>, ParseError>;

    /// Renders a parsed call, adding any bindings it allocates.
    fn dump(
        &self,
        call: &FunctionCall,
        dumper: &mut SqlDumper<'_>,
        variables: &mut Bindings,
    ) -> Result<String, DumpError>;
}

/// Functions by name.
pub struct FunctionRegistry {
    functions: HashMap<String, Box<dyn SqlFunction>>,
}

impl FunctionRegistry {
    /// A registry without any functions.
    pub fn empty() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    /// A registry with all built-in functions.
    pub fn builtin() -> Self {
        let mut registry = FunctionRegistry::empty();
        in_array::register(&mut registry);
        registry
    }

    /// Registers a function, replacing any previous one with the same name.
    pub fn register(&mut self, function: Box<dyn SqlFunction>) {
        self.functions.insert(function.name().to_string(), function);
    }

    pub fn get(&self, name: &str) -> Option<&dyn SqlFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        FunctionRegistry::builtin()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

static BUILTIN: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::builtin);

/// Shared registry of the built-in functions.
pub fn builtin_registry() -> &'static FunctionRegistry {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_in_array() {
        let registry = builtin_registry();
        assert!(registry.contains("in_array"));
        assert_eq!(registry.names(), vec!["in_array"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = FunctionRegistry::empty();
        assert!(registry.get("in_array").is_none());
        assert!(registry.names().is_empty());
    }
}
