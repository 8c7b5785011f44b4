//! Compile a token stream given as JSON

use serde::Deserialize;
use tracing::debug;

use super::{CliError, json_to_value};
use crate::{Bindings, Compiler, CompilerOptions, RawToken, lexer::classify};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// JSON request (see [`CompileRequest`])
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't render SQL
    pub syntax_only: bool,
    pub compiler: CompilerOptions,
}

/// Input document of the compile command.
///
/// ```json
/// {
///   "tokens": [["variable", "$user"], ["object_operator", "->"], ["identifier", "getAge"],
///              "(", ")", ">", ["int_literal", "27"]],
///   "params": ["user"],
///   "variables": {"userName": "John"}
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CompileRequest {
    pub tokens: Vec<RawToken>,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub variables: serde_json::Map<String, serde_json::Value>,
}

/// Result of a compile operation
#[derive(Debug)]
pub enum CompileOutcome {
    /// Syntax validation passed
    SyntaxValid,
    /// SQL fragment and bindings as JSON
    Success(String),
}

/// Execute a compile operation
pub fn execute_compile(options: &CompileOptions) -> Result<CompileOutcome, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let request: CompileRequest = serde_json::from_str(json_str)?;
    debug!(tokens = request.tokens.len(), "read compile request");

    let mut variables = Bindings::new();
    for (name, value) in request.variables {
        let value = json_to_value(value).ok_or_else(|| CliError::UnsupportedValue(name.clone()))?;
        variables.insert(name, value);
    }
    let tokens = request.tokens.into_iter().map(classify).collect();

    let compiler = Compiler::new().with_options(options.compiler.clone());
    if options.syntax_only {
        compiler.parse(tokens, request.params, variables)?;
        return Ok(CompileOutcome::SyntaxValid);
    }

    let compiled = compiler.compile(tokens, request.params, variables)?;
    let output = if options.pretty {
        crate::output::to_json_pretty(&compiled.sql, compiled.variables())
    } else {
        crate::output::to_json(&compiled.sql, compiled.variables())
    };
    Ok(CompileOutcome::Success(output))
}
