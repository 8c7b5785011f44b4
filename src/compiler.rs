//! One-call compilation: tokens in, SQL fragment and bindings out.

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::Token,
    dumper::{DumpError, SqlDumper},
    functions::{FunctionRegistry, builtin_registry},
    lexer::Lexer,
    parser::{DEFAULT_MAX_DEPTH, ParseError, Parser},
    result::{Bindings, CompilationResult},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("Dump error: {0}")]
    Dump(#[from] DumpError),
}

/// Tunables for a [`Compiler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Deepest allowed nesting of parenthesized groups
    pub max_depth: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A rendered condition together with everything needed to bind it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    pub sql: String,
    pub result: CompilationResult,
}

impl CompiledPredicate {
    /// Values for every placeholder in [`CompiledPredicate::sql`].
    pub fn variables(&self) -> &Bindings {
        &self.result.variables
    }
}

/// Parses and dumps in one go, sharing one function registry.
#[derive(Debug, Clone)]
pub struct Compiler<'r> {
    registry: &'r FunctionRegistry,
    options: CompilerOptions,
}

impl Compiler<'static> {
    pub fn new() -> Self {
        Compiler::with_registry(builtin_registry())
    }
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Compiler::new()
    }
}

impl<'r> Compiler<'r> {
    pub fn with_registry(registry: &'r FunctionRegistry) -> Self {
        Compiler {
            registry,
            options: CompilerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn parse(
        &self,
        tokens: Vec<Token>,
        param_names: Vec<String>,
        variables: Bindings,
    ) -> Result<CompilationResult, ParseError> {
        Parser::with_registry(Lexer::new(tokens), self.registry)
            .with_max_depth(self.options.max_depth)
            .parse(param_names, variables)
    }

    pub fn compile(
        &self,
        tokens: Vec<Token>,
        param_names: Vec<String>,
        variables: Bindings,
    ) -> Result<CompiledPredicate, CompileError> {
        let mut result = self.parse(tokens, param_names, variables)?;
        let sql = SqlDumper::with_registry(self.registry).dump(&mut result)?;
        debug!(sql = %sql, "compiled predicate");

        Ok(CompiledPredicate { sql, result })
    }
}

/// Compiles with the built-in functions and default options.
pub fn compile(
    tokens: Vec<Token>,
    param_names: Vec<String>,
    variables: Bindings,
) -> Result<CompiledPredicate, CompileError> {
    Compiler::new().compile(tokens, param_names, variables)
}
