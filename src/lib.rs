pub mod ast;
pub mod cli;
pub mod compiler;
pub mod dumper;
pub mod functions;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod result;
pub mod value;

pub use ast::{Condition, RawToken, Token, TokenKind};
pub use compiler::{CompileError, CompiledPredicate, Compiler, CompilerOptions, compile};
pub use dumper::{DumpError, SqlDumper};
pub use functions::{FunctionRegistry, SqlFunction};
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use result::{Bindings, CompilationResult};
pub use value::Value;
