//! # Predicate expression AST
//!
//! The data model shared by the lexer, the parser and the SQL dumper.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Token kinds and the tokens handed to the lexer
//! - **[operators]** - Boolean combinators and comparison operators
//! - **[expressions]** - Condition, comparison, parameter and function-call nodes
//!
//! ## Grammar
//!
//! ```text
//! ConditionalExpr := Primary (BoolOp Primary)*
//! Primary         := SimpleExpr | ['!'] '(' ConditionalExpr ')'
//! SimpleExpr      := FunctionCall | ComparisonExpr
//! ComparisonExpr  := ParamExpr CompOp ParamExpr
//! ParamExpr       := FieldAccess | Variable | ArrayLiteral | Literal
//! FieldAccess     := VARIABLE ACCESSOR IDENTIFIER ['(' ')']
//! ArrayLiteral    := '[' LiteralList ']' | "array" '(' LiteralList ')'
//! ```
//!
//! A chain joins its primaries with a single combinator. Mixing `AND` and `OR`
//! on one level needs explicit parentheses:
//!
//! ```text
//! $user->name == 'John' && ($user->age > 27 || $user->admin == true)
//! ```
//!
//! ## Example
//!
//! ```text
//! in_array($user->getLevel(), [4, 5])   =>   user.level IN (:auto_var_0, :auto_var_1)
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{
    ComparisonExpression, Condition, ConditionalExpression, ConditionalPrimary, FieldAccess,
    FunctionCall, Literal, LiteralKind, ParamExpression, SimpleExpression,
};
pub use operators::{Combinator, ComparisonOp};
pub use tokens::{RawToken, Token, TokenKind};
