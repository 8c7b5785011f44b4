// tests/common/mod.rs
//
// Builds token streams from whitespace-separated words:
//
//     $user -> getName ( ) == 'John' && 27 < $user -> getAge ( )
//
// String literals must not contain spaces.

#![allow(dead_code)]

use predicate_sql::lexer::classify;
use predicate_sql::{Bindings, CompileError, RawToken, Token, TokenKind, Value, compile};

pub fn tokens(src: &str) -> Vec<Token> {
    src.split_whitespace().map(token).collect()
}

fn token(word: &str) -> Token {
    let kind = match word {
        "->" => TokenKind::ObjectOperator,
        "&&" => TokenKind::BooleanAnd,
        "||" => TokenKind::BooleanOr,
        "==" => TokenKind::IsEqual,
        "===" => TokenKind::IsIdentical,
        "!=" => TokenKind::IsNotEqual,
        "!==" => TokenKind::IsNotIdentical,
        "<=" => TokenKind::IsSmallerOrEqual,
        ">=" => TokenKind::IsGreaterOrEqual,
        w if w.starts_with('$') => TokenKind::Variable,
        w if w.starts_with('\'') || w.starts_with('"') => TokenKind::StringLiteral,
        w if w.starts_with(|c: char| c.is_ascii_digit()) => {
            if w.contains('.') {
                TokenKind::FloatLiteral
            } else {
                TokenKind::IntLiteral
            }
        }
        w if w.starts_with(|c: char| c.is_alphabetic() || c == '_') => TokenKind::Identifier,
        _ => return classify(RawToken::Char(word.to_string())),
    };
    Token::new(kind, word)
}

pub fn params() -> Vec<String> {
    vec!["user".to_string()]
}

pub fn bindings(pairs: Vec<(&str, Value)>) -> Bindings {
    pairs.into_iter().collect()
}

/// Compiles with no captured variables.
pub fn sql(src: &str) -> String {
    compile_with(src, Bindings::new())
        .unwrap_or_else(|e| panic!("failed to compile {:?}: {}", src, e))
        .0
}

pub fn compile_with(src: &str, variables: Bindings) -> Result<(String, Bindings), CompileError> {
    let compiled = compile(tokens(src), params(), variables)?;
    let variables = compiled.variables().clone();
    Ok((compiled.sql, variables))
}
