use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a token in the return-expression stream.
///
/// The first group is classified by the lexer itself from single-character
/// raw tokens. The second group is supplied by whatever extracted the
/// expression and is passed through unchanged. Kinds the compiler has no
/// use for survive as [`TokenKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenKind {
    // Classified from single characters
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `(`
    OpenParenthesis,
    /// `)`
    CloseParenthesis,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `!`
    Not,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// Single-character token with no fixed meaning
    Undefined,

    // Externally supplied
    /// Sigil-prefixed variable
    ///
    /// # Examples
    /// ```text
    /// $user
    /// $userName
    /// ```
    Variable,

    /// Object/field accessor between a variable and an identifier
    ///
    /// # Examples
    /// ```text
    /// $user->name
    /// ```
    ObjectOperator,

    /// Bare name: field, function, `array`, `true`, `false`, `null`
    Identifier,

    /// Quoted string, quotes included in the token text
    StringLiteral,

    /// Integer literal
    IntLiteral,

    /// Floating-point literal
    FloatLiteral,

    /// `&&`
    BooleanAnd,
    /// `||`
    BooleanOr,
    /// `==`
    IsEqual,
    /// `===`
    IsIdentical,
    /// `!=`
    IsNotEqual,
    /// `!==`
    IsNotIdentical,
    /// `<=`
    IsSmallerOrEqual,
    /// `>=`
    IsGreaterOrEqual,

    /// Any other externally supplied kind, kept by name
    Other(String),
}

impl TokenKind {
    /// Stable snake_case name, also used as the wire name.
    pub fn name(&self) -> &str {
        match self {
            TokenKind::Semicolon => "semicolon",
            TokenKind::Comma => "comma",
            TokenKind::OpenParenthesis => "open_parenthesis",
            TokenKind::CloseParenthesis => "close_parenthesis",
            TokenKind::OpenBracket => "open_bracket",
            TokenKind::CloseBracket => "close_bracket",
            TokenKind::Not => "not",
            TokenKind::LessThan => "less_than",
            TokenKind::GreaterThan => "greater_than",
            TokenKind::Undefined => "undefined",
            TokenKind::Variable => "variable",
            TokenKind::ObjectOperator => "object_operator",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string_literal",
            TokenKind::IntLiteral => "int_literal",
            TokenKind::FloatLiteral => "float_literal",
            TokenKind::BooleanAnd => "boolean_and",
            TokenKind::BooleanOr => "boolean_or",
            TokenKind::IsEqual => "is_equal",
            TokenKind::IsIdentical => "is_identical",
            TokenKind::IsNotEqual => "is_not_equal",
            TokenKind::IsNotIdentical => "is_not_identical",
            TokenKind::IsSmallerOrEqual => "is_smaller_or_equal",
            TokenKind::IsGreaterOrEqual => "is_greater_or_equal",
            TokenKind::Other(name) => name,
        }
    }

    /// Human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::OpenParenthesis => "'('".to_string(),
            TokenKind::CloseParenthesis => "')'".to_string(),
            TokenKind::OpenBracket => "'['".to_string(),
            TokenKind::CloseBracket => "']'".to_string(),
            TokenKind::Not => "'!'".to_string(),
            TokenKind::LessThan => "'<'".to_string(),
            TokenKind::GreaterThan => "'>'".to_string(),
            TokenKind::ObjectOperator => "field accessor".to_string(),
            TokenKind::IntLiteral => "integer literal".to_string(),
            TokenKind::Other(name) => name.clone(),
            other => other.name().replace('_', " "),
        }
    }
}

impl FromStr for TokenKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "semicolon" => TokenKind::Semicolon,
            "comma" => TokenKind::Comma,
            "open_parenthesis" => TokenKind::OpenParenthesis,
            "close_parenthesis" => TokenKind::CloseParenthesis,
            "open_bracket" => TokenKind::OpenBracket,
            "close_bracket" => TokenKind::CloseBracket,
            "not" => TokenKind::Not,
            "less_than" => TokenKind::LessThan,
            "greater_than" => TokenKind::GreaterThan,
            "undefined" => TokenKind::Undefined,
            "variable" => TokenKind::Variable,
            "object_operator" => TokenKind::ObjectOperator,
            "identifier" => TokenKind::Identifier,
            "string_literal" => TokenKind::StringLiteral,
            "int_literal" => TokenKind::IntLiteral,
            "float_literal" => TokenKind::FloatLiteral,
            "boolean_and" => TokenKind::BooleanAnd,
            "boolean_or" => TokenKind::BooleanOr,
            "is_equal" => TokenKind::IsEqual,
            "is_identical" => TokenKind::IsIdentical,
            "is_not_equal" => TokenKind::IsNotEqual,
            "is_not_identical" => TokenKind::IsNotIdentical,
            "is_smaller_or_equal" => TokenKind::IsSmallerOrEqual,
            "is_greater_or_equal" => TokenKind::IsGreaterOrEqual,
            other => TokenKind::Other(other.to_string()),
        })
    }
}

impl From<String> for TokenKind {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<TokenKind> for String {
    fn from(kind: TokenKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified token: its kind plus the exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Token as delivered by the extractor, before classification.
///
/// On the wire a raw token is either a bare string (`"("`) or a
/// `[kind, text]` pair (`["variable", "$user"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawToken {
    /// Single character, classified by the lexer
    Char(String),
    /// Already-typed token, passed through
    Typed(TokenKind, String),
}
