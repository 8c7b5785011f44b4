use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{
        Combinator, ComparisonExpression, ComparisonOp, Condition, ConditionalExpression,
        ConditionalPrimary, FieldAccess, FunctionCall, Literal, ParamExpression, SimpleExpression,
        Token, TokenKind,
    },
    functions::{FunctionRegistry, builtin_registry},
    lexer::Lexer,
    result::{Bindings, CompilationResult},
};

/// Default bound on how deeply groups may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

static SYNTHETIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^auto_var_\d+$").expect("static pattern is valid"));

/// Errors raised while parsing a token stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lookahead does not fit the grammar at this point
    #[error("Expected {expected}, got {}", describe_found(.found))]
    Expected {
        expected: String,
        found: Option<String>,
    },

    /// Call syntax on a name that is not in the function registry
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    /// A registered function rejected its arguments
    #[error("Invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },

    #[error("Expression nests deeper than {limit} groups")]
    NestingTooDeep { limit: usize },

    /// A captured variable uses a name reserved for synthetic bindings
    #[error("Variable name '{0}' is reserved for generated bindings")]
    ReservedVariable(String),
}

/// Recursive-descent parser for predicate return-expressions.
///
/// Every decision point looks ahead a bounded number of tokens; the parser
/// never backtracks.
pub struct Parser<'r> {
    lexer: Lexer,
    registry: &'r FunctionRegistry,
    max_depth: usize,
    depth: usize,
}

impl Parser<'static> {
    /// Parser using the built-in function registry.
    pub fn new(lexer: Lexer) -> Self {
        Parser::with_registry(lexer, builtin_registry())
    }
}

impl<'r> Parser<'r> {
    pub fn with_registry(lexer: Lexer, registry: &'r FunctionRegistry) -> Self {
        Parser {
            lexer,
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Parses the whole stream as one conditional expression.
    ///
    /// Only an optional `;` may follow the expression. The captured
    /// variables are packaged unchanged.
    pub fn parse(
        &mut self,
        param_names: Vec<String>,
        variables: Bindings,
    ) -> Result<CompilationResult, ParseError> {
        if let Some(name) = variables.keys().find(|name| SYNTHETIC_NAME.is_match(name)) {
            return Err(ParseError::ReservedVariable(name.to_string()));
        }
        debug!(
            tokens = self.lexer.len(),
            params = param_names.len(),
            captured = variables.len(),
            "parsing predicate expression"
        );

        self.lexer.reset();
        self.depth = 0;
        self.lexer.advance();
        let expression = self.parse_conditional_expression(false)?;

        if self.lexer.is_next_token(&TokenKind::Semicolon) {
            self.lexer.advance();
        }
        if self.lexer.lookahead().is_some() {
            return Err(self.syntax_error("end of input"));
        }

        Ok(CompilationResult::new(expression, param_names, variables))
    }

    /// `Primary (BoolOp Primary)*`
    ///
    /// The first combinator found fixes the chain's combinator; the chain
    /// ends at the first token that is not that same combinator.
    pub fn parse_conditional_expression(&mut self, negated: bool) -> Result<Condition, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let condition = self.parse_chain(negated);
        self.depth -= 1;
        condition
    }

    fn parse_chain(&mut self, negated: bool) -> Result<Condition, ParseError> {
        let first = self.parse_conditional_primary()?;

        let combinator = if self.lexer.is_next_token(&TokenKind::BooleanAnd) {
            Some(Combinator::And)
        } else if self.lexer.is_next_token(&TokenKind::BooleanOr) {
            Some(Combinator::Or)
        } else if negated {
            None
        } else {
            return Ok(Condition::Primary(first));
        };

        let mut primaries = vec![first];
        if let Some(combinator) = combinator {
            let kind = combinator.token_kind();
            while self.lexer.is_next_token(&kind) {
                self.expect(&kind)?;
                primaries.push(self.parse_conditional_primary()?);
            }
        }

        Ok(Condition::Chain(ConditionalExpression {
            primaries,
            combinator,
            negated,
        }))
    }

    /// `SimpleExpr | ['!'] '(' ConditionalExpr ')'`
    pub fn parse_conditional_primary(&mut self) -> Result<ConditionalPrimary, ParseError> {
        if self.is_simple_conditional_expression(true) {
            return Ok(ConditionalPrimary::Simple(
                self.parse_simple_conditional_expression()?,
            ));
        }

        let mut negated = false;
        if self.lexer.is_next_token(&TokenKind::Not) {
            self.expect(&TokenKind::Not)?;
            negated = true;
        }
        self.expect(&TokenKind::OpenParenthesis)?;
        let group = self.parse_conditional_expression(negated)?;
        self.expect(&TokenKind::CloseParenthesis)?;

        Ok(ConditionalPrimary::Grouped {
            negated,
            group: Box::new(group),
        })
    }

    pub fn parse_simple_conditional_expression(&mut self) -> Result<SimpleExpression, ParseError> {
        if self.is_function(true) {
            let mut negated = false;
            if self.lexer.is_next_token(&TokenKind::Not) {
                self.expect(&TokenKind::Not)?;
                negated = true;
            }
            return Ok(SimpleExpression::Function(self.parse_function(negated)?));
        }
        if let Some(name) = self.unregistered_call_ahead() {
            return Err(ParseError::UnknownFunction(name));
        }

        Ok(SimpleExpression::Comparison(
            self.parse_comparison_expression()?,
        ))
    }

    /// `ParamExpr CompOp ParamExpr`
    pub fn parse_comparison_expression(&mut self) -> Result<ComparisonExpression, ParseError> {
        let left = self.parse_param_expression()?;
        let operator = self.parse_comparison_operator()?;
        let right = self.parse_param_expression()?;

        Ok(ComparisonExpression {
            left,
            operator,
            right,
        })
    }

    /// `FieldAccess | Variable | ArrayLiteral | Literal`
    pub fn parse_param_expression(&mut self) -> Result<ParamExpression, ParseError> {
        if self.lexer.is_next_token(&TokenKind::Variable) {
            return if self.lexer.glimpse_kind() == Some(TokenKind::ObjectOperator) {
                Ok(ParamExpression::Field(self.parse_field_access()?))
            } else {
                Ok(ParamExpression::Variable(self.parse_variable()?))
            };
        }
        if self.is_array() {
            return Ok(ParamExpression::Array(self.parse_array()?));
        }
        if let Some(name) = self.unregistered_call_ahead() {
            return Err(ParseError::UnknownFunction(name));
        }

        Ok(ParamExpression::Literal(self.parse_literal()?))
    }

    /// `VARIABLE ACCESSOR IDENTIFIER ['(' ')']`
    pub fn parse_field_access(&mut self) -> Result<FieldAccess, ParseError> {
        let variable = self.expect(&TokenKind::Variable)?;
        self.expect(&TokenKind::ObjectOperator)?;
        let field = self.expect(&TokenKind::Identifier)?;

        let mut is_method_call = false;
        if self.lexer.is_next_token(&TokenKind::OpenParenthesis) {
            self.expect(&TokenKind::OpenParenthesis)?;
            self.expect(&TokenKind::CloseParenthesis)?;
            is_method_call = true;
        }

        Ok(FieldAccess::new(
            strip_sigil(&variable.text),
            field.text,
            is_method_call,
        ))
    }

    pub fn parse_variable(&mut self) -> Result<String, ParseError> {
        let variable = self.expect(&TokenKind::Variable)?;
        Ok(strip_sigil(&variable.text).to_string())
    }

    pub fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let Some(token) = self.lexer.lookahead() else {
            return Err(self.syntax_error("literal"));
        };

        let literal = match (&token.kind, token.text.as_str()) {
            (TokenKind::StringLiteral, text) => Literal::string(unquote(text)),
            (TokenKind::IntLiteral | TokenKind::FloatLiteral, text) => match parse_number(text) {
                Some(n) => Literal::numeric(n),
                None => return Err(self.syntax_error("numeric literal")),
            },
            (TokenKind::Identifier, "true") => Literal::boolean(true),
            (TokenKind::Identifier, "false") => Literal::boolean(false),
            (TokenKind::Identifier, "null") => Literal::null(),
            _ => return Err(self.syntax_error("literal")),
        };

        self.lexer.advance();
        Ok(literal)
    }

    pub fn parse_comparison_operator(&mut self) -> Result<ComparisonOp, ParseError> {
        let operator = self
            .lexer
            .lookahead()
            .and_then(|t| ComparisonOp::from_token_kind(&t.kind));

        match operator {
            Some(op) => {
                self.lexer.advance();
                Ok(op)
            }
            None => Err(self.syntax_error("==, ===, <, <=, >, >=, !=, !==")),
        }
    }

    /// Parses a call of the function named by the lookahead.
    ///
    /// The function itself consumes everything from the opening parenthesis on.
    pub fn parse_function(&mut self, negated: bool) -> Result<FunctionCall, ParseError> {
        let name = match self.lexer.lookahead() {
            Some(token) => token.text.clone(),
            None => return Err(self.syntax_error("function name")),
        };
        let registry = self.registry;
        let function = registry
            .get(&name)
            .ok_or_else(|| ParseError::UnknownFunction(name.clone()))?;
        trace!(function = %name, negated, "parsing function call");

        self.lexer.advance();
        let args = function.parse_arguments(self)?;

        Ok(FunctionCall {
            name,
            negated,
            args,
        })
    }

    /// `'[' LiteralList ']' | "array" '(' LiteralList ')'`
    ///
    /// Separating commas are optional and a trailing one is tolerated.
    pub fn parse_array(&mut self) -> Result<Vec<Literal>, ParseError> {
        let closing = if self.lexer.is_next_token(&TokenKind::OpenBracket) {
            self.expect(&TokenKind::OpenBracket)?;
            TokenKind::CloseBracket
        } else {
            self.expect(&TokenKind::Identifier)?;
            self.expect(&TokenKind::OpenParenthesis)?;
            TokenKind::CloseParenthesis
        };

        let mut literals = vec![];
        while !self.lexer.is_next_token(&closing) {
            literals.push(self.parse_literal()?);
            if self.lexer.is_next_token(&TokenKind::Comma) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&closing)?;

        Ok(literals)
    }

    /// A primary is simple unless it opens a group, possibly after a `!`.
    pub fn is_simple_conditional_expression(&mut self, possibly_with_not: bool) -> bool {
        let lookahead = self.lexer.lookahead().map(|t| t.kind.clone());
        let next = self.lexer.glimpse_kind();

        if possibly_with_not && lookahead == Some(TokenKind::Not) {
            return next != Some(TokenKind::OpenParenthesis);
        }
        lookahead != Some(TokenKind::OpenParenthesis)
    }

    /// Registered name followed by `(`, possibly after a `!`.
    pub fn is_function(&mut self, possibly_with_not: bool) -> bool {
        let lookahead = self.lexer.lookahead().cloned();
        let next = self.lexer.peek().cloned();
        let after_next = self.lexer.peek().map(|t| t.kind.clone());
        self.lexer.reset_peek();

        let (name, paren) = match lookahead {
            Some(t) if possibly_with_not && t.kind == TokenKind::Not => {
                (next.map(|t| t.text), after_next)
            }
            Some(t) => (Some(t.text), next.map(|t| t.kind)),
            None => return false,
        };

        name.is_some_and(|name| self.registry.contains(&name))
            && paren == Some(TokenKind::OpenParenthesis)
    }

    pub fn is_array(&mut self) -> bool {
        let Some(lookahead) = self.lexer.lookahead().cloned() else {
            return false;
        };
        let next = self.lexer.glimpse_kind();

        lookahead.kind == TokenKind::OpenBracket
            || (lookahead.kind == TokenKind::Identifier
                && lookahead.text == "array"
                && next == Some(TokenKind::OpenParenthesis))
    }

    /// Name of an unregistered identifier used with call syntax, if any.
    fn unregistered_call_ahead(&mut self) -> Option<String> {
        let lookahead = self.lexer.lookahead().cloned();
        let (name, paren) = if lookahead.as_ref().is_some_and(|t| t.kind == TokenKind::Not) {
            let name = self.lexer.peek().cloned();
            (name, self.lexer.peek().map(|t| t.kind.clone()))
        } else {
            (lookahead, self.lexer.peek().map(|t| t.kind.clone()))
        };
        self.lexer.reset_peek();

        match name {
            Some(t)
                if t.kind == TokenKind::Identifier
                    && t.text != "array"
                    && paren == Some(TokenKind::OpenParenthesis)
                    && !self.registry.contains(&t.text) =>
            {
                Some(t.text)
            }
            _ => None,
        }
    }

    /// Consumes the lookahead if it has the given kind and returns it.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if !self.lexer.is_next_token(kind) {
            return Err(self.syntax_error(&kind.describe()));
        }
        self.lexer.advance();
        self.lexer
            .token()
            .cloned()
            .ok_or_else(|| self.syntax_error(&kind.describe()))
    }

    pub fn syntax_error(&self, expected: &str) -> ParseError {
        ParseError::Expected {
            expected: expected.to_string(),
            found: self.lexer.lookahead().map(|t| t.text.clone()),
        }
    }
}

fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(text) => format!("'{}'", text),
        None => "end of input".to_string(),
    }
}

fn strip_sigil(text: &str) -> &str {
    text.strip_prefix(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(text)
}

fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => "",
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let digits = text.replace('_', "");
    let radix: Option<u32> = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        Some("0o" | "0O") => Some(8),
        _ => None,
    };
    match radix {
        Some(radix) => {
            let body = &digits[2..];
            if body.is_empty() {
                return None;
            }
            body.chars().try_fold(0.0_f64, |acc, c| {
                Some(acc * f64::from(radix) + f64::from(c.to_digit(radix)?))
            })
        }
        None => digits.parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_sigil() {
        assert_eq!(strip_sigil("$user"), "user");
        assert_eq!(strip_sigil("user"), "user");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'John'"), "John");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("'"), "");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("27"), Some(27.0));
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert_eq!(parse_number("1_000"), Some(1000.0));
        assert_eq!(parse_number("0x1A"), Some(26.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("0xG1"), None);
    }

    #[test]
    fn test_parse_number_beyond_i64() {
        assert_eq!(parse_number("0xFFFFFFFFFFFFFFFF"), Some(18_446_744_073_709_551_616.0));
        assert_eq!(
            parse_number("0b1_0000000000000000000000000000000000000000000000000000000000000000"),
            Some(18_446_744_073_709_551_616.0)
        );
        assert_eq!(parse_number("18446744073709551616"), Some(18_446_744_073_709_551_616.0));
        assert_eq!(parse_number("abc"), None);
    }
}
