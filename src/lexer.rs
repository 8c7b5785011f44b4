use crate::ast::{RawToken, Token, TokenKind};

/// Cursor over the tokens of one return-expression.
///
/// The main cursor moves with [`Lexer::advance`] and exposes one token of
/// lookahead. A second peek cursor looks further ahead without consuming
/// anything; it restarts from the lookahead on every advance and on
/// [`Lexer::reset_peek`]. End of input is an absent lookahead.
#[derive(Debug, Clone)]
pub struct Lexer {
    tokens: Vec<Token>,
    position: usize,
    peek: usize,
    lookahead: Option<usize>,
    token: Option<usize>,
}

/// Classifies a raw token. Typed tokens pass through untouched.
pub fn classify(raw: RawToken) -> Token {
    match raw {
        RawToken::Typed(kind, text) => Token::new(kind, text),
        RawToken::Char(text) => {
            let kind = match text.as_str() {
                ";" => TokenKind::Semicolon,
                "," => TokenKind::Comma,
                "(" => TokenKind::OpenParenthesis,
                ")" => TokenKind::CloseParenthesis,
                "[" => TokenKind::OpenBracket,
                "]" => TokenKind::CloseBracket,
                "!" => TokenKind::Not,
                "<" => TokenKind::LessThan,
                ">" => TokenKind::GreaterThan,
                _ => TokenKind::Undefined,
            };
            Token::new(kind, text)
        }
    }
}

impl Lexer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Lexer {
            tokens,
            position: 0,
            peek: 0,
            lookahead: None,
            token: None,
        }
    }

    pub fn from_raw(raw: impl IntoIterator<Item = RawToken>) -> Self {
        Lexer::new(raw.into_iter().map(classify).collect())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Rewinds both cursors to before the first token.
    pub fn reset(&mut self) {
        self.lookahead = None;
        self.token = None;
        self.peek = 0;
        self.position = 0;
    }

    pub fn reset_peek(&mut self) {
        self.peek = 0;
    }

    /// The next token to be consumed.
    pub fn lookahead(&self) -> Option<&Token> {
        self.lookahead.map(|i| &self.tokens[i])
    }

    /// The token consumed by the last advance.
    pub fn token(&self) -> Option<&Token> {
        self.token.map(|i| &self.tokens[i])
    }

    pub fn is_next_token(&self, kind: &TokenKind) -> bool {
        self.lookahead().is_some_and(|t| t.kind == *kind)
    }

    pub fn is_next_token_any(&self, kinds: &[TokenKind]) -> bool {
        self.lookahead().is_some_and(|t| kinds.contains(&t.kind))
    }

    /// Consumes the lookahead. Returns whether a new lookahead exists.
    pub fn advance(&mut self) -> bool {
        self.peek = 0;
        self.token = self.lookahead;
        self.lookahead = if self.position < self.tokens.len() {
            self.position += 1;
            Some(self.position - 1)
        } else {
            None
        };
        self.lookahead.is_some()
    }

    pub fn skip_until(&mut self, kind: &TokenKind) {
        while self.lookahead().is_some_and(|t| t.kind != *kind) {
            self.advance();
        }
    }

    /// Next token past the lookahead not yet seen by the peek cursor.
    pub fn peek(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position + self.peek);
        if token.is_some() {
            self.peek += 1;
        }
        token
    }

    /// [`Lexer::peek`] followed by [`Lexer::reset_peek`].
    pub fn glimpse(&mut self) -> Option<&Token> {
        let index = self.position + self.peek;
        self.peek = 0;
        self.tokens.get(index)
    }

    pub fn glimpse_kind(&mut self) -> Option<TokenKind> {
        self.glimpse().map(|t| t.kind.clone())
    }
}

#[cfg(test)]
fn sample() -> Lexer {
    Lexer::from_raw(vec![
        RawToken::Typed(TokenKind::Variable, "$user".into()),
        RawToken::Typed(TokenKind::ObjectOperator, "->".into()),
        RawToken::Typed(TokenKind::Identifier, "age".into()),
        RawToken::Char(">".into()),
        RawToken::Typed(TokenKind::IntLiteral, "27".into()),
    ])
}

#[test]
fn test_advance_and_lookahead() {
    let mut lexer = sample();
    assert!(lexer.lookahead().is_none());

    assert!(lexer.advance());
    assert!(lexer.is_next_token(&TokenKind::Variable));
    assert!(lexer.token().is_none());

    assert!(lexer.advance());
    assert_eq!(lexer.token().map(|t| t.text.as_str()), Some("$user"));
    assert!(lexer.is_next_token_any(&[TokenKind::Identifier, TokenKind::ObjectOperator]));
}

#[test]
fn test_peek_does_not_consume() {
    let mut lexer = sample();
    lexer.advance();

    assert_eq!(lexer.peek().map(|t| t.text.clone()), Some("->".to_string()));
    assert_eq!(lexer.peek().map(|t| t.text.clone()), Some("age".to_string()));
    assert!(lexer.is_next_token(&TokenKind::Variable));

    lexer.reset_peek();
    assert_eq!(lexer.peek().map(|t| t.text.clone()), Some("->".to_string()));
}

#[test]
fn test_glimpse_resets_peek() {
    let mut lexer = sample();
    lexer.advance();

    assert_eq!(lexer.glimpse_kind(), Some(TokenKind::ObjectOperator));
    assert_eq!(lexer.glimpse_kind(), Some(TokenKind::ObjectOperator));
}

#[test]
fn test_skip_until_and_end() {
    let mut lexer = sample();
    lexer.advance();
    lexer.skip_until(&TokenKind::GreaterThan);
    assert!(lexer.is_next_token(&TokenKind::GreaterThan));

    lexer.skip_until(&TokenKind::Semicolon);
    assert!(lexer.lookahead().is_none());
    assert!(!lexer.advance());
    assert!(lexer.glimpse().is_none());
}
