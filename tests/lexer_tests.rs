// tests/lexer_tests.rs

use predicate_sql::ast::{RawToken, Token, TokenKind};
use predicate_sql::lexer::{Lexer, classify};

// ============================================================================
// Raw token classification
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (";", TokenKind::Semicolon),
        (",", TokenKind::Comma),
        ("(", TokenKind::OpenParenthesis),
        (")", TokenKind::CloseParenthesis),
        ("[", TokenKind::OpenBracket),
        ("]", TokenKind::CloseBracket),
        ("!", TokenKind::Not),
        ("<", TokenKind::LessThan),
        (">", TokenKind::GreaterThan),
    ];

    for (input, expected) in test_cases {
        let token = classify(RawToken::Char(input.to_string()));
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_unknown_char_is_undefined() {
    for input in ["+", "?", "@", "."] {
        let token = classify(RawToken::Char(input.to_string()));
        assert_eq!(token.kind, TokenKind::Undefined, "Failed for input: {}", input);
    }
}

#[test]
fn test_typed_tokens_pass_through() {
    let token = classify(RawToken::Typed(TokenKind::Variable, "$user".to_string()));
    assert_eq!(token, Token::new(TokenKind::Variable, "$user"));

    let token = classify(RawToken::Typed(
        TokenKind::Other("inline_html".to_string()),
        "<b>".to_string(),
    ));
    assert_eq!(token.kind, TokenKind::Other("inline_html".to_string()));
}

// ============================================================================
// Kind names
// ============================================================================

#[test]
fn test_kind_names_round_trip() {
    let kinds = vec![
        TokenKind::Semicolon,
        TokenKind::OpenParenthesis,
        TokenKind::Undefined,
        TokenKind::Variable,
        TokenKind::ObjectOperator,
        TokenKind::Identifier,
        TokenKind::StringLiteral,
        TokenKind::IntLiteral,
        TokenKind::FloatLiteral,
        TokenKind::BooleanAnd,
        TokenKind::BooleanOr,
        TokenKind::IsIdentical,
        TokenKind::IsNotIdentical,
        TokenKind::IsSmallerOrEqual,
        TokenKind::IsGreaterOrEqual,
    ];

    for kind in kinds {
        let parsed: TokenKind = kind.name().parse().unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_unknown_kind_name_is_kept() {
    let kind: TokenKind = "whitespace".parse().unwrap();
    assert_eq!(kind, TokenKind::Other("whitespace".to_string()));
    assert_eq!(kind.to_string(), "whitespace");
}

#[test]
fn test_describe() {
    assert_eq!(TokenKind::CloseParenthesis.describe(), "')'");
    assert_eq!(TokenKind::StringLiteral.describe(), "string literal");
    assert_eq!(TokenKind::ObjectOperator.describe(), "field accessor");
}

// ============================================================================
// Wire format
// ============================================================================

#[test]
fn test_raw_tokens_from_json() {
    let raw: Vec<RawToken> =
        serde_json::from_str(r#"[["variable", "$user"], "(", ["doc_comment", "/** x */"]]"#)
            .unwrap();

    assert_eq!(
        raw,
        vec![
            RawToken::Typed(TokenKind::Variable, "$user".to_string()),
            RawToken::Char("(".to_string()),
            RawToken::Typed(TokenKind::Other("doc_comment".to_string()), "/** x */".to_string()),
        ]
    );
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn test_from_raw_classifies() {
    let mut lexer = Lexer::from_raw(vec![
        RawToken::Char("!".to_string()),
        RawToken::Char("(".to_string()),
    ]);

    assert_eq!(lexer.len(), 2);
    lexer.advance();
    assert!(lexer.is_next_token(&TokenKind::Not));
    assert_eq!(lexer.glimpse().map(|t| t.kind.clone()), Some(TokenKind::OpenParenthesis));
    assert!(lexer.is_next_token(&TokenKind::Not));
}

#[test]
fn test_peek_past_end() {
    let mut lexer = Lexer::new(vec![Token::new(TokenKind::Identifier, "in_array")]);
    lexer.advance();

    assert!(lexer.peek().is_none());
    assert!(lexer.peek().is_none());
    assert!(lexer.is_next_token(&TokenKind::Identifier));
}

#[test]
fn test_reset_rewinds() {
    let mut lexer = Lexer::new(vec![
        Token::new(TokenKind::IntLiteral, "1"),
        Token::new(TokenKind::IntLiteral, "2"),
    ]);
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.lookahead().map(|t| t.text.as_str()), Some("2"));

    lexer.reset();
    assert!(lexer.lookahead().is_none());
    lexer.advance();
    assert_eq!(lexer.lookahead().map(|t| t.text.as_str()), Some("1"));
}

#[test]
fn test_empty_stream() {
    let mut lexer = Lexer::new(vec![]);
    assert!(lexer.is_empty());
    assert!(!lexer.advance());
    assert!(!lexer.is_next_token_any(&[TokenKind::Semicolon, TokenKind::Comma]));
}
