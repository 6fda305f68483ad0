use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|t| t.kind.clone()).collect()
}

#[test]
fn test_lex_assignment() {
    assert_eq!(
        kinds("x = 42;"),
        vec![
            TokenKind::Ident("x".to_string()),
            TokenKind::Assign,
            TokenKind::Int(42),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_match_clause() {
    assert_eq!(
        kinds(r"(h : t) \ h > 0 -> h \ 0"),
        vec![
            TokenKind::LParen,
            TokenKind::Ident("h".to_string()),
            TokenKind::Colon,
            TokenKind::Ident("t".to_string()),
            TokenKind::RParen,
            TokenKind::Backslash,
            TokenKind::Ident("h".to_string()),
            TokenKind::Gt,
            TokenKind::Int(0),
            TokenKind::Arrow,
            TokenKind::Ident("h".to_string()),
            TokenKind::Backslash,
            TokenKind::Int(0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_two_char_operators_win() {
    assert_eq!(
        kinds("== != <= >= && || ->"),
        vec![
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Arrow,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_literals() {
    let tokens = lex(r#"1.5 "a\n\"b\"" true null"#);
    assert_eq!(tokens[0].kind, TokenKind::Float(1.5));
    assert_eq!(tokens[1].kind, TokenKind::Str("a\n\"b\"".to_string()));
    assert_eq!(tokens[2].kind, TokenKind::True);
    assert_eq!(tokens[3].kind, TokenKind::Null);
}

#[test]
fn test_lex_skips_comments_and_newlines() {
    assert_eq!(
        kinds("a // comment\n b"),
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::Ident("b".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_keyword_prefix_is_identifier() {
    assert_eq!(kinds("nullable")[0], TokenKind::Ident("nullable".to_string()));
}

#[test]
fn test_lex_spans() {
    let tokens = lex("ab + c");
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(3, 4));
    assert_eq!(tokens[3].span, Span::new(6, 6));
}

#[test]
fn test_lex_error_token() {
    let tokens = lex("a # b");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_lex_integer_overflow_is_error() {
    assert_eq!(lex("99999999999999999999")[0].kind, TokenKind::Error);
}
