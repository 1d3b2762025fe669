//! Unit tests for the lexer module.

use super::{
    lexer::{tokenize, Lexer, TokenBuffer, TokenSource},
    tokens::TokenKind,
};

#[test]
fn test_tokenize_keywords() {
    let source = "fn let true false if else return".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::True);
    assert_eq!(tokens[3].kind, TokenKind::False);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar_1 _under letter returns".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    let values: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.as_str())).collect();
    assert_eq!(
        values,
        vec![
            (TokenKind::Identifier, "foo"),
            (TokenKind::Identifier, "bar_1"),
            (TokenKind::Identifier, "_under"),
            (TokenKind::Identifier, "letter"),
            (TokenKind::Identifier, "returns"),
            (TokenKind::EOF, "EOF"),
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    let source = "= + - ! * / < > == != , ; ( ) { }".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Not,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_simple_program() {
    let source = "let x = 42;".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens.len(), 6); // let, x, =, 42, ;, EOF
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[3].value, "42");
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
}

#[test]
fn test_tokenize_spans() {
    let source = "let  answer=42".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 11);
    assert_eq!(tokens[2].span.start.0, 11);
    assert_eq!(tokens[3].span.start.0, 12);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
    assert_eq!(tokens[4].span.start.0, 14);
    assert_eq!(*tokens[0].span.start.1, "test.lang");
}

#[test]
fn test_tokenize_comments() {
    let source = "let x = 5 // this is a comment\nlet y = 10".to_string();
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[5].value, "y");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "let x = @".to_string();
    let result = tokenize(source, Some("test.lang".to_string()));

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().get_position().0, 8);
}

#[test]
fn test_lexer_yields_illegal_and_continues() {
    let mut lexer = Lexer::new("a @ b".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    let illegal = lexer.next_token();
    assert_eq!(illegal.kind, TokenKind::Illegal);
    assert_eq!(illegal.value, "@");
    assert_eq!(lexer.next_token().value, "b");
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_lexer_repeats_eof() {
    let mut lexer = Lexer::new("x".to_string(), None);

    lexer.next_token();
    for _ in 0..3 {
        assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    }
}

#[test]
fn test_token_buffer_repeats_eof() {
    let tokens = tokenize("1;".to_string(), None).unwrap();
    let mut buffer = TokenBuffer::new(tokens);

    assert_eq!(buffer.next_token().kind, TokenKind::Int);
    assert_eq!(buffer.next_token().kind, TokenKind::Semicolon);
    assert_eq!(buffer.next_token().kind, TokenKind::EOF);
    assert_eq!(buffer.next_token().kind, TokenKind::EOF);

    let mut empty = TokenBuffer::new(vec![]);
    assert_eq!(empty.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize(String::new(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(*tokens[0].span.start.1, "shell");
}
