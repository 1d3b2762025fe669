//! Integration tests for the front-end pipeline.
//!
//! These tests drive source text through the lexer and parser and check the
//! canonical rendering of the resulting program and the collected diagnostics.

use frontend::{
    ast::{
        ast::{Node, Stmt, StmtType},
        expressions::{FunctionLiteralExpr, IfExpr},
        statements::{ExpressionStmt, LetStmt},
    },
    lexer::lexer::{tokenize, Lexer, TokenBuffer},
    parser::parser::{parse, parse_source},
};

#[test]
fn test_parse_simple_program() {
    let (parser, program) = parse_source("let x = 42;", Some("test.lang".to_string()));

    assert!(parser.errors().is_empty());
    assert_eq!(program.len(), 1);
    assert_eq!(program.token_literal(), "let");
    assert_eq!(program.to_string(), "let x=42;");
}

#[test]
fn test_parse_function_program() {
    let source = "
        let add = fn(a, b) {
            return a + b;
        };

        let result = add(1, 2 * 3);
        if (result > 5) { result } else { 0 }
    ";

    let (parser, program) = parse_source(source, Some("test.lang".to_string()));

    assert!(parser.errors().is_empty(), "{:?}", parser.error_messages());
    assert_eq!(program.len(), 3);

    let types: Vec<_> = program.statements.iter().map(|s| s.get_stmt_type()).collect();
    assert_eq!(
        types,
        vec![StmtType::LetStmt, StmtType::LetStmt, StmtType::ExpressionStmt]
    );

    let add = program.statements[0].downcast_ref::<LetStmt>().unwrap();
    let function = add.value.downcast_ref::<FunctionLiteralExpr>().unwrap();
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.body.to_string(), "{ return (a + b); }");

    let last = program.statements[2].downcast_ref::<ExpressionStmt>().unwrap();
    let if_expr = last.expression.downcast_ref::<IfExpr>().unwrap();
    assert!(if_expr.alternative.is_some());

    assert_eq!(
        program.to_string(),
        "let add=fn(a, b) { return (a + b); };\
         let result=add(1, (2 * 3));\
         if ((result > 5)) { result; } else { 0; };"
    );
}

#[test]
fn test_comments_are_ignored() {
    let source = "// leading comment\nlet x = 1; // trailing\nx";
    let (parser, program) = parse_source(source, None);

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "let x=1;x;");
}

#[test]
fn test_token_buffer_and_lexer_agree() {
    let source = "let y = !(a + b) * -c; return y == false;";

    let (_, from_lexer) = parse(Lexer::new(source.to_string(), None));
    let tokens = tokenize(source.to_string(), None).unwrap();
    let (_, from_buffer) = parse(TokenBuffer::new(tokens));

    assert_eq!(from_lexer.to_string(), from_buffer.to_string());
    assert_eq!(
        from_lexer.to_string(),
        "let y=((!(a + b)) * (-c));return (y == false);"
    );
}

#[test]
fn test_every_broken_statement_is_reported() {
    let source = "let a = 1;\nlet b 2;\nlet = 3;\nreturn ;\nlet c = a + ;\nlet d = 4;";
    let (parser, program) = parse_source(source, Some("broken.lang".to_string()));

    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be Assignment, got Int instead",
            "expected next token to be Identifier, got Assignment instead",
            "no prefix parse function for Semicolon found",
            "no prefix parse function for Semicolon found",
        ]
    );
    assert_eq!(program.to_string(), "let a=1;let d=4;");

    for error in parser.errors() {
        assert_eq!(*error.get_position().1, "broken.lang");
    }
}

#[test]
fn test_unrecognised_token_in_tokenize() {
    let error = tokenize("let x = #;".to_string(), Some("test.lang".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_rendering_reparses_to_same_program() {
    let source = "let f = fn(x) { if (x < 10) { return f(x + 1); } else { x } }; f(0);";
    let (parser, program) = parse_source(source, None);
    assert!(parser.errors().is_empty(), "{:?}", parser.error_messages());

    let rendered = program.to_string();
    let (parser, reparsed) = parse_source(&rendered, None);

    assert!(parser.errors().is_empty(), "{:?}", parser.error_messages());
    assert_eq!(reparsed.len(), program.len());
    assert_eq!(reparsed.to_string(), rendered);
}
