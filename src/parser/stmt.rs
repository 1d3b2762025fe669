use crate::{
    ast::{
        ast::StmtWrapper,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

/// Consumes a trailing `;` when there is one. A missing terminator is fine.
fn skip_optional_semicolon(parser: &mut Parser) {
    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.next_token();
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    skip_optional_semicolon(parser);

    Ok(StmtWrapper::new(ExpressionStmt {
        span: parser.span_from(&token.span.start),
        token,
        expression,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name_token = parser.current_token().clone();
    let name = IdentifierExpr {
        value: name_token.value.clone(),
        span: name_token.span.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.next_token();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    skip_optional_semicolon(parser);

    Ok(StmtWrapper::new(LetStmt {
        span: parser.span_from(&token.span.start),
        token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.current_token().clone();
    parser.next_token();

    let return_value = parse_expr(parser, BindingPower::Lowest)?;

    skip_optional_semicolon(parser);

    Ok(StmtWrapper::new(ReturnStmt {
        span: parser.span_from(&token.span.start),
        token,
        return_value,
    }))
}

/// Starts on `{` and ends on the matching `}`.
///
/// A broken statement inside the block is recorded and skipped; the block
/// itself only fails when input ends before its `}`.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    parser.next_token();

    let mut statements = Vec::new();
    while !parser.current_token_is(TokenKind::CloseCurly) {
        if parser.current_token_is(TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: TokenKind::CloseCurly,
                    found: TokenKind::EOF,
                },
                parser.current_token().span.start.clone(),
            ));
        }

        match parse_stmt(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                parser.record_error(error);
                parser.synchronize();

                // Already on the closing brace
                if parser.current_token_is(TokenKind::CloseCurly) {
                    continue;
                }
            }
        }

        parser.next_token();
    }

    Ok(BlockStmt {
        span: parser.span_from(&token.span.start),
        token,
        statements,
    })
}
