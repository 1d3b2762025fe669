use crate::{
    ast::{
        ast::{ExprWrapper, Node},
        expressions::{
            BooleanExpr, CallExpr, FunctionLiteralExpr, IdentifierExpr, IfExpr, InfixExpr,
            IntegerLiteralExpr, PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Pratt loop. Starts on the first token of the expression and leaves the
/// parser on its last token.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    parser.enter_expr()?;
    let result = parse_expr_at(parser, bp);
    parser.leave_expr();

    result
}

fn parse_expr_at(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParseFn { kind: token_kind },
            parser.current_token().span.start.clone(),
        ));
    };

    let mut left = nud(parser)?;

    // While the next token binds tighter than `bp`, fold it into lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        parser.next_token();
        let led_bp = parser.current_binding_power();
        left = led(parser, left, led_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Int => {
            let Ok(value) = token.value.parse::<i64>() else {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value.clone() },
                    token.span.start.clone(),
                ));
            };

            Ok(ExprWrapper::new(IntegerLiteralExpr {
                span: token.span.clone(),
                value,
                token,
            }))
        }
        TokenKind::Identifier => Ok(ExprWrapper::new(parse_identifier(parser))),
        TokenKind::True | TokenKind::False => Ok(ExprWrapper::new(BooleanExpr {
            span: token.span.clone(),
            value: token.kind == TokenKind::True,
            token,
        })),
        _ => Err(Error::new(
            ErrorImpl::NoPrefixParseFn { kind: token.kind },
            token.span.start,
        )),
    }
}

fn parse_identifier(parser: &Parser) -> IdentifierExpr {
    let token = parser.current_token().clone();

    IdentifierExpr {
        value: token.value.clone(),
        span: token.span.clone(),
        token,
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let operator_token = parser.current_token().clone();
    parser.next_token();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(ExprWrapper::new(PrefixExpr {
        span: parser.span_from(&operator_token.span.start),
        operator: operator_token.value.clone(),
        token: operator_token,
        right,
    }))
}

/// Left-associative binary operator: the right operand is parsed at the
/// operator's own binding power.
pub fn parse_infix_expr(parser: &mut Parser, left: ExprWrapper, bp: BindingPower) -> Result<ExprWrapper, Error> {
    let operator_token = parser.current_token().clone();
    parser.next_token();

    let right = parse_expr(parser, bp)?;

    Ok(ExprWrapper::new(InfixExpr {
        span: parser.span_from(&left.get_span().start),
        operator: operator_token.value.clone(),
        token: operator_token,
        left,
        right,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.next_token();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.next_token();
    let condition = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(ExprWrapper::new(IfExpr {
        span: parser.span_from(&token.span.start),
        token,
        condition,
        consequence,
        alternative,
    }))
}

pub fn parse_function_literal_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(ExprWrapper::new(FunctionLiteralExpr {
        span: parser.span_from(&token.span.start),
        token,
        parameters,
        body,
    }))
}

// fn(a, b): starts on `(`, ends on `)`
fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<IdentifierExpr>, Error> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.next_token();
        return Ok(parameters);
    }

    parser.expect_peek(TokenKind::Identifier)?;
    parameters.push(parse_identifier(parser));

    while parser.peek_token_is(TokenKind::Comma) {
        parser.next_token();
        parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(parse_identifier(parser));
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: ExprWrapper, _bp: BindingPower) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    let mut arguments = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.next_token();
    } else {
        parser.next_token();
        arguments.push(parse_expr(parser, BindingPower::Lowest)?);

        while parser.peek_token_is(TokenKind::Comma) {
            parser.next_token();
            parser.next_token();
            arguments.push(parse_expr(parser, BindingPower::Lowest)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(ExprWrapper::new(CallExpr {
        span: parser.span_from(&left.get_span().start),
        token,
        function: left,
        arguments,
    }))
}
