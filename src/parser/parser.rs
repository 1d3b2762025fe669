//! Parser implementation for building the Abstract Syntax Tree.
//!
//! The parser pulls tokens from a [`TokenSource`] through a two-token window
//! (`cur_token`, `peek_token`) and uses a Pratt parser with NUD/LED handlers
//! for expressions.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, TokenSource},
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression nesting accepted before giving up with `NestingTooDeep`.
pub const MAX_EXPR_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// A parser is single use: it reads one token source to its end.
pub struct Parser {
    /// Where tokens are pulled from
    lexer: Box<dyn TokenSource>,
    /// The token under examination
    cur_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Diagnostics in the order they were detected
    errors: Vec<Error>,
    /// Expressions currently being parsed, innermost included
    expr_depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser over `lexer`.
    ///
    /// Registers every handler and primes the lookahead window, so on return
    /// `current_token` is the first token of the input.
    pub fn new<L: TokenSource + 'static>(lexer: L) -> Self {
        let placeholder = MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::null());

        let mut parser = Parser {
            lexer: Box::new(lexer),
            cur_token: placeholder.clone(),
            peek_token: placeholder,
            errors: vec![],
            expr_depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);

        parser.next_token();
        parser.next_token();

        debug!(
            "parser ready: {} statement, {} prefix and {} infix handlers",
            parser.stmt_lookup.len(),
            parser.nud_lookup.len(),
            parser.led_lookup.len()
        );

        parser
    }

    /// Shifts the peek token into the current slot and pulls a new peek token.
    pub fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.cur_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cur_token.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances if the peek token is of `expected_kind`.
    ///
    /// # Returns
    ///
    /// Returns an `UnexpectedToken` error positioned at the peek token otherwise;
    /// the window is left untouched in that case.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token_is(expected_kind) {
            self.next_token();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek_token.kind,
                },
                self.peek_token.span.start.clone(),
            ))
        }
    }

    /// Binding power of the peek token, `Lowest` if it has none.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power(self.peek_token.kind)
    }

    /// Binding power of the current token, `Lowest` if it has none.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power(self.cur_token.kind)
    }

    fn binding_power(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Span from `start` to the end of the current token.
    pub fn span_from(&self, start: &Position) -> Span {
        Span {
            start: start.clone(),
            end: self.cur_token.span.end.clone(),
        }
    }

    /// Enters one level of expression nesting.
    ///
    /// Fails with `NestingTooDeep` once [`MAX_EXPR_DEPTH`] levels are open;
    /// every successful call must be paired with [`Parser::leave_expr`].
    pub fn enter_expr(&mut self) -> Result<(), Error> {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_EXPR_DEPTH },
                self.cur_token.span.start.clone(),
            ));
        }

        self.expr_depth += 1;
        Ok(())
    }

    pub fn leave_expr(&mut self) {
        self.expr_depth -= 1;
    }

    /// Records a diagnostic for a statement that is being abandoned.
    pub fn record_error(&mut self, error: Error) {
        trace!("syntax error at {}: {}", error.get_position().0, error);
        self.errors.push(error);
    }

    /// Diagnostics collected so far, in detection order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Diagnostics rendered as messages, in detection order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Parses statements until the current token is `EOF`.
    ///
    /// A statement that fails to parse is not added to the program. Its
    /// diagnostic is recorded and the parser skips to the end of that
    /// statement before carrying on, so one pass reports every broken
    /// statement. Broken statements inside blocks are handled by
    /// [`parse_block_stmt`](super::stmt::parse_block_stmt) the same way.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => {
                    trace!("parsed statement `{}`", stmt);
                    program.statements.push(stmt);
                }
                Err(error) => {
                    self.record_error(error);
                    self.synchronize();
                }
            }

            self.next_token();
        }

        debug!(
            "parsed {} statements with {} errors",
            program.len(),
            self.errors.len()
        );

        program
    }

    /// Skips to the end of the broken statement.
    ///
    /// Stops on the `;` ending it or on a `}` closing the enclosing block,
    /// stepping over any `{ ... }` opened inside the statement. Stops on `EOF`
    /// otherwise.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;

        loop {
            match self.cur_token.kind {
                TokenKind::EOF => return,
                TokenKind::Semicolon | TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth -= 1,
                _ => {}
            }

            self.next_token();
        }
    }
}

/// Parses everything `lexer` yields.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the diagnostics
/// - The Program; possibly partial when diagnostics were recorded
pub fn parse<L: TokenSource + 'static>(lexer: L) -> (Parser, Program) {
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    (parser, program)
}

/// Lexes and parses `source` in one go.
pub fn parse_source(source: &str, file: Option<String>) -> (Parser, Program) {
    parse(Lexer::new(source.to_string(), file))
}
