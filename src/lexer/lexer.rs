use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Builds a token from the text matched at the lexer's current offset.
/// Returning `None` skips the matched text (whitespace, comments).
pub type RegexHandler = fn(&Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

lazy_static! {
    // Tried in order; every pattern is anchored to the start of the remainder.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler},
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler},
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler},
        RegexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler},
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")},
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")},
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!")},
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")},
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<")},
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")},
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")},
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")},
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*")},
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")},
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")},
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")},
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")},
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")},
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")},
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")},
    ];
}

/// Pull interface the parser reads tokens through.
///
/// Implementations must yield an `EOF` token once input is exhausted and keep
/// yielding it on every later call.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Regex-driven lexer producing one token per `next_token` call.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
        }
    }

    /// Span of `len` bytes starting at the current offset.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0));
            }

            let remaining = self.remainder();
            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(remaining)
                    .map(|m| (pattern.handler, m.as_str().to_string()))
            });

            match matched {
                Some((handler, text)) => {
                    let token = handler(self, &text);
                    self.pos += text.len();

                    if let Some(token) = token {
                        return token;
                    }
                }
                None => {
                    let ch = remaining.chars().next().unwrap_or('\0');
                    let token = MK_TOKEN!(TokenKind::Illegal, ch.to_string(), self.span_of(ch.len_utf8()));
                    self.pos += ch.len_utf8();
                    return token;
                }
            }
        }
    }
}

/// Replays an already lexed token vector.
///
/// Stops on the first `EOF` it holds; a vector without one is padded with a
/// synthetic `EOF`.
pub struct TokenBuffer {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenBuffer { tokens, pos: 0 }
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => {
                // never step past EOF
                if token.kind != TokenKind::EOF {
                    self.pos += 1;
                }
                token.clone()
            }
            None => MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::null()),
        }
    }
}

fn skip_handler(_lexer: &Lexer, _matched: &str) -> Option<Token> {
    None
}

fn number_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(MK_TOKEN!(TokenKind::Int, matched.to_string(), lexer.span_of(matched.len())))
}

fn symbol_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP.get(matched).copied().unwrap_or(TokenKind::Identifier);

    Some(MK_TOKEN!(kind, matched.to_string(), lexer.span_of(matched.len())))
}

/// Lexes the whole source up front, failing on the first unrecognised character.
///
/// The returned vector always ends with exactly one `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();

        match token.kind {
            TokenKind::Illegal => {
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token: token.value }, token.span.start));
            }
            TokenKind::EOF => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}
