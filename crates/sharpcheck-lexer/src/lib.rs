//! sharpcheck lexer: converts source text into tokens.
//!
//! Scanning never fails. Characters that start no token are skipped and
//! recorded as [`LexDiagnostic`]s; unterminated strings, chars and block
//! comments simply run to the end of the input.
use std::fmt;

use log::{trace, warn};
use sharpcheck_syntax::token::{Token, TokenKind};

/// A character the lexer could not classify and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexDiagnostic {
    pub ch: char,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid character '{}' at {}:{}",
            self.ch.escape_debug(),
            self.line,
            self.col
        )
    }
}

/// Character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    diagnostics: Vec<LexDiagnostic>,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Characters skipped during the last call to [`Lexer::tokenize`].
    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.src[start..self.pos].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_ident_or_keyword(&mut self) -> (TokenKind, String) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme = self.lexeme_from(start);
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        (kind, lexeme)
    }

    fn read_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
    }

    // digits ('.' digits)? 'f'?
    fn read_number(&mut self) -> (TokenKind, String) {
        let start = self.pos;
        self.read_digits();
        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            self.advance();
            self.read_digits();
        }
        if self.peek() == Some('f') {
            self.advance();
        }
        (TokenKind::Number, self.lexeme_from(start))
    }

    /// Reads from an opening `quote` through the next matching quote, or to
    /// the end of input when there is none.
    fn read_quoted(&mut self, quote: char, kind: TokenKind) -> (TokenKind, String) {
        let start = self.pos;
        self.advance();
        while let Some(c) = self.advance() {
            if c == quote {
                break;
            }
        }
        (kind, self.lexeme_from(start))
    }

    fn read_line_comment(&mut self) -> (TokenKind, String) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        (TokenKind::CommentSingleLine, self.lexeme_from(start))
    }

    fn read_block_comment(&mut self) -> (TokenKind, String) {
        let start = self.pos;
        self.advance();
        self.advance();
        while let Some(c) = self.advance() {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                break;
            }
        }
        (TokenKind::CommentMultiLine, self.lexeme_from(start))
    }

    // Two-character operators win over their one-character prefixes.
    fn read_symbol(&mut self) -> Option<(TokenKind, String)> {
        let first = self.peek()?;
        if let Some(second) = self.peek_next() {
            let pair: String = [first, second].iter().collect();
            if let Some(kind) = TokenKind::symbol(&pair) {
                self.advance();
                self.advance();
                return Some((kind, pair));
            }
        }
        let single = first.to_string();
        let kind = TokenKind::symbol(&single)?;
        self.advance();
        Some((kind, single))
    }

    /// Tokenize the entire input. The result has no end-of-input marker.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.diagnostics.clear();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            let scanned = match self.peek() {
                None => break,
                Some(c) if c.is_ascii_alphabetic() || c == '_' => Some(self.read_ident_or_keyword()),
                Some(c) if c.is_ascii_digit() => Some(self.read_number()),
                Some('"') => Some(self.read_quoted('"', TokenKind::StringLiteral)),
                Some('\'') if matches!(self.peek_next(), Some(c) if c != '\'') => {
                    Some(self.read_quoted('\'', TokenKind::CharLiteral))
                }
                Some('/') if self.peek_next() == Some('/') => Some(self.read_line_comment()),
                Some('/') if self.peek_next() == Some('*') => Some(self.read_block_comment()),
                Some(_) => self.read_symbol(),
            };
            match scanned {
                Some((kind, lexeme)) => {
                    trace!("{} {:?} at {}:{}", kind, lexeme, line, col);
                    tokens.push(Token::new(kind, lexeme, line, col));
                }
                None => {
                    if let Some(ch) = self.advance() {
                        let diag = LexDiagnostic { ch, line, col };
                        warn!("{}", diag);
                        self.diagnostics.push(diag);
                    }
                }
            }
        }
        tokens
    }
}

/// Tokenize `input` with a fresh [`Lexer`], discarding diagnostics.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
