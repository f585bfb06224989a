//! Module `tokenizer` implements a pull‑based, one‑pass lexer for Monkey.
//!
//! It walks a borrowed `&str` byte by byte and hands out one [`Token`] per
//! call to [`Tokenizer::next_token`]. Nothing is buffered: the parser asks for
//! exactly the tokens it needs, two ahead at most.
//!
//! # Public API
//!
//! - `Tokenizer::new(input: &'a str) -> Tokenizer<'a>`
//!   Create a new lexer over the input text.
//!
//! - `Tokenizer::next_token(&mut self) -> Token<'a>`
//!   Scan the next token. Never fails: unknown input becomes `ILLEGAL`, and
//!   once the input is exhausted every call returns `EOF`.
//!
//! - `impl Iterator for Tokenizer<'a>`
//!   Yields every token up to and including the first `EOF`, then `None`.
//!
//! # Token Recognition
//!
//! - Whitespace (` `, `\t`, `\n`, `\r`) is skipped between tokens.
//! - Single‑character tokens: `;`, `,`, `(`, `)`, `{`, `}`, `+`, `-`, `*`, `/`.
//! - One byte of lookahead resolves `==`, `!=`, `<=`, `>=` against `=`, `!`, `<`, `>`.
//! - Identifiers: maximal run of ASCII letters, `_` and `?`, resolved against
//!   a perfect‑hash `KEYWORDS` map.
//! - Numbers: maximal run of digits and `.`; `FLOAT` if a dot was seen, `INT`
//!   otherwise. Validation is left to the parser.
//!
//! # Example
//!
//! ```rust
//! use monkey::token::TokenKind;
//! use monkey::tokenizer::Tokenizer;
//!
//! let kinds: Vec<TokenKind> = Tokenizer::new("let x = 5;").map(|t| t.kind).collect();
//! assert_eq!(kinds.last(), Some(&TokenKind::EOF));
//! ```

use crate::token::{Token, TokenKind};
use log::{debug, info};
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "fn"     => TokenKind::FUNCTION,
    "let"    => TokenKind::LET,
    "true"   => TokenKind::TRUE,
    "false"  => TokenKind::FALSE,
    "if"     => TokenKind::IF,
    "else"   => TokenKind::ELSE,
    "return" => TokenKind::RETURN,
};

/// Resolve an identifier‑shaped word to its keyword kind, or `IDENT`.
pub fn lookup_ident(word: &str) -> TokenKind {
    KEYWORDS.get(word).copied().unwrap_or(TokenKind::IDENT)
}

#[inline(always)]
const fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'?'
}

#[inline(always)]
const fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// A single pass **tokenizer** that converts source text into [`Token`]s.
/// Every emitted token's `literal` is a slice of the original input.
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,      // index of `ch`
    read_position: usize, // index of the byte after `ch`
    ch: u8,               // byte under examination, 0 once past the end
    finished: bool,       // iterator has already yielded EOF
}

impl<'a> Tokenizer<'a> {
    /// Create a new lexer over `input`, positioned on its first byte.
    pub fn new(input: &'a str) -> Self {
        info!("Tokenizer created over {} bytes", input.len());

        let mut tokenizer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            finished: false,
        };

        tokenizer.read_char();
        tokenizer
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Move one byte forward. Past the end `ch` becomes 0 and the cursor
    /// stops at `input.len()`.
    #[inline(always)]
    fn read_char(&mut self) {
        let bytes = self.input.as_bytes();

        if self.read_position >= bytes.len() {
            self.ch = 0;
            self.position = bytes.len();
            self.read_position = bytes.len() + 1;
        } else {
            self.ch = bytes[self.read_position];
            self.position = self.read_position;
            self.read_position += 1;
        }
    }

    /// The byte after `ch`, or 0 past the end.
    #[inline(always)]
    fn peek_char(&self) -> u8 {
        self.input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Consume the current byte and return its one‑byte slice.
    fn single(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.position;
        self.read_char();

        Token::new(kind, &self.input[start..self.position])
    }

    /// Consume `ch` and, if the next byte is `=`, that byte too.
    fn with_optional_eq(&mut self, plain: TokenKind, combined: TokenKind) -> Token<'a> {
        if self.peek_char() == b'=' {
            let start = self.position;
            self.read_char();
            self.read_char();

            return Token::new(combined, &self.input[start..self.position]);
        }

        self.single(plain)
    }

    /// Consume the maximal run of bytes satisfying `accept`.
    fn read_while(&mut self, accept: fn(u8) -> bool) -> &'a str {
        let start = self.position;

        while !self.is_at_end() && accept(self.ch) {
            self.read_char();
        }

        &self.input[start..self.position]
    }

    /// Consume one whole character (possibly multi‑byte) as `ILLEGAL`.
    fn illegal(&mut self) -> Token<'a> {
        let start = self.position;
        let width = self.input[start..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);

        for _ in 0..width {
            self.read_char();
        }

        Token::new(TokenKind::ILLEGAL, &self.input[start..self.position])
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Token::eof();
        }

        let token = match self.ch {
            // ── single‑character punctuators ──────────────────────────────
            b';' => self.single(TokenKind::SEMICOLON),
            b',' => self.single(TokenKind::COMMA),
            b'(' => self.single(TokenKind::LPAREN),
            b')' => self.single(TokenKind::RPAREN),
            b'{' => self.single(TokenKind::LBRACE),
            b'}' => self.single(TokenKind::RBRACE),

            // ── arithmetic ───────────────────────────────────────────────
            b'+' => self.single(TokenKind::PLUS),
            b'-' => self.single(TokenKind::MINUS),
            b'*' => self.single(TokenKind::ASTERISK),
            b'/' => self.single(TokenKind::SLASH),

            // ── two‑character operators (==, !=, <=, >=) ─────────────────
            b'=' => self.with_optional_eq(TokenKind::ASSIGN, TokenKind::EQ),
            b'!' => self.with_optional_eq(TokenKind::BANG, TokenKind::NOT_EQ),
            b'<' => self.with_optional_eq(TokenKind::LT, TokenKind::LTEQ),
            b'>' => self.with_optional_eq(TokenKind::GT, TokenKind::GTEQ),

            // ── identifiers / keywords ───────────────────────────────────
            b if is_letter(b) => {
                let word = self.read_while(is_letter);
                Token::new(lookup_ident(word), word)
            }

            // ── numbers (no validation, the parser converts) ─────────────
            b if is_number_byte(b) => {
                let text = self.read_while(is_number_byte);
                let kind = if text.contains('.') {
                    TokenKind::FLOAT
                } else {
                    TokenKind::INT
                };

                Token::new(kind, text)
            }

            _ => self.illegal(),
        };

        debug!("Scanned token {:?} at byte {}", token.kind, self.position);

        token
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();

        if token.kind == TokenKind::EOF {
            self.finished = true;
        }

        Some(token)
    }
}

impl<'a> FusedIterator for Tokenizer<'a> {}
