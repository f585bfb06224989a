use log::debug;
use serde::Serialize;
use std::fmt;

/// The lexical categories produced by the [`Tokenizer`](crate::tokenizer::Tokenizer).
///
/// The set is closed: every byte of input ends up in exactly one of these,
/// with `ILLEGAL` catching whatever the language does not recognise.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// A character the language does not recognise
    ILLEGAL,

    /// End‑of‑input marker
    EOF,

    /// A user‑defined identifier
    IDENT,

    /// An integer literal (digits only)
    INT,

    /// A numeric literal containing at least one '.'
    FLOAT,

    /// '='
    ASSIGN,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '!'
    BANG,

    /// '*'
    ASTERISK,

    /// '/'
    SLASH,

    /// '=='
    EQ,

    /// '!='
    NOT_EQ,

    /// '<'
    LT,

    /// '>'
    GT,

    /// '<='
    LTEQ,

    /// '>='
    GTEQ,

    /// ','
    COMMA,

    /// ';'
    SEMICOLON,

    /// '('
    LPAREN,

    /// ')'
    RPAREN,

    /// '{'
    LBRACE,

    /// '}'
    RBRACE,

    /// 'fn'
    FUNCTION,

    /// 'let'
    LET,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,

    /// 'if'
    IF,

    /// 'else'
    ELSE,

    /// 'return'
    RETURN,
}

impl TokenKind {
    /// The canonical spelling used in diagnostics: category names for
    /// literals and keywords, the operator text for everything else.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::ILLEGAL => "ILLEGAL",
            TokenKind::EOF => "EOF",
            TokenKind::IDENT => "IDENT",
            TokenKind::INT => "INT",
            TokenKind::FLOAT => "FLOAT",
            TokenKind::ASSIGN => "=",
            TokenKind::PLUS => "+",
            TokenKind::MINUS => "-",
            TokenKind::BANG => "!",
            TokenKind::ASTERISK => "*",
            TokenKind::SLASH => "/",
            TokenKind::EQ => "==",
            TokenKind::NOT_EQ => "!=",
            TokenKind::LT => "<",
            TokenKind::GT => ">",
            TokenKind::LTEQ => "<=",
            TokenKind::GTEQ => ">=",
            TokenKind::COMMA => ",",
            TokenKind::SEMICOLON => ";",
            TokenKind::LPAREN => "(",
            TokenKind::RPAREN => ")",
            TokenKind::LBRACE => "{",
            TokenKind::RBRACE => "}",
            TokenKind::FUNCTION => "FUNCTION",
            TokenKind::LET => "LET",
            TokenKind::TRUE => "TRUE",
            TokenKind::FALSE => "FALSE",
            TokenKind::IF => "IF",
            TokenKind::ELSE => "ELSE",
            TokenKind::RETURN => "RETURN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scanned token: its kind plus the exact source text that produced it.
///
/// The lifetime `'a` ties `literal` back to the input handed to the
/// tokenizer, so producing a token never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The category of this token.
    pub kind: TokenKind,

    /// The exact substring from the source. Empty for `EOF`.
    pub literal: &'a str,
}

impl<'a> Token<'a> {
    /// Create a new token with the given kind and literal.
    pub fn new(kind: TokenKind, literal: &'a str) -> Self {
        debug!("Creating new token: kind={:?}, literal={:?}", kind, literal);

        Self { kind, literal }
    }

    /// Shorthand for the end‑of‑input token.
    pub fn eof() -> Self {
        Self::new(TokenKind::EOF, "")
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Type:{} Literal:{}}}", self.kind, self.literal)
    }
}
