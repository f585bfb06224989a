//! Diagnostics produced while parsing.
//!
//! The parser never aborts: each problem becomes one [`ParseError`] pushed
//! onto its error list, and parsing carries on with the next token. The
//! `Display` form of every variant is the user‑facing message.
//!
//! The module **does not** print diagnostics itself.

use crate::token::TokenKind;

use log::info;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A required token was missing at a lookahead check.
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },

    /// No prefix rule is registered for the token that starts an expression.
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    /// Integer literal text does not fit (or is not) a 64‑bit integer.
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),

    /// Expression nesting went past the parser's depth limit.
    #[error("expression nests deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, found: TokenKind) -> Self {
        info!(
            "Creating UnexpectedToken error: expected={}, found={}",
            expected, found
        );

        ParseError::UnexpectedToken { expected, found }
    }

    pub fn no_prefix_parse_fn(kind: TokenKind) -> Self {
        info!("Creating NoPrefixParseFn error: kind={}", kind);

        ParseError::NoPrefixParseFn(kind)
    }

    pub fn invalid_integer<S: Into<String>>(literal: S) -> Self {
        let literal: String = literal.into();

        info!("Creating InvalidInteger error: literal={}", literal);

        ParseError::InvalidInteger(literal)
    }

    pub fn nesting_too_deep(limit: usize) -> Self {
        info!("Creating NestingTooDeep error: limit={}", limit);

        ParseError::NestingTooDeep(limit)
    }
}
