/*!
Pratt parser for Monkey.

The parser pulls tokens from a [`Tokenizer`] on demand and keeps exactly two
of them in view: `current` (the token being examined) and `peek` (the one
after it). Expression parsing is table driven: every token kind that can
start an expression has a *prefix* rule, every binary operator has an
*infix* rule and a binding [`Precedence`].

### Logging Policy

| Location                      | Level   | Purpose                                   |
|-------------------------------|---------|-------------------------------------------|
| `Parser::new`, `parse_program`| `info`  | Lifecycle milestones.                     |
| each parsed statement         | `debug` | Statement kind as it is appended.         |
| `BEGIN` / `END` markers       | `trace` | Only when `ParserOptions::trace` is set.  |

Grammar (EBNF, as implemented)
------------------------------

```text
program    → statement* EOF ;
statement  → letStmt | returnStmt | exprStmt ;
letStmt    → "let" IDENT "=" <tokens skipped up to ";"> ;
returnStmt → "return" <tokens skipped up to ";"> ;
exprStmt   → expression ";"? ;
expression → prefix ( infix )* ;
prefix     → IDENT | INT | ( "-" | "!" ) expression | "(" expression ")" ;
infix      → ( "+" | "-" | "*" | "/" | "==" | "!=" | "<" | ">" ) expression ;
```

The parser never aborts. Problems are collected in [`Parser::errors`] and the
offending statement or expression is simply left out of the tree.

Nesting is capped at [`MAX_NESTING_DEPTH`]: every `parse_expression` entry and
every infix fold counts one level. Past the cap the rest of the statement is
discarded with a single [`ParseError::NestingTooDeep`], so the recursion and
the height of the resulting tree stay bounded.
*/

use crate::ast::{
    Expression, ExpressionStatement, Identifier, InfixExpression, IntegerLiteral, LetStatement,
    PrefixExpression, Program, ReturnStatement, Statement,
};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

use log::{debug, info, trace};
use std::collections::HashMap;

/// Deepest expression nesting accepted before the statement is abandoned.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Binding power of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    Call,
}

impl Precedence {
    /// Binding power of `kind` when it appears in infix position.
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::EQ | TokenKind::NOT_EQ => Precedence::Equals,
            TokenKind::LT | TokenKind::GT => Precedence::LessGreater,
            TokenKind::PLUS | TokenKind::MINUS => Precedence::Sum,
            TokenKind::ASTERISK | TokenKind::SLASH => Precedence::Product,
            _ => Precedence::Lowest,
        }
    }
}

/// Rule for a token that starts an expression.
pub type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Option<Expression<'a>>;

/// Rule for a token that continues an expression; receives the left operand.
pub type InfixParseFn<'a> = fn(&mut Parser<'a>, Expression<'a>) -> Option<Expression<'a>>;

/// Knobs for a single parser instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Emit `BEGIN`/`END` trace records around expression parsing.
    pub trace: bool,
}

/// Pratt parser over a [`Tokenizer`], keeping two tokens of lookahead.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token<'a>,
    peek: Token<'a>,
    errors: Vec<ParseError>,
    prefix_parse_fns: HashMap<TokenKind, PrefixParseFn<'a>>,
    infix_parse_fns: HashMap<TokenKind, InfixParseFn<'a>>,
    options: ParserOptions,
    depth: usize,
    trace_depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a parser with the default rule set and tracing disabled.
    pub fn new(tokenizer: Tokenizer<'a>) -> Self {
        Self::with_options(tokenizer, ParserOptions::default())
    }

    /// Construct a parser with the default rule set and explicit `options`.
    pub fn with_options(tokenizer: Tokenizer<'a>, options: ParserOptions) -> Self {
        info!("Parser created with {:?}", options);

        let mut parser = Self {
            tokenizer,
            current: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
            options,
            depth: 0,
            trace_depth: 0,
        };

        // Fill both `current` and `peek`.
        parser.next_token();
        parser.next_token();

        register_default_rules(&mut parser);

        parser
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse statements until `EOF`. Always returns, possibly with fewer
    /// statements than the source holds; see [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program<'a> {
        info!("Beginning parse phase");

        let mut program = Program::new();

        while !self.current_token_is(TokenKind::EOF) {
            if let Some(stmt) = self.parse_statement() {
                debug!("Parsed statement: {}", stmt);

                program.statements.push(stmt);
            }

            self.next_token();
        }

        info!(
            "Parse phase finished: {} statements, {} errors",
            program.len(),
            self.errors.len()
        );

        program
    }

    /// Diagnostics recorded so far, in the order they were found.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consume the parser, keeping only its diagnostics.
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Install (or replace) the prefix rule for `kind`.
    pub fn register_prefix(&mut self, kind: TokenKind, rule: PrefixParseFn<'a>) {
        self.prefix_parse_fns.insert(kind, rule);
    }

    /// Install (or replace) the infix rule for `kind`.
    pub fn register_infix(&mut self, kind: TokenKind, rule: InfixParseFn<'a>) {
        self.infix_parse_fns.insert(kind, rule);
    }

    // ──────────────────────── statement rules ─────────────────────

    fn parse_statement(&mut self) -> Option<Statement<'a>> {
        match self.current.kind {
            TokenKind::LET => self.parse_let_statement(),
            TokenKind::RETURN => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement<'a>> {
        let token = self.current;

        if !self.expect_peek(TokenKind::IDENT) {
            return None;
        }

        let name = Identifier {
            token: self.current,
            value: self.current.literal,
        };

        if !self.expect_peek(TokenKind::ASSIGN) {
            return None;
        }

        // TODO: parse the bound expression into `value` instead of skipping it.
        self.skip_to_statement_end();

        Some(Statement::Let(LetStatement {
            token,
            name,
            value: None,
        }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement<'a>> {
        let token = self.current;

        self.next_token();
        self.skip_to_statement_end();

        Some(Statement::Return(ReturnStatement { token, value: None }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement<'a>> {
        self.traced("parse_expression_statement", |p| {
            let token = p.current;
            let expression = p.parse_expression(Precedence::Lowest);

            if p.peek_token_is(TokenKind::SEMICOLON) {
                p.next_token();
            }

            expression.map(|expression| {
                Statement::Expression(ExpressionStatement { token, expression })
            })
        })
    }

    // ─────────────────────── expression rules (Pratt) ─────────────

    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression<'a>> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.nesting_too_deep();
        }

        let entry = self.depth;
        self.depth += 1;

        let expression = self.traced("parse_expression", |p| {
            let Some(prefix) = p.prefix_parse_fns.get(&p.current.kind).copied() else {
                p.errors.push(ParseError::no_prefix_parse_fn(p.current.kind));

                return None;
            };

            let mut left = prefix(p)?;

            while !p.peek_token_is(TokenKind::SEMICOLON) && precedence < p.peek_precedence() {
                let Some(infix) = p.infix_parse_fns.get(&p.peek.kind).copied() else {
                    return Some(left);
                };

                // Each fold makes the left operand one level deeper.
                if p.depth >= MAX_NESTING_DEPTH {
                    return p.nesting_too_deep();
                }
                p.depth += 1;

                p.next_token();
                left = infix(p, left)?;
            }

            Some(left)
        });

        self.depth = entry;

        expression
    }

    fn parse_identifier(&mut self) -> Option<Expression<'a>> {
        Some(Expression::Identifier(Identifier {
            token: self.current,
            value: self.current.literal,
        }))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression<'a>> {
        self.traced("parse_integer_literal", |p| {
            let token = p.current;

            match parse_int(token.literal) {
                Some(value) => Some(Expression::Integer(IntegerLiteral { token, value })),
                None => {
                    p.errors.push(ParseError::invalid_integer(token.literal));

                    None
                }
            }
        })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression<'a>> {
        self.traced("parse_prefix_expression", |p| {
            let token = p.current;

            p.next_token();
            let right = p.parse_expression(Precedence::Prefix)?;

            Some(Expression::Prefix(PrefixExpression {
                token,
                operator: token.literal,
                right: Box::new(right),
            }))
        })
    }

    fn parse_infix_expression(&mut self, left: Expression<'a>) -> Option<Expression<'a>> {
        self.traced("parse_infix_expression", |p| {
            let token = p.current;
            let precedence = p.current_precedence();

            p.next_token();
            let right = p.parse_expression(precedence)?;

            Some(Expression::Infix(InfixExpression {
                token,
                left: Box::new(left),
                operator: token.literal,
                right: Box::new(right),
            }))
        })
    }

    /// `( expression )`; the parentheses only steer precedence and leave no
    /// node behind.
    fn parse_grouped_expression(&mut self) -> Option<Expression<'a>> {
        self.traced("parse_grouped_expression", |p| {
            p.next_token();
            let expression = p.parse_expression(Precedence::Lowest)?;

            if !p.expect_peek(TokenKind::RPAREN) {
                return None;
            }

            Some(expression)
        })
    }

    // ────────────────────── utility helpers ───────────────────────

    fn next_token(&mut self) {
        self.current = self.peek;
        self.peek = self.tokenizer.next_token();
    }

    #[inline(always)]
    fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline(always)]
    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advance iff `peek` has the wanted kind, otherwise record the mismatch.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.next_token();

            return true;
        }

        debug!("expect_peek failed: wanted {}, saw {:?}", kind, self.peek);

        self.errors.push(ParseError::unexpected_token(kind, self.peek.kind));

        false
    }

    #[inline(always)]
    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    #[inline(always)]
    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    /// Discard tokens until `current` is `;` or `EOF`.
    fn skip_to_statement_end(&mut self) {
        while !self.current_token_is(TokenKind::SEMICOLON) && !self.current_token_is(TokenKind::EOF)
        {
            self.next_token();
        }
    }

    /// Record the depth overflow and drop the rest of the statement.
    fn nesting_too_deep<T>(&mut self) -> Option<T> {
        debug!("Nesting limit reached at {:?}", self.current);

        self.errors.push(ParseError::nesting_too_deep(MAX_NESTING_DEPTH));
        self.skip_to_statement_end();

        None
    }

    /// Run `f`, wrapped in `BEGIN`/`END` trace records when tracing is on.
    fn traced<T>(&mut self, name: &'static str, f: impl FnOnce(&mut Self) -> T) -> T {
        if !self.options.trace {
            return f(self);
        }

        self.trace_depth += 1;
        trace!("{}BEGIN {}", "\t".repeat(self.trace_depth - 1), name);

        let result = f(self);

        trace!("{}END {}", "\t".repeat(self.trace_depth - 1), name);
        self.trace_depth -= 1;

        result
    }
}

fn register_default_rules(parser: &mut Parser<'_>) {
    // Literals and symbols
    parser.register_prefix(TokenKind::IDENT, Parser::parse_identifier);
    parser.register_prefix(TokenKind::INT, Parser::parse_integer_literal);
    parser.register_prefix(TokenKind::MINUS, Parser::parse_prefix_expression);
    parser.register_prefix(TokenKind::BANG, Parser::parse_prefix_expression);
    parser.register_prefix(TokenKind::LPAREN, Parser::parse_grouped_expression);

    // Binary operators
    for kind in [
        TokenKind::PLUS,
        TokenKind::MINUS,
        TokenKind::SLASH,
        TokenKind::ASTERISK,
        TokenKind::EQ,
        TokenKind::NOT_EQ,
        TokenKind::LT,
        TokenKind::GT,
    ] {
        parser.register_infix(kind, Parser::parse_infix_expression);
    }
}

/// Integer conversion with base inference: a leading `0` followed by more
/// digits selects octal.
fn parse_int(literal: &str) -> Option<i64> {
    let (digits, radix) = match literal.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (rest, 8),
        _ => (literal, 10),
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    i64::from_str_radix(digits, radix).ok()
}

/// Tokenize and parse `input` in one go.
pub fn parse(input: &str) -> (Program<'_>, Vec<ParseError>) {
    let mut parser = Parser::new(Tokenizer::new(input));
    let program = parser.parse_program();

    (program, parser.into_errors())
}
