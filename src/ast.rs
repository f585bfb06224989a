//! Abstract syntax tree for Monkey programs.
//!
//! Every node keeps the [`Token`] that introduced it and can reproduce a
//! source‑like rendering of itself through [`fmt::Display`]. Operators are
//! fully parenthesised, so the rendering makes precedence visible:
//! `-a * b` prints as `((-a) * b)`.
//!
//! Children are owned through `Box`/`Vec`; the tree is built once by the
//! [`Parser`](crate::parser::Parser) and only read afterwards.

use crate::token::Token;

use serde::Serialize;
use std::fmt;

/// Behaviour shared by every AST node.
pub trait Node: fmt::Display {
    /// Literal text of the token that introduced this node.
    fn token_literal(&self) -> &str;
}

/// Root of a parsed source text: statements in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program<'a> {
    pub statements: Vec<Statement<'a>>,
}

impl<'a> Program<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program<'_> {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }
}

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }

        Ok(())
    }
}

// ─────────────────────────────── statements ───────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement<'a> {
    /// `let <name> = <value>;`
    Let(LetStatement<'a>),

    /// `return <value>;`
    Return(ReturnStatement<'a>),

    /// A bare expression, optionally terminated by `;`.
    Expression(ExpressionStatement<'a>),
}

impl Node for Statement<'_> {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let(stmt) => stmt.token.literal,
            Statement::Return(stmt) => stmt.token.literal,
            Statement::Expression(stmt) => stmt.token.literal,
        }
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => fmt::Display::fmt(stmt, f),
            Statement::Return(stmt) => fmt::Display::fmt(stmt, f),
            Statement::Expression(stmt) => fmt::Display::fmt(stmt, f),
        }
    }
}

/// Variable binding.
///
/// The parser does not read the bound expression yet, so `value` is always
/// `None` for trees it produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetStatement<'a> {
    /// The `let` keyword.
    pub token: Token<'a>,
    pub name: Identifier<'a>,
    pub value: Option<Expression<'a>>,
}

impl fmt::Display for LetStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = ", self.token.literal, self.name)?;

        if let Some(value) = &self.value {
            write!(f, "{}", value)?;
        }

        f.write_str(";")
    }
}

/// `return` statement. Like [`LetStatement`], `value` is not populated by
/// the parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement<'a> {
    /// The `return` keyword.
    pub token: Token<'a>,
    pub value: Option<Expression<'a>>,
}

impl fmt::Display for ReturnStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.token.literal)?;

        if let Some(value) = &self.value {
            write!(f, "{}", value)?;
        }

        f.write_str(";")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement<'a> {
    /// First token of the expression.
    pub token: Token<'a>,
    pub expression: Expression<'a>,
}

impl fmt::Display for ExpressionStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

// ─────────────────────────────── expressions ──────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    Integer(IntegerLiteral<'a>),
    Prefix(PrefixExpression<'a>),
    Infix(InfixExpression<'a>),
}

impl Node for Expression<'_> {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(expr) => expr.token.literal,
            Expression::Integer(expr) => expr.token.literal,
            Expression::Prefix(expr) => expr.token.literal,
            Expression::Infix(expr) => expr.token.literal,
        }
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(expr) => fmt::Display::fmt(expr, f),
            Expression::Integer(expr) => fmt::Display::fmt(expr, f),
            Expression::Prefix(expr) => fmt::Display::fmt(expr, f),
            Expression::Infix(expr) => fmt::Display::fmt(expr, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier<'a> {
    pub token: Token<'a>,
    pub value: &'a str,
}

impl fmt::Display for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegerLiteral<'a> {
    pub token: Token<'a>,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token.literal)
    }
}

/// `!x` or `-x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixExpression<'a> {
    /// The operator token.
    pub token: Token<'a>,
    pub operator: &'a str,
    pub right: Box<Expression<'a>>,
}

impl fmt::Display for PrefixExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Binary operator application, e.g. `a + b` or `x != y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfixExpression<'a> {
    /// The operator token.
    pub token: Token<'a>,
    pub left: Box<Expression<'a>>,
    pub operator: &'a str,
    pub right: Box<Expression<'a>>,
}

impl fmt::Display for InfixExpression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}
