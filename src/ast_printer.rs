use crate::ast::{Expression, Program, Statement};

/// Renders a tree in prefix (S‑expression) form, operator first:
/// `-a * b` becomes `(* (- a) b)`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expression<'_>) -> String {
        match expr {
            // ── leaves ──────────────────────────────────────────────────
            Expression::Identifier(ident) => ident.value.into(),

            Expression::Integer(int) => int.value.to_string(),

            // ── unary operator ──────────────────────────────────────────
            Expression::Prefix(prefix) => {
                format!("({} {})", prefix.operator, Self::print(&prefix.right))
            }

            // ── binary operator ─────────────────────────────────────────
            Expression::Infix(infix) => format!(
                "({} {} {})",
                infix.operator,
                Self::print(&infix.left),
                Self::print(&infix.right)
            ),
        }
    }

    pub fn print_statement(stmt: &Statement<'_>) -> String {
        match stmt {
            Statement::Let(let_stmt) => match &let_stmt.value {
                Some(value) => format!("(let {} {})", let_stmt.name.value, Self::print(value)),
                None => format!("(let {})", let_stmt.name.value),
            },

            Statement::Return(ret) => match &ret.value {
                Some(value) => format!("(return {})", Self::print(value)),
                None => "(return)".into(),
            },

            Statement::Expression(expr) => Self::print(&expr.expression),
        }
    }

    /// One line per statement.
    pub fn print_program(program: &Program<'_>) -> String {
        program
            .statements
            .iter()
            .map(Self::print_statement)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
