//! Expression rendering for diagnostics
//!
//! Not a pretty-printer: output is only used for opportunity descriptions,
//! identities and log lines.

use std::fmt;

use super::ast::{Expr, Literal};

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Uint(value) => write!(f, "{}u", value),
            Literal::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{:.1}", value)
            }
            Literal::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Operands that are themselves operators are bracketed so the output is unambiguous
fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    match operand {
        Expr::Binary { .. } | Expr::Ternary { .. } => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Binary { op, lhs, rhs } => {
                write_operand(f, lhs)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, rhs)
            }
            Expr::Unary { op, operand } if op.is_postfix() => {
                write_operand(f, operand)?;
                write!(f, "{}", op.symbol())
            }
            Expr::Unary { op, operand } => {
                write!(f, "{}", op.symbol())?;
                write_operand(f, operand)
            }
            Expr::Member { base, member } => {
                write_operand(f, base)?;
                write!(f, ".{}", member)
            }
            Expr::Index { base, index } => {
                write_operand(f, base)?;
                write!(f, "[{}]", index)
            }
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                write_operand(f, cond)?;
                write!(f, " ? ")?;
                write_operand(f, then_expr)?;
                write!(f, " : ")?;
                write_operand(f, else_expr)
            }
            Expr::Paren(inner) => write!(f, "({})", inner),
        }
    }
}
