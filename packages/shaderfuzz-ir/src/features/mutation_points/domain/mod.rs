//! Mutation point domain models
//!
//! A mutation point is a read sub-expression that can be wrapped in a
//! semantics-preserving identity without changing what the shader computes.

use serde::{Deserialize, Serialize};

use crate::config::MutationConfig;
use crate::shared::models::{BinaryOp, Expr, Literal, ScalarKind, Type, UnaryOp};

// ═══════════════════════════════════════════════════════════════════════════
// Identities
// ═══════════════════════════════════════════════════════════════════════════

/// Semantics-preserving wrapper injected at a mutation point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKind {
    /// `(e)`
    Parenthesize,
    /// `(e) + 0`
    AddZero,
    /// `(e) * 1`
    MulOne,
    /// `!(!(e))`
    DoubleNegation,
    /// `true && (e)`
    AndTrue,
}

impl IdentityKind {
    /// Identities enabled by `config` that are legal for an expression of type `ty`.
    ///
    /// Unknown types only get `Parenthesize`.
    pub fn legal_for(ty: Option<&Type>, config: &MutationConfig) -> Vec<IdentityKind> {
        let mut kinds = Vec::new();
        if config.parenthesize {
            kinds.push(Self::Parenthesize);
        }
        let Some(ty) = ty else {
            return kinds;
        };
        if config.arithmetic_identity && ty.is_numeric() {
            kinds.extend([Self::AddZero, Self::MulOne]);
        }
        // `!` and `&&` take scalar booleans only
        if config.boolean_identity && *ty == Type::bool() {
            kinds.extend([Self::DoubleNegation, Self::AndTrue]);
        }
        kinds
    }

    /// Wrap `expr`; `elem` is the scalar kind of the wrapped value
    pub fn wrap(&self, expr: Expr, elem: Option<ScalarKind>) -> Expr {
        let parenthesized = Expr::Paren(Box::new(expr));
        match self {
            Self::Parenthesize => parenthesized,
            Self::AddZero => Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(parenthesized),
                rhs: Box::new(Expr::Literal(neutral_literal(elem, 0))),
            },
            Self::MulOne => Expr::Binary {
                op: BinaryOp::Mul,
                lhs: Box::new(parenthesized),
                rhs: Box::new(Expr::Literal(neutral_literal(elem, 1))),
            },
            Self::DoubleNegation => Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expr::Paren(Box::new(Expr::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(parenthesized),
                }))),
            },
            Self::AndTrue => Expr::Binary {
                op: BinaryOp::LogicalAnd,
                lhs: Box::new(Expr::Literal(Literal::Bool(true))),
                rhs: Box::new(parenthesized),
            },
        }
    }
}

/// `0`/`1` literal of the given element kind (`0.0`, `0`, `0u`)
fn neutral_literal(elem: Option<ScalarKind>, value: u8) -> Literal {
    match elem {
        Some(ScalarKind::Int) => Literal::Int(i64::from(value)),
        Some(ScalarKind::Uint) => Literal::Uint(u64::from(value)),
        _ => Literal::Float(f64::from(value)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Mutation point
// ═══════════════════════════════════════════════════════════════════════════

/// One place an identity can be injected
#[derive(Debug, Clone, PartialEq)]
pub struct MutationPoint {
    /// Pre-order ordinal of the expression
    pub ordinal: usize,
    /// Expression as found by the scan
    pub snapshot: Expr,
    /// Type reported by the oracle, when known
    pub ty: Option<Type>,
    /// Identities legal at this point; never empty
    pub identities: Vec<IdentityKind>,
}

impl MutationPoint {
    /// Rendered expression text
    pub fn text(&self) -> String {
        self.snapshot.to_string()
    }

    pub fn describe(&self) -> String {
        match &self.ty {
            Some(ty) => format!("mutation point #{} `{}` ({})", self.ordinal, self.text(), ty),
            None => format!("mutation point #{} `{}`", self.ordinal, self.text()),
        }
    }
}
