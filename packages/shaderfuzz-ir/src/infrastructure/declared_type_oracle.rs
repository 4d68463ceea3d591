/*
 * Infrastructure: Declared Type Oracle
 *
 * Types expressions from declarations alone: symbols in scope, literals,
 * swizzles, indexing, constructors, program-declared function return types
 * and operator rules. Anything outside that slice answers `None`.
 */

use rustc_hash::FxHashMap;

use crate::shared::models::{
    BinaryOp, Declaration, Expr, Literal, Program, ScalarKind, Swizzle, Type, UnaryOp,
};
use crate::shared::ports::TypeOracle;
use crate::shared::utils::ScopeTree;

/// Type oracle over declared types
#[derive(Debug, Clone, Default)]
pub struct DeclaredTypeOracle {
    /// Return type per program-declared function name (first overload wins)
    return_types: FxHashMap<String, Type>,
    /// `f.xx` is well typed in the program's version
    scalar_swizzles: bool,
}

impl DeclaredTypeOracle {
    pub fn new(program: &Program) -> Self {
        let mut return_types = FxHashMap::default();
        for decl in &program.declarations {
            let prototype = match decl {
                Declaration::Function(function) => &function.prototype,
                Declaration::Prototype(prototype) => prototype,
                Declaration::Variables(_) => continue,
            };
            return_types
                .entry(prototype.name.clone())
                .or_insert_with(|| prototype.return_type.clone());
        }
        Self {
            return_types,
            scalar_swizzles: program.version.supports_scalar_swizzles(),
        }
    }

    fn literal_type(literal: &Literal) -> Type {
        match literal {
            Literal::Bool(_) => Type::bool(),
            Literal::Int(_) => Type::int(),
            Literal::Uint(_) => Type::uint(),
            Literal::Float(_) => Type::float(),
        }
    }

    fn member_type(&self, base: Type, member: &str) -> Option<Type> {
        let elem = match base {
            Type::Scalar(kind) if self.scalar_swizzles => kind,
            Type::Vector { elem: kind, .. } => kind,
            _ => return None,
        };
        let swizzle = Swizzle::parse(member, base.width()?)?;
        Some(Type::vector(elem, swizzle.len() as u8))
    }

    fn index_type(base: Type) -> Option<Type> {
        match base {
            Type::Array(inner, _) => Some(*inner),
            Type::Vector { elem, .. } => Some(Type::Scalar(elem)),
            Type::Matrix { rows, .. } => Some(Type::vector(ScalarKind::Float, rows)),
            _ => None,
        }
    }

    fn arithmetic_type(lhs: Type, rhs: Type) -> Option<Type> {
        if lhs == rhs {
            return Some(lhs);
        }
        match (&lhs, &rhs) {
            (Type::Scalar(_), Type::Vector { .. } | Type::Matrix { .. }) => Some(rhs.clone()),
            (Type::Vector { .. } | Type::Matrix { .. }, Type::Scalar(_)) => Some(lhs.clone()),
            (Type::Matrix { rows, .. }, Type::Vector { .. }) => {
                Some(Type::vector(ScalarKind::Float, *rows))
            }
            (Type::Vector { .. }, Type::Matrix { columns, .. }) => {
                Some(Type::vector(ScalarKind::Float, *columns))
            }
            _ => None,
        }
    }
}

impl TypeOracle for DeclaredTypeOracle {
    fn type_of(&self, expr: &Expr, scope: &ScopeTree) -> Option<Type> {
        match expr {
            Expr::Ident(name) => scope.lookup(name).map(|symbol| symbol.ty.clone()),
            Expr::Literal(literal) => Some(Self::literal_type(literal)),
            Expr::Paren(inner) => self.type_of(inner, scope),
            Expr::Member { base, member } => self.member_type(self.type_of(base, scope)?, member),
            Expr::Index { base, .. } => Self::index_type(self.type_of(base, scope)?),
            Expr::Call { callee, .. } => Type::from_name(callee)
                .or_else(|| self.return_types.get(callee).cloned()),
            Expr::Binary { op, lhs, rhs } => {
                if op.is_assignment() {
                    self.type_of(lhs, scope)
                } else if op.is_comparison() || op.is_logical() {
                    Some(Type::bool())
                } else {
                    match op {
                        BinaryOp::Comma => self.type_of(rhs, scope),
                        BinaryOp::Shl | BinaryOp::Shr => self.type_of(lhs, scope),
                        _ => Self::arithmetic_type(self.type_of(lhs, scope)?, self.type_of(rhs, scope)?),
                    }
                }
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not => Some(Type::bool()),
                _ => self.type_of(operand, scope),
            },
            Expr::Ternary { then_expr, .. } => self.type_of(then_expr, scope),
        }
    }
}
