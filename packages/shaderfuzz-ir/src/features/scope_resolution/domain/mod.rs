//! Scope resolution domain models
//!
//! Positional facts the walker attaches to every declaration and
//! expression it visits.

use serde::{Deserialize, Serialize};

use crate::shared::models::DeclId;
use crate::shared::utils::StmtPath;

/// Where a declared variable lives in the AST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclLocation {
    /// Member of a top-level variable group
    Global { declaration: usize, member: usize },
    /// Member of a declaration statement held directly by a block or function body
    Block { path: StmtPath, member: usize },
    /// Member of a declaration statement not held by a block (`for` init, unbraced branch)
    Nested { path: StmtPath, member: usize },
    /// Named function parameter
    Parameter { function: usize, index: usize },
}

impl DeclLocation {
    /// Declaration statement (or top-level group) can take a sibling inserted before it
    pub fn accepts_sibling(&self) -> bool {
        matches!(self, Self::Global { .. } | Self::Block { .. })
    }

    /// Member of the same declaration group as `other`, at or before its position
    pub fn precedes_in_group(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Global { declaration, member },
                Self::Global {
                    declaration: other_declaration,
                    member: other_member,
                },
            ) => declaration == other_declaration && member <= other_member,
            (
                Self::Block { path, member },
                Self::Block {
                    path: other_path,
                    member: other_member,
                },
            )
            | (
                Self::Nested { path, member },
                Self::Nested {
                    path: other_path,
                    member: other_member,
                },
            ) => path == other_path && member <= other_member,
            _ => false,
        }
    }
}

/// Facts about one declared variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclSite {
    pub id: DeclId,
    pub location: DeclLocation,
    /// Declared with the `const` qualifier
    pub is_const: bool,
    /// Collided with an earlier declaration of the same frame
    pub redeclared: bool,
}

/// Part of a `for` header an expression belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForHeaderSlot {
    Guard,
    Increment,
}

/// Facts about one expression, in pre-order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprSite {
    /// Position in the fixed pre-order (see `shared::utils::ast_visit`)
    pub ordinal: usize,
    /// Ordinal of the directly enclosing expression; `None` at statement level
    pub parent: Option<usize>,
    /// Written rather than (only) read
    pub lvalue: bool,
    /// Must stay a constant expression
    pub const_context: bool,
    /// Innermost enclosing `for` header slot
    pub for_header: Option<ForHeaderSlot>,
    /// Variable whose initializer contains this expression
    pub initializer_of: Option<DeclId>,
    /// Declaration index of the enclosing function definition
    pub function: Option<usize>,
}

impl ExprSite {
    /// Direct operand of another expression
    pub fn is_operand(&self) -> bool {
        self.parent.is_some()
    }
}
