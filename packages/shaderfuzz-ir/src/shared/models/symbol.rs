//! Symbols resolved through the scope tree

use serde::{Deserialize, Serialize};

use super::types::Type;

/// Pre-order ordinal of a declared variable within one scan.
///
/// Only meaningful for the AST shape it was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Global,
    Local,
    Parameter,
}

/// Declared variable a name denotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub id: DeclId,
    pub ty: Type,
    /// Depth of the declaring frame (0 = global scope)
    pub depth: usize,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, id: DeclId, ty: Type, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            id,
            ty,
            depth: 0,
            kind,
        }
    }
}
