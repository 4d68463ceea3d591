//! Scope tree for symbol resolution
//!
//! Persistent chain of lexical frames built during one AST traversal.
//! Every operation returns a new `ScopeTree` sharing its tail with the old
//! one, so a traversal threads the tree downward by value and never needs
//! to undo anything when it leaves a block.

use std::rc::Rc;

use thiserror::Error;

use crate::shared::models::{DeclId, Symbol};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Name already declared in the innermost frame
    #[error("'{name}' is already declared in the current scope (depth {depth})")]
    Redeclared { name: String, depth: usize },
}

#[derive(Debug)]
enum Entry {
    /// Start of a frame
    Frame,
    Binding(Symbol),
}

#[derive(Debug)]
struct Link {
    entry: Entry,
    next: Option<Rc<Link>>,
}

/// Persistent scope chain; the empty tree is the global scope
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    head: Option<Rc<Link>>,
    depth: usize,
}

impl ScopeTree {
    /// Create a tree holding only the (empty) global scope
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: Entry) -> Rc<Link> {
        Rc::new(Link {
            entry,
            next: self.head.clone(),
        })
    }

    fn links(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(self.head.as_deref(), |link| link.next.as_deref())
    }

    /// Open a nested frame
    pub fn enter_scope(&self) -> Self {
        Self {
            head: Some(self.push(Entry::Frame)),
            depth: self.depth + 1,
        }
    }

    /// Close the innermost frame, dropping its bindings.
    ///
    /// Exiting the global scope leaves it unchanged.
    pub fn exit_scope(&self) -> Self {
        if self.at_global_scope() {
            return self.clone();
        }
        let mut cursor = self.head.clone();
        while let Some(link) = cursor {
            if let Entry::Frame = link.entry {
                return Self {
                    head: link.next.clone(),
                    depth: self.depth.saturating_sub(1),
                };
            }
            cursor = link.next.clone();
        }
        Self::new()
    }

    /// Declare `symbol` in the innermost frame.
    ///
    /// Shadows outer declarations; a second declaration of the same name in
    /// the same frame is rejected.
    pub fn declare(&self, symbol: Symbol) -> Result<Self, ScopeError> {
        if self.lookup_in_current_frame(&symbol.name).is_some() {
            return Err(ScopeError::Redeclared {
                name: symbol.name,
                depth: self.depth,
            });
        }
        Ok(self.shadow(symbol))
    }

    /// Declare without the same-frame check (malformed inputs only)
    pub fn shadow(&self, mut symbol: Symbol) -> Self {
        symbol.depth = self.depth;
        Self {
            head: Some(self.push(Entry::Binding(symbol))),
            depth: self.depth,
        }
    }

    /// Nearest enclosing declaration of `name`
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.links().find_map(|link| match &link.entry {
            Entry::Binding(symbol) if symbol.name == name => Some(symbol),
            _ => None,
        })
    }

    /// Declaration of `name` in the innermost frame only
    pub fn lookup_in_current_frame(&self, name: &str) -> Option<&Symbol> {
        for link in self.links() {
            match &link.entry {
                Entry::Frame => return None,
                Entry::Binding(symbol) if symbol.name == name => return Some(symbol),
                Entry::Binding(_) => {}
            }
        }
        None
    }

    /// True when declaration `id` is bound anywhere in the chain, shadowed or not
    pub fn binds(&self, id: DeclId) -> bool {
        self.links()
            .any(|link| matches!(&link.entry, Entry::Binding(symbol) if symbol.id == id))
    }

    pub fn at_global_scope(&self) -> bool {
        self.depth == 0
    }

    /// Number of open frames below the global scope
    pub fn depth(&self) -> usize {
        self.depth
    }
}
