//! Shared models

pub mod ast;
pub mod builder;
mod display;
pub mod swizzle;
pub mod symbol;
pub mod types;
pub mod version;

pub use ast::{
    BinaryOp, Block, Declaration, Expr, FunctionDefinition, FunctionPrototype, Literal,
    Parameter, ParameterQualifier, Program, Stmt, TypeQualifier, UnaryOp, VariableDeclInfo,
    VariablesDeclaration,
};
pub use swizzle::Swizzle;
pub use symbol::{DeclId, Symbol, SymbolKind};
pub use types::{ScalarKind, Type};
pub use version::ShadingLanguageVersion;
