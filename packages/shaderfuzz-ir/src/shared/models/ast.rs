//! Shader program AST
//!
//! Produced by an external parser and mutated in place by the passes.
//! Only identifier references, member accesses and variable declarations
//! are rewritten; every other node is carried along untouched.

use serde::{Deserialize, Serialize};

use super::types::Type;
use super::version::ShadingLanguageVersion;

// ═══════════════════════════════════════════════════════════════════════════
// Top level
// ═══════════════════════════════════════════════════════════════════════════

/// Translation unit: ordered top-level declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub version: ShadingLanguageVersion,
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(version: ShadingLanguageVersion, declarations: Vec<Declaration>) -> Self {
        Self {
            version,
            declarations,
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Function(function) => Some(function),
            _ => None,
        })
    }

    /// Every declared name at global scope, in declaration order
    pub fn global_variable_names(&self) -> Vec<&str> {
        self.declarations
            .iter()
            .filter_map(|decl| match decl {
                Declaration::Variables(group) => Some(group),
                _ => None,
            })
            .flat_map(|group| group.vars.iter().map(|var| var.name.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Variables(VariablesDeclaration),
    Function(FunctionDefinition),
    Prototype(FunctionPrototype),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeQualifier {
    Const,
    Uniform,
    Attribute,
    Varying,
    In,
    Out,
    Flat,
    Highp,
    Mediump,
    Lowp,
}

/// Variable declaration group: `const vec2 a, b[3] = ...;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariablesDeclaration {
    pub qualifiers: Vec<TypeQualifier>,
    pub base_type: Type,
    pub vars: Vec<VariableDeclInfo>,
}

impl VariablesDeclaration {
    pub fn is_const(&self) -> bool {
        self.qualifiers.contains(&TypeQualifier::Const)
    }

    /// Full type of one member, including its array shape
    pub fn member_type(&self, var: &VariableDeclInfo) -> Type {
        match var.array_size {
            Some(size) => Type::Array(Box::new(self.base_type.clone()), Some(size)),
            None => self.base_type.clone(),
        }
    }
}

/// One declared variable inside a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclInfo {
    pub name: String,
    pub array_size: Option<u32>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterQualifier {
    In,
    Out,
    InOut,
}

impl ParameterQualifier {
    /// Argument is written by the callee
    pub fn writes_argument(&self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Option<String>,
    pub ty: Type,
    pub qualifier: ParameterQualifier,
    pub array_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPrototype {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub prototype: FunctionPrototype,
    pub body: Block,
}

// ═══════════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════════

/// `{ ... }`; function bodies do not open a frame of their own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub introduces_scope: bool,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            introduces_scope: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Block(Block),
    Decl(VariablesDeclaration),
    Expr(Expr),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    For {
        init: Box<Stmt>,
        cond: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    Discard,
    Empty,
}

impl Stmt {
    /// Nested statement in `slot`, the position statement paths step through.
    ///
    /// Slots follow traversal order: block statements, `then` then `else`,
    /// `for` init then body, loop body.
    pub fn child_stmt_mut(&mut self, slot: usize) -> Option<&mut Stmt> {
        match self {
            Stmt::Block(block) => block.stmts.get_mut(slot),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => match slot {
                0 => Some(then_branch.as_mut()),
                1 => else_branch.as_mut().map(|stmt| stmt.as_mut()),
                _ => None,
            },
            Stmt::For { init, body, .. } => match slot {
                0 => Some(init.as_mut()),
                1 => Some(body.as_mut()),
                _ => None,
            },
            Stmt::While { body, .. } | Stmt::DoWhile { body, .. } if slot == 0 => {
                Some(body.as_mut())
            }
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Comma,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShlAssign,
    ShrAssign,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::LogicalXor => "^^",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Comma => ",",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
        }
    }

    /// Plain or compound assignment; the left operand is written
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::AddAssign
                | Self::SubAssign
                | Self::MulAssign
                | Self::DivAssign
                | Self::ModAssign
                | Self::BitAndAssign
                | Self::BitOrAssign
                | Self::BitXorAssign
                | Self::ShlAssign
                | Self::ShrAssign
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::Eq | Self::Ne
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Self::LogicalAnd | Self::LogicalOr | Self::LogicalXor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::PreInc | Self::PostInc => "++",
            Self::PreDec | Self::PostDec => "--",
        }
    }

    /// `++` / `--`; the operand is written
    pub fn is_side_effecting(&self) -> bool {
        matches!(
            self,
            Self::PreInc | Self::PreDec | Self::PostInc | Self::PostDec
        )
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, Self::PostInc | Self::PostDec)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Ident(String),
    Literal(Literal),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Struct field or vector swizzle: `base.member`
    Member {
        base: Box<Expr>,
        member: String,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    /// Function call or type constructor
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Paren(Box<Expr>),
}

impl Expr {
    /// Direct sub-expressions in evaluation (pre-order) order
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Ident(_) | Expr::Literal(_) => Vec::new(),
            Expr::Binary { lhs, rhs, .. } => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Unary { operand, .. } => vec![operand.as_ref()],
            Expr::Member { base, .. } => vec![base.as_ref()],
            Expr::Index { base, index } => vec![base.as_ref(), index.as_ref()],
            Expr::Call { args, .. } => args.iter().collect(),
            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => vec![cond.as_ref(), then_expr.as_ref(), else_expr.as_ref()],
            Expr::Paren(inner) => vec![inner.as_ref()],
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut Expr> {
        match self {
            Expr::Ident(_) | Expr::Literal(_) => Vec::new(),
            Expr::Binary { lhs, rhs, .. } => vec![lhs.as_mut(), rhs.as_mut()],
            Expr::Unary { operand, .. } => vec![operand.as_mut()],
            Expr::Member { base, .. } => vec![base.as_mut()],
            Expr::Index { base, index } => vec![base.as_mut(), index.as_mut()],
            Expr::Call { args, .. } => args.iter_mut().collect(),
            Expr::Ternary {
                cond,
                then_expr,
                else_expr,
            } => vec![cond.as_mut(), then_expr.as_mut(), else_expr.as_mut()],
            Expr::Paren(inner) => vec![inner.as_mut()],
        }
    }

    /// Number of nodes in this subtree (including itself)
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::node_count)
            .sum::<usize>()
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }
}
