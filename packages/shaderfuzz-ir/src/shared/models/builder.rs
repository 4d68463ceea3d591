//! AST construction helpers
//!
//! Drivers that bypass the parser and most tests build programs with these.
//!
//! ```rust,ignore
//! use shaderfuzz_ir::shared::models::builder::*;
//!
//! // void main() { int j = 0; j += 1; }
//! let main = function(Type::Void, "main", vec![], vec![
//!     decl_init_stmt(Type::int(), "j", int(0)),
//!     expr_stmt(binary(BinaryOp::AddAssign, ident("j"), int(1))),
//! ]);
//! ```

use super::ast::*;
use super::types::Type;
use super::version::ShadingLanguageVersion;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Expressions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub fn ident(name: &str) -> Expr {
    Expr::Ident(name.to_string())
}

pub fn int(value: i64) -> Expr {
    Expr::Literal(Literal::Int(value))
}

pub fn uint(value: u64) -> Expr {
    Expr::Literal(Literal::Uint(value))
}

pub fn float(value: f64) -> Expr {
    Expr::Literal(Literal::Float(value))
}

pub fn boolean(value: bool) -> Expr {
    Expr::Literal(Literal::Bool(value))
}

pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn assign(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinaryOp::Assign, lhs, rhs)
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand),
    }
}

/// `base.member`; used for swizzles and struct fields alike
pub fn swizzle(base: Expr, member: &str) -> Expr {
    Expr::Member {
        base: Box::new(base),
        member: member.to_string(),
    }
}

pub fn index(base: Expr, index: Expr) -> Expr {
    Expr::Index {
        base: Box::new(base),
        index: Box::new(index),
    }
}

pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: callee.to_string(),
        args,
    }
}

pub fn paren(inner: Expr) -> Expr {
    Expr::Paren(Box::new(inner))
}

pub fn ternary(cond: Expr, then_expr: Expr, else_expr: Expr) -> Expr {
    Expr::Ternary {
        cond: Box::new(cond),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Declarations
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub fn var(name: &str) -> VariableDeclInfo {
    VariableDeclInfo {
        name: name.to_string(),
        array_size: None,
        initializer: None,
    }
}

pub fn var_init(name: &str, initializer: Expr) -> VariableDeclInfo {
    VariableDeclInfo {
        name: name.to_string(),
        array_size: None,
        initializer: Some(initializer),
    }
}

pub fn var_array(name: &str, size: u32) -> VariableDeclInfo {
    VariableDeclInfo {
        name: name.to_string(),
        array_size: Some(size),
        initializer: None,
    }
}

pub fn decl(base_type: Type, vars: Vec<VariableDeclInfo>) -> VariablesDeclaration {
    VariablesDeclaration {
        qualifiers: Vec::new(),
        base_type,
        vars,
    }
}

pub fn qualified_decl(
    qualifiers: Vec<TypeQualifier>,
    base_type: Type,
    vars: Vec<VariableDeclInfo>,
) -> VariablesDeclaration {
    VariablesDeclaration {
        qualifiers,
        base_type,
        vars,
    }
}

pub fn param(ty: Type, name: &str) -> Parameter {
    Parameter {
        name: Some(name.to_string()),
        ty,
        qualifier: ParameterQualifier::In,
        array_size: None,
    }
}

pub fn out_param(ty: Type, name: &str, qualifier: ParameterQualifier) -> Parameter {
    Parameter {
        name: Some(name.to_string()),
        ty,
        qualifier,
        array_size: None,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Statements
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub fn decl_stmt(base_type: Type, name: &str) -> Stmt {
    Stmt::Decl(decl(base_type, vec![var(name)]))
}

pub fn decl_init_stmt(base_type: Type, name: &str, initializer: Expr) -> Stmt {
    Stmt::Decl(decl(base_type, vec![var_init(name, initializer)]))
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::Block(Block::new(stmts))
}

pub fn if_then(cond: Expr, then_branch: Stmt) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
}

pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Stmt) -> Stmt {
    Stmt::If {
        cond,
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    }
}

pub fn for_loop(init: Stmt, cond: Option<Expr>, increment: Option<Expr>, body: Stmt) -> Stmt {
    Stmt::For {
        init: Box::new(init),
        cond,
        increment,
        body: Box::new(body),
    }
}

pub fn while_loop(cond: Expr, body: Stmt) -> Stmt {
    Stmt::While {
        cond,
        body: Box::new(body),
    }
}

pub fn ret(value: Option<Expr>) -> Stmt {
    Stmt::Return(value)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top level
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub fn function(
    return_type: Type,
    name: &str,
    parameters: Vec<Parameter>,
    stmts: Vec<Stmt>,
) -> Declaration {
    Declaration::Function(FunctionDefinition {
        prototype: FunctionPrototype {
            name: name.to_string(),
            return_type,
            parameters,
        },
        body: Block {
            stmts,
            introduces_scope: false,
        },
    })
}

pub fn global(base_type: Type, vars: Vec<VariableDeclInfo>) -> Declaration {
    Declaration::Variables(decl(base_type, vars))
}

pub fn uniform(base_type: Type, name: &str) -> Declaration {
    Declaration::Variables(qualified_decl(
        vec![TypeQualifier::Uniform],
        base_type,
        vec![var(name)],
    ))
}

pub fn program(version: ShadingLanguageVersion, declarations: Vec<Declaration>) -> Program {
    Program::new(version, declarations)
}
