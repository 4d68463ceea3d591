//! Positional addressing into the AST
//!
//! Two addressing schemes are shared by every pass:
//! - expression ordinals: position of an expression in the fixed pre-order
//!   (declarations in order, statement children in `Stmt::child_stmt_mut`
//!   slot order with their own expressions first, expression children in
//!   `Expr::children` order)
//! - statement paths: function index + slots down to a statement
//!
//! Both are only valid for the AST shape they were computed on.

use serde::{Deserialize, Serialize};

use crate::shared::models::{Declaration, Expr, Program, Stmt, VariablesDeclaration};

/// Location of a statement inside a function body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StmtPath {
    /// Index of the function definition in `Program::declarations`
    pub function: usize,
    /// First step indexes the body's statements, later steps are child slots
    pub steps: Vec<usize>,
}

impl StmtPath {
    pub fn new(function: usize) -> Self {
        Self {
            function,
            steps: Vec::new(),
        }
    }

    pub fn child(&self, slot: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(slot);
        Self {
            function: self.function,
            steps,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Expression ordinals
// ═══════════════════════════════════════════════════════════════════════════

/// Expression at `ordinal` in pre-order
pub fn expr_at(program: &Program, ordinal: usize) -> Option<&Expr> {
    exprs_in_order(program).get(ordinal).copied()
}

/// Every expression in pre-order
pub fn exprs_in_order(program: &Program) -> Vec<&Expr> {
    let mut exprs = Vec::new();
    collect_exprs(program, &mut exprs);
    exprs
}

/// Total number of expressions in the program
pub fn count_exprs(program: &Program) -> usize {
    exprs_in_order(program).len()
}

fn collect_exprs<'a>(program: &'a Program, out: &mut Vec<&'a Expr>) {
    for decl in &program.declarations {
        match decl {
            Declaration::Variables(group) => collect_group(group, out),
            Declaration::Function(function) => {
                for stmt in &function.body.stmts {
                    collect_stmt(stmt, out);
                }
            }
            Declaration::Prototype(_) => {}
        }
    }
}

fn collect_group<'a>(group: &'a VariablesDeclaration, out: &mut Vec<&'a Expr>) {
    for var in &group.vars {
        if let Some(init) = &var.initializer {
            collect_expr(init, out);
        }
    }
}

fn collect_stmt<'a>(stmt: &'a Stmt, out: &mut Vec<&'a Expr>) {
    match stmt {
        Stmt::Block(block) => {
            for stmt in &block.stmts {
                collect_stmt(stmt, out);
            }
        }
        Stmt::Decl(group) => collect_group(group, out),
        Stmt::Expr(expr) | Stmt::Return(Some(expr)) => collect_expr(expr, out),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            collect_expr(cond, out);
            collect_stmt(then_branch, out);
            if let Some(else_branch) = else_branch {
                collect_stmt(else_branch, out);
            }
        }
        Stmt::For {
            init,
            cond,
            increment,
            body,
        } => {
            collect_stmt(init, out);
            if let Some(cond) = cond {
                collect_expr(cond, out);
            }
            if let Some(increment) = increment {
                collect_expr(increment, out);
            }
            collect_stmt(body, out);
        }
        Stmt::While { cond, body } => {
            collect_expr(cond, out);
            collect_stmt(body, out);
        }
        Stmt::DoWhile { body, cond } => {
            collect_stmt(body, out);
            collect_expr(cond, out);
        }
        Stmt::Return(None)
        | Stmt::Break
        | Stmt::Continue
        | Stmt::Discard
        | Stmt::Empty => {}
    }
}

fn collect_expr<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    out.push(expr);
    for child in expr.children() {
        collect_expr(child, out);
    }
}

/// Mutable access to the expression at `ordinal` in pre-order
pub fn expr_at_mut(program: &mut Program, ordinal: usize) -> Option<&mut Expr> {
    let mut next = 0;
    for decl in program.declarations.iter_mut() {
        let found = match decl {
            Declaration::Variables(group) => search_group(group, ordinal, &mut next),
            Declaration::Function(function) => {
                search_stmts(&mut function.body.stmts, ordinal, &mut next)
            }
            Declaration::Prototype(_) => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn search_group<'a>(
    group: &'a mut VariablesDeclaration,
    target: usize,
    next: &mut usize,
) -> Option<&'a mut Expr> {
    for var in group.vars.iter_mut() {
        if let Some(init) = var.initializer.as_mut() {
            if let Some(found) = search_expr(init, target, next) {
                return Some(found);
            }
        }
    }
    None
}

fn search_stmts<'a>(
    stmts: &'a mut [Stmt],
    target: usize,
    next: &mut usize,
) -> Option<&'a mut Expr> {
    for stmt in stmts.iter_mut() {
        if let Some(found) = search_stmt(stmt, target, next) {
            return Some(found);
        }
    }
    None
}

fn search_stmt<'a>(stmt: &'a mut Stmt, target: usize, next: &mut usize) -> Option<&'a mut Expr> {
    match stmt {
        Stmt::Block(block) => search_stmts(&mut block.stmts, target, next),
        Stmt::Decl(group) => search_group(group, target, next),
        Stmt::Expr(expr) | Stmt::Return(Some(expr)) => search_expr(expr, target, next),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            if let Some(found) = search_expr(cond, target, next) {
                return Some(found);
            }
            if let Some(found) = search_stmt(then_branch, target, next) {
                return Some(found);
            }
            match else_branch {
                Some(else_branch) => search_stmt(else_branch, target, next),
                None => None,
            }
        }
        Stmt::For {
            init,
            cond,
            increment,
            body,
        } => {
            if let Some(found) = search_stmt(init, target, next) {
                return Some(found);
            }
            if let Some(cond) = cond {
                if let Some(found) = search_expr(cond, target, next) {
                    return Some(found);
                }
            }
            if let Some(increment) = increment {
                if let Some(found) = search_expr(increment, target, next) {
                    return Some(found);
                }
            }
            search_stmt(body, target, next)
        }
        Stmt::While { cond, body } => {
            if let Some(found) = search_expr(cond, target, next) {
                return Some(found);
            }
            search_stmt(body, target, next)
        }
        Stmt::DoWhile { body, cond } => {
            if let Some(found) = search_stmt(body, target, next) {
                return Some(found);
            }
            search_expr(cond, target, next)
        }
        Stmt::Return(None) | Stmt::Break | Stmt::Continue | Stmt::Discard | Stmt::Empty => None,
    }
}

fn search_expr<'a>(expr: &'a mut Expr, target: usize, next: &mut usize) -> Option<&'a mut Expr> {
    if *next == target {
        return Some(expr);
    }
    *next += 1;
    for child in expr.children_mut() {
        if let Some(found) = search_expr(child, target, next) {
            return Some(found);
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Statement paths
// ═══════════════════════════════════════════════════════════════════════════

/// Statement list holding the statement at `path`, plus its index there.
///
/// `None` unless the parent is the function body or a block statement.
pub fn enclosing_stmts_mut<'a>(
    program: &'a mut Program,
    path: &StmtPath,
) -> Option<(&'a mut Vec<Stmt>, usize)> {
    let Declaration::Function(function) = program.declarations.get_mut(path.function)? else {
        return None;
    };
    let (last, parents) = path.steps.split_last()?;
    let Some((first, rest)) = parents.split_first() else {
        return Some((&mut function.body.stmts, *last));
    };

    let mut current = function.body.stmts.get_mut(*first)?;
    for slot in rest {
        current = current.child_stmt_mut(*slot)?;
    }
    match current {
        Stmt::Block(block) => Some((&mut block.stmts, *last)),
        _ => None,
    }
}
