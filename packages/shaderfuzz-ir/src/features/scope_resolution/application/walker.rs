//! Scoped traversal shared by every pass
//!
//! One depth-first walk over the program, threading a persistent
//! `ScopeTree` downward by value. Scoping rules:
//! - a function opens one frame for its parameters; its body shares it
//! - a block with `introduces_scope` opens a frame
//! - a `for` statement opens a frame around its header and body
//! - an initializer is resolved before its own variable is declared

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::features::scope_resolution::domain::{DeclLocation, DeclSite, ExprSite, ForHeaderSlot};
use crate::features::scope_resolution::ports::ScopeListener;
use crate::shared::constants::builtins;
use crate::shared::models::{
    DeclId, Declaration, Expr, FunctionDefinition, ParameterQualifier, Program, Stmt, Symbol,
    SymbolKind, Type, VariablesDeclaration,
};
use crate::shared::utils::{ScopeTree, StmtPath};

/// Context inherited from enclosing expressions and statements
#[derive(Debug, Clone, Copy, Default)]
struct ExprContext {
    lvalue: bool,
    const_context: bool,
    for_header: Option<ForHeaderSlot>,
    initializer_of: Option<DeclId>,
    function: Option<usize>,
}

/// Where the members of a variable group are declared
enum GroupPlacement {
    Global(usize),
    Block(StmtPath),
    Nested(StmtPath),
}

impl GroupPlacement {
    fn location(&self, member: usize) -> DeclLocation {
        match self {
            Self::Global(declaration) => DeclLocation::Global {
                declaration: *declaration,
                member,
            },
            Self::Block(path) => DeclLocation::Block {
                path: path.clone(),
                member,
            },
            Self::Nested(path) => DeclLocation::Nested {
                path: path.clone(),
                member,
            },
        }
    }
}

/// Depth-first scope-aware traversal reporting to a `ScopeListener`
///
/// Expression ordinals follow the same pre-order as
/// `shared::utils::ast_visit`, so a recorded ordinal can be used to reach
/// the expression again through `expr_at_mut`.
pub struct ScopedWalker<'p> {
    program: &'p Program,
    /// Parameter qualifiers of every program-declared function, per overload
    signatures: FxHashMap<&'p str, Vec<Vec<ParameterQualifier>>>,
    next_ordinal: usize,
    next_decl: usize,
}

impl<'p> ScopedWalker<'p> {
    pub fn new(program: &'p Program) -> Self {
        let mut signatures: FxHashMap<&'p str, Vec<Vec<ParameterQualifier>>> =
            FxHashMap::default();
        for decl in &program.declarations {
            let prototype = match decl {
                Declaration::Function(function) => &function.prototype,
                Declaration::Prototype(prototype) => prototype,
                Declaration::Variables(_) => continue,
            };
            let qualifiers: Vec<ParameterQualifier> =
                prototype.parameters.iter().map(|p| p.qualifier).collect();
            let overloads = signatures.entry(prototype.name.as_str()).or_default();
            if !overloads.contains(&qualifiers) {
                overloads.push(qualifiers);
            }
        }

        Self {
            program,
            signatures,
            next_ordinal: 0,
            next_decl: 0,
        }
    }

    /// Walk the whole program once
    pub fn walk(mut self, listener: &mut dyn ScopeListener) {
        let mut scope = ScopeTree::new();
        let program = self.program;

        for (index, decl) in program.declarations.iter().enumerate() {
            match decl {
                Declaration::Variables(group) => {
                    let ctx = ExprContext {
                        const_context: program.version.global_initializers_must_be_const(),
                        ..ExprContext::default()
                    };
                    scope = self.walk_group(
                        group,
                        scope,
                        &GroupPlacement::Global(index),
                        ctx,
                        SymbolKind::Global,
                        listener,
                    );
                }
                Declaration::Function(function) => {
                    self.walk_function(index, function, &scope, listener);
                }
                Declaration::Prototype(_) => {}
            }
        }

        debug!(
            expressions = self.next_ordinal,
            declarations = self.next_decl,
            "Scoped walk finished"
        );
    }

    fn allocate_decl(&mut self) -> DeclId {
        let id = DeclId(self.next_decl);
        self.next_decl += 1;
        id
    }

    fn declare(
        &mut self,
        scope: ScopeTree,
        mut symbol: Symbol,
        mut site: DeclSite,
        listener: &mut dyn ScopeListener,
    ) -> ScopeTree {
        symbol.depth = scope.depth();
        site.redeclared = scope.lookup_in_current_frame(&symbol.name).is_some();
        listener.on_declare(&symbol, &site, &scope);

        match scope.declare(symbol.clone()) {
            Ok(next) => next,
            Err(err) => {
                warn!(error = %err, "Tolerating redeclaration in input program");
                scope.shadow(symbol)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Declarations
    // ═══════════════════════════════════════════════════════════════════════

    fn walk_group(
        &mut self,
        group: &VariablesDeclaration,
        mut scope: ScopeTree,
        placement: &GroupPlacement,
        ctx: ExprContext,
        kind: SymbolKind,
        listener: &mut dyn ScopeListener,
    ) -> ScopeTree {
        let is_const = group.is_const();

        for (member, var) in group.vars.iter().enumerate() {
            let id = self.allocate_decl();
            if let Some(init) = &var.initializer {
                let init_ctx = ExprContext {
                    const_context: ctx.const_context || is_const,
                    initializer_of: Some(id),
                    ..ctx
                };
                self.walk_expr(init, None, &scope, init_ctx, listener);
            }

            let symbol = Symbol::new(&var.name, id, group.member_type(var), kind);
            let site = DeclSite {
                id,
                location: placement.location(member),
                is_const,
                redeclared: false,
            };
            scope = self.declare(scope, symbol, site, listener);
        }
        scope
    }

    fn walk_function(
        &mut self,
        index: usize,
        function: &FunctionDefinition,
        scope: &ScopeTree,
        listener: &mut dyn ScopeListener,
    ) {
        let mut frame = scope.enter_scope();

        for (param_index, param) in function.prototype.parameters.iter().enumerate() {
            let Some(name) = &param.name else {
                continue;
            };
            let ty = match param.array_size {
                Some(size) => Type::Array(Box::new(param.ty.clone()), Some(size)),
                None => param.ty.clone(),
            };
            let id = self.allocate_decl();
            let site = DeclSite {
                id,
                location: DeclLocation::Parameter {
                    function: index,
                    index: param_index,
                },
                is_const: false,
                redeclared: false,
            };
            frame = self.declare(
                frame,
                Symbol::new(name, id, ty, SymbolKind::Parameter),
                site,
                listener,
            );
        }

        if function.body.introduces_scope {
            frame = frame.enter_scope();
        }
        let ctx = ExprContext {
            function: Some(index),
            ..ExprContext::default()
        };
        self.walk_stmts(
            &function.body.stmts,
            &StmtPath::new(index),
            frame,
            ctx,
            listener,
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn walk_stmts(
        &mut self,
        stmts: &[Stmt],
        parent: &StmtPath,
        mut scope: ScopeTree,
        ctx: ExprContext,
        listener: &mut dyn ScopeListener,
    ) -> ScopeTree {
        for (slot, stmt) in stmts.iter().enumerate() {
            scope = self.walk_stmt(stmt, &parent.child(slot), true, scope, ctx, listener);
        }
        scope
    }

    /// Walk one statement; returns the scope following it
    fn walk_stmt(
        &mut self,
        stmt: &Stmt,
        path: &StmtPath,
        in_block: bool,
        scope: ScopeTree,
        ctx: ExprContext,
        listener: &mut dyn ScopeListener,
    ) -> ScopeTree {
        match stmt {
            Stmt::Block(block) => {
                if block.introduces_scope {
                    self.walk_stmts(&block.stmts, path, scope.enter_scope(), ctx, listener);
                    scope
                } else {
                    self.walk_stmts(&block.stmts, path, scope, ctx, listener)
                }
            }
            Stmt::Decl(group) => {
                let placement = if in_block {
                    GroupPlacement::Block(path.clone())
                } else {
                    GroupPlacement::Nested(path.clone())
                };
                self.walk_group(group, scope, &placement, ctx, SymbolKind::Local, listener)
            }
            Stmt::Expr(expr) | Stmt::Return(Some(expr)) => {
                self.walk_expr(expr, None, &scope, ctx, listener);
                scope
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.walk_expr(cond, None, &scope, ctx, listener);
                self.walk_stmt(then_branch, &path.child(0), false, scope.clone(), ctx, listener);
                if let Some(else_branch) = else_branch {
                    self.walk_stmt(else_branch, &path.child(1), false, scope.clone(), ctx, listener);
                }
                scope
            }
            Stmt::For {
                init,
                cond,
                increment,
                body,
            } => {
                let header = scope.enter_scope();
                let header = self.walk_stmt(init, &path.child(0), false, header, ctx, listener);
                if let Some(cond) = cond {
                    let guard_ctx = ExprContext {
                        for_header: Some(ForHeaderSlot::Guard),
                        ..ctx
                    };
                    self.walk_expr(cond, None, &header, guard_ctx, listener);
                }
                if let Some(increment) = increment {
                    let increment_ctx = ExprContext {
                        for_header: Some(ForHeaderSlot::Increment),
                        ..ctx
                    };
                    self.walk_expr(increment, None, &header, increment_ctx, listener);
                }
                self.walk_stmt(body, &path.child(1), false, header, ctx, listener);
                scope
            }
            Stmt::While { cond, body } => {
                self.walk_expr(cond, None, &scope, ctx, listener);
                self.walk_stmt(body, &path.child(0), false, scope.clone(), ctx, listener);
                scope
            }
            Stmt::DoWhile { body, cond } => {
                self.walk_stmt(body, &path.child(0), false, scope.clone(), ctx, listener);
                self.walk_expr(cond, None, &scope, ctx, listener);
                scope
            }
            Stmt::Return(None) | Stmt::Break | Stmt::Continue | Stmt::Discard | Stmt::Empty => {
                scope
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    /// Argument `index` of a call with `arity` arguments is written by the callee
    fn writes_argument(&self, callee: &str, arity: usize, index: usize) -> bool {
        match self.signatures.get(callee) {
            Some(overloads) => overloads
                .iter()
                .filter(|qualifiers| qualifiers.len() == arity)
                .any(|qualifiers| qualifiers[index].writes_argument()),
            None => builtins::OUT_ARGUMENTS
                .iter()
                .any(|(name, written)| *name == callee && written.contains(&index)),
        }
    }

    fn walk_expr(
        &mut self,
        expr: &Expr,
        parent: Option<usize>,
        scope: &ScopeTree,
        ctx: ExprContext,
        listener: &mut dyn ScopeListener,
    ) {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        let site = ExprSite {
            ordinal,
            parent,
            lvalue: ctx.lvalue,
            const_context: ctx.const_context,
            for_header: ctx.for_header,
            initializer_of: ctx.initializer_of,
            function: ctx.function,
        };
        listener.on_expr(expr, &site, scope);

        let read = ExprContext {
            lvalue: false,
            ..ctx
        };
        let written = ExprContext {
            lvalue: true,
            ..ctx
        };
        let me = Some(ordinal);

        match expr {
            Expr::Binary { op, lhs, rhs } if op.is_assignment() => {
                self.walk_expr(lhs, me, scope, written, listener);
                self.walk_expr(rhs, me, scope, read, listener);
            }
            Expr::Unary { op, operand } if op.is_side_effecting() => {
                self.walk_expr(operand, me, scope, written, listener);
            }
            // The base of a written access is itself written
            Expr::Member { base, .. } | Expr::Paren(base) => {
                self.walk_expr(base, me, scope, ctx, listener);
            }
            Expr::Index { base, index } => {
                self.walk_expr(base, me, scope, ctx, listener);
                self.walk_expr(index, me, scope, read, listener);
            }
            Expr::Call { callee, args } => {
                for (index, arg) in args.iter().enumerate() {
                    let arg_ctx = if self.writes_argument(callee, args.len(), index) {
                        written
                    } else {
                        read
                    };
                    self.walk_expr(arg, me, scope, arg_ctx, listener);
                }
            }
            _ => {
                for child in expr.children() {
                    self.walk_expr(child, me, scope, read, listener);
                }
            }
        }
    }
}

/// Walk `program` once, reporting every declaration and expression to `listener`
pub fn walk_program(program: &Program, listener: &mut dyn ScopeListener) {
    ScopedWalker::new(program).walk(listener);
}
