//! Dead global elimination
//!
//! Globals start out unused; a reference from a function body or a local
//! initializer makes its target live, and a live global's initializer makes
//! the globals it reads live in turn. The injection switch is always live.
//! Unused members are swept from their groups and emptied groups disappear;
//! everything else keeps its order.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::features::dead_globals::domain::StripReport;
use crate::features::scope_resolution::{walk_program, DeclLocation, DeclSite, ExprSite, ScopeListener};
use crate::shared::constants::globals;
use crate::shared::models::{DeclId, Declaration, Expr, Program, Symbol, SymbolKind};
use crate::shared::utils::ScopeTree;

/// Where one global variable is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GlobalSlot {
    declaration: usize,
    member: usize,
}

#[derive(Default)]
struct GlobalUsage {
    slots: FxHashMap<DeclId, GlobalSlot>,
    /// Globals referenced from outside any global initializer
    roots: FxHashSet<DeclId>,
    /// Global -> globals its initializer reads
    reads: FxHashMap<DeclId, Vec<DeclId>>,
}

impl ScopeListener for GlobalUsage {
    fn on_declare(&mut self, symbol: &Symbol, site: &DeclSite, _scope: &ScopeTree) {
        if let DeclLocation::Global {
            declaration,
            member,
        } = site.location
        {
            self.slots.insert(symbol.id, GlobalSlot { declaration, member });
        }
    }

    fn on_expr(&mut self, expr: &Expr, site: &ExprSite, scope: &ScopeTree) {
        let Expr::Ident(name) = expr else {
            return;
        };
        let Some(symbol) = scope.lookup(name) else {
            return;
        };
        if symbol.kind != SymbolKind::Global {
            return;
        }
        // Global initializers are the only expressions walked at global scope
        match site.initializer_of {
            Some(reader) if scope.at_global_scope() => {
                self.reads.entry(reader).or_default().push(symbol.id);
            }
            _ => {
                self.roots.insert(symbol.id);
            }
        }
    }
}

impl GlobalUsage {
    fn live(&self, always_kept: impl IntoIterator<Item = DeclId>) -> FxHashSet<DeclId> {
        let mut live = FxHashSet::default();
        let mut pending: Vec<DeclId> = self.roots.iter().copied().chain(always_kept).collect();
        while let Some(id) = pending.pop() {
            if live.insert(id) {
                if let Some(reads) = self.reads.get(&id) {
                    pending.extend(reads.iter().copied());
                }
            }
        }
        live
    }
}

/// Removes global variables nothing reads
#[derive(Debug, Clone)]
pub struct DeadGlobalEliminator {
    injection_switch: String,
}

impl Default for DeadGlobalEliminator {
    fn default() -> Self {
        Self::new(globals::INJECTION_SWITCH)
    }
}

impl DeadGlobalEliminator {
    pub fn new(injection_switch: impl Into<String>) -> Self {
        Self {
            injection_switch: injection_switch.into(),
        }
    }

    pub fn injection_switch(&self) -> &str {
        &self.injection_switch
    }

    pub fn strip(&self, program: &mut Program) -> StripReport {
        let mut usage = GlobalUsage::default();
        walk_program(program, &mut usage);

        let always_kept: Vec<DeclId> = usage
            .slots
            .iter()
            .filter(|(_, slot)| {
                member_name(program, **slot) == Some(self.injection_switch.as_str())
            })
            .map(|(id, _)| *id)
            .collect();
        let live = usage.live(always_kept);
        let dead: FxHashSet<GlobalSlot> = usage
            .slots
            .iter()
            .filter(|(id, _)| !live.contains(*id))
            .map(|(_, slot)| *slot)
            .collect();

        let mut report = StripReport::default();
        let declarations = std::mem::take(&mut program.declarations);
        for (index, mut decl) in declarations.into_iter().enumerate() {
            if let Declaration::Variables(group) = &mut decl {
                let members = std::mem::take(&mut group.vars);
                for (member, var) in members.into_iter().enumerate() {
                    if dead.contains(&GlobalSlot {
                        declaration: index,
                        member,
                    }) {
                        debug!(name = %var.name, "Removing unused global");
                        report.removed.push(var.name);
                    } else {
                        group.vars.push(var);
                    }
                }
                if group.vars.is_empty() {
                    report.removed_groups += 1;
                    continue;
                }
            }
            program.declarations.push(decl);
        }

        info!(
            removed = report.removed.len(),
            removed_groups = report.removed_groups,
            "Dead global elimination finished"
        );
        report
    }
}

fn member_name(program: &Program, slot: GlobalSlot) -> Option<&str> {
    match program.declarations.get(slot.declaration)? {
        Declaration::Variables(group) => group.vars.get(slot.member).map(|var| var.name.as_str()),
        _ => None,
    }
}

/// Strip unused globals, keeping `injection_switch`
pub fn strip_unused_globals(program: &mut Program, injection_switch: &str) -> StripReport {
    DeadGlobalEliminator::new(injection_switch).strip(program)
}
