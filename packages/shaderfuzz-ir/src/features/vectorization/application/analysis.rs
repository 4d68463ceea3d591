//! Merged vector analysis
//!
//! One scoped walk collects, for every merged vector and each of its
//! constituents, everything extraction depends on:
//! - declarations of the constituent name in the vector's own frame
//! - references to an outer variable of that name inside the vector's scope,
//!   including initializers of earlier members of the vector's declaration
//! - pure accesses (`v.<swizzle>` within the constituent's components) and
//!   what the constituent name resolves to at each of them
//!
//! A constituent is extractable when it has at least one pure access and
//! introducing (or reusing) a variable of its name changes what no other
//! reference denotes.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::features::scope_resolution::{DeclLocation, DeclSite, ExprSite, ScopeListener};
use crate::features::vectorization::domain::{
    Constituent, MergeProvenance, VectorizationReductionOpportunity,
};
use crate::shared::models::{DeclId, Expr, ScalarKind, Swizzle, Symbol, SymbolKind, Type};
use crate::shared::ports::TypeOracle;
use crate::shared::utils::ScopeTree;

/// Declaration of the constituent name in the merged vector's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SameFrame {
    Absent,
    Compatible(DeclId),
    Incompatible,
}

/// What the constituent name denotes at an access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Undeclared,
    /// Declared in a frame enclosing the vector's
    Outer,
    SameFrame(DeclId),
    /// Declared in a frame nested inside the vector's
    Nested,
}

/// One `vector.swizzle` access to rewrite
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PureAccess {
    pub ordinal: usize,
    pub snapshot: Expr,
    pub replacement: Expr,
}

#[derive(Debug)]
struct ConstituentFacts {
    constituent: Constituent,
    ty: Type,
    same_frame: SameFrame,
    captures_outer: bool,
    type_mismatch: bool,
    accesses: Vec<(PureAccess, Resolution)>,
}

#[derive(Debug)]
struct MergedVector {
    id: DeclId,
    name: String,
    depth: usize,
    location: DeclLocation,
    occurrence: usize,
    width: u8,
    /// Used in a way no swizzle rewrite can follow (indexing, field access)
    opaque_use: bool,
    constituents: Vec<ConstituentFacts>,
}

/// Everything needed to extract one constituent
#[derive(Debug, Clone)]
pub(crate) struct ExtractionPlan {
    pub opportunity: VectorizationReductionOpportunity,
    /// Pure accesses in pre-order
    pub accesses: Vec<PureAccess>,
    /// Declaration to insert the constituent before; `None` reuses a declaration of the same frame
    pub insert_before: Option<DeclLocation>,
}

/// Collects merged vector facts during one walk
pub(crate) struct MergeAnalysis<'a> {
    prefix: &'a str,
    oracle: &'a dyn TypeOracle,
    vectors: Vec<MergedVector>,
    by_id: FxHashMap<DeclId, usize>,
    /// `b.xx` may stand for a repeated width-1 constituent
    scalar_swizzles: bool,
    /// Identifiers read in each initializer: name and depth of the declaration they resolve to
    initializer_refs: FxHashMap<DeclId, Vec<(String, Option<usize>)>>,
    /// Location of every declaration seen so far
    locations: FxHashMap<DeclId, DeclLocation>,
}

impl<'a> MergeAnalysis<'a> {
    pub fn new(prefix: &'a str, oracle: &'a dyn TypeOracle, scalar_swizzles: bool) -> Self {
        Self {
            prefix,
            oracle,
            scalar_swizzles,
            vectors: Vec::new(),
            by_id: FxHashMap::default(),
            initializer_refs: FxHashMap::default(),
            locations: FxHashMap::default(),
        }
    }

    fn classify(symbol: &Symbol, ty: &Type) -> SameFrame {
        if symbol.ty == *ty {
            SameFrame::Compatible(symbol.id)
        } else {
            SameFrame::Incompatible
        }
    }

    /// A merged vector is declared
    fn track(&mut self, symbol: &Symbol, site: &DeclSite, scope: &ScopeTree) {
        let Type::Vector { elem, width } = &symbol.ty else {
            return;
        };
        let (elem, width) = (*elem, *width);
        if symbol.kind == SymbolKind::Parameter {
            return;
        }
        let provenance = match MergeProvenance::decode(&symbol.name, self.prefix) {
            Ok(provenance) => provenance,
            Err(err) => {
                if symbol.name.starts_with(self.prefix) {
                    debug!(name = %symbol.name, error = %err, "Not a merged vector");
                }
                return;
            }
        };
        if provenance.span() > width {
            debug!(name = %symbol.name, width, "Merged layout exceeds vector width");
            return;
        }

        let constituents = provenance
            .constituents
            .into_iter()
            .map(|constituent| {
                let ty = constituent.ty(elem);
                let same_frame = scope
                    .lookup_in_current_frame(&constituent.name)
                    .map_or(SameFrame::Absent, |earlier| Self::classify(earlier, &ty));
                let captures_outer = self.group_captures(symbol, &site.location, &constituent.name);
                ConstituentFacts {
                    constituent,
                    ty,
                    same_frame,
                    captures_outer,
                    type_mismatch: false,
                    accesses: Vec::new(),
                }
            })
            .collect();

        let occurrence = self
            .vectors
            .iter()
            .filter(|vector| vector.name == symbol.name)
            .count();
        self.by_id.insert(symbol.id, self.vectors.len());
        self.vectors.push(MergedVector {
            id: symbol.id,
            name: symbol.name.clone(),
            depth: symbol.depth,
            location: site.location.clone(),
            occurrence,
            width,
            opaque_use: false,
            constituents,
        });
    }

    /// An initializer of the vector's group, up to and including its own,
    /// reads an outer variable named `name`.
    ///
    /// The constituent is declared ahead of the whole group, so those reads
    /// would resolve to it.
    fn group_captures(&self, symbol: &Symbol, location: &DeclLocation, name: &str) -> bool {
        self.initializer_refs.iter().any(|(id, refs)| {
            let in_group = *id == symbol.id
                || self
                    .locations
                    .get(id)
                    .is_some_and(|earlier| earlier.precedes_in_group(location));
            in_group
                && refs
                    .iter()
                    .any(|(read, depth)| read == name && depth.is_some_and(|d| d < symbol.depth))
        })
    }

    fn record_access(
        &mut self,
        vector: usize,
        access: &Expr,
        member: &str,
        site: &ExprSite,
        scope: &ScopeTree,
    ) {
        let oracle = self.oracle;
        let scalar_swizzles = self.scalar_swizzles;
        let merged = &mut self.vectors[vector];
        let Some(swizzle) = Swizzle::parse(member, merged.width) else {
            merged.opaque_use = true;
            return;
        };
        let depth = merged.depth;

        for facts in &mut merged.constituents {
            let Constituent {
                name,
                offset,
                width,
            } = &facts.constituent;
            if !swizzle.within_range(*offset, *width) {
                continue;
            }

            let replacement = if swizzle.is_exact_range(*offset, *width) {
                if oracle.type_of(access, scope).as_ref() != Some(&facts.ty) {
                    facts.type_mismatch = true;
                }
                Expr::Ident(name.clone())
            } else if *width == 1 && !scalar_swizzles {
                // `m.xx` over a scalar constituent: splat instead of `b.xx`
                let elem = facts.ty.element().unwrap_or(ScalarKind::Float);
                Expr::Call {
                    callee: Type::vector(elem, swizzle.len() as u8).to_string(),
                    args: vec![Expr::Ident(name.clone())],
                }
            } else {
                match swizzle.shifted(*offset) {
                    Some(shifted) => Expr::Member {
                        base: Box::new(Expr::Ident(name.clone())),
                        member: shifted,
                    },
                    None => continue,
                }
            };

            let resolution = match scope.lookup(name) {
                None => Resolution::Undeclared,
                Some(symbol) if symbol.depth < depth => Resolution::Outer,
                Some(symbol) if symbol.depth == depth => Resolution::SameFrame(symbol.id),
                Some(_) => Resolution::Nested,
            };
            facts.accesses.push((
                PureAccess {
                    ordinal: site.ordinal,
                    snapshot: access.clone(),
                    replacement,
                },
                resolution,
            ));
        }
    }

    /// Decide every constituent; extractable ones become plans
    pub fn into_plans(self) -> Vec<ExtractionPlan> {
        let mut plans = Vec::new();
        for vector in self.vectors {
            for facts in vector.constituents.iter() {
                match Self::verdict(&vector, facts) {
                    Ok(insert_before) => plans.push(ExtractionPlan {
                        opportunity: VectorizationReductionOpportunity {
                            vector_name: vector.name.clone(),
                            component_name: facts.constituent.name.clone(),
                            component_type: facts.ty.clone(),
                            occurrence: vector.occurrence,
                        },
                        accesses: facts.accesses.iter().map(|(a, _)| a.clone()).collect(),
                        insert_before,
                    }),
                    Err(reason) => debug!(
                        vector = %vector.name,
                        component = %facts.constituent.name,
                        reason,
                        "Constituent not extractable"
                    ),
                }
            }
        }
        plans
    }

    fn verdict(
        vector: &MergedVector,
        facts: &ConstituentFacts,
    ) -> Result<Option<DeclLocation>, &'static str> {
        if vector.opaque_use {
            return Err("merged vector used without a swizzle");
        }
        if facts.same_frame == SameFrame::Incompatible {
            return Err("name declared with another type in the same scope");
        }
        if facts.type_mismatch {
            return Err("access type differs from constituent type");
        }
        if facts.accesses.is_empty() {
            return Err("no pure access");
        }

        let resolutions = || facts.accesses.iter().map(|(_, resolution)| *resolution);
        match facts.same_frame {
            SameFrame::Compatible(id) => {
                if resolutions().all(|r| r == Resolution::SameFrame(id)) {
                    Ok(None)
                } else {
                    Err("access not covered by the existing declaration")
                }
            }
            _ => {
                if facts.captures_outer {
                    return Err("would capture references to an outer variable");
                }
                if !resolutions().all(|r| matches!(r, Resolution::Undeclared | Resolution::Outer)) {
                    return Err("name shadowed at an access");
                }
                if !vector.location.accepts_sibling() {
                    return Err("declaration cannot take a sibling");
                }
                Ok(Some(vector.location.clone()))
            }
        }
    }
}

impl ScopeListener for MergeAnalysis<'_> {
    fn on_declare(&mut self, symbol: &Symbol, site: &DeclSite, scope: &ScopeTree) {
        let depth = scope.depth();
        for vector in &mut self.vectors {
            if vector.depth != depth || !scope.binds(vector.id) {
                continue;
            }
            for facts in &mut vector.constituents {
                if facts.constituent.name != symbol.name {
                    continue;
                }
                facts.same_frame = match facts.same_frame {
                    SameFrame::Absent => Self::classify(symbol, &facts.ty),
                    // Second declaration in one frame: malformed input
                    _ => SameFrame::Incompatible,
                };
            }
        }
        self.locations.insert(symbol.id, site.location.clone());
        self.track(symbol, site, scope);
    }

    fn on_expr(&mut self, expr: &Expr, site: &ExprSite, scope: &ScopeTree) {
        match expr {
            Expr::Ident(name) => {
                let resolved = scope.lookup(name);
                if let Some(id) = site.initializer_of {
                    self.initializer_refs
                        .entry(id)
                        .or_default()
                        .push((name.clone(), resolved.map(|s| s.depth)));
                }
                let Some(resolved) = resolved else {
                    return;
                };
                for vector in &mut self.vectors {
                    if resolved.depth >= vector.depth || !scope.binds(vector.id) {
                        continue;
                    }
                    for facts in &mut vector.constituents {
                        if facts.constituent.name == *name {
                            facts.captures_outer = true;
                        }
                    }
                }
            }
            Expr::Member { base, member } => {
                if let Some(vector) = self.merged_vector(base, scope) {
                    self.record_access(vector, expr, member, site, scope);
                }
            }
            Expr::Index { base, .. } => {
                if let Some(vector) = self.merged_vector(base, scope) {
                    self.vectors[vector].opaque_use = true;
                }
            }
            _ => {}
        }
    }
}

impl MergeAnalysis<'_> {
    /// Index of the merged vector `expr` names directly
    fn merged_vector(&self, expr: &Expr, scope: &ScopeTree) -> Option<usize> {
        let name = expr.as_ident()?;
        let symbol = scope.lookup(name)?;
        self.by_id.get(&symbol.id).copied()
    }
}
