//! Vectorization reduction application
//!
//! Extraction re-runs the analysis on the current program so it works from
//! plans that match the tree exactly, then:
//! 1. rewrites every pure access, last ordinal first so earlier ordinals stay valid
//! 2. declares the constituent right before the merged vector, unless a
//!    declaration of the same type already sits in the vector's frame
//!
//! Writes through the vector become writes to the constituent (`m.x = b`
//! turns into `b = b`); no statement is removed.

use tracing::{debug, error};

use crate::config::ReductionConfig;
use crate::features::scope_resolution::DeclLocation;
use crate::features::vectorization::application::analysis::ExtractionPlan;
use crate::features::vectorization::application::VectorizationFinder;
use crate::features::vectorization::domain::VectorizationReductionOpportunity;
use crate::infrastructure::DeclaredTypeOracle;
use crate::shared::models::{
    Declaration, Program, Stmt, Type, VariableDeclInfo, VariablesDeclaration,
};
use crate::shared::ports::TypeOracle;
use crate::shared::utils::{enclosing_stmts_mut, expr_at_mut};

impl VectorizationReductionOpportunity {
    /// Extract the constituent, typing expressions from declarations.
    ///
    /// # Panics
    /// When a fresh scan of `program` no longer reports this opportunity
    /// (it was already applied, or an overlapping one was).
    pub fn apply(&self, program: &mut Program, config: &ReductionConfig) {
        let oracle = DeclaredTypeOracle::new(program);
        self.apply_with_oracle(program, config, &oracle);
    }

    pub fn apply_with_oracle(
        &self,
        program: &mut Program,
        config: &ReductionConfig,
        oracle: &dyn TypeOracle,
    ) {
        let finder = VectorizationFinder::new(config.clone());
        let plan = finder
            .plans(program, oracle)
            .into_iter()
            .find(|plan| plan.opportunity == *self);
        let Some(plan) = plan else {
            error!(opportunity = %self.describe(), "Stale vectorization reduction opportunity");
            panic!(
                "stale vectorization reduction opportunity: {}",
                self.describe()
            );
        };

        rewrite_accesses(program, &plan);
        if let Some(location) = &plan.insert_before {
            declare_before(program, location, &self.component_name, &self.component_type);
        }

        debug!(
            opportunity = %self.describe(),
            accesses = plan.accesses.len(),
            declared = plan.insert_before.is_some(),
            "Applied vectorization reduction"
        );
    }
}

fn rewrite_accesses(program: &mut Program, plan: &ExtractionPlan) {
    for access in plan.accesses.iter().rev() {
        let Some(target) =
            expr_at_mut(program, access.ordinal).filter(|expr| **expr == access.snapshot)
        else {
            error!(ordinal = access.ordinal, expr = %access.snapshot, "Access moved during extraction");
            panic!(
                "access #{} `{}` no longer present",
                access.ordinal, access.snapshot
            );
        };
        let original = std::mem::replace(target, access.replacement.clone());
        debug!(from = %original, to = %access.replacement, "Rewrote access");
    }
}

fn declare_before(program: &mut Program, location: &DeclLocation, name: &str, ty: &Type) {
    let declaration = VariablesDeclaration {
        qualifiers: Vec::new(),
        base_type: ty.clone(),
        vars: vec![VariableDeclInfo {
            name: name.to_string(),
            array_size: None,
            initializer: None,
        }],
    };

    match location {
        DeclLocation::Global { declaration: index, .. } if *index <= program.declarations.len() => {
            program
                .declarations
                .insert(*index, Declaration::Variables(declaration));
        }
        DeclLocation::Block { path, .. } => match enclosing_stmts_mut(program, path) {
            Some((stmts, index)) if index <= stmts.len() => {
                stmts.insert(index, Stmt::Decl(declaration));
            }
            _ => {
                error!(?location, "Merged vector declaration not found");
                panic!("merged vector declaration not found at {location:?}");
            }
        },
        _ => {
            error!(?location, "Cannot declare a sibling here");
            panic!("cannot declare `{name}` next to {location:?}");
        }
    }
}
