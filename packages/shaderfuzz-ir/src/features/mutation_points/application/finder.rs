//! Mutation point discovery
//!
//! A point is every expression that is a direct operand of another
//! expression and is only read. Excluded:
//! - l-value positions (assignment targets, `++`/`--` operands, `out`/`inout` arguments)
//! - const contexts
//! - `for` guards and increments when the version restricts loop bounds

use tracing::{debug, info};

use crate::config::MutationConfig;
use crate::features::mutation_points::domain::{IdentityKind, MutationPoint};
use crate::features::scope_resolution::{walk_program, ExprSite, ScopeListener};
use crate::infrastructure::DeclaredTypeOracle;
use crate::shared::models::{Expr, Program};
use crate::shared::ports::TypeOracle;
use crate::shared::utils::ScopeTree;

struct MutationPointCollector<'a> {
    oracle: &'a dyn TypeOracle,
    config: &'a MutationConfig,
    restricts_loop_bounds: bool,
    points: Vec<MutationPoint>,
}

impl MutationPointCollector<'_> {
    fn excluded(&self, site: &ExprSite) -> Option<&'static str> {
        if !site.is_operand() {
            Some("statement level")
        } else if site.lvalue {
            Some("l-value")
        } else if site.const_context {
            Some("const context")
        } else if self.restricts_loop_bounds && site.for_header.is_some() {
            Some("loop header")
        } else {
            None
        }
    }
}

impl ScopeListener for MutationPointCollector<'_> {
    fn on_expr(&mut self, expr: &Expr, site: &ExprSite, scope: &ScopeTree) {
        if let Some(reason) = self.excluded(site) {
            if site.is_operand() {
                debug!(ordinal = site.ordinal, expr = %expr, reason, "Not a mutation point");
            }
            return;
        }

        let ty = self.oracle.type_of(expr, scope);
        let identities = IdentityKind::legal_for(ty.as_ref(), self.config);
        if identities.is_empty() {
            debug!(ordinal = site.ordinal, expr = %expr, reason = "no enabled identity", "Not a mutation point");
            return;
        }

        self.points.push(MutationPoint {
            ordinal: site.ordinal,
            snapshot: expr.clone(),
            ty,
            identities,
        });
    }
}

/// Finds mutation points in pre-order
#[derive(Debug, Clone, Default)]
pub struct MutationPointFinder {
    config: MutationConfig,
}

impl MutationPointFinder {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Scan with the declared-type oracle
    pub fn find(&self, program: &Program) -> Vec<MutationPoint> {
        self.find_with_oracle(program, &DeclaredTypeOracle::new(program))
    }

    pub fn find_with_oracle(&self, program: &Program, oracle: &dyn TypeOracle) -> Vec<MutationPoint> {
        let mut collector = MutationPointCollector {
            oracle,
            config: &self.config,
            restricts_loop_bounds: program.version.restricts_loop_bounds(),
            points: Vec::new(),
        };
        walk_program(program, &mut collector);

        info!(
            version = %program.version,
            points = collector.points.len(),
            "Mutation point scan finished"
        );
        collector.points
    }
}
