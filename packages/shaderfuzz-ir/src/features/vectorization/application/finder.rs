//! Vectorization reduction opportunity discovery

use tracing::info;

use crate::config::ReductionConfig;
use crate::features::scope_resolution::walk_program;
use crate::features::vectorization::application::analysis::{ExtractionPlan, MergeAnalysis};
use crate::features::vectorization::domain::VectorizationReductionOpportunity;
use crate::infrastructure::DeclaredTypeOracle;
use crate::shared::models::Program;
use crate::shared::ports::TypeOracle;

/// Finds constituents that can be pulled back out of merged vectors
#[derive(Debug, Clone, Default)]
pub struct VectorizationFinder {
    config: ReductionConfig,
}

impl VectorizationFinder {
    pub fn new(config: ReductionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Scan with the declared-type oracle
    pub fn find(&self, program: &Program) -> Vec<VectorizationReductionOpportunity> {
        self.find_with_oracle(program, &DeclaredTypeOracle::new(program))
    }

    pub fn find_with_oracle(
        &self,
        program: &Program,
        oracle: &dyn TypeOracle,
    ) -> Vec<VectorizationReductionOpportunity> {
        self.plans(program, oracle)
            .into_iter()
            .map(|plan| plan.opportunity)
            .collect()
    }

    pub(crate) fn plans(&self, program: &Program, oracle: &dyn TypeOracle) -> Vec<ExtractionPlan> {
        let mut analysis = MergeAnalysis::new(
            &self.config.merged_prefix,
            oracle,
            program.version.supports_scalar_swizzles(),
        );
        walk_program(program, &mut analysis);
        let plans = analysis.into_plans();

        info!(
            prefix = %self.config.merged_prefix,
            opportunities = plans.len(),
            "Vectorization scan finished"
        );
        plans
    }
}
