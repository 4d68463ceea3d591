//! Finder adapters

use crate::features::mutation_points::MutationPointFinder;
use crate::features::opportunity::domain::Opportunity;
use crate::features::opportunity::ports::OpportunityFinder;
use crate::features::vectorization::VectorizationFinder;
use crate::shared::models::Program;

impl OpportunityFinder for MutationPointFinder {
    fn name(&self) -> &'static str {
        "mutation_points"
    }

    fn find_opportunities(&self, program: &Program) -> Vec<Opportunity> {
        self.find(program).into_iter().map(Opportunity::from).collect()
    }
}

impl OpportunityFinder for VectorizationFinder {
    fn name(&self) -> &'static str {
        "vectorization"
    }

    fn find_opportunities(&self, program: &Program) -> Vec<Opportunity> {
        self.find(program).into_iter().map(Opportunity::from).collect()
    }
}
