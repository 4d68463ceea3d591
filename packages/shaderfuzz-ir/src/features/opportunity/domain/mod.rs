//! Opportunity domain models
//!
//! The closed set of transformations a scan can hand out. Each variant
//! carries what it needs to apply itself once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::features::mutation_points::MutationPoint;
use crate::features::vectorization::VectorizationReductionOpportunity;
use crate::shared::models::Program;
use crate::shared::ports::RandomSource;

/// Stable identity of an opportunity, for deduplication across scans
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpportunityId {
    MutationPoint {
        ordinal: usize,
        /// Rendered expression
        expr: String,
    },
    Vectorization {
        vector_name: String,
        component_name: String,
        occurrence: usize,
    },
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MutationPoint { ordinal, expr } => write!(f, "mutation#{}:{}", ordinal, expr),
            Self::Vectorization {
                vector_name,
                component_name,
                occurrence,
            } => write!(f, "vectorize#{}:{}/{}", occurrence, vector_name, component_name),
        }
    }
}

/// One discovered, one-shot transformation
#[derive(Debug, Clone, PartialEq)]
pub enum Opportunity {
    MutationPoint(MutationPoint),
    Vectorization(VectorizationReductionOpportunity),
}

impl Opportunity {
    pub fn id(&self) -> OpportunityId {
        match self {
            Self::MutationPoint(point) => OpportunityId::MutationPoint {
                ordinal: point.ordinal,
                expr: point.text(),
            },
            Self::Vectorization(opportunity) => OpportunityId::Vectorization {
                vector_name: opportunity.vector_name.clone(),
                component_name: opportunity.component_name.clone(),
                occurrence: opportunity.occurrence,
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::MutationPoint(point) => point.describe(),
            Self::Vectorization(opportunity) => opportunity.describe(),
        }
    }

    /// Apply to `program`.
    ///
    /// # Panics
    /// When the opportunity is stale for `program`.
    pub fn apply(&self, program: &mut Program, config: &SessionConfig, random: &mut dyn RandomSource) {
        match self {
            Self::MutationPoint(point) => point.apply(program, random),
            Self::Vectorization(opportunity) => opportunity.apply(program, &config.reduction),
        }
    }
}

impl From<MutationPoint> for Opportunity {
    fn from(point: MutationPoint) -> Self {
        Self::MutationPoint(point)
    }
}

impl From<VectorizationReductionOpportunity> for Opportunity {
    fn from(opportunity: VectorizationReductionOpportunity) -> Self {
        Self::Vectorization(opportunity)
    }
}
