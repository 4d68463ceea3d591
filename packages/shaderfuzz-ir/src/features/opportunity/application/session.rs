//! Opportunity session
//!
//! Scan, pick one opportunity through the random source, apply it, repeat.
//! Every step re-scans, so no opportunity is ever applied against a tree
//! it was not found in.

use tracing::{debug, info, warn};

use crate::config::{SessionConfig, Validatable};
use crate::errors::Result;
use crate::features::dead_globals::{DeadGlobalEliminator, StripReport};
use crate::features::mutation_points::MutationPointFinder;
use crate::features::opportunity::domain::{Opportunity, OpportunityId};
use crate::features::opportunity::ports::OpportunityFinder;
use crate::features::vectorization::VectorizationFinder;
use crate::shared::models::Program;
use crate::shared::ports::RandomSource;

/// Outcome of `OpportunitySession::exhaust`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Applied opportunities, in order
    pub applied: Vec<OpportunityId>,
    /// Stopped because a scan came back empty (not because of `max_steps`)
    pub exhausted: bool,
}

/// Drives finders over one program with one random source
pub struct OpportunitySession {
    config: SessionConfig,
    finders: Vec<Box<dyn OpportunityFinder>>,
    random: Box<dyn RandomSource>,
}

impl OpportunitySession {
    /// Session without finders, seeded from `config`
    pub fn new(config: SessionConfig) -> Result<Self> {
        let random = Box::new(config.random_source());
        Self::with_random(config, random)
    }

    /// Session without finders using `random`
    pub fn with_random(config: SessionConfig, random: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            finders: Vec::new(),
            random,
        })
    }

    /// Session injecting identities at mutation points
    pub fn fuzzing(config: SessionConfig) -> Result<Self> {
        let finder = MutationPointFinder::new(config.mutation.clone());
        Ok(Self::new(config)?.with_finder(Box::new(finder)))
    }

    /// Session undoing variable merging
    pub fn reduction(config: SessionConfig) -> Result<Self> {
        let finder = VectorizationFinder::new(config.reduction.clone());
        Ok(Self::new(config)?.with_finder(Box::new(finder)))
    }

    /// Builder: Add a finder
    pub fn with_finder(mut self, finder: Box<dyn OpportunityFinder>) -> Self {
        self.finders.push(finder);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Every opportunity of every finder, finder by finder
    pub fn scan(&self, program: &Program) -> Vec<Opportunity> {
        let mut opportunities = Vec::new();
        for finder in &self.finders {
            let found = finder.find_opportunities(program);
            debug!(finder = finder.name(), count = found.len(), "Scanned");
            opportunities.extend(found);
        }
        opportunities
    }

    /// Apply one randomly chosen opportunity; `None` when there is none
    pub fn step(&mut self, program: &mut Program) -> Option<OpportunityId> {
        let opportunities = self.scan(program);
        if opportunities.is_empty() {
            return None;
        }
        let chosen = &opportunities[self.random.next_int(opportunities.len())];
        let id = chosen.id();
        debug!(opportunity = %chosen.describe(), "Applying");
        chosen.apply(program, &self.config, self.random.as_mut());
        Some(id)
    }

    /// Step until nothing is left or `max_steps` is reached
    pub fn exhaust(&mut self, program: &mut Program) -> SessionSummary {
        let mut summary = SessionSummary::default();
        while summary.applied.len() < self.config.max_steps {
            match self.step(program) {
                Some(id) => summary.applied.push(id),
                None => {
                    summary.exhausted = true;
                    break;
                }
            }
        }
        if !summary.exhausted {
            warn!(max_steps = self.config.max_steps, "Session stopped at step limit");
        }
        info!(
            applied = summary.applied.len(),
            exhausted = summary.exhausted,
            "Session finished"
        );
        summary
    }

    /// Remove globals nothing reads, keeping the configured injection switch
    pub fn strip_unused_globals(&self, program: &mut Program) -> StripReport {
        DeadGlobalEliminator::new(self.config.injection_switch.clone()).strip(program)
    }
}
