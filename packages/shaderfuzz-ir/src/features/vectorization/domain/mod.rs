//! Vectorization reduction domain models

pub mod provenance;

pub use provenance::{Constituent, MergeProvenance, ProvenanceError};

use crate::shared::models::Type;

/// Pull one constituent back out of a merged vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizationReductionOpportunity {
    /// Name of the merged vector variable
    pub vector_name: String,
    /// Constituent to extract
    pub component_name: String,
    /// Type the constituent is declared with once extracted
    pub component_type: Type,
    /// Index among declarations named `vector_name`, in walk order
    pub occurrence: usize,
}

impl VectorizationReductionOpportunity {
    pub fn describe(&self) -> String {
        let mut text = format!(
            "extract {} {} from {}",
            self.component_type, self.component_name, self.vector_name
        );
        if self.occurrence > 0 {
            text.push_str(&format!(" (declaration #{})", self.occurrence));
        }
        text
    }

    /// Same target as `other`, ignoring the recorded type
    pub fn targets(&self, other: &Self) -> bool {
        self.vector_name == other.vector_name
            && self.component_name == other.component_name
            && self.occurrence == other.occurrence
    }
}
