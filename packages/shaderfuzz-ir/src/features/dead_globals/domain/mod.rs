//! Dead global elimination domain models

use serde::{Deserialize, Serialize};

/// What one elimination pass removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripReport {
    /// Removed variable names, in declaration order
    pub removed: Vec<String>,
    /// Top-level declaration groups removed because every member went
    pub removed_groups: usize,
}

impl StripReport {
    /// Nothing was removed
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}
