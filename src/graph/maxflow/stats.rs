use serde::{Deserialize, Serialize};

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Active nodes taken off the queue and grown.
    pub growth_steps: u64,
    /// Augmenting paths saturated.
    pub augmentations: u64,
    /// Orphans taken off the orphan list.
    pub orphans_processed: u64,
    /// Orphans for which no new parent was found.
    pub adoption_failures: u64,
}
