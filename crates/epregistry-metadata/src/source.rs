//! The seam between the registry cache and the host environment.

use crate::distribution::Distribution;

/// Enumerates installed distributions.
///
/// Implementations return distributions in search order. Earlier entries
/// shadow later ones with the same normalized name. Problems with individual
/// distributions are logged and skipped, never surfaced.
pub trait MetadataSource: Send + Sync {
    fn distributions(&self) -> Vec<Distribution>;
}

/// A fixed, in-memory set of distributions.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    distributions: Vec<Distribution>,
}

impl MemorySource {
    pub fn new(distributions: Vec<Distribution>) -> Self {
        Self { distributions }
    }

    /// Append a distribution.
    pub fn with(mut self, distribution: Distribution) -> Self {
        self.distributions.push(distribution);
        self
    }
}

impl MetadataSource for MemorySource {
    fn distributions(&self) -> Vec<Distribution> {
        self.distributions.clone()
    }
}
