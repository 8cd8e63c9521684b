//! Configuration for the accessor synthesis pass.

use datagen_core::lang::conventions::DEFAULT_MARKER;

/// What to do when an accessor name is already taken by a different member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Report an error on the field and synthesize neither accessor for it.
    #[default]
    Error,
    /// Keep the existing method and synthesize only the accessor that is missing.
    Skip,
}

impl ConflictPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictPolicy::Error => "error",
            ConflictPolicy::Skip => "skip",
        }
    }
}

impl std::str::FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(ConflictPolicy::Error),
            "skip" => Ok(ConflictPolicy::Skip),
            other => Err(format!("unknown conflict policy '{}' (expected 'error' or 'skip')", other)),
        }
    }
}

/// Synthesis pass configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthConfig {
    /// Marker annotation, either a bare name (`Data`) or a dotted path (`app.meta.Data`)
    pub marker: String,
    pub conflict_policy: ConflictPolicy,
    /// Whether a round reports the marker as claimed
    pub claim_marker: bool,
    /// Upper bound on rounds the pipeline driver runs before giving up
    pub max_rounds: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            conflict_policy: ConflictPolicy::Error,
            claim_marker: true,
            max_rounds: 8,
        }
    }
}

impl SynthConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_claim_marker(mut self, claim: bool) -> Self {
        self.claim_marker = claim;
        self
    }

    /// Set the round limit (at least one round always runs)
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthConfig::default();
        assert_eq!(config.marker, "Data");
        assert_eq!(config.conflict_policy, ConflictPolicy::Error);
        assert!(config.claim_marker);
        assert_eq!(config.max_rounds, 8);
    }

    #[test]
    fn test_builder_chain() {
        let config = SynthConfig::new()
            .with_marker("app.meta.Bean")
            .with_conflict_policy(ConflictPolicy::Skip)
            .with_claim_marker(false)
            .with_max_rounds(0);
        assert_eq!(config.marker, "app.meta.Bean");
        assert_eq!(config.conflict_policy, ConflictPolicy::Skip);
        assert!(!config.claim_marker);
        assert_eq!(config.max_rounds, 1);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("skip".parse::<ConflictPolicy>(), Ok(ConflictPolicy::Skip));
        assert_eq!("error".parse::<ConflictPolicy>().map(ConflictPolicy::as_str), Ok("error"));
        assert!("ignore".parse::<ConflictPolicy>().is_err());
    }
}
