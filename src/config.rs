//! Configuration for the extraction core.

use crate::core::digraph::TimingPolicy;
use serde::{Deserialize, Serialize};

/// Default capacity of the event source channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10_000;

/// Tunables for a tracker instance.
///
/// The extraction core has no file or network surface, so configuration is
/// plain data handed in by the embedding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Capacity of the channel bridging the external event source
    pub channel_capacity: usize,

    /// Validity policy for streaming digraph formation
    pub streaming_policy: TimingPolicy,

    /// Validity policy for batch feature aggregation
    pub batch_policy: TimingPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            // The two paths intentionally diverge: the digraph stream drops
            // non-positive intervals, the aggregator keeps every sample.
            streaming_policy: TimingPolicy::Strict,
            batch_policy: TimingPolicy::Permissive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies_diverge() {
        let config = ExtractorConfig::default();
        assert_eq!(config.streaming_policy, TimingPolicy::Strict);
        assert_eq!(config.batch_policy, TimingPolicy::Permissive);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ExtractorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ExtractorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.streaming_policy, config.streaming_policy);
    }
}
