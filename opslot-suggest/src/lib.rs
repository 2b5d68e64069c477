//! # Opslot Suggest
//!
//! Maps fresh query tokens through a fitted topic's word log-probabilities
//! to a ranked, hour-slot-bucketed recommendation. Two weighting policies
//! are evaluated per call, so every scoring run yields exactly two
//! suggestions.

pub mod error;
pub mod scorer;

pub use error::{Result, SuggestError};
pub use scorer::{max_log_p_token, max_token_slot, suggest_slots};

use opslot_corpus::HourSlot;
use serde::{Deserialize, Serialize};

/// Query-token weighting policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightPolicy {
    /// Every query token gets weight 1.0
    Uniform,

    /// The token at 0-based position `w` gets weight `num_tokens / (w + 1)`,
    /// so the log-probability of earlier tokens is divided by a larger
    /// weight
    PositionDecay,
}

impl WeightPolicy {
    /// Per-position weights for a query of `num_tokens` tokens
    pub fn weights(&self, num_tokens: usize) -> Vec<f64> {
        match self {
            WeightPolicy::Uniform => vec![1.0; num_tokens],
            WeightPolicy::PositionDecay => (0..num_tokens)
                .map(|w| num_tokens as f64 / (w + 1) as f64)
                .collect(),
        }
    }
}

impl std::fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightPolicy::Uniform => write!(f, "uniform"),
            WeightPolicy::PositionDecay => write!(f, "position-decay"),
        }
    }
}

/// The query token selected by a weighting policy, with its weighted score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPick {
    pub token: String,
    pub score: f64,
}

/// The hour slot where the selected token is most frequent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPick {
    pub slot: HourSlot,
    pub count: u32,
}

/// One suggestion per weighting policy. `token` is `None` when no query
/// token was in the training vocabulary; `slot` is `None` when no token was
/// selected or the selected token appears in no slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub policy: WeightPolicy,
    pub token: Option<TokenPick>,
    pub slot: Option<SlotPick>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_weights() {
        assert_eq!(WeightPolicy::Uniform.weights(3), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_position_decay_weights() {
        assert_eq!(
            WeightPolicy::PositionDecay.weights(4),
            vec![4.0, 2.0, 4.0 / 3.0, 1.0]
        );
    }

    #[test]
    fn test_policy_display_names() {
        assert_eq!(WeightPolicy::Uniform.to_string(), "uniform");
        assert_eq!(WeightPolicy::PositionDecay.to_string(), "position-decay");
    }

    #[test]
    fn test_empty_query_weights() {
        assert!(WeightPolicy::Uniform.weights(0).is_empty());
        assert!(WeightPolicy::PositionDecay.weights(0).is_empty());
    }
}
