//! Analysis result types: the model's report and its token/cost metrics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Token counts reported by the completion endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt (system + user messages).
    pub prompt_tokens: u64,
    /// Tokens generated in the completion.
    pub completion_tokens: u64,
    /// Total tokens billed for the exchange.
    pub total_tokens: u64,
}

/// The outcome of one security analysis exchange.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The model's free-text vulnerability report (markdown).
    pub report: String,
    /// The model that produced the report.
    pub model: String,
    /// Token counts for the exchange.
    pub usage: TokenUsage,
    /// Estimated cost in USD, from the static per-model price table.
    pub cost_usd: f64,
    /// Wall time spent waiting on the completion endpoint.
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_usage_deserializes_from_api_shape() {
        let json = r#"{"prompt_tokens": 120, "completion_tokens": 34, "total_tokens": 154}"#;
        let usage: TokenUsage = serde_json::from_str(json).unwrap();
        assert_eq!(usage.prompt_tokens, 120);
        assert_eq!(usage.completion_tokens, 34);
        assert_eq!(usage.total_tokens, 154);
    }

    #[test]
    fn token_usage_defaults_missing_fields_to_zero() {
        let usage: TokenUsage = serde_json::from_str("{}").unwrap();
        assert_eq!(usage, TokenUsage::default());
    }
}
