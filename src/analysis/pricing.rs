//! Static per-model token pricing.
//!
//! Prices are USD per one million tokens. Unknown models price at
//! zero, so a cost estimate never over-reports for a model the table
//! does not know.

use crate::models::TokenUsage;

/// Input/output price pair for a model, per 1M tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenPrices {
    pub input: f64,
    pub output: f64,
}

/// Look up the price pair for a model id.
pub fn token_prices(model: &str) -> TokenPrices {
    match model {
        "gpt-4.1-nano" => TokenPrices {
            input: 0.10,
            output: 0.40,
        },
        "o4-mini" => TokenPrices {
            input: 0.15,
            output: 0.60,
        },
        "gpt-4" => TokenPrices {
            input: 30.0,
            output: 60.0,
        },
        "gpt-4-turbo-preview" => TokenPrices {
            input: 10.0,
            output: 30.0,
        },
        "gpt-3.5-turbo" => TokenPrices {
            input: 0.50,
            output: 1.50,
        },
        _ => TokenPrices {
            input: 0.0,
            output: 0.0,
        },
    }
}

/// Estimated USD cost of a completed exchange.
pub fn estimate_cost(model: &str, usage: &TokenUsage) -> f64 {
    let prices = token_prices(model);
    (usage.prompt_tokens as f64 / 1_000_000.0) * prices.input
        + (usage.completion_tokens as f64 / 1_000_000.0) * prices.output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_prices() {
        let p = token_prices("gpt-4.1-nano");
        assert_eq!(p.input, 0.10);
        assert_eq!(p.output, 0.40);
    }

    #[test]
    fn unknown_model_prices_at_zero() {
        let p = token_prices("some-local-model");
        assert_eq!(p.input, 0.0);
        assert_eq!(p.output, 0.0);
    }

    #[test]
    fn cost_scales_with_usage() {
        let usage = TokenUsage {
            prompt_tokens: 1_000_000,
            completion_tokens: 500_000,
            total_tokens: 1_500_000,
        };
        // 1M input at $0.10 + 0.5M output at $0.40
        let cost = estimate_cost("gpt-4.1-nano", &usage);
        assert!((cost - 0.30).abs() < 1e-9, "got {cost}");
    }

    #[test]
    fn unknown_model_costs_nothing() {
        let usage = TokenUsage {
            prompt_tokens: 1_000_000,
            completion_tokens: 1_000_000,
            total_tokens: 2_000_000,
        };
        assert_eq!(estimate_cost("mystery", &usage), 0.0);
    }
}
