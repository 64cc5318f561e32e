//! Security analysis: completion client, prompt, and pricing.
//!
//! Provides an abstraction layer over the completion endpoint so the
//! scan flow and tests can swap in mock analyzers.

pub mod client;
pub mod pricing;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Analysis, ChangeSet};

pub use client::OpenAiAnalyzer;

/// Errors from the analysis client.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analyzer not configured: {0}")]
    NotConfigured(String),

    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion API error {status}: {body}")]
    Api { status: String, body: String },

    #[error("unexpected completion response: {0}")]
    Shape(String),
}

/// Trait for LLM-backed security analysis.
///
/// Implementations embed the collected diffs in the fixed review
/// prompt, call a completion endpoint, and report usage metrics.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze the collected changes and return the rendered report
    /// with token/cost metrics.
    async fn analyze(&self, changes: &ChangeSet) -> Result<Analysis, AnalysisError>;
}
