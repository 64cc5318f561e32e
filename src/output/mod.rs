//! Terminal rendering for the analysis report and its metrics.
//!
//! Renderers return plain `String`s so they stay testable; the caller
//! decides which stream they land on.

use colored::Colorize;

use crate::models::Analysis;

/// Render the assessment metrics block (timing, tokens, estimated cost).
pub fn render_metrics(analysis: &Analysis) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("{}\n", "Assessment Metrics".bold()));
    out.push_str(&format!("{}\n", "──────────────────".dimmed()));
    out.push_str(&format!(
        "  {}       {}\n",
        "model:".dimmed(),
        analysis.model
    ));
    out.push_str(&format!(
        "  {}  {:.2}ms\n",
        "time taken:".dimmed(),
        analysis.elapsed.as_secs_f64() * 1000.0
    ));
    out.push_str(&format!(
        "  {}      {}\n",
        "input:".dimmed(),
        format!("{} tokens", analysis.usage.prompt_tokens)
    ));
    out.push_str(&format!(
        "  {}     {}\n",
        "output:".dimmed(),
        format!("{} tokens", analysis.usage.completion_tokens)
    ));
    out.push_str(&format!(
        "  {}      {}\n",
        "total:".dimmed(),
        format!("{} tokens", analysis.usage.total_tokens)
    ));
    out.push_str(&format!(
        "  {}       {}\n",
        "cost:".dimmed(),
        format!("${:.4}", analysis.cost_usd)
    ));

    out
}

/// Render the report section.
pub fn render_report(analysis: &Analysis) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("{}\n", "Security Analysis Results".bold()));
    out.push_str(&format!("{}\n", "─────────────────────────".dimmed()));
    out.push_str(analysis.report.trim_end());
    out.push('\n');

    out
}
