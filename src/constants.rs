//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "redflag";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by build.rs).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.redflag.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".redflag.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "redflag";

/// Model used when neither config nor environment names one.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Base branch scanned against when none is configured.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Source file extensions eligible for review.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

// ── Environment variable names ──────────────────────────────────────

pub const ENV_MODEL: &str = "REDFLAG_MODEL";
pub const ENV_API_KEY: &str = "REDFLAG_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "REDFLAG_BASE_URL";
pub const ENV_BASE_BRANCH: &str = "REDFLAG_BASE_BRANCH";
pub const ENV_TEMPERATURE: &str = "REDFLAG_TEMPERATURE";
