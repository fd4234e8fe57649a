use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_f32(profile: &str, key: &str, default: f32) -> f32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub ingest: IngestSettings,
    pub openai: OpenAiConfig,
    pub fact_check: FactCheckConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FACTSTORE_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("FACTSTORE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            ingest: IngestSettings::from_env_profiled(p),
            openai: OpenAiConfig::from_env_profiled(p),
            fact_check: FactCheckConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  ingest:      source_dir={}, manifest_dir={}, extension={}, max_depth={}",
            self.ingest.source_dir.display(),
            self.ingest.manifest_dir.display(),
            self.ingest.extension,
            self.ingest.max_depth
        );
        tracing::info!(
            "  openai:      base_url={}, api_key_present={}",
            self.openai.base_url,
            self.openai.is_configured()
        );
        tracing::info!("  fact_check:  model={}", self.fact_check.model);
    }
}

// ── Ingest ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Root of the document tree scanned by `upload`.
    pub source_dir: PathBuf,
    /// Directory that receives `vectorStore.json`.
    pub manifest_dir: PathBuf,
    /// File-name suffix that marks a document, including the dot.
    pub extension: String,
    pub max_depth: usize,
}

impl IngestSettings {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            source_dir: PathBuf::from(profiled_env_or(p, "FACTSTORE_SOURCE_DIR", "policy")),
            manifest_dir: PathBuf::from(profiled_env_or(p, "FACTSTORE_MANIFEST_DIR", "config")),
            extension: normalize_extension(&profiled_env_or(p, "FACTSTORE_DOC_EXTENSION", ".md")),
            // Depth 0 would stop at the root and never see a document.
            max_depth: profiled_env_usize(p, "FACTSTORE_MAX_DEPTH", 64).max(1),
        }
    }
}

/// `md` and `.md` both mean "names ending in `.md`"; blank means `.md`.
fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ".md".to_string()
    } else if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

// ── OpenAI ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl OpenAiConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            base_url: profiled_env_or(p, "OPENAI_BASE_URL", "https://api.openai.com"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── Fact check ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl FactCheckConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            model: profiled_env_or(p, "FACTCHECK_MODEL", "gpt-4o-mini"),
            temperature: profiled_env_f32(p, "FACTCHECK_TEMPERATURE", 0.0),
            max_tokens: profiled_env_u32(p, "FACTCHECK_MAX_TOKENS", 512),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gets_leading_dot() {
        assert_eq!(normalize_extension("md"), ".md");
        assert_eq!(normalize_extension(".md"), ".md");
        assert_eq!(normalize_extension("  txt "), ".txt");
        assert_eq!(normalize_extension(""), ".md");
        assert_eq!(normalize_extension("   "), ".md");
    }

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("FSTEST_ALPHA_FSTEST_WIDGET", "profiled");
        env::set_var("FSTEST_WIDGET", "plain");
        assert_eq!(
            profiled_env_opt("FSTEST_ALPHA", "FSTEST_WIDGET").as_deref(),
            Some("profiled")
        );
        assert_eq!(profiled_env_opt("", "FSTEST_WIDGET").as_deref(), Some("plain"));
        assert_eq!(profiled_env_opt("FSTEST_BETA", "FSTEST_WIDGET").as_deref(), Some("plain"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        env::set_var("FSTEST_EMPTY_KEY", "");
        assert!(env_opt("FSTEST_EMPTY_KEY").is_none());
        assert_eq!(profiled_env_usize("", "FSTEST_EMPTY_KEY", 7), 7);
    }

    #[test]
    fn zero_max_depth_is_raised_to_one() {
        env::set_var("FSTEST_DEPTH_FACTSTORE_MAX_DEPTH", "0");
        let settings = IngestSettings::from_env_profiled("FSTEST_DEPTH");
        assert_eq!(settings.max_depth, 1);
    }

    #[test]
    fn float_helper_parses_and_falls_back() {
        env::set_var("FSTEST_TEMP_OK", "0.7");
        env::set_var("FSTEST_TEMP_BAD", "warm");
        assert!((profiled_env_f32("", "FSTEST_TEMP_OK", 0.0) - 0.7).abs() < f32::EPSILON);
        assert_eq!(profiled_env_f32("", "FSTEST_TEMP_BAD", 0.2), 0.2);
        assert_eq!(profiled_env_f32("", "FSTEST_TEMP_MISSING", 0.1), 0.1);
    }
}
