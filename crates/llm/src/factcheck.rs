//! Fact checking against a vector store.
//!
//! The judgment itself comes from an external model; this module only frames
//! the question, validates the answer and stamps it with the store that was
//! consulted.

use async_trait::async_trait;
use factstore_core::Config;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

/// Verdict on one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckResult {
    pub is_factual: bool,
    /// In `[0, 1]`.
    pub confidence: f64,
    /// Store the verdict was grounded in; never empty.
    pub vector_store_id: String,
    /// Documents the verdict relied on; never empty.
    pub sources: Vec<String>,
}

impl FactCheckResult {
    fn validate(self, raw_response: &str) -> Result<Self, FactCheckError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(FactCheckError::Malformed {
                reason: format!("confidence {} outside [0, 1]", self.confidence),
                raw_response: raw_response.to_string(),
            });
        }
        if self.vector_store_id.trim().is_empty() {
            return Err(FactCheckError::Malformed {
                reason: "empty vector store id".to_string(),
                raw_response: raw_response.to_string(),
            });
        }
        if self.sources.is_empty() {
            return Err(FactCheckError::Malformed {
                reason: "no sources cited".to_string(),
                raw_response: raw_response.to_string(),
            });
        }
        Ok(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FactCheckError {
    #[error("statement is empty")]
    EmptyStatement,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("malformed fact-check response: {reason}")]
    Malformed {
        reason: String,
        raw_response: String,
    },
}

/// Anything that can judge a free-text statement.
#[async_trait]
pub trait FactChecker: Send + Sync {
    async fn check(&self, statement: &str) -> Result<FactCheckResult, FactCheckError>;
}

// ── LLM-backed checker ────────────────────────────────────────

/// What the model is asked to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Judgment {
    is_factual: bool,
    confidence: f64,
    #[serde(default)]
    sources: Vec<String>,
}

/// Asks an [`LlmProvider`] for a judgment grounded in one vector store.
pub struct LlmFactChecker {
    provider: Box<dyn LlmProvider>,
    vector_store_id: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmFactChecker {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        vector_store_id: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            vector_store_id: vector_store_id.into(),
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the OpenAI provider.
    pub fn from_config(config: &Config, vector_store_id: impl Into<String>) -> Result<Self, LlmError> {
        let provider = create_provider(&config.openai, &config.fact_check)?;
        Ok(Self::new(
            provider,
            vector_store_id,
            config.fact_check.temperature,
            config.fact_check.max_tokens,
        ))
    }

    fn messages(&self, statement: &str) -> Vec<Message> {
        let system = format!(
            "You are a fact checker. Judge the user's statement against the documents in \
             knowledge store {}. Respond ONLY with a JSON object of the form \
             {{\"isFactual\": boolean, \"confidence\": number between 0 and 1, \
             \"sources\": [document names you relied on]}}.",
            self.vector_store_id
        );
        vec![Message::system(system), Message::user(statement)]
    }
}

#[async_trait]
impl FactChecker for LlmFactChecker {
    async fn check(&self, statement: &str) -> Result<FactCheckResult, FactCheckError> {
        let statement = statement.trim();
        if statement.is_empty() {
            return Err(FactCheckError::EmptyStatement);
        }

        info!(store = %self.vector_store_id, "checking statement");
        let response = self
            .provider
            .complete(self.messages(statement), self.temperature, self.max_tokens)
            .await?;
        debug!("LLM response: {}", response);

        let judgment: Judgment =
            serde_json::from_str(extract_json(&response)).map_err(|e| FactCheckError::Malformed {
                reason: e.to_string(),
                raw_response: response.clone(),
            })?;

        FactCheckResult {
            is_factual: judgment.is_factual,
            confidence: judgment.confidence,
            vector_store_id: self.vector_store_id.clone(),
            sources: judgment.sources,
        }
        .validate(&response)
    }
}

/// Pull the JSON object out of a reply that may wrap it in a code fence or prose.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        let after_tick = &trimmed[start + 3..];
        // Skip the language tag, if any.
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            return after_tick[content_start..content_start + end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

// ── Offline checker ───────────────────────────────────────────

/// Deterministic checker that never leaves the process.
pub struct StubFactChecker {
    vector_store_id: String,
    sources: Vec<String>,
}

impl StubFactChecker {
    pub fn new(vector_store_id: impl Into<String>) -> Self {
        Self {
            vector_store_id: vector_store_id.into(),
            sources: vec!["simulated".to_string()],
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }
}

#[async_trait]
impl FactChecker for StubFactChecker {
    async fn check(&self, statement: &str) -> Result<FactCheckResult, FactCheckError> {
        if statement.trim().is_empty() {
            return Err(FactCheckError::EmptyStatement);
        }
        FactCheckResult {
            is_factual: true,
            confidence: 0.5,
            vector_store_id: self.vector_store_id.clone(),
            sources: self.sources.clone(),
        }
        .validate("")
    }
}
