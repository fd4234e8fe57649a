pub mod openai;

use factstore_core::config::{FactCheckConfig, OpenAiConfig};

use crate::provider::{LlmError, LlmProvider};

/// Build the provider that backs live fact checks.
pub fn create_provider(
    openai: &OpenAiConfig,
    fact_check: &FactCheckConfig,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    let api_key = openai
        .api_key
        .as_ref()
        .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY not set".into()))?;
    Ok(Box::new(openai::OpenAiProvider::new(
        api_key.clone(),
        fact_check.model.clone(),
        openai.base_url.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_not_configured() {
        let openai = OpenAiConfig {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
        };
        let fact_check = FactCheckConfig {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: 512,
        };
        let err = create_provider(&openai, &fact_check).err().unwrap();
        assert!(matches!(err, LlmError::NotConfigured(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
