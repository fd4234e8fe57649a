use factstore_llm::FactCheckResult;

/// Human-readable block printed by `fact-check`.
pub fn render_fact_check(result: &FactCheckResult) -> String {
    format!(
        "=== Results ===\nIs Factual: {}\nConfidence: {:.2}\nVector Store ID: {}\nSources: {}\n",
        result.is_factual,
        result.confidence,
        result.vector_store_id,
        result.sources.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_field() {
        let result = FactCheckResult {
            is_factual: true,
            confidence: 0.876,
            vector_store_id: "vs_1".to_string(),
            sources: vec!["a.md".to_string(), "sub/c.md".to_string()],
        };
        let text = render_fact_check(&result);

        assert!(text.contains("Is Factual: true"));
        assert!(text.contains("Confidence: 0.88"));
        assert!(text.contains("Vector Store ID: vs_1"));
        assert!(text.contains("Sources: a.md, sub/c.md"));
    }
}
