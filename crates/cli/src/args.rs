use std::path::PathBuf;

use clap::Parser;

/// Default statement for `fact-check` when none is given.
pub const DEFAULT_STATEMENT: &str = "This is a test statement for fact checking.";

/// Scan a document tree and register it as a (simulated) vector store.
#[derive(Parser, Debug)]
#[command(name = "upload", version, about)]
pub struct UploadArgs {
    /// Directory scanned recursively for documents.
    #[arg(long, env = "FACTSTORE_SOURCE_DIR", default_value = "policy")]
    pub source_dir: PathBuf,
}

/// Fact-check a statement against the registered vector store.
#[derive(Parser, Debug)]
#[command(name = "fact-check", version, about)]
pub struct FactCheckArgs {
    /// Statement to check.
    #[arg(default_value = DEFAULT_STATEMENT)]
    pub statement: String,

    /// Use the offline checker instead of calling the model.
    #[arg(long)]
    pub simulate: bool,

    /// Vector store id (default: read from the persisted manifest).
    #[arg(long)]
    pub vector_store_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_source_dir_forms() {
        let args = UploadArgs::try_parse_from(["upload", "--source-dir=docs/policy"]).unwrap();
        assert_eq!(args.source_dir, PathBuf::from("docs/policy"));

        let args = UploadArgs::try_parse_from(["upload", "--source-dir", "handbook"]).unwrap();
        assert_eq!(args.source_dir, PathBuf::from("handbook"));
    }

    #[test]
    fn upload_rejects_unknown_flags() {
        assert!(UploadArgs::try_parse_from(["upload", "--verbose"]).is_err());
    }

    #[test]
    fn fact_check_flags_and_statement() {
        let args = FactCheckArgs::try_parse_from([
            "fact-check",
            "--simulate",
            "--vector-store-id",
            "vs_42",
            "Paris is in France.",
        ])
        .unwrap();
        assert_eq!(args.statement, "Paris is in France.");
        assert!(args.simulate);
        assert_eq!(args.vector_store_id.as_deref(), Some("vs_42"));
    }

    #[test]
    fn fact_check_defaults() {
        let args = FactCheckArgs::try_parse_from(["fact-check"]).unwrap();
        assert_eq!(args.statement, DEFAULT_STATEMENT);
        assert!(!args.simulate);
        assert!(args.vector_store_id.is_none());
    }
}
