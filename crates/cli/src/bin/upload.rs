//! upload — register a document tree as a vector store manifest.
//!
//! Walks `--source-dir` for documents and writes `config/vectorStore.json`.
//! No ingestion service is contacted; the manifest is marked `simulated`.
//! Exits non-zero only when the manifest cannot be written.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use factstore_cli::args::UploadArgs;
use factstore_core::{load_dotenv, Config};
use factstore_ingest::{ManifestBuilder, SimulatedBackend};

fn main() -> Result<()> {
    load_dotenv();
    factstore_cli::init_tracing();

    let args = UploadArgs::parse();
    let mut config = Config::from_env();
    config.ingest.source_dir = args.source_dir;
    config.log_summary();

    let key_present = config.openai.is_configured();
    info!(present = key_present, "OPENAI_API_KEY present: {}", key_present);

    let builder = ManifestBuilder::new(config.ingest.clone(), Box::new(SimulatedBackend));
    let report = builder.run().context("Vector Store creation - NG")?;

    info!(
        path = %report.manifest_path.display(),
        "Created vector store manifest: {}",
        report.manifest.id()
    );
    info!("Vector Store creation - OK ({})", report.manifest.status());
    Ok(())
}
