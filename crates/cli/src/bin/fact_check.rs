//! fact-check — judge a statement against the registered vector store.
//!
//! The store id comes from `--vector-store-id` or the manifest written by
//! `upload`. With `--simulate` the offline checker answers instead of the
//! model. Any failure is printed and the process exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use factstore_cli::args::FactCheckArgs;
use factstore_cli::report::render_fact_check;
use factstore_core::{load_dotenv, Config};
use factstore_ingest::{load_manifest, manifest_path, IngestionManifest};
use factstore_llm::{FactChecker, LlmFactChecker, StubFactChecker};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    factstore_cli::init_tracing();

    let args = FactCheckArgs::parse();
    let config = Config::from_env();

    println!("=== Fact Check Test ===");
    println!("Profile: {}", config.profile_label());
    println!();

    let store_id = resolve_store_id(&args, &config)?;

    let checker: Box<dyn FactChecker> = if args.simulate {
        Box::new(StubFactChecker::new(store_id))
    } else {
        Box::new(
            LlmFactChecker::from_config(&config, store_id)
                .context("Fact check test failed")?,
        )
    };

    println!("Testing statement: {}", args.statement);
    println!();

    let result = checker
        .check(&args.statement)
        .await
        .context("Fact check test failed")?;

    print!("{}", render_fact_check(&result));
    println!();
    println!("Fact check test completed successfully");
    Ok(())
}

/// Flag first, then the persisted manifest. A simulated run with neither
/// gets a throwaway id so it can still run offline.
fn resolve_store_id(args: &FactCheckArgs, config: &Config) -> Result<String> {
    if let Some(id) = &args.vector_store_id {
        return Ok(id.clone());
    }

    let path = manifest_path(&config.ingest.manifest_dir);
    match load_manifest(&path) {
        Ok(manifest) => {
            info!(id = manifest.id(), status = %manifest.status(), "using vector store from manifest");
            Ok(manifest.id().to_string())
        }
        Err(e) if args.simulate => {
            info!(error = %e, "no usable manifest, using a throwaway store id");
            Ok(IngestionManifest::simulated(&[]).id().to_string())
        }
        Err(e) => Err(e).with_context(|| {
            format!("no vector store id: run `upload` first or pass --vector-store-id ({})", path.display())
        }),
    }
}
