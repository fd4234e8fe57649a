use std::path::PathBuf;

use factstore_core::config::IngestSettings;
use tracing::{debug, info, warn};

use crate::backend::VectorStoreBackend;
use crate::discovery::{discover_documents, Discovery, DiscoveryOptions, TraversalWarning};
use crate::error::IngestError;
use crate::manifest::IngestionManifest;
use crate::store::persist_manifest;

/// Outcome of one `upload` run.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub manifest: IngestionManifest,
    pub documents: Vec<PathBuf>,
    pub warnings: Vec<TraversalWarning>,
    pub manifest_path: PathBuf,
}

/// Discovers documents, builds the manifest and persists it.
///
/// Settings are handed in by the caller; nothing here reads the environment.
pub struct ManifestBuilder {
    settings: IngestSettings,
    backend: Box<dyn VectorStoreBackend>,
}

impl ManifestBuilder {
    pub fn new(settings: IngestSettings, backend: Box<dyn VectorStoreBackend>) -> Self {
        Self { settings, backend }
    }

    fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            extension: self.settings.extension.clone(),
            max_depth: self.settings.max_depth,
        }
    }

    /// Walk, report what was found, build, persist. Only persistence can fail,
    /// and by then the discovery report has already been logged.
    pub fn run(&self) -> Result<UploadReport, IngestError> {
        let discovery = discover_documents(&self.settings.source_dir, &self.discovery_options());
        self.log_discovery(&discovery);

        let manifest = IngestionManifest::build(&discovery.documents, self.backend.as_ref());
        debug!(backend = self.backend.name(), id = manifest.id(), "manifest built");

        let manifest_path = persist_manifest(&manifest, &self.settings.manifest_dir)?;
        info!(
            id = manifest.id(),
            status = %manifest.status(),
            path = %manifest_path.display(),
            "manifest persisted"
        );

        Ok(UploadReport {
            manifest,
            documents: discovery.documents,
            warnings: discovery.warnings,
            manifest_path,
        })
    }

    fn log_discovery(&self, discovery: &Discovery) {
        info!(
            source_dir = %self.settings.source_dir.display(),
            count = discovery.documents.len(),
            warnings = discovery.warnings.len(),
            "Found {} document(s)",
            discovery.documents.len()
        );
        for doc in &discovery.documents {
            info!("  - {}", doc.display());
        }
        for warning in &discovery.warnings {
            warn!("  skipped {}", warning);
        }

        if discovery.is_empty() {
            warn!("{}", discovery_status_line(0));
        } else {
            info!("{}", discovery_status_line(discovery.documents.len()));
        }
    }
}

/// The OK/NG line logged after document discovery.
fn discovery_status_line(count: usize) -> &'static str {
    if count > 0 {
        "Reading documents - OK"
    } else {
        "Reading documents - NG (no files found)"
    }
}
