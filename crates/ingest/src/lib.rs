//! Ingestion-manifest builder.
//!
//! Walks a document tree, counts the documents that qualify for ingestion and
//! records the batch as a manifest (`vectorStore.json`). The vector store
//! itself is reached through [`VectorStoreBackend`]; the only backend shipped
//! here is [`SimulatedBackend`], which never leaves the process.

pub mod backend;
pub mod builder;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod store;

pub use backend::{SimulatedBackend, VectorStoreBackend};
pub use builder::{ManifestBuilder, UploadReport};
pub use discovery::{discover_documents, Discovery, DiscoveryOptions, TraversalWarning};
pub use error::IngestError;
pub use manifest::{IngestionManifest, ManifestStatus};
pub use store::{load_manifest, manifest_path, persist_manifest, MANIFEST_FILE_NAME};
