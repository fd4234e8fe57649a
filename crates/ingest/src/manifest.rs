use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::{SimulatedBackend, VectorStoreBackend};

/// Where a manifest came from.
///
/// Closed on purpose: a manifest on disk with any other status is rejected
/// when read back, so a stub manifest never passes for a finished ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestStatus {
    /// Produced without contacting any ingestion service.
    Simulated,
}

impl ManifestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
        }
    }
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingestion batch, as persisted in `vectorStore.json`.
///
/// Fields are private: a manifest is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionManifest {
    id: String,
    #[serde(with = "iso_millis")]
    created_at: DateTime<Utc>,
    files_count: usize,
    status: ManifestStatus,
}

impl IngestionManifest {
    /// Build a manifest for `documents`, asking `backend` for the id and status.
    pub fn build(documents: &[PathBuf], backend: &dyn VectorStoreBackend) -> Self {
        Self::build_at(documents, backend, Utc::now())
    }

    /// Build with the [`SimulatedBackend`].
    pub fn simulated(documents: &[PathBuf]) -> Self {
        Self::build(documents, &SimulatedBackend)
    }

    pub(crate) fn build_at(
        documents: &[PathBuf],
        backend: &dyn VectorStoreBackend,
        now: DateTime<Utc>,
    ) -> Self {
        // Millisecond precision matches what gets written to disk.
        let created_at = now.trunc_subsecs(3);
        Self {
            id: backend.allocate_id(created_at),
            created_at,
            files_count: documents.len(),
            status: backend.status(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn files_count(&self) -> usize {
        self.files_count
    }

    pub fn status(&self) -> ManifestStatus {
        self.status
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2025-01-31T09:15:02.417Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
