use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::manifest::ManifestStatus;

/// The vector store a manifest registers documents with.
///
/// The builder only needs an id for the batch and the status to stamp on
/// the manifest, so a test double and a live service look the same to it.
pub trait VectorStoreBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Allocate a store id for a batch created at `created_at`.
    fn allocate_id(&self, created_at: DateTime<Utc>) -> String;

    fn status(&self) -> ManifestStatus;
}

/// Registers nothing anywhere; every manifest it touches is `simulated`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedBackend;

impl VectorStoreBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "simulated"
    }

    fn allocate_id(&self, created_at: DateTime<Utc>) -> String {
        mint_store_id(created_at)
    }

    fn status(&self) -> ManifestStatus {
        ManifestStatus::Simulated
    }
}

/// `vs_<unix millis>_<8 hex chars>`.
///
/// The random suffix keeps ids minted within the same millisecond apart.
pub fn mint_store_id(created_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("vs_{}_{}", created_at.timestamp_millis(), &suffix[..8])
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn store_id_shape() {
        let at = Utc.timestamp_millis_opt(1_736_000_000_000).unwrap();
        let id = mint_store_id(at);

        let rest = id.strip_prefix("vs_1736000000000_").unwrap();
        assert_eq!(rest.len(), 8);
        assert!(rest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn same_millisecond_different_ids() {
        let at = Utc.timestamp_millis_opt(1_736_000_000_000).unwrap();
        assert_ne!(mint_store_id(at), mint_store_id(at));
    }
}
