use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::manifest::IngestionManifest;

/// Fixed file name of the persisted manifest.
pub const MANIFEST_FILE_NAME: &str = "vectorStore.json";

/// Path of the manifest file inside `dir`.
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Write `manifest` to `<dir>/vectorStore.json`, creating `dir` if needed and
/// replacing any previous manifest. Returns the path written.
pub fn persist_manifest(manifest: &IngestionManifest, dir: &Path) -> Result<PathBuf, IngestError> {
    std::fs::create_dir_all(dir).map_err(|e| IngestError::io(dir, e))?;

    let path = manifest_path(dir);
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json).map_err(|e| IngestError::io(&path, e))?;

    tracing::debug!(path = %path.display(), id = manifest.id(), "manifest written");
    Ok(path)
}

/// Read a manifest file back.
pub fn load_manifest(path: &Path) -> Result<IngestionManifest, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| IngestError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::manifest::ManifestStatus;

    #[test]
    fn persist_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let docs = vec![PathBuf::from("policy/a.md"), PathBuf::from("policy/sub/c.md")];
        let manifest = IngestionManifest::simulated(&docs);

        let path = persist_manifest(&manifest, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("vectorStore.json"));

        let loaded = load_manifest(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.files_count(), 2);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("config");

        let path = persist_manifest(&IngestionManifest::simulated(&[]), &dir).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn existing_directory_is_fine_and_file_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let first = IngestionManifest::simulated(&[PathBuf::from("a.md")]);
        let second = IngestionManifest::simulated(&[]);

        persist_manifest(&first, tmp.path()).unwrap();
        let path = persist_manifest(&second, tmp.path()).unwrap();

        let loaded = load_manifest(&path).unwrap();
        assert_eq!(loaded.id(), second.id());
        assert_eq!(loaded.files_count(), 0);
    }

    #[test]
    fn written_file_is_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let path = persist_manifest(&IngestionManifest::simulated(&[]), tmp.path()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"vs_"));
        assert!(text.contains("\"status\": \"simulated\""));
        assert!(text.contains("\"files_count\": 0"));
    }

    #[test]
    fn directory_in_the_way_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("config");
        fs::write(&blocker, "i am a file").unwrap();

        let err = persist_manifest(&IngestionManifest::simulated(&[]), &blocker).unwrap_err();
        match err {
            IngestError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_manifest(&tmp.path().join("vectorStore.json")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn load_garbage_is_malformed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vectorStore.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, IngestError::Malformed { .. }));
        assert!(err.to_string().contains("vectorStore.json"));
    }

    #[test]
    fn load_reads_hand_written_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vectorStore.json");
        fs::write(
            &path,
            r#"{
  "id": "vs_1736000000000",
  "created_at": "2025-01-04T14:13:20.000Z",
  "files_count": 12,
  "status": "simulated"
}"#,
        )
        .unwrap();

        let loaded = load_manifest(&path).unwrap();
        assert_eq!(loaded.id(), "vs_1736000000000");
        assert_eq!(loaded.files_count(), 12);
        assert_eq!(loaded.status(), ManifestStatus::Simulated);
    }
}
