//! Filesystem object store.
//!
//! Objects live at `{root}/{bucket}/{key}` and are published under
//! `{public_base}/{bucket}/{key}`, served by `services::storage`. Objects are
//! write-once: uploading to an existing key fails instead of replacing it.

use crate::error::SurveyError;
use log::warn;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct ObjectStorage {
    root: PathBuf,
    public_base: String,
}

impl ObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a new object and returns its path within the bucket.
    pub async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<String, SurveyError> {
        let target = self
            .object_path(bucket, key)
            .ok_or_else(|| SurveyError::Upload(format!("invalid object key {:?}", key)))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SurveyError::Upload(e.to_string()))?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    SurveyError::Upload(format!("object {}/{} already exists", bucket, key))
                }
                _ => SurveyError::Upload(e.to_string()),
            })?;
        file.write_all(bytes)
            .await
            .map_err(|e| SurveyError::Upload(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| SurveyError::Upload(e.to_string()))?;

        Ok(key.to_string())
    }

    pub async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, SurveyError> {
        let target = self.object_path(bucket, path).ok_or(SurveyError::NotFound)?;
        fs::read(&target).await.map_err(|e| {
            if e.kind() != ErrorKind::NotFound {
                warn!("reading {}: {}", target.display(), e);
            }
            SurveyError::NotFound
        })
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_base, bucket, path)
    }

    /// Resolves a bucket/key pair to a file below the root, refusing empty,
    /// `.` and `..` segments so no key can escape its bucket.
    fn object_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        if !is_plain_segment(bucket) {
            return None;
        }
        let mut path = self.root.join(bucket);
        for segment in key.split('/') {
            if !is_plain_segment(segment) {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn stored_object_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ObjectStorage::new(dir.path(), "http://localhost:8080/storage/");

        let path = storage
            .put("logos", "user-1/1700000000000_k3j9x0q2a", b"png-bytes")
            .await
            .unwrap();
        assert_eq!(path, "user-1/1700000000000_k3j9x0q2a");
        assert!(dir.path().join("logos/user-1/1700000000000_k3j9x0q2a").is_file());
        assert_eq!(storage.get("logos", &path).await.unwrap(), b"png-bytes");
        assert_eq!(
            storage.public_url("logos", &path),
            "http://localhost:8080/storage/logos/user-1/1700000000000_k3j9x0q2a"
        );
    }

    #[actix_web::test]
    async fn existing_objects_are_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ObjectStorage::new(dir.path(), "http://localhost/storage");

        storage.put("logos", "u/a", b"first").await.unwrap();
        let err = storage.put("logos", "u/a", b"second").await.unwrap_err();
        assert!(matches!(err, SurveyError::Upload(_)));
        assert_eq!(storage.get("logos", "u/a").await.unwrap(), b"first");
    }

    #[actix_web::test]
    async fn keys_cannot_escape_the_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ObjectStorage::new(dir.path().join("root"), "http://localhost/storage");

        for key in ["../outside", "u/../../x", "", "u//x", "./x"] {
            assert!(
                storage.put("logos", key, b"x").await.is_err(),
                "{key:?} was accepted"
            );
        }
        assert!(matches!(
            storage.get("..", "etc/passwd").await,
            Err(SurveyError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ObjectStorage::new(dir.path(), "http://localhost/storage");
        assert!(matches!(
            storage.get("logos", "u/missing").await,
            Err(SurveyError::NotFound)
        ));
    }
}
