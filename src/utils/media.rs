//! Local media storage for uploaded documents and course materials.
//!
//! Files land under the configured media root; only the storage key is
//! persisted. Keys are validated to keep uploads inside the root.

use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use crate::utils::errors::AppError;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Build a collision-free key like `materials/<uuid>-<name>`,
    /// keeping only characters that are safe in a path segment.
    pub fn make_key(prefix: &str, file_name: &str) -> String {
        let sanitized: String = file_name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}/{}-{}", prefix, Uuid::new_v4(), sanitized)
    }

    fn validate_key(key: &str) -> Result<(), AppError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid file key")));
        }
        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid file key")));
        }
        Ok(())
    }

    pub async fn save(&self, key: &str, content: &[u8]) -> Result<(), AppError> {
        Self::validate_key(key)?;
        if content.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "File exceeds the {} byte upload limit",
                MAX_UPLOAD_BYTES
            )));
        }

        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(AppError::internal)?;
        }
        fs::write(&path, content).await.map_err(AppError::internal)?;
        Ok(())
    }

    pub async fn read(&self, key: &str) -> Result<Vec<u8>, AppError> {
        Self::validate_key(key)?;
        let path = self.root.join(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(anyhow::anyhow!("File not found")))
            }
            Err(e) => Err(AppError::internal(e)),
        }
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        Self::validate_key(key)?;
        let path = self.root.join(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::internal(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sanitized() {
        let key = MediaStore::make_key("materials", "aula 01/notas?.pdf");
        assert!(key.starts_with("materials/"));
        assert!(!key.contains(' '));
        assert!(!key.contains('?'));
        assert!(key.ends_with("aula_01_notas_.pdf"));
    }

    #[test]
    fn traversal_keys_are_rejected() {
        assert!(MediaStore::validate_key("../etc/passwd").is_err());
        assert!(MediaStore::validate_key("/etc/passwd").is_err());
        assert!(MediaStore::validate_key("").is_err());
        assert!(MediaStore::validate_key("documents/ok-file.pdf").is_ok());
    }
}
