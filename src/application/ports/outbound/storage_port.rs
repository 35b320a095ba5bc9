//! Artifact-store port - keyed blob persistence

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("store API error: {0}")]
    Api(String),
}

#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Persists `bytes` under `key` and returns the artifact URI.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, ArtifactStoreError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, ArtifactStoreError>;
}
