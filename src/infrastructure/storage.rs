//! Blob-store client for synthesized audio artifacts

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::outbound::{ArtifactStoreError, ArtifactStorePort};

/// Client for a bucket-scoped HTTP blob store.
#[derive(Clone)]
pub struct BlobStoreClient {
    client: Client,
    base_url: String,
    bucket: String,
}

impl BlobStoreClient {
    pub fn new(base_url: &str, bucket: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl ArtifactStorePort for BlobStoreClient {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, ArtifactStoreError> {
        let url = self.object_url(key);
        let response = self
            .client
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ArtifactStoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| ArtifactStoreError::Http(e.to_string()))?;
            return Err(ArtifactStoreError::Api(error_text));
        }

        Ok(url)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, ArtifactStoreError> {
        let response = self
            .client
            .get(self.object_url(key))
            .send()
            .await
            .map_err(|e| ArtifactStoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| ArtifactStoreError::Http(e.to_string()))?;
            return Err(ArtifactStoreError::Api(error_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::Http(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
