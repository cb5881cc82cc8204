use std::{sync::Mutex, time::Duration};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::UploadSettings;
use crate::data::JsonMetadata;

/// Stores an off-chain metadata document and returns the URI it can be read from.
#[async_trait]
pub trait MetadataUploader: Send + Sync {
    async fn upload(&self, metadata: &JsonMetadata) -> Result<String>;
}

/// POSTs the metadata JSON to a pinning endpoint.
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
    gateway: String,
    auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    uri: Option<String>,
    id: Option<String>,
}

impl HttpUploader {
    pub fn new(endpoint: &str, gateway: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            gateway: gateway.to_string(),
            auth_token: None,
        })
    }

    pub fn from_settings(settings: &UploadSettings) -> Result<Self> {
        let mut uploader = Self::new(
            &settings.endpoint,
            &settings.gateway,
            Duration::from_millis(settings.timeout_ms),
        )?;
        uploader.auth_token = settings.auth_token.clone();
        Ok(uploader)
    }
}

#[async_trait]
impl MetadataUploader for HttpUploader {
    async fn upload(&self, metadata: &JsonMetadata) -> Result<String> {
        debug!("uploading metadata for {} to {}", metadata.name, self.endpoint);

        let mut request = self.client.post(&self.endpoint).json(metadata);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let body: UploadResponse = request.send().await?.error_for_status()?.json().await?;
        let uri = resolve_uri(body, &self.gateway)?;

        info!("uploaded metadata for {}: {}", metadata.name, uri);
        Ok(uri)
    }
}

fn resolve_uri(body: UploadResponse, gateway: &str) -> Result<String> {
    match body {
        UploadResponse { uri: Some(uri), .. } => Ok(uri),
        UploadResponse { id: Some(id), .. } => {
            if gateway.is_empty() {
                bail!("upload returned id {} but no gateway is configured", id);
            }
            Ok(format!("{}/{}", gateway.trim_end_matches('/'), id))
        }
        _ => bail!("upload response carried neither a uri nor an id"),
    }
}

/// Keeps uploads in memory and hands out `memory://` URIs.
#[derive(Default)]
pub struct MemoryUploader {
    uploads: Mutex<Vec<JsonMetadata>>,
}

impl MemoryUploader {
    pub fn uploads(&self) -> Vec<JsonMetadata> {
        self.uploads
            .lock()
            .map(|uploads| uploads.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MetadataUploader for MemoryUploader {
    async fn upload(&self, metadata: &JsonMetadata) -> Result<String> {
        let mut uploads = self
            .uploads
            .lock()
            .map_err(|_| anyhow!("memory uploader lock poisoned"))?;
        uploads.push(metadata.clone());
        Ok(format!("memory://metadata/{}", uploads.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> JsonMetadata {
        JsonMetadata {
            name: name.to_string(),
            symbol: "SHIP".to_string(),
            description: "A fast sloop.".to_string(),
            image: "https://example.com/ship.png".to_string(),
        }
    }

    #[tokio::test]
    async fn memory_uploader_numbers_uploads() {
        let uploader = MemoryUploader::default();

        assert_eq!(uploader.upload(&sample("Bold Corsair")).await.unwrap(), "memory://metadata/0");
        assert_eq!(uploader.upload(&sample("Brave Seadog")).await.unwrap(), "memory://metadata/1");

        let uploads = uploader.uploads();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1].name, "Brave Seadog");
    }

    #[test]
    fn uri_wins_over_id() {
        let body = UploadResponse {
            uri: Some("https://arweave.net/abc".to_string()),
            id: Some("ignored".to_string()),
        };
        assert_eq!(resolve_uri(body, "https://gw.example").unwrap(), "https://arweave.net/abc");
    }

    #[test]
    fn id_is_joined_to_gateway() {
        let body = UploadResponse {
            uri: None,
            id: Some("abc".to_string()),
        };
        assert_eq!(resolve_uri(body, "https://arweave.net/").unwrap(), "https://arweave.net/abc");
    }

    #[test]
    fn empty_response_is_an_error() {
        let body = UploadResponse { uri: None, id: None };
        assert!(resolve_uri(body, "https://arweave.net").is_err());

        let body = UploadResponse {
            uri: None,
            id: Some("abc".to_string()),
        };
        assert!(resolve_uri(body, "").is_err());
    }

    #[test]
    fn metadata_serializes_to_plain_json() {
        let json = serde_json::to_value(sample("Savage Scourge")).unwrap();
        assert_eq!(json["name"], "Savage Scourge");
        assert_eq!(json["symbol"], "SHIP");
        assert_eq!(json["image"], "https://example.com/ship.png");
    }
}
