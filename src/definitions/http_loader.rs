//! HTTP-based catalog loader

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::parser::{CatalogFormat, parse_catalog};
use crate::core::error::{Error, Result};
use crate::definitions::{DefinitionLoader, ServiceCatalog};

/// Loads service catalogs from HTTP/HTTPS URLs
pub struct HttpDefinitionLoader {
    client: Client,
}

impl HttpDefinitionLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpDefinitionLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DefinitionLoader for HttpDefinitionLoader {
    async fn load(&self, source: &str) -> Result<ServiceCatalog> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(Error::definitions(format!(
                "HttpDefinitionLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            Error::definitions(format!("Failed to fetch service catalog from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::definitions(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response
            .text()
            .await
            .map_err(|e| Error::definitions(format!("Failed to read response body: {e}")))?;

        let format = match CatalogFormat::from_content_type(&content_type) {
            CatalogFormat::Unknown => CatalogFormat::from_source(source),
            known => known,
        };
        parse_catalog(&content, format)
    }
}
