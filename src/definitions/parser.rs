//! Catalog document parsing
//!
//! Loaders only fetch bytes; this module turns them into a [`ServiceCatalog`].

use crate::core::error::{Error, Result};
use crate::definitions::ServiceCatalog;

/// Serialization format of a catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
    /// Try JSON first, then YAML
    Unknown,
}

impl CatalogFormat {
    /// Guess the format from a file name or URL
    pub fn from_source(source: &str) -> Self {
        let path = source
            .split(['?', '#'])
            .next()
            .unwrap_or(source)
            .to_ascii_lowercase();
        if path.ends_with(".json") {
            CatalogFormat::Json
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            CatalogFormat::Yaml
        } else {
            CatalogFormat::Unknown
        }
    }

    /// Guess the format from an HTTP content type
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.contains("json") {
            CatalogFormat::Json
        } else if content_type.contains("yaml") {
            CatalogFormat::Yaml
        } else {
            CatalogFormat::Unknown
        }
    }
}

/// Parse a catalog document
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<ServiceCatalog> {
    match format {
        CatalogFormat::Json => Ok(serde_json::from_str(content)?),
        CatalogFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        CatalogFormat::Unknown => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| Error::definitions(format!("Failed to parse service catalog: {e}"))),
    }
}
