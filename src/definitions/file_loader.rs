//! File-based catalog loader

use async_trait::async_trait;
use tokio::fs;

use super::parser::{CatalogFormat, parse_catalog};
use crate::core::error::Result;
use crate::definitions::{DefinitionLoader, ServiceCatalog};

/// Loads service catalogs from local JSON or YAML files
pub struct FileDefinitionLoader;

impl FileDefinitionLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileDefinitionLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DefinitionLoader for FileDefinitionLoader {
    async fn load(&self, source: &str) -> Result<ServiceCatalog> {
        let content = fs::read_to_string(source).await?;
        parse_catalog(&content, CatalogFormat::from_source(source))
    }
}
