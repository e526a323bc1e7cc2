//! Composite catalog loader that picks a strategy from the source string

use async_trait::async_trait;
use tracing::debug;

use super::{FileDefinitionLoader, HttpDefinitionLoader};
use crate::core::error::Result;
use crate::definitions::{DefinitionLoader, ServiceCatalog};

/// Sends URLs to the HTTP loader and everything else to the file loader
pub struct CompositeDefinitionLoader {
    http: HttpDefinitionLoader,
    file: FileDefinitionLoader,
}

impl CompositeDefinitionLoader {
    pub fn new() -> Self {
        Self {
            http: HttpDefinitionLoader::new(),
            file: FileDefinitionLoader::new(),
        }
    }
}

impl Default for CompositeDefinitionLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DefinitionLoader for CompositeDefinitionLoader {
    async fn load(&self, source: &str) -> Result<ServiceCatalog> {
        if source.starts_with("http://") || source.starts_with("https://") {
            debug!(source, "Loading service catalog over HTTP");
            self.http.load(source).await
        } else {
            debug!(source, "Loading service catalog from file");
            self.file.load(source).await
        }
    }
}
