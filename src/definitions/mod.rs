//! Service definitions and the loaders that produce them
//!
//! Building definitions from an SDK happens elsewhere; svcgen reads a
//! pre-built [`ServiceCatalog`] document from disk or over HTTP.

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod model;
pub mod parser;

pub use composite_loader::CompositeDefinitionLoader;
pub use file_loader::FileDefinitionLoader;
pub use http_loader::HttpDefinitionLoader;
pub use model::*;
pub use parser::{CatalogFormat, parse_catalog};

use async_trait::async_trait;

use crate::core::error::Result;

/// Loads a service catalog from a source string (path or URL)
#[async_trait]
pub trait DefinitionLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<ServiceCatalog>;
}
