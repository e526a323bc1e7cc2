//! Render context built from the service catalog

use serde_json::{Value as JsonValue, json};
use tera::Context;

use crate::definitions::ServiceCatalog;
use crate::generation::GenerationError;

/// Data every template renders against.
///
/// The root always has the catalog shape: `version` plus the ordered
/// `services` list. Each service additionally carries its derived `imports`.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub data: JsonValue,
}

impl RenderContext {
    pub fn from_catalog(catalog: &ServiceCatalog) -> Result<Self, GenerationError> {
        let mut data = serde_json::to_value(catalog)?;

        if let Some(services) = data.get_mut("services").and_then(JsonValue::as_array_mut) {
            for (value, service) in services.iter_mut().zip(&catalog.services) {
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("imports".to_string(), json!(service.imports()));
                }
            }
        }

        Ok(Self { data })
    }

    /// Convert to a Tera context, one top-level key per root field
    pub fn to_tera_context(&self) -> Context {
        let mut context = Context::new();
        if let Some(obj) = self.data.as_object() {
            for (key, value) in obj {
                context.insert(key.as_str(), value);
            }
        }
        context
    }
}
