//! Service interface definitions rendered by templates

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Root object handed to every template render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    /// Version of the SDK the definitions were taken from
    pub version: String,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(version: impl Into<String>, services: Vec<Service>) -> Self {
        Self {
            version: version.into(),
            services,
        }
    }

    /// Keep only the service whose id matches `id`, ignoring case
    pub fn retain_service(&mut self, id: &str) -> Result<()> {
        let wanted = id.to_lowercase();
        self.services.retain(|service| service.id.to_lowercase() == wanted);
        if self.services.is_empty() {
            return Err(Error::definitions(format!("No service with id '{id}'")));
        }
        Ok(())
    }
}

/// One service interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Lower-cased, URL compatible service name
    pub id: String,
    /// Friendly name
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Service {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Sorted namespaces referenced by method inputs and outputs, without blanks
    pub fn imports(&self) -> Vec<String> {
        self.methods
            .iter()
            .flat_map(|method| std::iter::once(&method.input).chain(method.output.as_ref()))
            .map(|structure| structure.namespace.as_str())
            .filter(|namespace| !namespace.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", method.name)?;
        }
        Ok(())
    }
}

/// A service method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub input: Structure,
    /// Absent for methods without a response body; templates see `null`
    #[serde(default)]
    pub output: Option<Structure>,
}

impl Method {
    pub fn new(name: impl Into<String>, input: Structure, output: Option<Structure>) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.output {
            Some(output) => write!(f, "{}({}) {}", self.name, self.input, output),
            None => write!(f, "{}({}) <nil>", self.name, self.input),
        }
    }
}

/// An input or output structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Package or module the type lives in
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

impl Structure {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        self.fields.insert(
            name.clone(),
            Field {
                name,
                type_name: type_name.into(),
            },
        );
        self
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// A structure field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}
