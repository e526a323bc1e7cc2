//! svcgen
//!
//! Generates source-code bindings for service interfaces by rendering Tera
//! templates against a [`ServiceCatalog`]. A single template can write any
//! number of files: calling `SetFileName` mid-render redirects everything
//! rendered afterwards into a new file under the output directory.
//!
//! ```no_run
//! use svcgen::{RunnerConfig, ServiceCatalog, TemplateRunner};
//!
//! # fn example(catalog: ServiceCatalog) -> Result<(), svcgen::GenerationError> {
//! let runner = TemplateRunner::new(RunnerConfig::new("templates", "generated"));
//! let report = runner.run(&catalog)?;
//! for file in report.files() {
//!     println!("{}", file.display());
//! }
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod core;
pub mod definitions;
pub mod generation;

pub use crate::{
    core::{Config, Error, Result},
    definitions::{
        CompositeDefinitionLoader, DefinitionLoader, Field, Method, Service, ServiceCatalog,
        Structure,
    },
    generation::{GenerationError, GenerationReport, RunnerConfig, TemplateRunner},
};
