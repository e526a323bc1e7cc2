//! Generation domain module - renders templates into output files
//!
//! Leaves first: the [`DuplicateFilter`] and [`MultiFileSink`] hold per-render
//! state, the [`HelperRegistry`] exposes them to templates, and the
//! [`TemplateRunner`] ties everything together for each template in a
//! directory.

pub mod context;
pub mod dedup;
pub mod errors;
pub mod helpers;
pub mod runner;
pub mod sink;

pub use context::*;
pub use dedup::*;
pub use errors::*;
pub use helpers::HelperRegistry;
pub use runner::*;
pub use sink::{MultiFileSink, SharedSink};
