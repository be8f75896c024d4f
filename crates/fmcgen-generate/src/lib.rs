//! Generation engine for fmcgen.
//!
//! Generators fabricate FMC objects and policies from the counts in
//! [`GenerationSettings`](fmcgen_core::GenerationSettings). The engine runs
//! them in dependency order, threading name pools forward so groups and
//! policies only reference objects created earlier, then writes one
//! `*.nac.yaml` document per category.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod registry;
pub mod sampling;

pub use engine::{GeneratedConfig, GenerationEngine, GenerationResult, generate};
pub use errors::GenerationError;
pub use model::{FileReport, GenerateOptions, GenerationReport};
pub use registry::ObjectRegistry;
