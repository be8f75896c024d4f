//! Rendering and persistence of `*.nac.yaml` documents.

pub mod files;
pub mod yaml;

pub use files::{clear_output_dir, write_bytes_atomic};
pub use yaml::{RenderedDocument, render_objects, render_policies, render_prerequisites};
