//! Project definition.
//!
//! The project describes every artifact to produce and is the only input of a build run.
//!
//! # Submodules
//!
//! - `types` - [`Project`], [`Artifact`] and [`Target`]
//! - [`load`] - discovery and parsing of `project.yaml`

pub mod load;
mod types;

pub use load::{ProjectError, find_project, find_project_file, load_project};
pub use types::*;

pub(crate) use types::normalize;
