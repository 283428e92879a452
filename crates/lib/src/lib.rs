//! graven-lib: concurrent build orchestration for multi-platform projects.
//!
//! This crate provides:
//! - `Project`: the declarative description of artifacts and their targets
//! - `build_project`: builds every (artifact, target) pair concurrently and
//!   reports every failure, not just the first
//! - `clean_project`: removes previous build output

pub mod build;
pub mod consts;
pub mod project;
pub mod util;

pub use build::{BuildConfig, BuildFailures, BuildReport, build_project, clean_project};
pub use project::{Project, find_project};
