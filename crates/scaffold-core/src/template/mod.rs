//! Template scanning, substitution, and scaffold generation
//!
//! This module provides:
//! - Token scanning for both placeholder spellings (`%key%`, `%(key)s`)
//! - Single-pass substitution rendering
//! - The scaffold generator (resolve in memory, then write)
//! - The optional `scaffold.yaml` feature manifest
//! - Manifest/CLI version compatibility checking

pub mod generator;
pub mod manifest;
pub mod render;
pub mod token;
pub mod version;

pub use generator::{generate, resolve, scan_tree, write_tree, ResolvedFile};
pub use manifest::{ScaffoldManifest, MANIFEST_FILE};
pub use render::render;
pub use token::{scan, Spelling, Token};
pub use version::check_compatibility;
