//! Scaffold Core - library for generating Mozilla add-on skeletons
//!
//! This library turns a directory of template files into a ready-to-load
//! extension directory. Templates carry placeholder tokens in two
//! spellings (`%key%` and `%(key)s`, both resolving to the same value);
//! the generator substitutes a key/value table into file contents and
//! relative paths and writes the resolved tree, optionally packaging it
//! as an XPI.
//!
//! # Architecture
//!
//! - [`template::token`] / [`template::render`] - token scanning and
//!   single-pass substitution
//! - [`template::generator`] - the resolve-then-write scaffold operation
//! - [`template::manifest`] - optional `scaffold.yaml` feature gating
//! - [`vars`] - substitution map construction and validation
//! - [`slug`] - add-on identifier derivation
//! - [`xpi`] - zip packaging of a resolved tree
//!
//! # Example
//!
//! ```ignore
//! use scaffold_core::{generate, Vars};
//!
//! let mut vars = Vars::new();
//! vars.insert("slug", "myextension")?;
//! let written = generate(template_dir, out_dir, &vars, &[])?;
//! ```

pub mod error;
pub mod slug;
pub mod template;
pub mod vars;
pub mod xpi;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use slug::slugify;
pub use template::{
    check_compatibility, generate, resolve, scan_tree, write_tree, ResolvedFile, ScaffoldManifest,
    Spelling, Token, MANIFEST_FILE,
};
pub use vars::Vars;
pub use xpi::write_xpi;
