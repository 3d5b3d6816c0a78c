//! Error types for scaffold generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving and writing a scaffold
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A template referenced a token whose key has no substitution entry
    #[error("unresolved token '{key}' in {}", .file.display())]
    UnresolvedToken { file: PathBuf, key: String },

    /// A substitution key that is not identifier-like
    #[error("invalid substitution key '{key}': keys must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey { key: String },

    /// A `--set` argument without a `=` separator
    #[error("malformed substitution '{arg}': expected key=value")]
    MalformedPair { arg: String },

    /// A vars-file entry whose value is a mapping or sequence
    #[error("substitution value for '{key}' must be a scalar")]
    InvalidValue { key: String },

    /// A selected feature the manifest does not declare
    #[error("unknown feature '{feature}' (declared features: {})", format_features(.available))]
    UnknownFeature {
        feature: String,
        available: Vec<String>,
    },

    /// Two templates whose substituted paths collide
    #[error(
        "templates {} and {} both resolve to output path {rendered:?}",
        .first.display(),
        .second.display()
    )]
    DuplicateOutput {
        first: PathBuf,
        second: PathBuf,
        rendered: String,
    },

    /// A substituted path that would land outside the output root
    #[error("path {rendered:?} (from template {}) escapes the output directory", .file.display())]
    InvalidPath { file: PathBuf, rendered: String },

    /// File system failure, with the path that produced it
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed scaffold.yaml
    #[error("failed to parse manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Failure while writing the XPI archive
    #[error("failed to write XPI {}: {source}", .path.display())]
    Xpi {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

fn format_features(features: &[String]) -> String {
    if features.is_empty() {
        "none".to_string()
    } else {
        features.join(", ")
    }
}

impl ScaffoldError {
    /// Attach path context to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
