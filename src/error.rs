//! Error types for compilation and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal compilation failures. A compilation either produces every artifact
/// or returns one of these and produces nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The root document, or its `definitions` block, is not an object.
    #[error("invalid schema document: {0}")]
    InvalidDocument(String),

    /// A declaration name cannot be emitted as an identifier.
    #[error("invalid declaration name `{0}`")]
    InvalidDeclarationName(String),

    /// Two declarations would share one name.
    #[error("duplicate declaration `{0}`")]
    DuplicateDeclaration(String),

    /// A named identifier does not match any collected declaration.
    #[error("unresolved reference `{name}` in declaration `{referenced_by}`")]
    UnresolvedReference { name: String, referenced_by: String },
}

/// Failures while loading a [`crate::config::Config`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding failed; `message` carries the key path of the offending entry.
    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
