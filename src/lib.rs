//! JSON-Schema → io-ts compiler.
//!
//! Reads a decoded JSON-Schema-shaped document and produces one runtime
//! codec plus one static type alias per named definition, a `<D>TopLevel`
//! variant of each definition merged with the envelope type, and one
//! declaration for the whole document:
//!
//! - [`schema`] classifies a schema node into one supported shape
//! - [`lower`] builds the [`ir::Ty`] type reference for a node
//! - [`declare`] collects declarations and checks references resolve
//! - [`sort`] orders declarations by dependency
//! - [`codegen`] renders the runtime/static pair for each declaration
pub mod check;
pub mod cli;
pub mod codegen;
pub mod compile;
pub mod config;
pub mod declare;
pub mod error;
pub mod ir;
pub mod lower;
pub mod schema;
pub mod sort;

pub use compile::{compile, Compilation};
pub use config::Config;
pub use error::{CompileError, ConfigError};
