//! Configuration errors
//!
//! Every way a configuration can be malformed is caught here, before the
//! bundler core ever sees it.

use thiserror::Error;

/// Configuration error
///
/// Raised while loading, merging or validating a configuration. All of these
/// are fatal; the bundler never starts on a half-valid config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No entry point given, neither in the config file nor on the CLI.
    #[error("no entry point configured; set 'input.entry' or pass --entry")]
    MissingEntry,

    /// The entry specifier is declared external, so there is nothing to bundle.
    #[error("entry point '{0}' is configured as an external dependency")]
    ExternalEntry(String),

    /// Unknown source dialect name.
    #[error("unknown source dialect '{0}' (expected 'es5' or 'es2015')")]
    InvalidDialect(String),

    /// Unknown runtime target name.
    #[error("unknown runtime target '{0}' (expected 'browser' or 'node')")]
    InvalidRuntime(String),

    /// An externals entry with a value that means nothing.
    #[error("invalid external '{specifier}': {message}")]
    InvalidExternal { specifier: String, message: String },

    /// A key=value CLI option that does not split into key and value.
    #[error("invalid option '{0}' (expected key=value)")]
    InvalidKeyValue(String),

    /// The config file could not be read.
    #[error("cannot read config file '{path}': {message}")]
    FileRead { path: String, message: String },

    /// The config file is not valid JSON for the expected shape.
    #[error("cannot parse config file '{path}': {message}")]
    FileParse { path: String, message: String },
}
