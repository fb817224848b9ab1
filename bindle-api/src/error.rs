//! Unified build errors.
//!
//! Everything a build can die of, gathered behind one type so callers need a
//! single match. Accessors expose the failing phase and source position when
//! the underlying error carries one; `report` renders the plain-text block
//! the CLI prints.

use thiserror::Error;

use bindle_config::ConfigError;
use bindle_core::bundle::BundleError;
use bindle_vfs::VfsError;

#[derive(Debug, Error)]
pub enum BindleError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Bundle(#[from] BundleError),

    /// Host file system failure outside the bundling loop, such as writing
    /// the artifact.
    #[error("{0}")]
    Vfs(#[from] VfsError),
}

impl BindleError {
    /// Name of the phase the build failed in.
    pub fn phase(&self) -> &'static str {
        match self {
            BindleError::Config(_) => "config",
            BindleError::Bundle(BundleError::Resolve(_)) => "resolve",
            BindleError::Bundle(_) => "bundle",
            BindleError::Vfs(_) => "io",
        }
    }

    /// 1-based source line, when the failure points into a module.
    pub fn line(&self) -> Option<usize> {
        match self {
            BindleError::Bundle(err) => err.line(),
            _ => None,
        }
    }

    /// 1-based source column, when the failure points into a module.
    pub fn column(&self) -> Option<usize> {
        match self {
            BindleError::Bundle(err) => err.column(),
            _ => None,
        }
    }

    /// The module the failure is attributed to, when known.
    pub fn module(&self) -> Option<String> {
        match self {
            BindleError::Bundle(err) => err.module(),
            _ => None,
        }
    }

    /// Plain-text report for terminal output.
    ///
    /// One line for the message itself, plus a location line when the error
    /// points at a module or a position inside one.
    pub fn report(&self) -> String {
        let mut out = format!("error[{}]: {}", self.phase(), self);
        if let Some(module) = self.module() {
            match (self.line(), self.column()) {
                (Some(line), Some(column)) => {
                    out.push_str(&format!("\n  --> {module}:{line}:{column}"));
                }
                _ => out.push_str(&format!("\n  --> {module}")),
            }
        }
        out
    }
}
