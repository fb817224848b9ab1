//! Fatal bundling errors.

use std::path::PathBuf;

use bindle_vfs::VfsError;
use thiserror::Error;

use crate::bundle::path::ModulePath;
use crate::bundle::resolver::ResolveError;
use crate::syntax::ParserError;

/// Anything that aborts a build. No partial artifact is ever emitted.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("cannot read module '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: VfsError,
    },

    #[error("parse error in '{path}': {error}")]
    Parse {
        path: ModulePath,
        #[source]
        error: ParserError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl BundleError {
    /// Position of the failure, when the variant carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            BundleError::Parse { error, .. } => error.line(),
            _ => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            BundleError::Parse { error, .. } => error.column(),
            _ => None,
        }
    }

    /// The module the failure is attributed to, when known.
    pub fn module(&self) -> Option<String> {
        match self {
            BundleError::Read { path, .. } => Some(path.display().to_string()),
            BundleError::Parse { path, .. } => Some(path.to_string()),
            BundleError::Resolve(err) => Some(err.from.display().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{ParserError, ParserErrorKind};

    #[test]
    fn test_parse_error_carries_position() {
        let err = BundleError::Parse {
            path: ModulePath::File(PathBuf::from("/src/main.js")),
            error: ParserError::at(ParserErrorKind::UnterminatedString, 4, 12),
        };
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.column(), Some(12));
        let text = err.to_string();
        assert!(text.contains("/src/main.js"));
        assert!(text.contains("4:12"));
    }

    #[test]
    fn test_read_error_names_path() {
        let err = BundleError::Read {
            path: PathBuf::from("/src/gone.js"),
            source: VfsError::NotFound {
                path: "/src/gone.js".to_string(),
            },
        };
        assert!(err.to_string().contains("/src/gone.js"));
        assert_eq!(err.module(), Some("/src/gone.js".to_string()));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_resolve_error_converts() {
        let resolve = ResolveError {
            specifier: "./missing".to_string(),
            from: PathBuf::from("/src/main.js"),
            tried: vec![PathBuf::from("/src/missing.js")],
        };
        let err: BundleError = resolve.into();
        assert!(matches!(err, BundleError::Resolve(_)));
    }
}
