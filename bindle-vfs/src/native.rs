//! Native file system implementation

use crate::error::{VfsError, VfsResult};
use crate::VirtualFileSystem;
use std::path::{Path, PathBuf};

/// A native OS file system implementation.
///
/// This wraps `std::fs` operations and provides the `VirtualFileSystem`
/// interface for local file access. This is the host the CLI hands to the
/// bundler.
///
/// # Example
/// ```
/// use bindle_vfs::{NativeFileSystem, VirtualFileSystem};
///
/// let fs = NativeFileSystem::new();
/// let cwd = fs.cwd();
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeFileSystem {}

impl NativeFileSystem {
    /// Create a new native file system.
    pub fn new() -> Self {
        Self {}
    }
}

impl VirtualFileSystem for NativeFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> VfsResult<String> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound {
                path: path.to_string_lossy().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => VfsError::PermissionDenied {
                path: path.to_string_lossy().to_string(),
            },
            std::io::ErrorKind::InvalidData => VfsError::InvalidData {
                path: path.to_string_lossy().to_string(),
                message: e.to_string(),
            },
            _ => e.into(),
        })
    }

    fn write_file(&self, path: &Path, contents: &str) -> VfsResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents).map_err(|e| e.into())
    }

    fn cwd(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
    }
}
