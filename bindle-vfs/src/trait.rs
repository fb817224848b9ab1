//! VirtualFileSystem trait definition

use crate::error::VfsResult;
use std::path::{Component, Path, PathBuf};

/// Virtual file system trait
///
/// The host capability consumed by the bundler: existence probes and text
/// reads for module resolution, a lexical path algebra so every module gets
/// exactly one canonical path, and a current working directory to anchor
/// relative entry points. `write_file` exists for the CLI to place the
/// finished artifact; the bundler core never writes.
///
/// # Implementations
/// - `MemoryFileSystem`: in-memory fixture file system for tests
/// - `NativeFileSystem`: the real OS file system
pub trait VirtualFileSystem: Send + Sync {
    /// Check whether a file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    ///
    /// # Arguments
    /// * `path` - File path
    ///
    /// # Returns
    /// File contents as a string, or VfsError
    fn read_file(&self, path: &Path) -> VfsResult<String>;

    /// Write text contents to a file.
    ///
    /// Creates the file if it doesn't exist, truncates it if it does.
    fn write_file(&self, path: &Path, contents: &str) -> VfsResult<()>;

    /// Join `segment` onto `base` and normalize the result lexically.
    ///
    /// `.` and `..` segments are folded without consulting the file system,
    /// so joining the same pieces always yields the same canonical path. An
    /// absolute `segment` replaces `base`.
    fn join_path(&self, base: &Path, segment: &str) -> PathBuf {
        normalize_lexically(&base.join(segment.replace('\\', "/")))
    }

    /// Current working directory used to anchor relative entry paths.
    fn cwd(&self) -> PathBuf;
}

/// Fold `.` and `..` components without touching the file system.
///
/// `..` at the root of an absolute path is dropped; on a relative path it is
/// kept so the caller can still anchor it later.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
