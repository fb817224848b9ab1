//! Bindle Virtual File System
//!
//! The host capability every other bindle crate does its I/O through. The
//! bundler core never touches `std::fs` directly; it only sees this trait,
//! which keeps module resolution and graph building fully testable against
//! in-memory fixtures.
//!
//! # Usage
//! ```rust,ignore
//! use bindle_vfs::{VirtualFileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::with_files([("/src/main.js", "export const a = 1;")]);
//! let source = fs.read_file(Path::new("/src/main.js")).unwrap();
//! ```

mod error;
mod memory;
mod native;
mod r#trait;

pub use error::{VfsError, VfsResult};
pub use memory::MemoryFileSystem;
pub use native::NativeFileSystem;
pub use r#trait::{normalize_lexically, VirtualFileSystem};

/// Create a new memory-based file system.
pub fn memory_fs() -> MemoryFileSystem {
    MemoryFileSystem::new()
}

/// Create a new native file system.
pub fn native_fs() -> NativeFileSystem {
    NativeFileSystem::new()
}
