//! In-memory file system implementation

use crate::error::{VfsError, VfsResult};
use crate::VirtualFileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// An in-memory file system implementation.
///
/// All files are stored in memory using a `BTreeMap`, which makes module
/// graphs fully reproducible in tests without touching a disk. Fixture
/// paths should be absolute and normalized (the bundler produces canonical
/// paths before it probes).
///
/// # Example
/// ```
/// use bindle_vfs::{MemoryFileSystem, VirtualFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::with_files([("/main.js", "export const a = 1;")]);
/// assert!(fs.file_exists(Path::new("/main.js")));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    files: Arc<RwLock<BTreeMap<String, String>>>,
    cwd: PathBuf,
}

impl MemoryFileSystem {
    /// Create a new empty memory file system rooted at `/`.
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(BTreeMap::new())),
            cwd: PathBuf::from("/"),
        }
    }

    /// Create a new memory file system pre-populated with files.
    ///
    /// # Arguments
    /// * `files` - Iterator of (path, contents) tuples
    pub fn with_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let fs = Self::new();
        {
            let mut map = fs.files.write().unwrap();
            for (path, contents) in files {
                map.insert(path.as_ref().replace('\\', "/"), contents.into());
            }
        }
        fs
    }

    /// Set the working directory reported by [`VirtualFileSystem::cwd`].
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Normalize a path string for internal storage.
    /// Uses forward slashes consistently for cross-platform compatibility.
    fn storage_key(&self, path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileSystem for MemoryFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        let key = self.storage_key(path);
        let files = match self.files.read() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        files.contains_key(&key)
    }

    fn read_file(&self, path: &Path) -> VfsResult<String> {
        let key = self.storage_key(path);
        let files = self.files.read().map_err(|_| VfsError::Custom {
            message: String::from("Lock poisoned"),
        })?;

        files
            .get(&key)
            .cloned()
            .ok_or_else(|| VfsError::NotFound { path: key.clone() })
    }

    fn write_file(&self, path: &Path, contents: &str) -> VfsResult<()> {
        let key = self.storage_key(path);
        let mut files = self.files.write().map_err(|_| VfsError::Custom {
            message: String::from("Lock poisoned"),
        })?;
        files.insert(key, contents.to_string());
        Ok(())
    }

    fn cwd(&self) -> PathBuf {
        self.cwd.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_fs_is_empty() {
        let fs = MemoryFileSystem::new();
        assert!(!fs.file_exists(Path::new("/anything.js")));
    }

    #[test]
    fn test_write_and_read() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/test.js");

        fs.write_file(path, "const x = 1;").unwrap();

        let contents = fs.read_file(path).unwrap();
        assert_eq!(contents, "const x = 1;");
    }

    #[test]
    fn test_empty_contents() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/empty.js");

        fs.write_file(path, "").unwrap();
        assert!(fs.read_file(path).unwrap().is_empty());
    }

    #[test]
    fn test_file_exists() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/exists.js");

        assert!(!fs.file_exists(path));
        fs.write_file(path, "x").unwrap();
        assert!(fs.file_exists(path));
    }

    #[test]
    fn test_read_nonexistent() {
        let fs = MemoryFileSystem::new();
        let result = fs.read_file(Path::new("/nonexistent.js"));

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), VfsError::NotFound { .. }));
    }

    #[test]
    fn test_overwrite_file() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/overwrite.js");

        fs.write_file(path, "first").unwrap();
        fs.write_file(path, "second").unwrap();

        assert_eq!(fs.read_file(path).unwrap(), "second");
    }

    #[test]
    fn test_with_files() {
        let fs = MemoryFileSystem::with_files([
            ("/a.js", "contents a"),
            ("/b.js", "contents b"),
        ]);

        assert_eq!(fs.read_file(Path::new("/a.js")).unwrap(), "contents a");
        assert_eq!(fs.read_file(Path::new("/b.js")).unwrap(), "contents b");
    }

    #[test]
    fn test_backslash_paths_normalize_to_same_file() {
        let fs = MemoryFileSystem::new();
        fs.write_file(Path::new("/dir\\file.js"), "x").unwrap();
        assert!(fs.file_exists(Path::new("/dir/file.js")));
    }

    #[test]
    fn test_default_cwd_is_root() {
        let fs = MemoryFileSystem::new();
        assert_eq!(fs.cwd(), PathBuf::from("/"));
    }

    #[test]
    fn test_with_cwd() {
        let fs = MemoryFileSystem::new().with_cwd("/project");
        assert_eq!(fs.cwd(), PathBuf::from("/project"));
    }

    #[test]
    fn test_join_path_normalizes() {
        let fs = MemoryFileSystem::new();
        let joined = fs.join_path(Path::new("/src/pages"), "../util.js");
        assert_eq!(joined, PathBuf::from("/src/util.js"));
    }

    #[test]
    fn test_join_path_absolute_segment_wins() {
        let fs = MemoryFileSystem::new();
        let joined = fs.join_path(Path::new("/src"), "/vendor/lib.js");
        assert_eq!(joined, PathBuf::from("/vendor/lib.js"));
    }

    #[test]
    fn test_clone_shares_data() {
        let fs1 = MemoryFileSystem::new();
        let path = Path::new("/shared.js");

        fs1.write_file(path, "shared").unwrap();

        let fs2 = fs1.clone();
        assert!(fs2.file_exists(path));
        assert_eq!(fs2.read_file(path).unwrap(), "shared");

        // Write via fs2, should be visible in fs1
        fs2.write_file(path, "modified").unwrap();
        assert_eq!(fs1.read_file(path).unwrap(), "modified");
    }

    #[test]
    fn test_concurrent_reads() {
        let fs = MemoryFileSystem::with_files([("/test.js", "concurrent")]);
        let mut handles = vec![];

        for _ in 0..10 {
            let fs_clone = fs.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    let contents = fs_clone.read_file(Path::new("/test.js")).unwrap();
                    assert_eq!(contents, "concurrent");
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_concurrent_writes() {
        let fs = MemoryFileSystem::new();
        let mut handles = vec![];

        for i in 0..10 {
            let fs_clone = fs.clone();
            let data = format!("data{}", i);
            handles.push(thread::spawn(move || {
                let path = Path::new("/concurrent.js");
                for _ in 0..10 {
                    fs_clone.write_file(path, &data).unwrap();
                    let _ = fs_clone.read_file(path);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(fs.file_exists(Path::new("/concurrent.js")));
    }
}
