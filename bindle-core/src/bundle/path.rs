//! Canonical module identity.

use std::fmt;
use std::path::PathBuf;

use crate::bundle::shims::GlobalShim;

/// Dedup key for one module in the registry: a normalized file path, or the
/// reserved identity of a built-in global shim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModulePath {
    File(PathBuf),
    Shim(GlobalShim),
}

impl ModulePath {
    pub fn is_shim(&self) -> bool {
        matches!(self, ModulePath::Shim(_))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModulePath::File(path) => write!(f, "{}", path.display()),
            ModulePath::Shim(shim) => write!(f, "shim:{}", shim.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_file_path() {
        let path = ModulePath::File(PathBuf::from("/src/main.js"));
        assert_eq!(path.to_string(), "/src/main.js");
    }

    #[test]
    fn test_display_shim_path() {
        let path = ModulePath::Shim(GlobalShim::Process);
        assert_eq!(path.to_string(), "shim:process");
        assert!(path.is_shim());
    }

    #[test]
    fn test_paths_are_map_keys() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ModulePath::File(PathBuf::from("/a.js")), 0usize);
        map.insert(ModulePath::Shim(GlobalShim::Buffer), 1usize);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&ModulePath::Shim(GlobalShim::Buffer)], 1);
    }
}
