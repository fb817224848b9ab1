//! The bundling loop.
//!
//! Drains the registry's queue: read (or load shim) source, parse, run the
//! rewrite pipeline, store the finished tree under its index. Strictly
//! sequential; one module is fully processed before the next is dequeued.
//! Discovery order fixes index assignment only; runtime execution order
//! stays caller-driven from the entry module.

use bindle_config::BundleConfig;
use bindle_vfs::VirtualFileSystem;
use tracing::{debug, info};

use crate::bundle::error::BundleError;
use crate::bundle::path::ModulePath;
use crate::bundle::pipeline::{run_pipeline, PassContext};
use crate::bundle::registry::ModuleRegistry;
use crate::bundle::resolver::Resolver;
use crate::syntax::{parse_module, Program};

/// One finished module, pipeline already applied.
#[derive(Debug)]
pub struct BundledModule {
    pub path: ModulePath,
    pub program: Program,
}

/// All modules of one build; `modules[i]` holds index `i`.
#[derive(Debug)]
pub struct ModuleGraph {
    pub modules: Vec<BundledModule>,
}

impl ModuleGraph {
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

pub struct Bundler<'a> {
    config: &'a BundleConfig,
    host: &'a dyn VirtualFileSystem,
    registry: ModuleRegistry,
}

impl<'a> Bundler<'a> {
    /// A fresh bundler owns a fresh registry, so every `run` starts from a
    /// clean index space.
    pub fn new(config: &'a BundleConfig, host: &'a dyn VirtualFileSystem) -> Self {
        Self {
            config,
            host,
            registry: ModuleRegistry::new(),
        }
    }

    /// Build the full module graph starting from `entry` (index 0).
    pub fn run(&mut self, entry: ModulePath) -> Result<ModuleGraph, BundleError> {
        self.registry.reset();
        self.registry.enqueue(&entry);

        let mut modules = Vec::new();
        while let Some(path) = self.registry.next_pending() {
            let index = modules.len();
            let source = self.load_source(&path)?;
            let mut program = parse_module(&source, self.config.input.dialect)
                .map_err(|error| BundleError::Parse {
                    path: path.clone(),
                    error,
                })?;
            let ctx = PassContext {
                config: self.config,
                resolver: Resolver::new(self.config, self.host),
                current: &path,
            };
            run_pipeline(&mut program, &ctx, &mut self.registry)?;
            debug!(target: "bindle::bundle", index, module = %path, "processed module");
            modules.push(BundledModule { path, program });
        }

        info!(
            target: "bindle::bundle",
            entry = %entry,
            modules = modules.len(),
            "bundle complete"
        );
        Ok(ModuleGraph { modules })
    }

    fn load_source(&self, path: &ModulePath) -> Result<String, BundleError> {
        match path {
            ModulePath::File(file) => {
                self.host
                    .read_file(file)
                    .map_err(|source| BundleError::Read {
                        path: file.clone(),
                        source,
                    })
            }
            ModulePath::Shim(shim) => Ok(shim.source().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::shims::GlobalShim;
    use bindle_vfs::MemoryFileSystem;
    use std::path::PathBuf;

    fn entry(path: &str) -> ModulePath {
        ModulePath::File(PathBuf::from(path))
    }

    #[test]
    fn test_single_module_graph() {
        let fs = MemoryFileSystem::with_files([("/src/main.js", "export const a = 1;")]);
        let cfg = BundleConfig::default();
        let graph = Bundler::new(&cfg, &fs).run(entry("/src/main.js")).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.modules[0].path, entry("/src/main.js"));
    }

    #[test]
    fn test_dependencies_discovered_breadth_first() {
        let fs = MemoryFileSystem::with_files([
            ("/src/main.js", "import a from './a';\nimport b from './b';"),
            ("/src/a.js", "import b from './b';\nexport default 'a';"),
            ("/src/b.js", "export default 'b';"),
        ]);
        let cfg = BundleConfig::default();
        let graph = Bundler::new(&cfg, &fs).run(entry("/src/main.js")).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.modules[1].path, entry("/src/a.js"));
        assert_eq!(graph.modules[2].path, entry("/src/b.js"));
    }

    #[test]
    fn test_shared_dependency_bundled_once() {
        let fs = MemoryFileSystem::with_files([
            ("/src/main.js", "import a from './a';\nimport b from './b';"),
            ("/src/a.js", "import s from './shared';\nexport default 1;"),
            ("/src/b.js", "import s from './shared';\nexport default 2;"),
            ("/src/shared.js", "export default 0;"),
        ]);
        let cfg = BundleConfig::default();
        let graph = Bundler::new(&cfg, &fs).run(entry("/src/main.js")).unwrap();
        assert_eq!(graph.len(), 4);
        let shared: Vec<_> = graph
            .modules
            .iter()
            .filter(|m| m.path == entry("/src/shared.js"))
            .collect();
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_circular_imports_terminate() {
        let fs = MemoryFileSystem::with_files([
            ("/src/a.js", "import b from './b';\nexport default 'a';"),
            ("/src/b.js", "import a from './a';\nexport default 'b';"),
        ]);
        let cfg = BundleConfig::default();
        let graph = Bundler::new(&cfg, &fs).run(entry("/src/a.js")).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_shim_module_is_bundled() {
        let fs = MemoryFileSystem::with_files([("/src/main.js", "work(process.env);")]);
        let cfg = BundleConfig::default();
        let graph = Bundler::new(&cfg, &fs).run(entry("/src/main.js")).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.modules[1].path, ModulePath::Shim(GlobalShim::Process));
    }

    #[test]
    fn test_parse_error_carries_path() {
        let fs = MemoryFileSystem::with_files([("/src/main.js", "var a = ;")]);
        let cfg = BundleConfig::default();
        let err = Bundler::new(&cfg, &fs).run(entry("/src/main.js")).unwrap_err();
        match err {
            BundleError::Parse { path, error } => {
                assert_eq!(path, entry("/src/main.js"));
                assert_eq!(error.line(), Some(1));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let fs = MemoryFileSystem::new();
        let cfg = BundleConfig::default();
        let err = Bundler::new(&cfg, &fs).run(entry("/src/gone.js")).unwrap_err();
        assert!(matches!(err, BundleError::Read { .. }));
    }

    #[test]
    fn test_two_builds_restart_from_zero() {
        let fs = MemoryFileSystem::with_files([
            ("/src/one.js", "export default 1;"),
            ("/src/two.js", "export default 2;"),
        ]);
        let cfg = BundleConfig::default();
        let mut bundler = Bundler::new(&cfg, &fs);
        let first = bundler.run(entry("/src/one.js")).unwrap();
        let second = bundler.run(entry("/src/two.js")).unwrap();
        assert_eq!(first.modules[0].path, entry("/src/one.js"));
        assert_eq!(second.modules[0].path, entry("/src/two.js"));
        assert_eq!(second.len(), 1);
    }
}
