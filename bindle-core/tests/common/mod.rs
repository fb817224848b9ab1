//! Shared helpers for end-to-end bundle tests.
//!
//! Every test drives the full path a real build takes: resolve the entry
//! against the host, drain the graph, emit the final script. Assertions run
//! against the emitted text.

use bindle_config::BundleConfig;
use bindle_core::bundle::{emit, Bundler, ModuleGraph, ModulePath, Resolution};
use bindle_core::bundle::Resolver;
use bindle_vfs::MemoryFileSystem;

pub fn memory_fs(files: &[(&str, &str)]) -> MemoryFileSystem {
    MemoryFileSystem::with_files(files.iter().copied()).with_cwd("/project")
}

/// Build the graph for `cfg.input.entry` over the given files.
pub fn build_graph(files: &[(&str, &str)], cfg: &BundleConfig) -> ModuleGraph {
    let fs = memory_fs(files);
    let entry = match Resolver::new(cfg, &fs).resolve_entry().expect("entry resolves") {
        Resolution::Path(path) => path,
        Resolution::External(_) => panic!("entry resolved as external"),
    };
    Bundler::new(cfg, &fs).run(entry).expect("bundle succeeds")
}

/// Build and emit the full bundle text.
pub fn build_bundle(files: &[(&str, &str)], cfg: &BundleConfig) -> String {
    let graph = build_graph(files, cfg);
    emit(&graph, cfg)
}

/// Bundle with a default configuration whose entry is `entry`.
pub fn bundle_entry(files: &[(&str, &str)], entry: &str) -> String {
    let mut cfg = BundleConfig::default();
    cfg.input.entry = entry.to_string();
    build_bundle(files, &cfg)
}

pub fn file_path(path: &str) -> ModulePath {
    ModulePath::File(std::path::PathBuf::from(path))
}
