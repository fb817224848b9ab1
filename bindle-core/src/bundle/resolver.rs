//! Module path resolution.
//!
//! Order of business: alias substitution, external lookup, then file probing
//! relative to the importing module's directory. Probing tries the exact
//! path, `<path>.js`, and `<path>/index.js`; paths are normalized lexically
//! by the host's `join_path`, so one file on disk has exactly one canonical
//! form. Resolution is pure given the same inputs.

use std::path::{Path, PathBuf};

use bindle_config::{BundleConfig, ExternalSpec};
use bindle_vfs::VirtualFileSystem;
use thiserror::Error;
use tracing::debug;

use crate::bundle::path::ModulePath;

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Path(ModulePath),
    /// Deliberately unbundled; the bundle binds it by name at runtime.
    External(ExternalSpec),
}

/// A specifier that maps to no existing file and no external entry.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "cannot resolve '{specifier}' imported from '{}' (tried: {})",
    .from.display(),
    format_candidates(.tried)
)]
pub struct ResolveError {
    pub specifier: String,
    pub from: PathBuf,
    pub tried: Vec<PathBuf>,
}

fn format_candidates(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct Resolver<'a> {
    config: &'a BundleConfig,
    host: &'a dyn VirtualFileSystem,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a BundleConfig, host: &'a dyn VirtualFileSystem) -> Self {
        Self { config, host }
    }

    /// Resolve `specifier` as imported from the module at `from`.
    pub fn resolve(&self, from: &Path, specifier: &str) -> Result<Resolution, ResolveError> {
        let base = from
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("/"));
        self.resolve_in(&base, from, specifier)
    }

    /// Resolve the configured entry point against the host's working
    /// directory. Aliases, externals and extension probing all apply.
    pub fn resolve_entry(&self) -> Result<Resolution, ResolveError> {
        let cwd = self.host.cwd();
        let entry = self.config.input.entry.clone();
        self.resolve_in(&cwd, &cwd, &entry)
    }

    fn resolve_in(
        &self,
        base: &Path,
        from: &Path,
        specifier: &str,
    ) -> Result<Resolution, ResolveError> {
        let substituted = self
            .config
            .aliases
            .get(specifier)
            .map(String::as_str)
            .unwrap_or(specifier);

        if let Some(spec) = self.config.externals.get(substituted) {
            debug!(target: "bindle::resolve", specifier, "resolved to external");
            return Ok(Resolution::External(spec.clone()));
        }

        let mut tried = Vec::with_capacity(3);
        for candidate in [
            substituted.to_string(),
            format!("{substituted}.js"),
            format!("{substituted}/index.js"),
        ] {
            let path = self.host.join_path(base, &candidate);
            if self.host.file_exists(&path) {
                debug!(target: "bindle::resolve", specifier, path = %path.display(), "resolved");
                return Ok(Resolution::Path(ModulePath::File(path)));
            }
            tried.push(path);
        }

        Err(ResolveError {
            specifier: specifier.to_string(),
            from: from.to_path_buf(),
            tried,
        })
    }
}
