//! The per-module rewrite pipeline.
//!
//! Four passes in fixed order: artifact cleanup, import rewriting, export
//! rewriting, free-global injection. Passes mutate the tree and may extend
//! the registry through the resolver; they never read files or write
//! output, and they never error on well-formed input they do not recognize.

mod exports;
mod fixes;
mod globals;
mod imports;

use bindle_config::BundleConfig;

use crate::bundle::path::ModulePath;
use crate::bundle::registry::ModuleRegistry;
use crate::bundle::resolver::{Resolution, Resolver};
use crate::bundle::resolver::ResolveError;
use crate::syntax::position::SourceSpan;
use crate::syntax::stmt::Program;

/// Read-only surroundings of one module's pipeline run.
pub struct PassContext<'a> {
    pub config: &'a BundleConfig,
    pub resolver: Resolver<'a>,
    pub current: &'a ModulePath,
}

impl<'a> PassContext<'a> {
    /// Resolve a specifier from the current module.
    pub fn resolve(&self, specifier: &str) -> Result<Resolution, ResolveError> {
        match self.current {
            ModulePath::File(path) => self.resolver.resolve(path, specifier),
            // Shim sources carry no imports; anchor at the root if one
            // somehow resolves anyway.
            ModulePath::Shim(_) => self
                .resolver
                .resolve(std::path::Path::new("/__shim__"), specifier),
        }
    }
}

/// Run all passes over one module's tree.
pub fn run_pipeline(
    program: &mut Program,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<(), ResolveError> {
    fixes::fix_artifacts(program);
    imports::rewrite_imports(program, ctx, registry)?;
    exports::rewrite_exports(program, ctx, registry)?;
    if !ctx.current.is_shim() {
        globals::inject_globals(program, ctx, registry);
    }
    Ok(())
}

/// Deterministic temporary for a loader-call binding: dependency index plus
/// the rewritten statement's source position.
pub(crate) fn temp_name(index: usize, span: SourceSpan) -> String {
    format!(
        "__bindle_tmp{index}_{}_{}",
        span.start.line, span.start.column
    )
}

/// Temporary for an external binding, which has no dependency index.
pub(crate) fn external_temp_name(span: SourceSpan) -> String {
    format!(
        "__bindle_tmp_ext_{}_{}",
        span.start.line, span.start.column
    )
}
