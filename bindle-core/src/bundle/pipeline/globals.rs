//! Free-global injection pass.
//!
//! For each recognized global enabled in configuration, a free reference
//! anywhere in the module prepends a loader binding for the corresponding
//! shim, registering the shim at most once per build. Bindings appear in
//! the fixed order `process`, `global`, `Buffer`. Shim modules themselves
//! never run this pass.

use tracing::debug;

use crate::bundle::builder;
use crate::bundle::path::ModulePath;
use crate::bundle::pipeline::PassContext;
use crate::bundle::registry::ModuleRegistry;
use crate::bundle::scope::uses_free;
use crate::bundle::shims::GlobalShim;
use crate::syntax::stmt::Program;

pub fn inject_globals(
    program: &mut Program,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) {
    let mut bindings = Vec::new();
    for shim in GlobalShim::all() {
        if !shim.enabled(&ctx.config.globals) {
            continue;
        }
        if !uses_free(program, shim.name()) {
            continue;
        }
        let index = registry.get_index(&ModulePath::Shim(shim));
        debug!(
            target: "bindle::bundle",
            global = shim.name(),
            index,
            module = %ctx.current,
            "injecting global shim"
        );
        bindings.push(builder::var_stmt(
            shim.name(),
            builder::member(builder::require_call(index), "exports"),
        ));
    }
    if !bindings.is_empty() {
        program.body.splice(0..0, bindings);
    }
}
