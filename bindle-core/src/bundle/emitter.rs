//! Bundle serialization.
//!
//! Turns a finished module graph into one self-contained script: the module
//! array, the memoizing loader, and the bootstrap call. Pure text
//! generation; writing the artifact to disk is the caller's concern.

use std::fmt::Write;

use bindle_config::{BundleConfig, RuntimeTarget};
use tracing::debug;

use crate::bundle::builder::LOADER_NAME;
use crate::bundle::bundler::ModuleGraph;
use crate::syntax::printer::print_program_indented;

const MODULES_NAME: &str = "__bindle_modules__";
const CACHE_NAME: &str = "__bindle_cache__";

/// Serialize the whole graph into the final bundle text.
pub fn emit(graph: &ModuleGraph, config: &BundleConfig) -> String {
    let mut out = String::new();
    out.push_str("(function () {\n");
    out.push_str("  'use strict';\n");

    let _ = writeln!(out, "  var {} = [", MODULES_NAME);
    for (index, module) in graph.modules.iter().enumerate() {
        let _ = writeln!(out, "    // {}: {}", index, module.path);
        let _ = writeln!(
            out,
            "    function __bindle_module_{}__(module, exports) {{",
            index
        );
        out.push_str(&print_program_indented(&module.program, 3));
        out.push_str("    }");
        if index + 1 < graph.modules.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("  ];\n");

    let _ = writeln!(out, "  var {} = [];", CACHE_NAME);
    let _ = writeln!(out, "  function {}(index) {{", LOADER_NAME);
    let _ = writeln!(out, "    if ({}[index]) {{", CACHE_NAME);
    let _ = writeln!(out, "      return {}[index];", CACHE_NAME);
    out.push_str("    }\n");
    out.push_str("    var module = { exports: {} };\n");
    // The record is cached before the factory runs, so a circular chain
    // re-entering this index observes the partial record instead of
    // recursing forever.
    let _ = writeln!(out, "    {}[index] = module;", CACHE_NAME);
    let _ = writeln!(out, "    {}[index](module, module.exports);", MODULES_NAME);
    out.push_str("    return module;\n");
    out.push_str("  }\n");

    match config.output.runtime {
        RuntimeTarget::Browser => {
            let _ = writeln!(out, "  {}(0);", LOADER_NAME);
        }
        RuntimeTarget::Node => {
            let _ = writeln!(out, "  module.exports = {}(0).exports;", LOADER_NAME);
        }
    }
    out.push_str("})();\n");

    debug!(
        target: "bindle::emit",
        modules = graph.len(),
        bytes = out.len(),
        runtime = config.output.runtime.as_str(),
        "emitted bundle"
    );
    out
}
