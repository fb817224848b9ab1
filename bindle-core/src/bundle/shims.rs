//! Built-in global shims.
//!
//! Each recognized free global resolves to a synthetic module whose source
//! is compiled into the binary. Shim sources are plain script: no module
//! forms, only `module`/`exports`, and no free use of any recognized global
//! (they would otherwise re-trigger injection on themselves).

use std::collections::HashMap;

use bindle_config::GlobalInjection;
use once_cell::sync::Lazy;

/// A recognized global with a built-in replacement module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalShim {
    Process,
    GlobalObject,
    Buffer,
}

impl GlobalShim {
    /// The identifier the shim replaces.
    pub fn name(&self) -> &'static str {
        match self {
            GlobalShim::Process => "process",
            GlobalShim::GlobalObject => "global",
            GlobalShim::Buffer => "Buffer",
        }
    }

    /// All shims, in the fixed injection order.
    pub fn all() -> [GlobalShim; 3] {
        [
            GlobalShim::Process,
            GlobalShim::GlobalObject,
            GlobalShim::Buffer,
        ]
    }

    /// Whether configuration enables injecting this shim.
    pub fn enabled(&self, globals: &GlobalInjection) -> bool {
        match self {
            GlobalShim::Process => globals.process,
            GlobalShim::GlobalObject => globals.global_object,
            GlobalShim::Buffer => globals.buffer,
        }
    }

    /// The shim module's source text.
    pub fn source(&self) -> &'static str {
        SHIM_SOURCES[self]
    }
}

static SHIM_SOURCES: Lazy<HashMap<GlobalShim, &'static str>> = Lazy::new(|| {
    let mut sources = HashMap::new();
    sources.insert(GlobalShim::Process, PROCESS_SOURCE);
    sources.insert(GlobalShim::GlobalObject, GLOBAL_SOURCE);
    sources.insert(GlobalShim::Buffer, BUFFER_SOURCE);
    sources
});

const PROCESS_SOURCE: &str = "\
exports.env = {};
exports.argv = [];
exports.platform = 'browser';
exports.cwd = function () {
  return '/';
};
exports.nextTick = function (fn) {
  setTimeout(fn, 0);
};
";

const GLOBAL_SOURCE: &str = "\
if (typeof globalThis !== 'undefined') {
  module.exports = globalThis;
} else if (typeof window !== 'undefined') {
  module.exports = window;
} else if (typeof self !== 'undefined') {
  module.exports = self;
} else {
  module.exports = {};
}
";

const BUFFER_SOURCE: &str = "\
exports.isBuffer = function () {
  return false;
};
exports.from = function () {
  throw new Error('Buffer is not available in this bundle');
};
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;
    use bindle_config::SourceDialect;

    #[test]
    fn test_shim_names() {
        assert_eq!(GlobalShim::Process.name(), "process");
        assert_eq!(GlobalShim::GlobalObject.name(), "global");
        assert_eq!(GlobalShim::Buffer.name(), "Buffer");
    }

    #[test]
    fn test_injection_order_is_fixed() {
        let order: Vec<&str> = GlobalShim::all().iter().map(|s| s.name()).collect();
        assert_eq!(order, vec!["process", "global", "Buffer"]);
    }

    #[test]
    fn test_enabled_follows_config() {
        let globals = GlobalInjection {
            process: true,
            global_object: false,
            buffer: true,
        };
        assert!(GlobalShim::Process.enabled(&globals));
        assert!(!GlobalShim::GlobalObject.enabled(&globals));
        assert!(GlobalShim::Buffer.enabled(&globals));
    }

    #[test]
    fn test_shim_sources_parse_as_es5() {
        for shim in GlobalShim::all() {
            assert!(
                parse_module(shim.source(), SourceDialect::Es5).is_ok(),
                "shim source for {} should parse",
                shim.name()
            );
        }
    }

    #[test]
    fn test_shim_sources_have_no_module_forms() {
        for shim in GlobalShim::all() {
            let source = shim.source();
            assert!(!source.contains("import "));
            assert!(!source.contains("export "));
        }
    }

    #[test]
    fn test_shim_sources_do_not_use_recognized_globals() {
        use crate::bundle::scope::uses_free;
        for shim in GlobalShim::all() {
            let program = parse_module(shim.source(), SourceDialect::Es5).unwrap();
            for other in GlobalShim::all() {
                assert!(
                    !uses_free(&program, other.name()),
                    "{} shim must not reference {} freely",
                    shim.name(),
                    other.name()
                );
            }
        }
    }
}
