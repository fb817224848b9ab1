//! Import rewriting pass.
//!
//! Every `import` form becomes local bindings against the loader call for
//! the dependency's index, which resolves and enqueues the dependency as a
//! side effect. Externals bind their configured global name (or an empty
//! object) and never touch the registry.

use bindle_config::ExternalSpec;

use crate::bundle::builder;
use crate::bundle::pipeline::{temp_name, PassContext};
use crate::bundle::registry::ModuleRegistry;
use crate::bundle::resolver::{Resolution, ResolveError};
use crate::syntax::expr::Expr;
use crate::syntax::position::SourceSpan;
use crate::syntax::stmt::{ImportDecl, ImportSpecifier, Program, Stmt, StmtKind};

pub fn rewrite_imports(
    program: &mut Program,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<(), ResolveError> {
    let old = std::mem::take(&mut program.body);
    let mut body = Vec::with_capacity(old.len());
    for stmt in old {
        match &stmt.kind {
            StmtKind::Import(import) => {
                let mut replacements = rewrite_one(import, stmt.span, ctx, registry)?;
                if let Some(first) = replacements.first_mut() {
                    first.leading = stmt.leading.clone();
                }
                body.extend(replacements);
            }
            _ => body.push(stmt),
        }
    }
    program.body = body;
    Ok(())
}

fn rewrite_one(
    import: &ImportDecl,
    span: SourceSpan,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<Vec<Stmt>, ResolveError> {
    match ctx.resolve(&import.source)? {
        Resolution::Path(path) => {
            let index = registry.get_index(&path);
            Ok(rewrite_internal(import, index, span))
        }
        Resolution::External(spec) => Ok(rewrite_external(import, &spec)),
    }
}

fn rewrite_internal(import: &ImportDecl, index: usize, span: SourceSpan) -> Vec<Stmt> {
    match import.specifiers.as_slice() {
        // import 'm';
        [] => vec![builder::expr_stmt(builder::require_call(index))],
        // import d from 'm';
        [ImportSpecifier::Default(local)] => {
            vec![builder::var_stmt(
                local,
                builder::member(
                    builder::member(builder::require_call(index), "exports"),
                    "default",
                ),
            )]
        }
        // import * as ns from 'm';
        [ImportSpecifier::Namespace(local)] => {
            vec![builder::var_stmt(
                local,
                builder::member(builder::require_call(index), "exports"),
            )]
        }
        // Anything with named specifiers (or several clauses) shares one
        // loader call through a deterministic temporary.
        specifiers => {
            let temp = temp_name(index, span);
            let mut stmts = vec![builder::var_stmt(&temp, builder::require_call(index))];
            for specifier in specifiers {
                let exports = builder::member(builder::ident(&temp), "exports");
                stmts.push(projection(specifier, exports));
            }
            stmts
        }
    }
}

fn rewrite_external(import: &ImportDecl, spec: &ExternalSpec) -> Vec<Stmt> {
    // A bare external import has nothing to bind and nothing to evaluate.
    if import.specifiers.is_empty() {
        return Vec::new();
    }
    import
        .specifiers
        .iter()
        .map(|specifier| {
            let view = match spec {
                ExternalSpec::Global(name) => builder::ident(name),
                ExternalSpec::Ignored => builder::empty_object(),
            };
            // The global itself stands in for both the default and the
            // namespace view; only named imports project off it.
            match specifier {
                ImportSpecifier::Default(local) | ImportSpecifier::Namespace(local) => {
                    builder::var_stmt(local, view)
                }
                ImportSpecifier::Named { imported, local } => {
                    builder::var_stmt(local, builder::member(view, imported))
                }
            }
        })
        .collect()
}

/// `var <local> = <view>[.<imported>];` for one specifier against the
/// module's exports view.
fn projection(specifier: &ImportSpecifier, view: Expr) -> Stmt {
    match specifier {
        ImportSpecifier::Default(local) => {
            builder::var_stmt(local, builder::member(view, "default"))
        }
        ImportSpecifier::Namespace(local) => builder::var_stmt(local, view),
        ImportSpecifier::Named { imported, local } => {
            builder::var_stmt(local, builder::member(view, imported))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::path::ModulePath;
    use crate::bundle::resolver::Resolver;
    use crate::syntax::parse_module;
    use crate::syntax::printer::print_program;
    use bindle_config::{BundleConfig, SourceDialect};
    use bindle_vfs::MemoryFileSystem;
    use std::path::PathBuf;

    fn rewrite(source: &str, cfg: &BundleConfig, fs: &MemoryFileSystem) -> (String, ModuleRegistry) {
        let mut registry = ModuleRegistry::new();
        let current = ModulePath::File(PathBuf::from("/src/main.js"));
        registry.get_index(&current);
        let ctx = PassContext {
            config: cfg,
            resolver: Resolver::new(cfg, fs),
            current: &current,
        };
        let mut program = parse_module(source, SourceDialect::Es2015).expect("parse");
        rewrite_imports(&mut program, &ctx, &mut registry).expect("rewrite");
        (print_program(&program), registry)
    }

    fn fs_with_dep() -> MemoryFileSystem {
        MemoryFileSystem::with_files([("/src/dep.js", "export const a = 1;")])
    }

    #[test]
    fn test_default_import() {
        let (code, registry) = rewrite("import d from './dep';", &BundleConfig::default(), &fs_with_dep());
        assert_eq!(code, "var d = __bindle_require__(1).exports.default;\n");
        assert!(registry.is_mapped(&ModulePath::File(PathBuf::from("/src/dep.js"))));
    }

    #[test]
    fn test_namespace_import() {
        let (code, _) = rewrite("import * as ns from './dep';", &BundleConfig::default(), &fs_with_dep());
        assert_eq!(code, "var ns = __bindle_require__(1).exports;\n");
    }

    #[test]
    fn test_named_imports_share_one_temp() {
        let (code, _) = rewrite(
            "import { a as b, c } from './dep';",
            &BundleConfig::default(),
            &fs_with_dep(),
        );
        assert_eq!(
            code,
            "var __bindle_tmp1_1_1 = __bindle_require__(1);\n\
             var b = __bindle_tmp1_1_1.exports.a;\n\
             var c = __bindle_tmp1_1_1.exports.c;\n"
        );
    }

    #[test]
    fn test_default_plus_named_uses_temp() {
        let (code, _) = rewrite(
            "import d, { a } from './dep';",
            &BundleConfig::default(),
            &fs_with_dep(),
        );
        assert!(code.contains("var __bindle_tmp1_1_1 = __bindle_require__(1);"));
        assert!(code.contains("var d = __bindle_tmp1_1_1.exports.default;"));
        assert!(code.contains("var a = __bindle_tmp1_1_1.exports.a;"));
    }

    #[test]
    fn test_bare_import_keeps_side_effect() {
        let (code, _) = rewrite("import './dep';", &BundleConfig::default(), &fs_with_dep());
        assert_eq!(code, "__bindle_require__(1);\n");
    }

    #[test]
    fn test_same_dependency_same_index() {
        let fs = MemoryFileSystem::with_files([
            ("/src/dep.js", ""),
        ]);
        let (code, registry) = rewrite(
            "import a from './dep';\nimport b from './dep.js';",
            &BundleConfig::default(),
            &fs,
        );
        assert_eq!(code.matches("__bindle_require__(1)").count(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_external_global_binds_by_name() {
        let mut cfg = BundleConfig::default();
        cfg.externals
            .insert("jquery".to_string(), bindle_config::ExternalSpec::Global("$".to_string()));
        let (code, registry) = rewrite(
            "import $q, { ajax } from 'jquery';\nimport * as all from 'jquery';",
            &cfg,
            &MemoryFileSystem::new(),
        );
        assert!(code.contains("var $q = $;"));
        assert!(code.contains("var ajax = $.ajax;"));
        assert!(code.contains("var all = $;"));
        // Externals never enter the registry.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ignored_external_binds_empty_object() {
        let mut cfg = BundleConfig::default();
        cfg.externals
            .insert("fs".to_string(), bindle_config::ExternalSpec::Ignored);
        let (code, _) = rewrite("import * as fs from 'fs';", &cfg, &MemoryFileSystem::new());
        assert_eq!(code, "var fs = {};\n");
    }

    #[test]
    fn test_bare_external_import_vanishes() {
        let mut cfg = BundleConfig::default();
        cfg.externals
            .insert("polyfill".to_string(), bindle_config::ExternalSpec::Global("P".to_string()));
        let (code, _) = rewrite("import 'polyfill';", &cfg, &MemoryFileSystem::new());
        assert_eq!(code, "");
    }

    #[test]
    fn test_unresolvable_import_errors() {
        let cfg = BundleConfig::default();
        let fs = MemoryFileSystem::new();
        let mut registry = ModuleRegistry::new();
        let current = ModulePath::File(PathBuf::from("/src/main.js"));
        let ctx = PassContext {
            config: &cfg,
            resolver: Resolver::new(&cfg, &fs),
            current: &current,
        };
        let mut program =
            parse_module("import x from './missing';", SourceDialect::Es2015).unwrap();
        let err = rewrite_imports(&mut program, &ctx, &mut registry).unwrap_err();
        assert_eq!(err.specifier, "./missing");
        assert_eq!(err.tried.len(), 3);
    }
}
