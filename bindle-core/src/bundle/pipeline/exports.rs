//! Export rewriting pass.
//!
//! Every `export` form becomes assignments onto the module's `exports`
//! record, preserving original execution order: a replaced export expands
//! to at most one retained declaration plus trailing assignment statements.
//! Re-exports bind the dependency through a deterministic temporary;
//! `export *` copies own keys at runtime, later keys winning on collision.

use bindle_config::ExternalSpec;

use crate::bundle::builder;
use crate::bundle::pipeline::{external_temp_name, temp_name, PassContext};
use crate::bundle::registry::ModuleRegistry;
use crate::bundle::resolver::{Resolution, ResolveError};
use crate::syntax::expr::{ExprKind, Function};
use crate::syntax::position::SourceSpan;
use crate::syntax::stmt::{
    DefaultExport, ExportNamedDecl, ExportSpecifier, Program, Stmt, StmtKind, StmtNode,
};

pub fn rewrite_exports(
    program: &mut Program,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<(), ResolveError> {
    let old = std::mem::take(&mut program.body);
    let mut body = Vec::with_capacity(old.len());
    for stmt in old {
        match stmt.kind {
            StmtKind::ExportNamed(export) => {
                let mut replacements =
                    rewrite_named(export, stmt.span, ctx, registry)?;
                carry_leading(&mut replacements, stmt.leading);
                body.extend(replacements);
            }
            StmtKind::ExportDefault(export) => {
                let mut replacements = rewrite_default(export.value);
                carry_leading(&mut replacements, stmt.leading);
                body.extend(replacements);
            }
            StmtKind::ExportAll(export) => {
                let mut replacements =
                    rewrite_all(&export.source, stmt.span, ctx, registry)?;
                carry_leading(&mut replacements, stmt.leading);
                body.extend(replacements);
            }
            _ => body.push(stmt),
        }
    }
    program.body = body;
    Ok(())
}

fn carry_leading(replacements: &mut [Stmt], leading: Vec<crate::syntax::token::Comment>) {
    if let Some(first) = replacements.first_mut() {
        first.leading = leading;
    }
}

fn rewrite_named(
    export: ExportNamedDecl,
    span: SourceSpan,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<Vec<Stmt>, ResolveError> {
    // export var a = 1, b = 2; / export function f() {} / export class C {}
    if let Some(declaration) = export.declaration {
        let names = declared_names(&declaration);
        let mut stmts = vec![declaration];
        for name in names {
            stmts.push(export_assignment(&name, builder::ident(&name)));
        }
        return Ok(stmts);
    }

    // export {a as b} from 'm';
    if let Some(source) = &export.source {
        let (mut stmts, temp) = bind_reexport_temp(source, span, ctx, registry)?;
        for ExportSpecifier { local, exported } in &export.specifiers {
            stmts.push(export_assignment(
                exported,
                builder::member(
                    builder::member(builder::ident(&temp), "exports"),
                    local,
                ),
            ));
        }
        return Ok(stmts);
    }

    // export {a as b}; assigns the current value of the binding.
    Ok(export
        .specifiers
        .iter()
        .map(|ExportSpecifier { local, exported }| {
            export_assignment(exported, builder::ident(local))
        })
        .collect())
}

fn rewrite_default(value: DefaultExport) -> Vec<Stmt> {
    match value {
        DefaultExport::Function(function) => match &function.name {
            Some(name) => {
                let name = name.clone();
                vec![
                    StmtNode::synthetic(StmtKind::FunctionDecl(function)),
                    export_assignment("default", builder::ident(&name)),
                ]
            }
            // Anonymous: assign the function expression directly.
            None => vec![export_assignment(
                "default",
                Box::new(ExprKind::Function(function)),
            )],
        },
        DefaultExport::Class(class) => match &class.name {
            Some(name) => {
                let name = name.clone();
                vec![
                    StmtNode::synthetic(StmtKind::ClassDecl(class)),
                    export_assignment("default", builder::ident(&name)),
                ]
            }
            None => vec![export_assignment(
                "default",
                Box::new(ExprKind::Class(class)),
            )],
        },
        DefaultExport::Expr(expr) => vec![export_assignment("default", expr)],
    }
}

fn rewrite_all(
    source: &str,
    span: SourceSpan,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<Vec<Stmt>, ResolveError> {
    let (mut stmts, temp) = bind_reexport_temp(source, span, ctx, registry)?;
    stmts.push(copy_all_keys(&temp));
    Ok(stmts)
}

/// Bind the re-export source to a temporary exposing an `exports` view:
/// a loader call for internal modules, `{ exports: g }` / `{ exports: {} }`
/// for externals. Returns the statements plus the temporary's name.
fn bind_reexport_temp(
    source: &str,
    span: SourceSpan,
    ctx: &PassContext<'_>,
    registry: &mut ModuleRegistry,
) -> Result<(Vec<Stmt>, String), ResolveError> {
    match ctx.resolve(source)? {
        Resolution::Path(path) => {
            let index = registry.get_index(&path);
            let temp = temp_name(index, span);
            let stmt = builder::var_stmt(&temp, builder::require_call(index));
            Ok((vec![stmt], temp))
        }
        Resolution::External(spec) => {
            let temp = external_temp_name(span);
            let view = match spec {
                ExternalSpec::Global(name) => builder::ident(&name),
                ExternalSpec::Ignored => builder::empty_object(),
            };
            let stmt = builder::var_stmt(&temp, builder::exports_record(view));
            Ok((vec![stmt], temp))
        }
    }
}

/// `exports.<name> = <value>;`
fn export_assignment(name: &str, value: crate::syntax::expr::Expr) -> Stmt {
    builder::expr_stmt(builder::assign(builder::exports_member(name), value))
}

/// `Object.keys(<temp>.exports).forEach(function (key) {
///   exports[key] = <temp>.exports[key];
/// });`
fn copy_all_keys(temp: &str) -> Stmt {
    let temp_exports = || builder::member(builder::ident(temp), "exports");
    let copy_body = builder::expr_stmt(builder::assign(
        builder::computed_member(builder::ident("exports"), builder::ident("key")),
        builder::computed_member(temp_exports(), builder::ident("key")),
    ));
    let callback = Box::new(ExprKind::Function(Function {
        name: None,
        params: vec![crate::syntax::pattern::Pattern::Identifier("key".to_string())],
        body: vec![copy_body],
    }));
    builder::expr_stmt(builder::call(
        builder::member(
            builder::call(
                builder::member(builder::ident("Object"), "keys"),
                vec![temp_exports()],
            ),
            "forEach",
        ),
        vec![callback],
    ))
}

/// Names a kept exported declaration binds, in source order.
fn declared_names(declaration: &Stmt) -> Vec<String> {
    match &declaration.kind {
        StmtKind::VarDecl(decl) => decl.bound_names(),
        StmtKind::FunctionDecl(function) => function.name.iter().cloned().collect(),
        StmtKind::ClassDecl(class) => class.name.iter().cloned().collect(),
        _ => Vec::new(),
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

    fn rewrite(source: &str, cfg: &BundleConfig, fs: &MemoryFileSystem) -> String {
        let mut registry = ModuleRegistry::new();
        let current = ModulePath::File(PathBuf::from("/src/main.js"));
        registry.get_index(&current);
        let ctx = PassContext {
            config: cfg,
            resolver: Resolver::new(cfg, fs),
            current: &current,
        };
        let mut program = parse_module(source, SourceDialect::Es2015).expect("parse");
        rewrite_exports(&mut program, &ctx, &mut registry).expect("rewrite");
        print_program(&program)
    }

    fn plain(source: &str) -> String {
        rewrite(source, &BundleConfig::default(), &MemoryFileSystem::new())
    }

    #[test]
    fn test_export_const_keeps_declaration_and_appends() {
        let code = plain("export const foo = 'bar';");
        assert_eq!(code, "const foo = 'bar';\nexports.foo = foo;\n");
    }

    #[test]
    fn test_export_multiple_declarators() {
        let code = plain("export var a = 1, b = 2;");
        assert_eq!(code, "var a = 1, b = 2;\nexports.a = a;\nexports.b = b;\n");
    }

    #[test]
    fn test_export_destructuring_declarators() {
        let code = plain("export const { a, b } = pair;");
        assert!(code.contains("exports.a = a;"));
        assert!(code.contains("exports.b = b;"));
    }

    #[test]
    fn test_export_function_declaration() {
        let code = plain("export function f() {}");
        assert_eq!(code, "function f() {}\nexports.f = f;\n");
    }

    #[test]
    fn test_export_class_declaration() {
        let code = plain("export class C {}");
        assert!(code.starts_with("class C {"));
        assert!(code.ends_with("exports.C = C;\n"));
    }

    #[test]
    fn test_export_default_identifier() {
        let code = plain("const bar = 'bar';\nexport default bar;");
        assert_eq!(code, "const bar = 'bar';\nexports.default = bar;\n");
    }

    #[test]
    fn test_export_default_anonymous_function() {
        let code = plain("export default function () { return 1; }");
        assert!(code.starts_with("exports.default = function () {"));
    }

    #[test]
    fn test_export_default_named_function_keeps_declaration() {
        let code = plain("export default function main() {}");
        assert_eq!(code, "function main() {}\nexports.default = main;\n");
    }

    #[test]
    fn test_export_default_arbitrary_expression() {
        let code = plain("export default 40 + 2;");
        assert_eq!(code, "exports.default = 40 + 2;\n");
    }

    #[test]
    fn test_export_named_specifiers_assign_binding_values() {
        let code = plain("var foo = 1;\nexport { foo as bar };");
        assert_eq!(code, "var foo = 1;\nexports.bar = foo;\n");
    }

    #[test]
    fn test_export_specifier_without_rename() {
        let code = plain("var a = 1;\nexport { a };");
        assert!(code.contains("exports.a = a;"));
    }

    #[test]
    fn test_export_invalid_identifier_name_uses_computed_form() {
        let code = plain("var factory = 1;\nexport { factory as new };");
        assert!(code.contains("exports['new'] = factory;"));
    }

    #[test]
    fn test_reexport_from_internal_module() {
        let fs = MemoryFileSystem::with_files([("/src/dep.js", "export const foo = 'bar';")]);
        let code = rewrite(
            "export { foo as bar } from './dep';",
            &BundleConfig::default(),
            &fs,
        );
        assert_eq!(
            code,
            "var __bindle_tmp1_1_1 = __bindle_require__(1);\n\
             exports.bar = __bindle_tmp1_1_1.exports.foo;\n"
        );
    }

    #[test]
    fn test_reexport_from_external_global() {
        let mut cfg = BundleConfig::default();
        cfg.externals
            .insert("jquery".to_string(), ExternalSpec::Global("$".to_string()));
        let code = rewrite(
            "export { ajax } from 'jquery';",
            &cfg,
            &MemoryFileSystem::new(),
        );
        assert_eq!(
            code,
            "var __bindle_tmp_ext_1_1 = { exports: $ };\n\
             exports.ajax = __bindle_tmp_ext_1_1.exports.ajax;\n"
        );
    }

    #[test]
    fn test_reexport_from_ignored_external() {
        let mut cfg = BundleConfig::default();
        cfg.externals
            .insert("fs".to_string(), ExternalSpec::Ignored);
        let code = rewrite("export { readFile } from 'fs';", &cfg, &MemoryFileSystem::new());
        assert!(code.contains("var __bindle_tmp_ext_1_1 = { exports: {} };"));
    }

    #[test]
    fn test_export_star_copies_keys() {
        let fs = MemoryFileSystem::with_files([("/src/dep.js", "")]);
        let code = rewrite("export * from './dep';", &BundleConfig::default(), &fs);
        assert!(code.contains("var __bindle_tmp1_1_1 = __bindle_require__(1);"));
        assert!(code.contains(
            "Object.keys(__bindle_tmp1_1_1.exports).forEach(function (key) {"
        ));
        assert!(code.contains("exports[key] = __bindle_tmp1_1_1.exports[key];"));
    }

    #[test]
    fn test_execution_order_preserved() {
        let code = plain("export const a = 1;\nwork();\nexport const b = 2;");
        let a_decl = code.find("const a = 1;").unwrap();
        let a_assign = code.find("exports.a = a;").unwrap();
        let work = code.find("work();").unwrap();
        let b_decl = code.find("const b = 2;").unwrap();
        assert!(a_decl < a_assign);
        assert!(a_assign < work);
        assert!(work < b_decl);
    }
}
