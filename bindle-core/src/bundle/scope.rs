//! Static free-variable analysis for the global-injection pass.
//!
//! A reference is free only if no enclosing function or block scope declares
//! a binding of the same name anywhere in that scope: `var` and function
//! declarations hoist to the nearest function scope, `let`/`const`/`class`
//! bind their block, parameters and catch parameters bind theirs. A
//! declaration after the reference still shadows, by hoisting.
//!
//! Non-reference positions never count: dot member names, non-computed
//! object keys, declaration ids, parameter names, class method names.

use crate::syntax::expr::{
    Argument, ArrayElement, ArrowBody, Class, ExprKind, Function, MemberProperty, PropertyKey,
    PropertyValue,
};
use crate::syntax::pattern::Pattern;
use crate::syntax::stmt::{DefaultExport, ForInit, Program, Stmt, StmtKind, VarDecl};

/// Does `program` reference `name` freely anywhere?
pub fn uses_free(program: &Program, name: &str) -> bool {
    list_uses_free(&program.body, name, true)
}

/// Check a statement list forming a scope. `function_scope` is true for
/// module and function bodies, false for nested blocks.
fn list_uses_free(stmts: &[Stmt], name: &str, function_scope: bool) -> bool {
    if function_scope && hoisted_declares(stmts, name) {
        return false;
    }
    if lexical_declares(stmts, name) {
        return false;
    }
    stmts.iter().any(|stmt| stmt_uses_free(stmt, name))
}

/// `var` or function declarations of `name` anywhere in this function
/// scope, descending into statement nesting but not into nested functions.
fn hoisted_declares(stmts: &[Stmt], name: &str) -> bool {
    stmts.iter().any(|stmt| match &stmt.kind {
        StmtKind::VarDecl(decl) if decl.kind.hoists() => decl_binds(decl, name),
        StmtKind::FunctionDecl(function) => function.name.as_deref() == Some(name),
        StmtKind::Block(block) => hoisted_declares(&block.body, name),
        StmtKind::If(if_stmt) => {
            hoisted_declares(std::slice::from_ref(&if_stmt.consequent), name)
                || if_stmt
                    .alternate
                    .as_ref()
                    .map(|alt| hoisted_declares(std::slice::from_ref(alt), name))
                    .unwrap_or(false)
        }
        StmtKind::For(for_stmt) => {
            matches!(&for_stmt.init, Some(ForInit::VarDecl(decl))
                if decl.kind.hoists() && decl_binds(decl, name))
                || hoisted_declares(std::slice::from_ref(&for_stmt.body), name)
        }
        StmtKind::ForIn(for_in) => {
            matches!(&for_in.target, ForInit::VarDecl(decl)
                if decl.kind.hoists() && decl_binds(decl, name))
                || hoisted_declares(std::slice::from_ref(&for_in.body), name)
        }
        StmtKind::While(while_stmt) => {
            hoisted_declares(std::slice::from_ref(&while_stmt.body), name)
        }
        StmtKind::DoWhile(do_while) => {
            hoisted_declares(std::slice::from_ref(&do_while.body), name)
        }
        StmtKind::Switch(switch) => switch
            .cases
            .iter()
            .any(|case| hoisted_declares(&case.body, name)),
        StmtKind::Try(try_stmt) => {
            hoisted_declares(&try_stmt.block, name)
                || try_stmt
                    .handler
                    .as_ref()
                    .map(|h| hoisted_declares(&h.body, name))
                    .unwrap_or(false)
                || try_stmt
                    .finalizer
                    .as_ref()
                    .map(|f| hoisted_declares(f, name))
                    .unwrap_or(false)
        }
        StmtKind::ExportNamed(export) => export
            .declaration
            .as_ref()
            .map(|decl| hoisted_declares(std::slice::from_ref(decl), name))
            .unwrap_or(false),
        _ => false,
    })
}

/// `let`/`const`/`class` declarations of `name` directly in this list.
fn lexical_declares(stmts: &[Stmt], name: &str) -> bool {
    stmts.iter().any(|stmt| match &stmt.kind {
        StmtKind::VarDecl(decl) if !decl.kind.hoists() => decl_binds(decl, name),
        StmtKind::ClassDecl(class) => class.name.as_deref() == Some(name),
        StmtKind::ExportNamed(export) => export
            .declaration
            .as_ref()
            .map(|decl| lexical_declares(std::slice::from_ref(decl), name))
            .unwrap_or(false),
        _ => false,
    })
}

fn decl_binds(decl: &VarDecl, name: &str) -> bool {
    decl.declarators.iter().any(|d| d.target.binds(name))
}

fn stmt_uses_free(stmt: &Stmt, name: &str) -> bool {
    match &stmt.kind {
        StmtKind::Expression(expr_stmt) => expr_uses_free(&expr_stmt.expression, name),
        StmtKind::Empty | StmtKind::Break | StmtKind::Continue | StmtKind::Debugger => false,
        StmtKind::Block(block) => list_uses_free(&block.body, name, false),
        StmtKind::VarDecl(decl) => decl
            .declarators
            .iter()
            .any(|d| d.init.as_ref().map(|e| expr_uses_free(e, name)).unwrap_or(false)),
        StmtKind::FunctionDecl(function) => function_uses_free(function, name),
        StmtKind::ClassDecl(class) => class_uses_free(class, name),
        StmtKind::Return(ret) => ret
            .argument
            .as_ref()
            .map(|e| expr_uses_free(e, name))
            .unwrap_or(false),
        StmtKind::If(if_stmt) => {
            expr_uses_free(&if_stmt.test, name)
                || body_uses_free(&if_stmt.consequent, name)
                || if_stmt
                    .alternate
                    .as_ref()
                    .map(|alt| body_uses_free(alt, name))
                    .unwrap_or(false)
        }
        StmtKind::For(for_stmt) => {
            let init = match &for_stmt.init {
                Some(ForInit::VarDecl(decl)) => {
                    if decl_binds(decl, name) && !decl.kind.hoists() {
                        // let/const in the head shadows the whole loop.
                        return false;
                    }
                    decl.declarators.iter().any(|d| {
                        d.init.as_ref().map(|e| expr_uses_free(e, name)).unwrap_or(false)
                    })
                }
                Some(ForInit::Expr(expr)) => expr_uses_free(expr, name),
                None => false,
            };
            init || for_stmt
                .test
                .as_ref()
                .map(|e| expr_uses_free(e, name))
                .unwrap_or(false)
                || for_stmt
                    .update
                    .as_ref()
                    .map(|e| expr_uses_free(e, name))
                    .unwrap_or(false)
                || body_uses_free(&for_stmt.body, name)
        }
        StmtKind::ForIn(for_in) => {
            match &for_in.target {
                ForInit::VarDecl(decl) if decl_binds(decl, name) && !decl.kind.hoists() => {
                    return false;
                }
                ForInit::VarDecl(_) => {}
                ForInit::Expr(expr) => {
                    if expr_uses_free(expr, name) {
                        return true;
                    }
                }
            }
            expr_uses_free(&for_in.iterable, name) || body_uses_free(&for_in.body, name)
        }
        StmtKind::While(while_stmt) => {
            expr_uses_free(&while_stmt.test, name) || body_uses_free(&while_stmt.body, name)
        }
        StmtKind::DoWhile(do_while) => {
            body_uses_free(&do_while.body, name) || expr_uses_free(&do_while.test, name)
        }
        StmtKind::Switch(switch) => {
            expr_uses_free(&switch.discriminant, name)
                || switch.cases.iter().any(|case| {
                    case.test
                        .as_ref()
                        .map(|e| expr_uses_free(e, name))
                        .unwrap_or(false)
                        || list_uses_free(&case.body, name, false)
                })
        }
        StmtKind::Throw(throw) => expr_uses_free(&throw.argument, name),
        StmtKind::Try(try_stmt) => {
            list_uses_free(&try_stmt.block, name, false)
                || try_stmt
                    .handler
                    .as_ref()
                    .map(|handler| {
                        // The catch parameter binds its block.
                        if handler.param.as_ref().map(|p| p.binds(name)).unwrap_or(false) {
                            false
                        } else {
                            list_uses_free(&handler.body, name, false)
                        }
                    })
                    .unwrap_or(false)
                || try_stmt
                    .finalizer
                    .as_ref()
                    .map(|f| list_uses_free(f, name, false))
                    .unwrap_or(false)
        }
        StmtKind::Import(_) | StmtKind::ExportAll(_) => false,
        StmtKind::ExportNamed(export) => export
            .declaration
            .as_ref()
            .map(|decl| stmt_uses_free(decl, name))
            .unwrap_or(false),
        StmtKind::ExportDefault(export) => match &export.value {
            DefaultExport::Function(function) => function_uses_free(function, name),
            DefaultExport::Class(class) => class_uses_free(class, name),
            DefaultExport::Expr(expr) => expr_uses_free(expr, name),
        },
    }
}

/// A single-statement body position (loop/if arms).
fn body_uses_free(stmt: &Stmt, name: &str) -> bool {
    match &stmt.kind {
        StmtKind::Block(block) => list_uses_free(&block.body, name, false),
        _ => stmt_uses_free(stmt, name),
    }
}

fn function_uses_free(function: &Function, name: &str) -> bool {
    if function.name.as_deref() == Some(name) {
        return false;
    }
    if function.params.iter().any(|p| p.binds(name)) {
        return false;
    }
    if pattern_defaults_use_free(&function.params, name) {
        return true;
    }
    list_uses_free(&function.body, name, true)
}

fn pattern_defaults_use_free(params: &[Pattern], name: &str) -> bool {
    fn pattern(p: &Pattern, name: &str) -> bool {
        match p {
            Pattern::Identifier(_) => false,
            Pattern::Object(object) => object.properties.iter().any(|prop| pattern(&prop.value, name)),
            Pattern::Array(array) => array
                .elements
                .iter()
                .flatten()
                .any(|element| pattern(element, name)),
            Pattern::Default(default) => {
                expr_uses_free(&default.default, name) || pattern(&default.pattern, name)
            }
            Pattern::Rest(inner) => pattern(inner, name),
        }
    }
    params.iter().any(|p| pattern(p, name))
}

fn class_uses_free(class: &Class, name: &str) -> bool {
    if class.name.as_deref() == Some(name) {
        return false;
    }
    class
        .superclass
        .as_ref()
        .map(|e| expr_uses_free(e, name))
        .unwrap_or(false)
        || class.members.iter().any(|member| {
            let key = matches!(&member.key, PropertyKey::Computed(expr) if expr_uses_free(expr, name));
            key || function_uses_free(&member.function, name)
        })
}

fn expr_uses_free(expr: &ExprKind, name: &str) -> bool {
    match expr {
        ExprKind::Identifier(id) => id.name == name,
        ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::Boolean(_)
        | ExprKind::Null(_)
        | ExprKind::This(_)
        | ExprKind::Regex(_) => false,
        ExprKind::Template(template) => template
            .expressions
            .iter()
            .any(|e| expr_uses_free(e, name)),
        ExprKind::Array(array) => array.elements.iter().any(|element| match element {
            ArrayElement::Expr(e) | ArrayElement::Spread(e) => expr_uses_free(e, name),
            ArrayElement::Hole => false,
        }),
        ExprKind::Object(object) => object.properties.iter().any(|property| {
            let key = matches!(&property.key, PropertyKey::Computed(e) if expr_uses_free(e, name));
            let value = match &property.value {
                PropertyValue::Init(e) => expr_uses_free(e, name),
                // `{process}` is a reference to `process`.
                PropertyValue::Shorthand => {
                    matches!(&property.key, PropertyKey::Identifier(key) if key == name)
                }
                PropertyValue::Method(f) | PropertyValue::Get(f) | PropertyValue::Set(f) => {
                    function_uses_free(f, name)
                }
            };
            key || value
        }),
        ExprKind::Function(function) => function_uses_free(function, name),
        ExprKind::Arrow(arrow) => {
            if arrow.params.iter().any(|p| p.binds(name)) {
                return false;
            }
            if pattern_defaults_use_free(&arrow.params, name) {
                return true;
            }
            match &arrow.body {
                ArrowBody::Expr(expr) => expr_uses_free(expr, name),
                ArrowBody::Block(body) => list_uses_free(body, name, true),
            }
        }
        ExprKind::Class(class) => class_uses_free(class, name),
        ExprKind::Unary(unary) => expr_uses_free(&unary.operand, name),
        ExprKind::Update(update) => expr_uses_free(&update.operand, name),
        ExprKind::Binary(binary) => {
            expr_uses_free(&binary.left, name) || expr_uses_free(&binary.right, name)
        }
        ExprKind::Logical(logical) => {
            expr_uses_free(&logical.left, name) || expr_uses_free(&logical.right, name)
        }
        ExprKind::Conditional(conditional) => {
            expr_uses_free(&conditional.test, name)
                || expr_uses_free(&conditional.consequent, name)
                || expr_uses_free(&conditional.alternate, name)
        }
        ExprKind::Assignment(assignment) => {
            expr_uses_free(&assignment.target, name) || expr_uses_free(&assignment.value, name)
        }
        ExprKind::Sequence(sequence) => sequence
            .expressions
            .iter()
            .any(|e| expr_uses_free(e, name)),
        ExprKind::Call(call) => {
            expr_uses_free(&call.callee, name) || arguments_use_free(&call.arguments, name)
        }
        ExprKind::New(new_expr) => {
            expr_uses_free(&new_expr.callee, name)
                || arguments_use_free(&new_expr.arguments, name)
        }
        ExprKind::Member(member) => {
            // `x.process` is not a reference to `process`.
            expr_uses_free(&member.object, name)
                || matches!(&member.property, MemberProperty::Computed(e)
                    if expr_uses_free(e, name))
        }
        ExprKind::Grouping(grouping) => expr_uses_free(&grouping.expression, name),
    }
}

fn arguments_use_free(arguments: &[Argument], name: &str) -> bool {
    arguments.iter().any(|argument| match argument {
        Argument::Expr(e) | Argument::Spread(e) => expr_uses_free(e, name),
    })
}
