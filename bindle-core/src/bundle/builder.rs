//! Synthetic AST construction for the rewrite passes.
//!
//! Every rewritten statement the pipeline injects is built here, so the
//! generated shapes live in one place. Exported names that are not valid
//! identifiers go through computed member syntax automatically.

use crate::syntax::expr::{
    Argument, Assignment, Call, Expr, ExprKind, Identifier, Member, MemberProperty, NumberLiteral,
    ObjectLiteral, ObjectProperty, PropertyKey, PropertyValue, StringLiteral,
};
use crate::syntax::pattern::Pattern;
use crate::syntax::stmt::{DeclKind, Declarator, ExpressionStmt, Stmt, StmtKind, StmtNode, VarDecl};
use crate::syntax::token::TokenKind;

/// Name of the loader function every generated module body calls.
pub const LOADER_NAME: &str = "__bindle_require__";

pub fn ident(name: &str) -> Expr {
    Box::new(ExprKind::Identifier(Identifier {
        name: name.to_string(),
    }))
}

pub fn string(value: &str) -> Expr {
    Box::new(ExprKind::String(StringLiteral {
        value: value.to_string(),
    }))
}

pub fn number(value: usize) -> Expr {
    Box::new(ExprKind::Number(NumberLiteral {
        value: value as f64,
        raw: value.to_string(),
    }))
}

pub fn empty_object() -> Expr {
    Box::new(ExprKind::Object(ObjectLiteral {
        properties: Vec::new(),
    }))
}

/// `{ exports: <value> }`
pub fn exports_record(value: Expr) -> Expr {
    Box::new(ExprKind::Object(ObjectLiteral {
        properties: vec![ObjectProperty {
            key: PropertyKey::Identifier("exports".to_string()),
            value: PropertyValue::Init(value),
        }],
    }))
}

/// `object.name`, or `object['name']` when the name is not a valid
/// identifier. `default` is reserved but allowed after a dot; the
/// default-export projections read `.exports.default`.
pub fn member(object: Expr, name: &str) -> Expr {
    let property = if is_valid_identifier(name) || name == "default" {
        MemberProperty::Dot(name.to_string())
    } else {
        MemberProperty::Computed(string(name))
    };
    Box::new(ExprKind::Member(Member { object, property }))
}

/// `object[index]` with an arbitrary index expression.
pub fn computed_member(object: Expr, index: Expr) -> Expr {
    Box::new(ExprKind::Member(Member {
        object,
        property: MemberProperty::Computed(index),
    }))
}

pub fn call(callee: Expr, arguments: Vec<Expr>) -> Expr {
    Box::new(ExprKind::Call(Call {
        callee,
        arguments: arguments.into_iter().map(Argument::Expr).collect(),
    }))
}

/// `target = value`
pub fn assign(target: Expr, value: Expr) -> Expr {
    Box::new(ExprKind::Assignment(Assignment {
        op: TokenKind::Assign,
        target,
        value,
    }))
}

/// `__bindle_require__(<index>)`
pub fn require_call(index: usize) -> Expr {
    call(ident(LOADER_NAME), vec![number(index)])
}

/// `exports.<name>` (computed form for invalid identifiers).
pub fn exports_member(name: &str) -> Expr {
    member(ident("exports"), name)
}

/// `<expr>;`
pub fn expr_stmt(expression: Expr) -> Stmt {
    StmtNode::synthetic(StmtKind::Expression(ExpressionStmt { expression }))
}

/// `var <name> = <init>;`
pub fn var_stmt(name: &str, init: Expr) -> Stmt {
    StmtNode::synthetic(StmtKind::VarDecl(VarDecl {
        kind: DeclKind::Var,
        declarators: vec![Declarator {
            target: Pattern::Identifier(name.to_string()),
            init: Some(init),
        }],
    }))
}

/// Can `name` be used after a dot and as a plain binding?
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return false;
    }
    TokenKind::keyword(name).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::printer::print_program;
    use crate::syntax::stmt::Program;

    fn render(stmt: Stmt) -> String {
        print_program(&Program { body: vec![stmt] })
    }

    #[test]
    fn test_require_call_shape() {
        let stmt = expr_stmt(require_call(3));
        assert_eq!(render(stmt), "__bindle_require__(3);\n");
    }

    #[test]
    fn test_var_stmt_shape() {
        let stmt = var_stmt("ns", member(require_call(1), "exports"));
        assert_eq!(render(stmt), "var ns = __bindle_require__(1).exports;\n");
    }

    #[test]
    fn test_exports_member_dot_form() {
        let stmt = expr_stmt(assign(exports_member("foo"), ident("foo")));
        assert_eq!(render(stmt), "exports.foo = foo;\n");
    }

    #[test]
    fn test_exports_member_computed_for_keywords() {
        let stmt = expr_stmt(assign(exports_member("new"), ident("factory")));
        assert_eq!(render(stmt), "exports['new'] = factory;\n");
    }

    #[test]
    fn test_default_stays_in_dot_form() {
        let stmt = var_stmt("d", member(member(require_call(2), "exports"), "default"));
        assert_eq!(
            render(stmt),
            "var d = __bindle_require__(2).exports.default;\n"
        );
    }

    #[test]
    fn test_exports_member_computed_for_invalid_chars() {
        let stmt = expr_stmt(assign(exports_member("my-name"), ident("x")));
        assert_eq!(render(stmt), "exports['my-name'] = x;\n");
    }

    #[test]
    fn test_exports_record_shape() {
        let stmt = var_stmt("t", exports_record(ident("$")));
        assert_eq!(render(stmt), "var t = { exports: $ };\n");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("$jq"));
        assert!(is_valid_identifier("a1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1a"));
        assert!(!is_valid_identifier("my-name"));
        assert!(!is_valid_identifier("default"));
        assert!(!is_valid_identifier("new"));
    }
}
