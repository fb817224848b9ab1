//! Artifact cleanup pass.
//!
//! Comment attachment is two-sided: a comment on the line where one
//! statement ends and before the next begins lands on both. Printed as-is
//! the text would appear twice, so the trailing copy is dropped wherever
//! the next statement carries the same comment as leading trivia. Line
//! comments trailing a `return`/`throw`/`break`/`continue` are dropped
//! outright; re-serialized on that line they would swallow a same-line
//! successor. Semantics are never altered.

use crate::syntax::stmt::{Program, Stmt, StmtKind};

pub fn fix_artifacts(program: &mut Program) {
    fix_list(&mut program.body);
}

fn fix_list(stmts: &mut Vec<Stmt>) {
    for i in 0..stmts.len() {
        if i + 1 < stmts.len() {
            let leading = stmts[i + 1].leading.clone();
            stmts[i]
                .trailing
                .retain(|comment| !leading.contains(comment));
        }
        if matches!(
            stmts[i].kind,
            StmtKind::Return(_) | StmtKind::Throw(_) | StmtKind::Break | StmtKind::Continue
        ) {
            stmts[i].trailing.retain(|comment| comment.block);
        }
    }
    for stmt in stmts.iter_mut() {
        fix_stmt(stmt);
    }
}

fn fix_stmt(stmt: &mut Stmt) {
    let (lists, singles) = stmt.child_lists_mut();
    for list in lists {
        fix_list(list);
    }
    for child in singles {
        fix_stmt(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;
    use crate::syntax::printer::print_program;
    use bindle_config::SourceDialect;

    fn fixed(source: &str) -> Program {
        let mut program = parse_module(source, SourceDialect::Es2015).expect("parse");
        fix_artifacts(&mut program);
        program
    }

    #[test]
    fn test_doubly_attached_comment_keeps_leading_copy() {
        let program = fixed("var a = 1; // note\nvar b = 2;");
        assert!(program.body[0].trailing.is_empty());
        assert_eq!(program.body[1].leading.len(), 1);
        let printed = print_program(&program);
        assert_eq!(printed.matches("// note").count(), 1);
    }

    #[test]
    fn test_distinct_trailing_comment_survives() {
        let program = fixed("var a = 1;\n// last");
        assert_eq!(program.body[0].trailing.len(), 1);
    }

    #[test]
    fn test_line_comment_after_return_is_dropped() {
        let program = fixed("function f() { return 1; // why\n}");
        let StmtKind::FunctionDecl(function) = &program.body[0].kind else {
            panic!("expected function");
        };
        assert!(function.body[0].trailing.is_empty());
    }

    #[test]
    fn test_block_comment_after_return_survives() {
        let program = fixed("function f() { return 1; /* ok */\n}");
        let StmtKind::FunctionDecl(function) = &program.body[0].kind else {
            panic!("expected function");
        };
        assert_eq!(function.body[0].trailing.len(), 1);
    }

    #[test]
    fn test_fix_descends_into_nested_lists() {
        let program = fixed("function f() {\n  var a = 1; // inner\n  var b = 2;\n}");
        let StmtKind::FunctionDecl(function) = &program.body[0].kind else {
            panic!("expected function");
        };
        assert!(function.body[0].trailing.is_empty());
        assert_eq!(function.body[1].leading.len(), 1);
    }
}
