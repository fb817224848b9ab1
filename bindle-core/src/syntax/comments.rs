//! Positional comment attachment.
//!
//! The lexer collects comments out of band; this pass pins each one to a
//! statement so the printer can re-emit it. A comment on the same line as
//! the end of the previous statement is attached twice, as trailing trivia
//! of that statement and as leading trivia of the next one; the cleanup
//! pass drops the duplicate once rewrites have settled which statement
//! survives.

use crate::syntax::stmt::{Program, Stmt};
use crate::syntax::token::Comment;

/// Attach `comments` (in source order) to the statements of `program`.
pub fn attach_comments(program: &mut Program, comments: Vec<Comment>) {
    for comment in comments {
        place_in_list(&mut program.body, &comment);
    }
}

/// Try to place one comment somewhere in a statement list.
fn place_in_list(list: &mut Vec<Stmt>, comment: &Comment) -> bool {
    if list.is_empty() {
        return false;
    }

    // Inside a statement: push down into its nested statement lists.
    for stmt in list.iter_mut() {
        if comment.span.start >= stmt.span.start && comment.span.end <= stmt.span.end {
            return place_in_stmt(stmt, comment);
        }
    }

    match list.iter().position(|s| s.span.start >= comment.span.end) {
        Some(0) => {
            list[0].leading.push(comment.clone());
            true
        }
        Some(next) => {
            // Same line as the previous statement's end: attach to both
            // sides, the cleanup pass keeps exactly one.
            if list[next - 1].span.end.line == comment.span.start.line {
                list[next - 1].trailing.push(comment.clone());
            }
            list[next].leading.push(comment.clone());
            true
        }
        None => {
            let last = list.last_mut().unwrap();
            if comment.span.start >= last.span.end {
                last.trailing.push(comment.clone());
                true
            } else {
                false
            }
        }
    }
}

fn place_in_stmt(stmt: &mut Stmt, comment: &Comment) -> bool {
    let (lists, singles) = stmt.child_lists_mut();
    for list in lists {
        if place_in_list(list, comment) {
            return true;
        }
    }
    for child in singles {
        if comment.span.start >= child.span.start && comment.span.end <= child.span.end {
            if place_in_stmt(child, comment) {
                return true;
            }
        }
    }
    // Inside the statement but not in any nested list (an expression
    // position, say); hoist it to the statement's own leading trivia.
    stmt.leading.push(comment.clone());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::tokenize;
    use crate::syntax::parser::Parser;
    use crate::syntax::stmt::StmtKind;
    use bindle_config::SourceDialect;

    fn parse_with_comments(source: &str) -> Program {
        let output = tokenize(source).expect("lexing should succeed");
        let mut program = Parser::new(output.tokens, SourceDialect::Es2015)
            .parse()
            .expect("parsing should succeed");
        attach_comments(&mut program, output.comments);
        program
    }

    #[test]
    fn test_leading_comment_attaches_to_next_statement() {
        let program = parse_with_comments("// intro\nvar a = 1;");
        assert_eq!(program.body[0].leading.len(), 1);
        assert_eq!(program.body[0].leading[0].text, " intro");
        assert!(program.body[0].trailing.is_empty());
    }

    #[test]
    fn test_same_line_comment_attaches_to_both_sides() {
        let program = parse_with_comments("var a = 1; // note\nvar b = 2;");
        assert_eq!(program.body[0].trailing.len(), 1);
        assert_eq!(program.body[1].leading.len(), 1);
        assert_eq!(program.body[0].trailing[0], program.body[1].leading[0]);
    }

    #[test]
    fn test_own_line_comment_is_leading_only() {
        let program = parse_with_comments("var a = 1;\n// between\nvar b = 2;");
        assert!(program.body[0].trailing.is_empty());
        assert_eq!(program.body[1].leading.len(), 1);
    }

    #[test]
    fn test_trailing_comment_after_last_statement() {
        let program = parse_with_comments("var a = 1;\n// done");
        assert_eq!(program.body[0].trailing.len(), 1);
        assert_eq!(program.body[0].trailing[0].text, " done");
    }

    #[test]
    fn test_comment_descends_into_blocks() {
        let program = parse_with_comments("function f() {\n  // inner\n  work();\n}");
        let StmtKind::FunctionDecl(function) = &program.body[0].kind else {
            panic!("expected function decl");
        };
        assert_eq!(function.body[0].leading.len(), 1);
        assert_eq!(function.body[0].leading[0].text, " inner");
    }

    #[test]
    fn test_block_comment_attaches() {
        let program = parse_with_comments("/* module header */\nvar a = 1;");
        assert_eq!(program.body[0].leading.len(), 1);
        assert!(program.body[0].leading[0].block);
    }

    #[test]
    fn test_comment_inside_expression_hoists_to_statement() {
        let program = parse_with_comments("var a = /* mid */ 1;");
        assert_eq!(program.body[0].leading.len(), 1);
        assert_eq!(program.body[0].leading[0].text, " mid ");
    }
}
