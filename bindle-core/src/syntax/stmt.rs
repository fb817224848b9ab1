//! Statement nodes and the module [`Program`].
//!
//! Statements carry their source span and attached comment trivia; statement
//! lists are the mutation seams the rewrite pipeline works on
//! (replace-with-sequence, insert-after, prepend are all plain `Vec` edits).

use crate::syntax::expr::{Class, Expr, Function};
use crate::syntax::pattern::Pattern;
use crate::syntax::position::SourceSpan;
use crate::syntax::token::Comment;

pub type Stmt = Box<StmtNode>;

/// One statement with its span and trivia.
#[derive(Debug, Clone, PartialEq)]
pub struct StmtNode {
    pub kind: StmtKind,
    pub span: SourceSpan,
    pub leading: Vec<Comment>,
    pub trailing: Vec<Comment>,
}

impl StmtNode {
    pub fn new(kind: StmtKind, span: SourceSpan) -> Stmt {
        Box::new(Self {
            kind,
            span,
            leading: Vec::new(),
            trailing: Vec::new(),
        })
    }

    /// Statement created by a rewrite pass, with no source position.
    pub fn synthetic(kind: StmtKind) -> Stmt {
        Self::new(kind, SourceSpan::default())
    }

    /// Child statement lists, for trivia attachment and cleanup traversal.
    ///
    /// Only statement-level nesting is walked; statements inside expression
    /// bodies (function expressions and the like) never carry trivia.
    pub fn child_lists_mut(&mut self) -> (Vec<&mut Vec<Stmt>>, Vec<&mut Stmt>) {
        let mut lists: Vec<&mut Vec<Stmt>> = Vec::new();
        let mut singles: Vec<&mut Stmt> = Vec::new();
        match &mut self.kind {
            StmtKind::Block(block) => lists.push(&mut block.body),
            StmtKind::FunctionDecl(function) => lists.push(&mut function.body),
            StmtKind::If(if_stmt) => {
                singles.push(&mut if_stmt.consequent);
                if let Some(alternate) = &mut if_stmt.alternate {
                    singles.push(alternate);
                }
            }
            StmtKind::For(for_stmt) => singles.push(&mut for_stmt.body),
            StmtKind::ForIn(for_in) => singles.push(&mut for_in.body),
            StmtKind::While(while_stmt) => singles.push(&mut while_stmt.body),
            StmtKind::DoWhile(do_while) => singles.push(&mut do_while.body),
            StmtKind::Switch(switch) => {
                for case in &mut switch.cases {
                    lists.push(&mut case.body);
                }
            }
            StmtKind::Try(try_stmt) => {
                lists.push(&mut try_stmt.block);
                if let Some(handler) = &mut try_stmt.handler {
                    lists.push(&mut handler.body);
                }
                if let Some(finalizer) = &mut try_stmt.finalizer {
                    lists.push(finalizer);
                }
            }
            StmtKind::ExportNamed(export) => {
                if let Some(declaration) = &mut export.declaration {
                    singles.push(declaration);
                }
            }
            _ => {}
        }
        (lists, singles)
    }
}

/// Closed set of statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expression(ExpressionStmt),
    Empty,
    Block(BlockStmt),
    VarDecl(VarDecl),
    FunctionDecl(Function),
    ClassDecl(Class),
    Return(ReturnStmt),
    If(IfStmt),
    For(ForStmt),
    ForIn(ForInStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    Break,
    Continue,
    Switch(SwitchStmt),
    Throw(ThrowStmt),
    Try(TryStmt),
    Debugger,
    // Module forms; only valid at the top level, removed by the pipeline.
    Import(ImportDecl),
    ExportNamed(ExportNamedDecl),
    ExportDefault(ExportDefaultDecl),
    ExportAll(ExportAllDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
        }
    }

    /// `var` hoists to the enclosing function scope.
    pub fn hoists(&self) -> bool {
        matches!(self, DeclKind::Var)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: DeclKind,
    pub declarators: Vec<Declarator>,
}

impl VarDecl {
    /// Names bound by all declarators, in source order.
    pub fn bound_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for declarator in &self.declarators {
            declarator.target.bound_names(&mut names);
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub target: Pattern,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub argument: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Stmt,
    pub alternate: Option<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VarDecl(VarDecl),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub test: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Stmt,
}

/// `for (target in iterable)` / `for (target of iterable)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStmt {
    pub target: ForInit,
    pub iterable: Expr,
    pub body: Stmt,
    /// `of` instead of `in`.
    pub of: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Stmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStmt {
    pub body: Stmt,
    pub test: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub discriminant: Expr,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default:`.
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStmt {
    pub argument: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub block: Vec<Stmt>,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pattern>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import name from 'm'`
    Default(String),
    /// `import * as name from 'm'`
    Namespace(String),
    /// `import {imported as local} from 'm'`
    Named { imported: String, local: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDecl {
    /// `export var a = 1;` / `export function f() {}`
    pub declaration: Option<Stmt>,
    /// `export {a as b}`; empty when `declaration` is set.
    pub specifiers: Vec<ExportSpecifier>,
    /// `export {a} from 'm'`
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExport {
    Function(Function),
    Class(Class),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultDecl {
    pub value: DefaultExport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDecl {
    pub source: String,
}

/// One parsed module.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::expr::{ExprKind, NumberLiteral};

    #[test]
    fn test_var_decl_bound_names() {
        let decl = VarDecl {
            kind: DeclKind::Var,
            declarators: vec![
                Declarator {
                    target: Pattern::Identifier("a".to_string()),
                    init: None,
                },
                Declarator {
                    target: Pattern::Identifier("b".to_string()),
                    init: Some(Box::new(ExprKind::Number(NumberLiteral {
                        value: 2.0,
                        raw: "2".to_string(),
                    }))),
                },
            ],
        };
        assert_eq!(decl.bound_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_decl_kind_strings() {
        assert_eq!(DeclKind::Var.as_str(), "var");
        assert_eq!(DeclKind::Const.as_str(), "const");
        assert!(DeclKind::Var.hoists());
        assert!(!DeclKind::Let.hoists());
    }

    #[test]
    fn test_child_lists_of_try() {
        let mut stmt = StmtNode::synthetic(StmtKind::Try(TryStmt {
            block: vec![StmtNode::synthetic(StmtKind::Empty)],
            handler: Some(CatchClause {
                param: Some(Pattern::Identifier("e".to_string())),
                body: vec![],
            }),
            finalizer: Some(vec![]),
        }));
        let (lists, singles) = stmt.child_lists_mut();
        assert_eq!(lists.len(), 3);
        assert!(singles.is_empty());
    }
}
