//! Expression nodes.
//!
//! Owned tree, no parent pointers. Operators reuse [`TokenKind`] as their
//! tag; the printer spells them back out via `TokenKind::as_str`.

use crate::syntax::pattern::Pattern;
use crate::syntax::stmt::Stmt;
use crate::syntax::token::TokenKind;

pub type Expr = Box<ExprKind>;

/// Closed set of expression kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier(Identifier),
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    This(ThisExpr),
    Regex(RegexLiteral),
    Template(TemplateLiteral),
    Array(ArrayLiteral),
    Object(ObjectLiteral),
    /// Function expression.
    Function(Function),
    Arrow(ArrowFunction),
    /// Class expression.
    Class(Class),
    Unary(Unary),
    Update(Update),
    Binary(Binary),
    Logical(Logical),
    Conditional(Conditional),
    Assignment(Assignment),
    Sequence(Sequence),
    Call(Call),
    New(New),
    Member(Member),
    /// Explicit parentheses from the source.
    Grouping(Grouping),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    /// Original spelling, preserved by the printer (`0xFF` stays hex).
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// Cooked value; the printer re-escapes.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NullLiteral;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThisExpr;

#[derive(Debug, Clone, PartialEq)]
pub struct RegexLiteral {
    pub pattern: String,
    pub flags: String,
}

/// `` `a${x}b` ``; quasis are raw text, always one more than expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub quasis: Vec<String>,
    pub expressions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    Expr(Expr),
    Spread(Expr),
    /// Elision: `[a, , b]`.
    Hole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    String(String),
    /// Raw spelling of a numeric key.
    Number(String),
    Computed(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Init(Expr),
    /// `{a}`, where the key is also the value reference.
    Shorthand,
    Method(Function),
    Get(Function),
    Set(Function),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub properties: Vec<ObjectProperty>,
}

/// Function declaration or expression body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<String>,
    pub params: Vec<Pattern>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expr(Expr),
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Option<String>,
    pub superclass: Option<Expr>,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub key: PropertyKey,
    pub kind: MethodKind,
    pub is_static: bool,
    pub function: Function,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: TokenKind,
    pub operand: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub op: TokenKind,
    pub prefix: bool,
    pub operand: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: TokenKind,
    pub left: Expr,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub op: TokenKind,
    pub left: Expr,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub test: Expr,
    pub consequent: Expr,
    pub alternate: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub op: TokenKind,
    pub target: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub expressions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Expr(Expr),
    Spread(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Expr,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct New {
    pub callee: Expr,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    Dot(String),
    Computed(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub object: Expr,
    pub property: MemberProperty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    pub expression: Expr,
}

impl ExprKind {
    /// Convenience for tests and passes: the name if this is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            ExprKind::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }
}
