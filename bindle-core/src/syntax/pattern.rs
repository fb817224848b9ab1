//! Binding patterns: identifiers, destructuring, defaults, rest.
//!
//! Used by variable declarators, function parameters and catch clauses.
//! `bound_names` is the one operation the bundler relies on: the export pass
//! appends one `exports.<name> = <name>` per bound name, and the scope
//! analysis treats every bound name as a shadowing declaration.

use crate::syntax::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Plain name binding.
    Identifier(String),
    /// `{a, b: c, d = 1}`
    Object(ObjectPattern),
    /// `[a, , b]`
    Array(ArrayPattern),
    /// `target = default`
    Default(DefaultPattern),
    /// `...target`
    Rest(Box<Pattern>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPatternProperty {
    pub key: String,
    pub value: Pattern,
    /// `{a}` instead of `{a: a}`.
    pub shorthand: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// `None` is an elision hole.
    pub elements: Vec<Option<Pattern>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultPattern {
    pub pattern: Box<Pattern>,
    pub default: Expr,
}

impl Pattern {
    /// Append every name this pattern binds, in source order.
    pub fn bound_names(&self, out: &mut Vec<String>) {
        match self {
            Pattern::Identifier(name) => out.push(name.clone()),
            Pattern::Object(object) => {
                for property in &object.properties {
                    property.value.bound_names(out);
                }
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    element.bound_names(out);
                }
            }
            Pattern::Default(default) => default.pattern.bound_names(out),
            Pattern::Rest(inner) => inner.bound_names(out),
        }
    }

    /// True if the pattern binds `name`.
    pub fn binds(&self, name: &str) -> bool {
        let mut names = Vec::new();
        self.bound_names(&mut names);
        names.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::expr::{ExprKind, NumberLiteral};

    #[test]
    fn test_identifier_bound_names() {
        let mut names = Vec::new();
        Pattern::Identifier("x".to_string()).bound_names(&mut names);
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_nested_destructuring_bound_names() {
        // {a, b: [c, , d = 1, ...rest]} binds a, c, d, rest
        let pattern = Pattern::Object(ObjectPattern {
            properties: vec![
                ObjectPatternProperty {
                    key: "a".to_string(),
                    value: Pattern::Identifier("a".to_string()),
                    shorthand: true,
                },
                ObjectPatternProperty {
                    key: "b".to_string(),
                    value: Pattern::Array(ArrayPattern {
                        elements: vec![
                            Some(Pattern::Identifier("c".to_string())),
                            None,
                            Some(Pattern::Default(DefaultPattern {
                                pattern: Box::new(Pattern::Identifier("d".to_string())),
                                default: Box::new(ExprKind::Number(NumberLiteral {
                                    value: 1.0,
                                    raw: "1".to_string(),
                                })),
                            })),
                            Some(Pattern::Rest(Box::new(Pattern::Identifier(
                                "rest".to_string(),
                            )))),
                        ],
                    }),
                    shorthand: false,
                },
            ],
        });
        let mut names = Vec::new();
        pattern.bound_names(&mut names);
        assert_eq!(names, vec!["a", "c", "d", "rest"]);
        assert!(pattern.binds("c"));
        assert!(!pattern.binds("b"));
    }
}
