//! Structured syntax errors shared by the lexer and the parser.

use crate::syntax::position::SourcePosition;

/// A lexical or syntactic error with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub location: ErrorLocation,
}

/// Where in the source an error was detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorLocation {
    /// At a specific position.
    At(SourcePosition),
    /// At end of input.
    Eof,
    /// Position unavailable.
    Unknown,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserErrorKind {
    /// A character the lexer has no rule for.
    UnexpectedCharacter(char),
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedRegex,
    UnterminatedComment,
    InvalidNumber(String),
    UnexpectedToken {
        found: String,
        expected: Vec<String>,
    },
    UnexpectedEndOfInput,
    ExpectedIdentifier {
        found: String,
    },
    /// Syntax outside the configured dialect, named for diagnosis.
    UnsupportedConstruct {
        construct: String,
        dialect: String,
    },
    InvalidAssignmentTarget,
    Custom(String),
}

impl ParserError {
    /// Create an error at a known line/column.
    pub fn at(kind: ParserErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            location: ErrorLocation::At(SourcePosition::new(line, column)),
        }
    }

    /// Create an error at a position value.
    pub fn here(kind: ParserErrorKind, pos: SourcePosition) -> Self {
        Self {
            kind,
            location: ErrorLocation::At(pos),
        }
    }

    /// Create an error at end of input.
    pub fn at_eof(kind: ParserErrorKind) -> Self {
        Self {
            kind,
            location: ErrorLocation::Eof,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self.location {
            ErrorLocation::At(pos) => Some(pos.line),
            ErrorLocation::Eof | ErrorLocation::Unknown => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self.location {
            ErrorLocation::At(pos) => Some(pos.column),
            ErrorLocation::Eof | ErrorLocation::Unknown => None,
        }
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location_prefix = match self.location {
            ErrorLocation::At(pos) => format!("{}:{}", pos.line, pos.column),
            ErrorLocation::Eof => "EOF".to_string(),
            ErrorLocation::Unknown => "?:?".to_string(),
        };

        let message = match &self.kind {
            ParserErrorKind::UnexpectedCharacter(c) => {
                format!("Unexpected character '{c}'")
            }
            ParserErrorKind::UnterminatedString => "Unterminated string literal".to_string(),
            ParserErrorKind::UnterminatedTemplate => "Unterminated template literal".to_string(),
            ParserErrorKind::UnterminatedRegex => "Unterminated regular expression".to_string(),
            ParserErrorKind::UnterminatedComment => "Unterminated block comment".to_string(),
            ParserErrorKind::InvalidNumber(raw) => format!("Invalid number literal '{raw}'"),
            ParserErrorKind::UnexpectedToken { found, expected } => {
                if expected.is_empty() {
                    format!("Unexpected token '{found}'")
                } else {
                    format!(
                        "Unexpected token '{}', expected: {}",
                        found,
                        expected.join(", ")
                    )
                }
            }
            ParserErrorKind::UnexpectedEndOfInput => "Unexpected end of input".to_string(),
            ParserErrorKind::ExpectedIdentifier { found } => {
                format!("Expected identifier, found '{found}'")
            }
            ParserErrorKind::UnsupportedConstruct { construct, dialect } => {
                format!("{construct} is not available in dialect '{dialect}'")
            }
            ParserErrorKind::InvalidAssignmentTarget => "Invalid assignment target".to_string(),
            ParserErrorKind::Custom(msg) => msg.clone(),
        };

        write!(f, "[{location_prefix}] {message}")
    }
}

impl std::error::Error for ParserError {}

pub type ParseResult<T> = Result<T, ParserError>;

/// Helper for the most common parser error.
pub fn unexpected_token(
    found: impl Into<String>,
    expected: Vec<impl Into<String>>,
) -> ParserErrorKind {
    ParserErrorKind::UnexpectedToken {
        found: found.into(),
        expected: expected.into_iter().map(Into::into).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_at_location() {
        let err = ParserError::at(ParserErrorKind::UnterminatedString, 3, 7);
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.column(), Some(7));
    }

    #[test]
    fn test_error_at_eof_has_no_position() {
        let err = ParserError::at_eof(ParserErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.line(), None);
        assert_eq!(err.column(), None);
        assert!(format!("{err}").contains("EOF"));
    }

    #[test]
    fn test_display_includes_position() {
        let err = ParserError::at(
            unexpected_token(";", vec!["identifier"]),
            5,
            10,
        );
        let text = format!("{err}");
        assert!(text.contains("5:10"));
        assert!(text.contains("Unexpected token ';'"));
        assert!(text.contains("identifier"));
    }

    #[test]
    fn test_display_unsupported_construct() {
        let err = ParserError::at(
            ParserErrorKind::UnsupportedConstruct {
                construct: "arrow function".to_string(),
                dialect: "es5".to_string(),
            },
            1,
            1,
        );
        let text = format!("{err}");
        assert!(text.contains("arrow function"));
        assert!(text.contains("es5"));
    }
}
