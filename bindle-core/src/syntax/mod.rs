//! The ES dialect bindle parses and re-serializes.

pub mod comments;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod pattern;
pub mod position;
pub mod printer;
pub mod stmt;
pub mod token;

pub mod parser;

pub use error::{ErrorLocation, ParseResult, ParserError, ParserErrorKind};
pub use position::{SourcePosition, SourceSpan};
pub use stmt::Program;

use bindle_config::SourceDialect;

/// Parse one module source into a [`Program`] with comments attached.
///
/// This is the single entry the bundler uses: lex, parse for the configured
/// dialect, then attach comment trivia to statements positionally.
pub fn parse_module(source: &str, dialect: SourceDialect) -> ParseResult<Program> {
    let output = lexer::tokenize(source)?;
    let mut program = parser::Parser::new(output.tokens, dialect).parse()?;
    comments::attach_comments(&mut program, output.comments);
    Ok(program)
}
