//! Recursive-descent parser with a Pratt expression core.

mod utils;

#[allow(clippy::module_inception)]
mod parser;

pub use parser::Parser;
pub use utils::get_precedence;
