//! Binary operator precedence, ES semantics.

use crate::syntax::token::TokenKind;

/// Binding power of a binary or logical operator; 0 means "not one".
///
/// All binary operators in the dialect are left-associative, so the Pratt
/// loop recurses with `precedence + 1`.
pub fn get_precedence(op: TokenKind) -> u8 {
    match op {
        TokenKind::OrOr => 1,
        TokenKind::AndAnd => 2,
        TokenKind::Pipe => 3,
        TokenKind::Caret => 4,
        TokenKind::Amp => 5,
        TokenKind::EqEq | TokenKind::NotEq | TokenKind::EqEqEq | TokenKind::NotEqEq => 6,
        TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::LtEq
        | TokenKind::GtEq
        | TokenKind::Instanceof
        | TokenKind::In => 7,
        TokenKind::Shl | TokenKind::Shr | TokenKind::UShr => 8,
        TokenKind::Plus | TokenKind::Minus => 9,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 10,
        _ => 0,
    }
}
