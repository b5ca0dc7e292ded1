//! Operator tables for the expression layers.
//!
//! Each layer owns its own operators. A higher precedence binds tighter; all
//! binary operators are left-associative.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Precedence of the operand of a leading `NOT`: tighter than every logical
/// binary operator, so `NOT a AND b` is `(NOT a) AND b`.
pub const NOT_PRECEDENCE: u8 = 4;

/// Logical operators of the `expr` layer.
#[must_use]
pub const fn logical_op(kind: TokenKind) -> Option<(BinaryOp, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) | TokenKind::OrOr => Some((BinaryOp::Or, 1)),
        TokenKind::Keyword(Keyword::Xor) => Some((BinaryOp::Xor, 2)),
        TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => Some((BinaryOp::And, 3)),
        _ => None,
    }
}

/// Comparison operators of the `booleanPrimary` layer, excluding `<=>`.
#[must_use]
pub const fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

/// Binary operators of the `bitExpr` layer, loosest first:
/// `|`, `&`, shifts, additive, multiplicative, modulo, `^`.
#[must_use]
pub const fn bit_op(kind: TokenKind) -> Option<(BinaryOp, u8)> {
    match kind {
        TokenKind::BitOr => Some((BinaryOp::BitOr, 1)),
        TokenKind::BitAnd => Some((BinaryOp::BitAnd, 2)),
        TokenKind::LeftShift => Some((BinaryOp::LeftShift, 3)),
        TokenKind::RightShift => Some((BinaryOp::RightShift, 3)),
        TokenKind::Plus => Some((BinaryOp::Add, 4)),
        TokenKind::Minus => Some((BinaryOp::Sub, 4)),
        TokenKind::Star => Some((BinaryOp::Mul, 5)),
        TokenKind::Slash => Some((BinaryOp::Div, 5)),
        TokenKind::Keyword(Keyword::Div) => Some((BinaryOp::IntDiv, 5)),
        TokenKind::Percent | TokenKind::Keyword(Keyword::Mod) => Some((BinaryOp::Mod, 6)),
        TokenKind::Caret => Some((BinaryOp::BitXor, 7)),
        _ => None,
    }
}

/// Prefix operators of the `simpleExpr` layer.
#[must_use]
pub const fn prefix_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Keyword(Keyword::Binary) => Some(UnaryOp::Binary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_precedence_order() {
        let (_, or) = logical_op(TokenKind::Keyword(Keyword::Or)).unwrap();
        let (_, xor) = logical_op(TokenKind::Keyword(Keyword::Xor)).unwrap();
        let (_, and) = logical_op(TokenKind::AndAnd).unwrap();
        assert!(or < xor && xor < and && and < NOT_PRECEDENCE);
    }

    #[test]
    fn test_bit_precedence_order() {
        let tiers: Vec<u8> = [
            TokenKind::BitOr,
            TokenKind::BitAnd,
            TokenKind::LeftShift,
            TokenKind::Plus,
            TokenKind::Star,
            TokenKind::Percent,
            TokenKind::Caret,
        ]
        .into_iter()
        .map(|kind| bit_op(kind).unwrap().1)
        .collect();
        assert!(tiers.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_keyword_operators() {
        assert_eq!(
            bit_op(TokenKind::Keyword(Keyword::Div)),
            Some((BinaryOp::IntDiv, 5))
        );
        assert_eq!(
            bit_op(TokenKind::Keyword(Keyword::Mod)),
            Some((BinaryOp::Mod, 6))
        );
        assert_eq!(comparison_op(TokenKind::NullSafeEq), None);
        assert_eq!(prefix_op(TokenKind::Bang), Some(UnaryOp::Not));
    }
}
