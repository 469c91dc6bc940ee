//! Total order over JavaScript operator classes.
//!
//! An expression is parenthesized iff its own level is weaker (lower) than
//! the level its syntactic context demands. Non-associative operand positions
//! demand [`Precedence::next`] to force parentheses around nested forms of
//! the same level.

/// Operator precedence levels, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Comma,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Comparison,
    BitwiseShift,
    Addition,
    Modulo,
    Multiplication,
    Unary,
    New,
    FunctionCall,
    MemberAccess,
    Grouping,
}

impl Precedence {
    /// The weakest level; contexts that accept any expression demand this.
    pub const fn min() -> Self {
        Self::Comma
    }

    /// One level stronger, saturating at [`Precedence::Grouping`].
    pub fn next(self) -> Self {
        match self {
            Self::Comma => Self::Assignment,
            Self::Assignment => Self::Conditional,
            Self::Conditional => Self::LogicalOr,
            Self::LogicalOr => Self::LogicalAnd,
            Self::LogicalAnd => Self::BitwiseOr,
            Self::BitwiseOr => Self::BitwiseXor,
            Self::BitwiseXor => Self::BitwiseAnd,
            Self::BitwiseAnd => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::BitwiseShift,
            Self::BitwiseShift => Self::Addition,
            Self::Addition => Self::Modulo,
            Self::Modulo => Self::Multiplication,
            Self::Multiplication => Self::Unary,
            Self::Unary => Self::New,
            Self::New => Self::FunctionCall,
            Self::FunctionCall => Self::MemberAccess,
            Self::MemberAccess | Self::Grouping => Self::Grouping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        assert!(Precedence::Comma < Precedence::Conditional);
        assert!(Precedence::Addition < Precedence::Multiplication);
        assert!(Precedence::Multiplication < Precedence::Unary);
        assert!(Precedence::MemberAccess < Precedence::Grouping);
        assert_eq!(Precedence::min(), Precedence::Comma);
    }

    #[test]
    fn next_saturates_at_grouping() {
        assert_eq!(Precedence::Addition.next(), Precedence::Modulo);
        assert_eq!(Precedence::Grouping.next(), Precedence::Grouping);
        assert_eq!(Precedence::MemberAccess.next(), Precedence::Grouping);
    }
}
