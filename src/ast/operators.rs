use crate::ast::TokenKind;

/// Boolean operator joining the primaries of a conditional chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
}

impl Combinator {
    /// SQL keyword placed between the rendered primaries.
    pub fn keyword(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }

    /// Token kind that continues a chain using this combinator.
    pub fn token_kind(self) -> TokenKind {
        match self {
            Combinator::And => TokenKind::BooleanAnd,
            Combinator::Or => TokenKind::BooleanOr,
        }
    }
}

/// Comparison operators, already normalized to their SQL spelling.
///
/// Loose and strict equality collapse into [`ComparisonOp::Equal`], and the
/// same goes for the two inequality forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
}

impl ComparisonOp {
    pub fn from_token_kind(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IsEqual | TokenKind::IsIdentical => Some(ComparisonOp::Equal),
            TokenKind::IsNotEqual | TokenKind::IsNotIdentical => Some(ComparisonOp::NotEqual),
            TokenKind::LessThan => Some(ComparisonOp::LessThan),
            TokenKind::GreaterThan => Some(ComparisonOp::GreaterThan),
            TokenKind::IsSmallerOrEqual => Some(ComparisonOp::LessEqual),
            TokenKind::IsGreaterOrEqual => Some(ComparisonOp::GreaterEqual),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::LessThan => "<",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::GreaterEqual => ">=",
        }
    }
}
