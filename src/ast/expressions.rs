use crate::ast::{Combinator, ComparisonOp};
use crate::value::Value;

/// Root of a parsed expression, and the content of every group.
///
/// A chain with a single un-negated primary is never wrapped: the parser
/// hands back the primary itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Primaries joined by one combinator
    Chain(ConditionalExpression),
    /// A lone primary
    Primary(ConditionalPrimary),
}

/// Primaries joined by a single boolean combinator.
///
/// # Example
/// ```text
/// $user->name == 'John' && $user->age > 27
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// At least one primary
    pub primaries: Vec<ConditionalPrimary>,
    /// `None` only for a negated group holding a single primary: `!(a == 1)`
    pub combinator: Option<Combinator>,
    /// Whether the enclosing group carried a leading `!`
    pub negated: bool,
}

/// One operand of a combinator chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalPrimary {
    /// Comparison or function call, rendered without parentheses
    Simple(SimpleExpression),

    /// Parenthesized sub-expression, optionally negated
    ///
    /// # Example
    /// ```text
    /// !($user->age > 27 || $user->admin == true)
    /// ```
    Grouped { negated: bool, group: Box<Condition> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleExpression {
    Comparison(ComparisonExpression),
    Function(FunctionCall),
}

/// `left OP right`, with the operator already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpression {
    pub left: ParamExpression,
    pub operator: ComparisonOp,
    pub right: ParamExpression,
}

/// Operand of a comparison or of a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamExpression {
    /// `$user->name` or `$user->getName()`
    Field(FieldAccess),

    /// Captured variable, by name without its sigil
    Variable(String),

    /// String, numeric, boolean or null constant
    Literal(Literal),

    /// `[1, 2]` or `array(1, 2)`
    Array(Vec<Literal>),
}

impl ParamExpression {
    pub fn is_null_literal(&self) -> bool {
        matches!(
            self,
            ParamExpression::Literal(Literal {
                kind: LiteralKind::Null,
                ..
            })
        )
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ParamExpression::Array(_))
    }
}

/// Access to a field or zero-argument accessor of the formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccess {
    pub param_name: String,
    pub field_name: String,
    pub is_method_call: bool,
}

impl FieldAccess {
    pub fn new(
        param_name: impl Into<String>,
        field_name: impl Into<String>,
        is_method_call: bool,
    ) -> Self {
        FieldAccess {
            param_name: param_name.into(),
            field_name: field_name.into(),
            is_method_call,
        }
    }

    /// Column name the field maps to.
    ///
    /// A `get` prefix is dropped from accessor calls, then the name is
    /// lower-cased: `getName()` and `name` both map to `name`.
    pub fn column_name(&self) -> String {
        let name = match self.field_name.strip_prefix("get") {
            Some(rest) if self.is_method_call => rest,
            _ => self.field_name.as_str(),
        };
        name.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Boolean,
    Numeric,
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub value: Value,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Literal {
            kind: LiteralKind::String,
            value: Value::String(value.into()),
        }
    }

    /// Numeric literals are always stored as floats, integers included.
    pub fn numeric(value: f64) -> Self {
        Literal {
            kind: LiteralKind::Numeric,
            value: Value::Float(value),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Literal {
            kind: LiteralKind::Boolean,
            value: Value::Boolean(value),
        }
    }

    pub fn null() -> Self {
        Literal {
            kind: LiteralKind::Null,
            value: Value::Null,
        }
    }
}

/// Call of a registered function.
///
/// The arguments are kept in syntactic order; their meaning belongs to the
/// function that parsed them.
///
/// # Example
/// ```text
/// !in_array($user->getLevel(), [4, 5])
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub negated: bool,
    pub args: Vec<ParamExpression>,
}
