//! in_array(needle, haystack) - membership test rendered as `IN (...)`

use super::{FunctionRegistry, SqlFunction};
use crate::ast::{FunctionCall, ParamExpression, TokenKind};
use crate::dumper::{DumpError, SqlDumper};
use crate::parser::{ParseError, Parser};
use crate::result::Bindings;

/// Either operand may be the array literal; the other one is the needle.
///
/// ```text
/// in_array($user->getLevel(), [4, 5])    =>  user.level IN (:auto_var_0, :auto_var_1)
/// !in_array([4, 5], $user->getLevel())   =>  user.level NOT IN (:auto_var_0, :auto_var_1)
/// ```
pub struct InArray;

impl SqlFunction for InArray {
    fn name(&self) -> &'static str {
        "in_array"
    }

    fn parse_arguments(&self, parser: &mut Parser<'_>) -> Result<Vec<ParamExpression>, ParseError> {
        parser.expect(&TokenKind::OpenParenthesis)?;
        let first = parser.parse_param_expression()?;
        parser.expect(&TokenKind::Comma)?;
        let second = parser.parse_param_expression()?;
        parser.expect(&TokenKind::CloseParenthesis)?;

        if first.is_array() == second.is_array() {
            return Err(ParseError::InvalidArguments {
                function: self.name().to_string(),
                reason: "expected exactly one array literal operand".to_string(),
            });
        }

        Ok(vec![first, second])
    }

    fn dump(
        &self,
        call: &FunctionCall,
        dumper: &mut SqlDumper<'_>,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        let (haystack, needle) = match call.args.as_slice() {
            [ParamExpression::Array(items), needle] | [needle, ParamExpression::Array(items)] => {
                (items, needle)
            }
            _ => {
                return Err(DumpError::UnsupportedExpression(format!(
                    "{} call without an array operand",
                    self.name()
                )));
            }
        };

        // Haystack bindings are allocated before the needle's.
        let items = dumper.dump_literals(haystack, variables)?;
        let needle = dumper.dump_param(needle, variables)?;

        Ok(format!(
            "{} {}IN ({})",
            needle,
            if call.negated { "NOT " } else { "" },
            items.join(", ")
        ))
    }
}

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register(Box::new(InArray));
}
