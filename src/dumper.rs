use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{
        ComparisonExpression, Condition, ConditionalExpression, ConditionalPrimary, FieldAccess,
        FunctionCall, Literal, LiteralKind, ParamExpression, SimpleExpression,
    },
    functions::{FunctionRegistry, builtin_registry},
    result::{Bindings, CompilationResult},
};

/// Prefix of the bind names allocated for literals.
pub const AUTO_VAR_PREFIX: &str = "auto_var_";

/// Errors raised while rendering SQL.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DumpError {
    /// A captured variable is referenced but was never bound
    #[error("Variable {0} is undefined")]
    UndefinedVariable(String),

    /// The renderer has no rule for this node
    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A synthetic name is already bound to a different value
    #[error("Binding {0} already holds a different value")]
    ConflictingBinding(String),
}

/// Renders a [`CompilationResult`] as a SQL condition fragment.
///
/// Literals become `:auto_var_<n>` placeholders, numbered in the order the
/// renderer reaches them, and their values are added to the result's
/// variables. Captured variables render as `:<name>` and keep their name.
pub struct SqlDumper<'r> {
    registry: &'r FunctionRegistry,
    auto_var: usize,
}

impl SqlDumper<'static> {
    pub fn new() -> Self {
        SqlDumper::with_registry(builtin_registry())
    }
}

impl Default for SqlDumper<'static> {
    fn default() -> Self {
        SqlDumper::new()
    }
}

impl<'r> SqlDumper<'r> {
    pub fn with_registry(registry: &'r FunctionRegistry) -> Self {
        SqlDumper {
            registry,
            auto_var: 0,
        }
    }

    /// Renders the expression. Numbering restarts at `auto_var_0` on every call.
    pub fn dump(&mut self, result: &mut CompilationResult) -> Result<String, DumpError> {
        self.auto_var = 0;
        let CompilationResult {
            expression,
            variables,
            ..
        } = result;

        let sql = self.dump_condition(expression, variables)?;
        debug!(
            sql_len = sql.len(),
            synthetic = self.auto_var,
            bindings = variables.len(),
            "rendered SQL fragment"
        );
        Ok(sql)
    }

    pub fn dump_condition(
        &mut self,
        condition: &Condition,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        match condition {
            Condition::Chain(chain) => self.dump_conditional_expression(chain, variables),
            Condition::Primary(primary) => self.dump_conditional_primary(primary, variables),
        }
    }

    fn dump_conditional_expression(
        &mut self,
        expression: &ConditionalExpression,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        let primaries = expression
            .primaries
            .iter()
            .map(|primary| self.dump_conditional_primary(primary, variables))
            .collect::<Result<Vec<_>, _>>()?;

        let separator = match expression.combinator {
            Some(combinator) => format!(" {} ", combinator.keyword()),
            None => " ".to_string(),
        };
        Ok(primaries.join(&separator))
    }

    fn dump_conditional_primary(
        &mut self,
        primary: &ConditionalPrimary,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        match primary {
            ConditionalPrimary::Simple(SimpleExpression::Comparison(comparison)) => {
                self.dump_comparison(comparison, variables)
            }
            ConditionalPrimary::Simple(SimpleExpression::Function(call)) => {
                self.dump_function(call, variables)
            }
            ConditionalPrimary::Grouped { negated, group } => Ok(format!(
                "{}({})",
                if *negated { "NOT " } else { "" },
                self.dump_condition(group, variables)?
            )),
        }
    }

    /// A NULL operand always ends up on the right, compared with `IS`/`IS NOT`.
    fn dump_comparison(
        &mut self,
        comparison: &ComparisonExpression,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        let mut operator = comparison.operator.symbol();
        let mut left = &comparison.left;
        let mut right = &comparison.right;

        if left.is_null_literal() {
            operator = null_operator(operator);
            std::mem::swap(&mut left, &mut right);
        }
        if right.is_null_literal() {
            operator = null_operator(operator);
        }

        let left = self.dump_param(left, variables)?;
        let right = self.dump_param(right, variables)?;
        Ok(format!("{} {} {}", left, operator, right))
    }

    pub fn dump_param(
        &mut self,
        param: &ParamExpression,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        match param {
            ParamExpression::Field(field) => Ok(dump_field(field)),
            ParamExpression::Variable(name) => dump_variable(name, variables),
            ParamExpression::Literal(literal) => self.dump_literal(literal, variables),
            ParamExpression::Array(items) => {
                Ok(format!("[{}]", self.dump_literals(items, variables)?.join(", ")))
            }
        }
    }

    /// Allocates the next synthetic binding, except for NULL.
    ///
    /// Re-dumping finds its own bindings already in place; any other value
    /// under the name is a conflict.
    pub fn dump_literal(
        &mut self,
        literal: &Literal,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        if literal.kind == LiteralKind::Null {
            return Ok("NULL".to_string());
        }

        let name = format!("{}{}", AUTO_VAR_PREFIX, self.auto_var);
        self.auto_var += 1;
        match variables.get(&name) {
            Some(existing) if *existing != literal.value => {
                return Err(DumpError::ConflictingBinding(name));
            }
            Some(_) => {}
            None => {
                trace!(name = %name, value = %literal.value, "allocated synthetic binding");
                variables.insert(name.clone(), literal.value.clone());
            }
        }

        Ok(format!(":{}", name))
    }

    pub fn dump_literals(
        &mut self,
        literals: &[Literal],
        variables: &mut Bindings,
    ) -> Result<Vec<String>, DumpError> {
        literals
            .iter()
            .map(|literal| self.dump_literal(literal, variables))
            .collect()
    }

    fn dump_function(
        &mut self,
        call: &FunctionCall,
        variables: &mut Bindings,
    ) -> Result<String, DumpError> {
        let registry = self.registry;
        let function = registry.get(&call.name).ok_or_else(|| {
            DumpError::UnsupportedExpression(format!("function '{}'", call.name))
        })?;
        trace!(function = %call.name, negated = call.negated, "rendering function call");

        function.dump(call, self, variables)
    }
}

fn null_operator(operator: &'static str) -> &'static str {
    match operator {
        "=" => "IS",
        "<>" => "IS NOT",
        other => other,
    }
}

fn dump_field(field: &FieldAccess) -> String {
    format!("{}.{}", field.param_name, field.column_name())
}

fn dump_variable(name: &str, variables: &Bindings) -> Result<String, DumpError> {
    match variables.get(name) {
        None => Err(DumpError::UndefinedVariable(name.to_string())),
        Some(value) if value.is_null() => Ok("NULL".to_string()),
        Some(_) => Ok(format!(":{}", name)),
    }
}
