//! JSON output for compiled predicates.
//!
//! A compiled predicate serializes as
//!
//! ```json
//! {"sql": "user.name = :auto_var_0", "variables": {"auto_var_0": "John"}}
//! ```
//!
//! Output is deterministic: object keys are sorted. Numeric literals are
//! bound as floats, so `27` comes out as `27.0`.
//!
//! # Examples
//!
//! ```
//! use predicate_sql::output::to_json;
//! use predicate_sql::{Bindings, Value};
//!
//! let variables: Bindings = vec![("auto_var_0", Value::Float(27.0))].into_iter().collect();
//! assert_eq!(
//!     to_json("user.age > :auto_var_0", &variables),
//!     r#"{"sql":"user.age > :auto_var_0","variables":{"auto_var_0":27.0}}"#
//! );
//! ```

use crate::cli::value_to_json;
use crate::result::Bindings;
use crate::value::Value;

fn to_json_value(sql: &str, variables: &Bindings) -> serde_json::Value {
    let mut entries: Vec<(&str, &Value)> = variables.iter().collect();
    entries.sort_unstable_by_key(|(name, _)| *name);

    let variables: serde_json::Map<String, serde_json::Value> = entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value_to_json(value)))
        .collect();

    serde_json::json!({
        "sql": sql,
        "variables": variables,
    })
}

/// Compact JSON.
pub fn to_json(sql: &str, variables: &Bindings) -> String {
    to_json_value(sql, variables).to_string()
}

/// JSON with 2-space indentation.
pub fn to_json_pretty(sql: &str, variables: &Bindings) -> String {
    let value = to_json_value(sql, variables);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_sorted() {
        let variables: Bindings = vec![
            ("userName", Value::from("John")),
            ("auto_var_0", Value::Float(27.0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            to_json("x", &variables),
            r#"{"sql":"x","variables":{"auto_var_0":27.0,"userName":"John"}}"#
        );
    }

    #[test]
    fn test_pretty() {
        let output = to_json_pretty("x", &Bindings::new());
        assert_eq!(output, "{\n  \"sql\": \"x\",\n  \"variables\": {}\n}");
    }

    #[test]
    fn test_null_and_array_values() {
        let variables: Bindings = vec![
            ("nothing", Value::Null),
            ("levels", Value::Array(vec![Value::Integer(4), Value::Integer(5)])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            to_json("x", &variables),
            r#"{"sql":"x","variables":{"levels":[4,5],"nothing":null}}"#
        );
    }
}
