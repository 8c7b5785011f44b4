// tests/integration_tests.rs
//
// End-to-end: token stream in, SQL fragment and bindings out.

mod common;

use common::{bindings, compile_with, sql};
use predicate_sql::parser::ParseError;
use predicate_sql::{Bindings, CompileError, DumpError, Value};

#[test]
fn test_and() {
    let (sql, variables) = compile_with(
        "$user -> getName ( ) == 'John' && $user -> getAge ( ) > 27",
        Bindings::new(),
    )
    .unwrap();

    assert_eq!(sql, "user.name = :auto_var_0 AND user.age > :auto_var_1");
    assert_eq!(
        variables,
        bindings(vec![
            ("auto_var_0", Value::from("John")),
            ("auto_var_1", Value::Float(27.0)),
        ])
    );
}

#[test]
fn test_plain_fields() {
    assert_eq!(
        sql("$param -> name == 'John' && $param -> age > 27"),
        "param.name = :auto_var_0 AND param.age > :auto_var_1"
    );
}

#[test]
fn test_in_array_function() {
    assert_eq!(
        sql("in_array ( $user -> getLevel ( ) , [ 4 , 5 ] )"),
        "user.level IN (:auto_var_0, :auto_var_1)"
    );
}

#[test]
fn test_not_function() {
    assert_eq!(
        sql("! in_array ( $user -> getLevel ( ) , [ 4 , 5 ] )"),
        "user.level NOT IN (:auto_var_0, :auto_var_1)"
    );
}

#[test]
fn test_parentheses() {
    assert_eq!(
        sql("( $user -> getName ( ) == 'John' && ( $user -> getAge ( ) > 27 ) )"),
        "(user.name = :auto_var_0 AND (user.age > :auto_var_1))"
    );
}

#[test]
fn test_complex() {
    assert_eq!(
        sql(
            "( $user -> getName ( ) == 'John' && 27 < $user -> getAge ( ) ) \
             || ! in_array ( $user -> getLevel ( ) , [ 4 , 5 ] )"
        ),
        "(user.name = :auto_var_0 AND :auto_var_1 < user.age) OR user.level NOT IN (:auto_var_2, :auto_var_3)"
    );
}

#[test]
fn test_with_vars() {
    let (sql, variables) = compile_with(
        "$user -> getName ( ) == 'John' && 27 < $user -> getAge ( ) \
         && ! in_array ( $user -> getLevel ( ) , [ 4 , 5 ] )",
        Bindings::new(),
    )
    .unwrap();

    assert_eq!(
        sql,
        "user.name = :auto_var_0 AND :auto_var_1 < user.age AND user.level NOT IN (:auto_var_2, :auto_var_3)"
    );
    assert_eq!(
        variables,
        bindings(vec![
            ("auto_var_0", Value::from("John")),
            ("auto_var_1", Value::Float(27.0)),
            ("auto_var_2", Value::Float(4.0)),
            ("auto_var_3", Value::Float(5.0)),
        ])
    );
}

#[test]
fn test_with_captured_vars() {
    let captured = bindings(vec![
        ("userName", Value::from("John")),
        ("userAge", Value::Integer(35)),
    ]);
    let (sql, variables) = compile_with(
        "$user -> getName ( ) == $userName && $userAge < $user -> getAge ( )",
        captured.clone(),
    )
    .unwrap();

    assert_eq!(sql, "user.name = :userName AND :userAge < user.age");
    assert_eq!(variables, captured);
}

#[test]
fn test_with_captured_and_literal_vars() {
    let (sql, variables) = compile_with(
        "$user -> name == $userName && 27 < $user -> age",
        bindings(vec![("userName", Value::from("John"))]),
    )
    .unwrap();

    assert_eq!(sql, "user.name = :userName AND :auto_var_0 < user.age");
    assert_eq!(
        variables,
        bindings(vec![
            ("userName", Value::from("John")),
            ("auto_var_0", Value::Float(27.0)),
        ])
    );
}

#[test]
fn test_rejected_expressions() {
    let err = compile_with(
        "$user -> a == 1 || $user -> b == 2 && $user -> c == 3",
        Bindings::new(),
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::Syntax(ParseError::Expected { .. })));

    let err = compile_with("array_sum ( [ 1 ] ) > 1", Bindings::new()).unwrap_err();
    assert_eq!(
        err,
        CompileError::Syntax(ParseError::UnknownFunction("array_sum".to_string()))
    );

    let err = compile_with("$user -> name == $ghost", Bindings::new()).unwrap_err();
    assert_eq!(
        err,
        CompileError::Dump(DumpError::UndefinedVariable("ghost".to_string()))
    );
}
