//! Integration tests for ValidationError and Errors.

use std::error::Error;

use inquest::validation::{failure, failure_with_cause, from_result};
use inquest::{Context, Errors, Validation, ValidationError, ValidationExt};
use serde_json::json;
use stillwater::Semigroup;

fn at(field: &str, message: &str) -> ValidationError {
    ValidationError::new(Context::root().push_field(field, "string"), message)
}

#[test]
fn test_validation_error_full_context() {
    let error = at("email", "invalid email format").with_value(json!("not-an-email"));

    assert_eq!(error.context.to_string(), "email");
    assert_eq!(error.message, "invalid email format");
    assert_eq!(error.value, Some(json!("not-an-email")));
    assert!(error.cause.is_none());
    assert_eq!(error.to_string(), "email: invalid email format");
}

#[test]
fn test_root_error_display() {
    let error = ValidationError::new(Context::root(), "bad input");
    assert_eq!(error.to_string(), "(root): bad input");
}

#[test]
fn test_errors_combine_via_semigroup() {
    let combined = Errors::single(at("name", "name is required"))
        .combine(Errors::single(at("email", "email is invalid")))
        .combine(Errors::single(at("age", "age must be positive")));

    assert_eq!(combined.len(), 3);
    assert_eq!(
        combined.messages(),
        vec!["name is required", "email is invalid", "age must be positive"]
    );
}

#[test]
fn test_errors_monoid_laws() {
    let x = Errors::from_vec(vec![at("a", "one"), at("b", "two")]);
    let y = Errors::single(at("c", "three"));
    let z = Errors::single(at("d", "four"));

    assert_eq!(x.clone().combine(Errors::empty()), x);
    assert_eq!(Errors::empty().combine(x.clone()), x);
    assert_eq!(
        x.clone().combine(y.clone()).combine(z.clone()),
        x.combine(y.combine(z))
    );
}

#[test]
fn test_errors_concat_keeps_order_and_duplicates() {
    let e = Errors::single(at("a", "same"));
    let doubled = e.clone().concat(e);
    assert_eq!(doubled.len(), 2);
    assert_eq!(doubled.clone().dedup().len(), 1);
}

#[test]
fn test_errors_display_lists_every_error() {
    let errors = Errors::from_vec(vec![at("name", "required"), at("age", "too small")]);
    let rendered = errors.to_string();
    assert!(rendered.contains("name: required"));
    assert!(rendered.contains("age: too small"));
}

#[test]
fn test_errors_by_context_groups_in_first_seen_order() {
    let errors = Errors::from_vec(vec![
        at("b", "first b"),
        at("a", "only a"),
        at("b", "second b"),
    ]);

    let groups = errors.by_context();
    let keys: Vec<&String> = groups.keys().collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(groups["b"].len(), 2);
}

#[test]
fn test_errors_at_and_under_context() {
    let user = Context::root().push_field("user", "User");
    let errors = Errors::from_vec(vec![
        ValidationError::new(user.clone(), "user invalid"),
        ValidationError::new(user.push_field("email", "string"), "email invalid"),
        at("other", "unrelated"),
    ]);

    assert_eq!(errors.at_context(&user).len(), 1);
    assert_eq!(errors.under(&user).len(), 2);
}

#[test]
fn test_errors_collect_and_iterate() {
    let errors: Errors = vec![at("a", "x"), at("b", "y")].into_iter().collect();
    let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["x", "y"]);
}

#[test]
fn test_cause_is_error_source() {
    let parsed = "abc".parse::<i32>();
    let result: Validation<i32> = from_result(parsed, &Context::root().push_field("n", "i32"));

    let errors = result.into_errors();
    let error = errors.first().unwrap();
    assert!(error.source().is_some());
    assert_eq!(error.message, "invalid digit found in string");
}

#[test]
fn test_failure_with_cause() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
    let result: Validation<()> = failure_with_cause(&Context::root(), io);
    assert_eq!(result.into_errors().messages(), vec!["disk on fire"]);
}

#[test]
fn test_validation_fold() {
    let ok: Validation<i32> = Validation::Success(42);
    assert_eq!(ok.fold(|errors| errors.len() as i32, |v| v), 42);

    let bad: Validation<i32> = failure(Errors::from_vec(vec![at("a", "x"), at("b", "y")]));
    assert_eq!(bad.fold(|errors| errors.len() as i32, |v| v), 2);
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Errors>();
    assert_send_sync::<ValidationError>();
}
