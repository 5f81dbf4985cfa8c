//! The decode result type and the aggregation rules shared by combinators.
//!
//! [`Validation<A>`] is [`stillwater::Validation`] specialized to [`Errors`].
//! The free constructors build failures at a [`Context`], and
//! [`ValidationExt`] adds the folding, applicative and recovery operations the
//! decoder combinators are defined in terms of.

use serde_json::Value;

use crate::context::Context;
use crate::error::{Errors, ValidationError};

/// Outcome of a decode: a value or every failure collected along the way.
pub type Validation<A> = stillwater::Validation<A, Errors>;

/// Wraps a value as a successful validation.
pub fn success<A>(value: A) -> Validation<A> {
    Validation::Success(value)
}

/// Wraps an error collection as a failed validation.
pub fn failure<A>(errors: Errors) -> Validation<A> {
    Validation::Failure(errors)
}

/// Fails with a single error carrying `message` at `context`.
pub fn failure_at<A>(context: &Context, message: impl Into<String>) -> Validation<A> {
    Validation::Failure(Errors::single(ValidationError::new(
        context.clone(),
        message,
    )))
}

/// Fails with a single error recording the offending value.
///
/// # Example
///
/// ```rust
/// use inquest::validation::failure_with_value;
/// use inquest::{Context, Validation};
/// use serde_json::json;
///
/// let context = Context::root().push_field("port", "integer");
/// let result: Validation<u16> = failure_with_value(json!(70000), &context, "out of range");
///
/// if let Validation::Failure(errors) = result {
///     let error = errors.first().unwrap();
///     assert_eq!(error.value, Some(json!(70000)));
///     assert_eq!(error.to_string(), "port: out of range");
/// }
/// ```
pub fn failure_with_value<A>(
    value: impl Into<Value>,
    context: &Context,
    message: impl Into<String>,
) -> Validation<A> {
    Validation::Failure(Errors::single(
        ValidationError::new(context.clone(), message).with_value(value),
    ))
}

/// Fails with a single error wrapping `cause`.
pub fn failure_with_cause<A, E>(context: &Context, cause: E) -> Validation<A>
where
    E: std::error::Error + Send + Sync + 'static,
{
    Validation::Failure(Errors::single(ValidationError::from_cause(
        context.clone(),
        cause,
    )))
}

/// Lifts a `Result` whose error is a lower-level error into a validation.
pub fn from_result<A, E>(result: Result<A, E>, context: &Context) -> Validation<A>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match result {
        Ok(value) => Validation::Success(value),
        Err(cause) => failure_with_cause(context, cause),
    }
}

/// Operations on [`Validation`] used by the decoder combinators.
pub trait ValidationExt<A>: Sized {
    /// Collapses the validation into a single value.
    fn fold<B>(self, on_failure: impl FnOnce(Errors) -> B, on_success: impl FnOnce(A) -> B) -> B;

    /// Returns the errors, if this is a failure.
    fn errors(&self) -> Option<&Errors>;

    /// Returns the errors of a failure, or an empty collection on success.
    fn into_errors(self) -> Errors;

    /// Applies a validated function to a validated argument.
    ///
    /// Both sides are already evaluated; when both failed their errors are
    /// concatenated, function side first.
    fn ap<B, C>(self, fa: Validation<B>) -> Validation<C>
    where
        A: FnOnce(B) -> C;

    /// Recovers from a failure with `f`.
    ///
    /// `f` is only called on failure, with a copy of the errors. When `f`
    /// fails as well the result carries the original errors followed by the
    /// new ones; when it succeeds the original errors are dropped.
    fn or_else_with(self, f: impl FnOnce(Errors) -> Validation<A>) -> Validation<A>;
}

impl<A> ValidationExt<A> for Validation<A> {
    fn fold<B>(self, on_failure: impl FnOnce(Errors) -> B, on_success: impl FnOnce(A) -> B) -> B {
        match self {
            Validation::Success(value) => on_success(value),
            Validation::Failure(errors) => on_failure(errors),
        }
    }

    fn errors(&self) -> Option<&Errors> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(errors) => Some(errors),
        }
    }

    fn into_errors(self) -> Errors {
        match self {
            Validation::Success(_) => Errors::empty(),
            Validation::Failure(errors) => errors,
        }
    }

    fn ap<B, C>(self, fa: Validation<B>) -> Validation<C>
    where
        A: FnOnce(B) -> C,
    {
        match (self, fa) {
            (Validation::Success(f), Validation::Success(a)) => Validation::Success(f(a)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.concat(e2))
            }
            (Validation::Failure(e), Validation::Success(_)) => Validation::Failure(e),
            (Validation::Success(_), Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    fn or_else_with(self, f: impl FnOnce(Errors) -> Validation<A>) -> Validation<A> {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(errors) => match f(errors.clone()) {
                Validation::Success(value) => Validation::Success(value),
                Validation::Failure(more) => Validation::Failure(errors.concat(more)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail<A>(message: &str) -> Validation<A> {
        failure_at(&Context::root(), message)
    }

    #[test]
    fn test_fold() {
        let ok: Validation<i32> = success(2);
        assert_eq!(ok.fold(|e| e.len() as i32, |v| v * 10), 20);

        let bad: Validation<i32> = fail("nope");
        assert_eq!(bad.fold(|e| e.len() as i32, |v| v * 10), 1);
    }

    #[test]
    fn test_ap_both_success() {
        let ff: Validation<fn(i32) -> i32> = success(|x| x + 1);
        assert_eq!(ff.ap(success(41)), success(42));
    }

    #[test]
    fn test_ap_accumulates_left_then_right() {
        let ff: Validation<fn(i32) -> i32> = fail("function");
        let result = ff.ap(fail::<i32>("argument"));
        assert_eq!(result.into_errors().messages(), vec!["function", "argument"]);
    }

    #[test]
    fn test_ap_single_failure_passes_through() {
        let ff: Validation<fn(i32) -> i32> = success(|x| x);
        let result = ff.ap(fail::<i32>("argument"));
        assert_eq!(result.into_errors().messages(), vec!["argument"]);
    }

    #[test]
    fn test_or_else_with_recovers() {
        let result = fail::<i32>("missing").or_else_with(|errors| {
            assert_eq!(errors.len(), 1);
            success(0)
        });
        assert_eq!(result, success(0));
    }

    #[test]
    fn test_or_else_with_keeps_both_error_sets() {
        let result = fail::<i32>("first").or_else_with(|_| fail("second"));
        assert_eq!(result.into_errors().messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_or_else_with_skips_success() {
        let result = success(5).or_else_with(|_| panic!("must not run"));
        assert_eq!(result, success(5));
    }

    #[test]
    fn test_into_errors_on_success_is_empty() {
        assert!(success(1).into_errors().is_empty());
        assert!(success(1).errors().is_none());
    }

    #[test]
    fn test_from_result_keeps_cause() {
        let parsed: Result<i32, std::num::ParseIntError> = "x".parse::<i32>();
        let result = from_result(parsed, &Context::root().push_field("n", "integer"));
        let errors = result.into_errors();
        let error = errors.first().unwrap();
        assert!(error.cause.is_some());
        assert!(error.to_string().starts_with("n: "));
    }
}
