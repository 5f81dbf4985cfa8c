//! Decode failure types.
//!
//! This module provides [`ValidationError`] for single decode failures and
//! [`Errors`] for accumulating them.

use std::error::Error;
use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::context::Context;

/// A single decode failure with full context.
///
/// `ValidationError` captures everything known about a failure:
/// - **value**: The offending input, when it was recorded
/// - **context**: Where in the input the failure occurred
/// - **message**: Human-readable description of the failure
/// - **cause**: A lower-level error that produced this failure (optional)
///
/// # Example
///
/// ```rust
/// use inquest::{Context, ValidationError};
/// use serde_json::json;
///
/// let context = Context::root().push_field("age", "integer");
/// let error = ValidationError::new(context, "must be positive").with_value(json!(-5));
///
/// assert_eq!(error.to_string(), "age: must be positive");
/// assert_eq!(error.value, Some(json!(-5)));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The input value that failed to decode.
    pub value: Option<Value>,
    /// The path from the root input to the failing value.
    pub context: Context,
    /// Human-readable error message.
    pub message: String,
    /// The lower-level error this failure wraps, if any.
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl ValidationError {
    /// Creates a new error at `context` with the given message.
    pub fn new(context: Context, message: impl Into<String>) -> Self {
        Self {
            value: None,
            context,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error from a lower-level error; the message is the cause's
    /// rendering.
    pub fn from_cause<E>(context: Context, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::new(context, cause.to_string()).with_cause(cause)
    }

    /// Records the offending value and returns self for chaining.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attaches a lower-level cause and returns self for chaining.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.context == other.context
            && self.message == other.message
            && self.cause.as_ref().map(|c| c.to_string())
                == other.cause.as_ref().map(|c| c.to_string())
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.context.to_string();
        if path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", path, self.message)
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// An ordered collection of decode failures.
///
/// `Errors` is a monoid under concatenation: [`Errors::concat`] keeps the left
/// entries first and [`Errors::empty`] is the identity on both sides. It
/// implements [`stillwater::Semigroup`] and [`stillwater::Monoid`], so errors
/// accumulate through [`stillwater::Validation`] directly.
///
/// Duplicates are preserved; call [`Errors::dedup`] to drop them explicitly.
///
/// ```rust
/// use inquest::{Context, Errors, ValidationError};
/// use stillwater::Semigroup;
///
/// let name = Errors::single(ValidationError::new(
///     Context::root().push_field("name", "string"),
///     "required",
/// ));
/// let email = Errors::single(ValidationError::new(
///     Context::root().push_field("email", "string"),
///     "invalid format",
/// ));
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.messages(), vec!["required", "invalid format"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Errors(Vec<ValidationError>);

impl Errors {
    /// Creates an empty collection, the identity of [`Errors::concat`].
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates an `Errors` containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    /// Creates an `Errors` from a `Vec<ValidationError>`, keeping its order.
    pub fn from_vec(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Concatenates two collections, `self` first.
    pub fn concat(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Appends one error.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no error has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns the first error, if any.
    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    /// Returns all errors recorded at exactly `context`.
    pub fn at_context(&self, context: &Context) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.context == context).collect()
    }

    /// Returns all errors recorded at `context` or underneath it.
    pub fn under(&self, context: &Context) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.context.starts_with(context))
            .collect()
    }

    /// Returns the messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    /// Groups errors by rendered context path, in first-seen order.
    pub fn by_context(&self) -> IndexMap<String, Vec<&ValidationError>> {
        let mut groups: IndexMap<String, Vec<&ValidationError>> = IndexMap::new();
        for error in &self.0 {
            groups
                .entry(error.context.to_string())
                .or_default()
                .push(error);
        }
        groups
    }

    /// Removes repeated errors, keeping the first occurrence of each.
    pub fn dedup(self) -> Self {
        let mut unique: Vec<ValidationError> = Vec::with_capacity(self.0.len());
        for error in self.0 {
            if !unique.contains(&error) {
                unique.push(error);
            }
        }
        Self(unique)
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// Returns the errors as a slice.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }
}

impl stillwater::Semigroup for Errors {
    fn combine(self, other: Self) -> Self {
        self.concat(other)
    }
}

impl stillwater::Monoid for Errors {
    fn empty() -> Self {
        Errors::empty()
    }
}

impl From<ValidationError> for Errors {
    fn from(error: ValidationError) -> Self {
        Errors::single(error)
    }
}

impl From<Vec<ValidationError>> for Errors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Errors::from_vec(errors)
    }
}

impl FromIterator<ValidationError> for Errors {
    fn from_iter<T: IntoIterator<Item = ValidationError>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ValidationError> for Errors {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decoding failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl Error for Errors {}

impl IntoIterator for Errors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Decoders are shared across threads, so their failures must be too.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
    assert_send::<Errors>();
    assert_sync::<Errors>();
};
