//! Codecs over `serde_json::Value`.
//!
//! These are the building blocks for decoding JSON documents: [`string`] and
//! [`integer`] validate scalars, [`field`] and [`array`] descend into objects
//! and arrays while extending the [`Context`]. Every failure records the
//! offending value.
//!
//! # Example
//!
//! ```rust
//! use inquest::{codec, json, Decoder, ValidationExt};
//! use serde_json::json;
//!
//! let tags = codec::decoder(json::field("tags", json::array(json::string().min_len(2))));
//!
//! let result = tags.decode(&json!({ "tags": ["ok", "x", 3] }));
//! let errors = result.into_errors();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.first().unwrap().to_string(), "tags[1]: length must be at least 2, got 1");
//! ```

use regex::Regex;
use serde_json::Value;

use crate::codec::Type;
use crate::context::Context;
use crate::error::{Errors, ValidationError};
use crate::validation::Validation;

fn type_mismatch(value: &Value, context: &Context, expected: &str) -> ValidationError {
    ValidationError::new(
        context.clone(),
        format!("expected {}, got {}", expected, value_type_name(value)),
    )
    .with_value(value.clone())
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone)]
enum StringConstraint {
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
}

impl StringConstraint {
    fn check(&self, s: &str) -> Option<String> {
        match self {
            StringConstraint::MinLength(min) => {
                let len = s.chars().count();
                (len < *min).then(|| format!("length must be at least {}, got {}", min, len))
            }
            StringConstraint::MaxLength(max) => {
                let len = s.chars().count();
                (len > *max).then(|| format!("length must be at most {}, got {}", max, len))
            }
            StringConstraint::Pattern(regex) => (!regex.is_match(s))
                .then(|| format!("must match pattern '{}'", regex.as_str())),
        }
    }
}

/// Codec for JSON strings. See [`string`].
#[derive(Debug, Clone, Default)]
pub struct StringType {
    constraints: Vec<StringConstraint>,
}

/// Creates a string codec with no constraints.
pub fn string() -> StringType {
    StringType::default()
}

impl StringType {
    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLength(min));
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(StringConstraint::MaxLength(max));
        self
    }

    /// Requires a match of the regular expression `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern(regex));
        Ok(self)
    }
}

impl Type for StringType {
    type Input = Value;
    type Value = String;
    type Encoded = Value;

    fn name(&self) -> &str {
        "string"
    }

    fn validate(&self, input: &Value, context: &Context) -> Validation<String> {
        let Some(s) = input.as_str() else {
            return Validation::Failure(type_mismatch(input, context, "string").into());
        };

        let errors: Errors = self
            .constraints
            .iter()
            .filter_map(|c| c.check(s))
            .map(|message| ValidationError::new(context.clone(), message).with_value(input.clone()))
            .collect();

        if errors.is_empty() {
            Validation::Success(s.to_string())
        } else {
            Validation::Failure(errors)
        }
    }

    fn encode(&self, value: &String) -> Value {
        Value::String(value.clone())
    }
}

/// Codec for JSON integers. See [`integer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType {
    min: Option<i64>,
    max: Option<i64>,
}

/// Creates an integer codec with no bounds.
pub fn integer() -> IntegerType {
    IntegerType::default()
}

impl IntegerType {
    /// Requires the value to be at least `min`.
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Requires the value to be at most `max`.
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Type for IntegerType {
    type Input = Value;
    type Value = i64;
    type Encoded = Value;

    fn name(&self) -> &str {
        "integer"
    }

    fn validate(&self, input: &Value, context: &Context) -> Validation<i64> {
        let Some(n) = input.as_i64() else {
            let error = match input {
                Value::Number(_) => ValidationError::new(context.clone(), "expected integer")
                    .with_value(input.clone()),
                _ => type_mismatch(input, context, "integer"),
            };
            return Validation::Failure(error.into());
        };

        let mut errors = Errors::empty();
        if let Some(min) = self.min.filter(|min| n < *min) {
            errors.push(
                ValidationError::new(context.clone(), format!("must be at least {}, got {}", min, n))
                    .with_value(n),
            );
        }
        if let Some(max) = self.max.filter(|max| n > *max) {
            errors.push(
                ValidationError::new(context.clone(), format!("must be at most {}, got {}", max, n))
                    .with_value(n),
            );
        }

        if errors.is_empty() {
            Validation::Success(n)
        } else {
            Validation::Failure(errors)
        }
    }

    fn encode(&self, value: &i64) -> Value {
        Value::from(*value)
    }
}

/// Codec for one property of a JSON object. See [`field`].
#[derive(Debug, Clone)]
pub struct FieldType<T> {
    name: String,
    inner: T,
}

/// Validates the property `name` of an object with `inner`.
///
/// The input must be an object containing `name`. The property is validated
/// at the parent context extended with `name` and `inner`'s type name.
pub fn field<T>(name: impl Into<String>, inner: T) -> FieldType<T>
where
    T: Type<Input = Value, Encoded = Value>,
{
    FieldType {
        name: name.into(),
        inner,
    }
}

impl<T> Type for FieldType<T>
where
    T: Type<Input = Value, Encoded = Value>,
{
    type Input = Value;
    type Value = T::Value;
    type Encoded = Value;

    fn name(&self) -> &str {
        "object"
    }

    fn validate(&self, input: &Value, context: &Context) -> Validation<T::Value> {
        let Some(object) = input.as_object() else {
            return Validation::Failure(type_mismatch(input, context, "object").into());
        };

        let field_context = context.push_field(self.name.as_str(), self.inner.name());
        match object.get(&self.name) {
            Some(value) => self.inner.validate(value, &field_context),
            None => Validation::Failure(
                ValidationError::new(
                    field_context,
                    format!("required field '{}' is missing", self.name),
                )
                .into(),
            ),
        }
    }

    fn encode(&self, value: &T::Value) -> Value {
        let mut object = serde_json::Map::new();
        object.insert(self.name.clone(), self.inner.encode(value));
        Value::Object(object)
    }
}

/// Codec for JSON arrays. See [`array`].
#[derive(Debug, Clone)]
pub struct ArrayType<T> {
    item: T,
}

/// Validates every element of an array with `item`, accumulating failures.
pub fn array<T>(item: T) -> ArrayType<T>
where
    T: Type<Input = Value, Encoded = Value>,
{
    ArrayType { item }
}

impl<T> Type for ArrayType<T>
where
    T: Type<Input = Value, Encoded = Value>,
{
    type Input = Value;
    type Value = Vec<T::Value>;
    type Encoded = Value;

    fn name(&self) -> &str {
        "array"
    }

    fn validate(&self, input: &Value, context: &Context) -> Validation<Vec<T::Value>> {
        let Some(items) = input.as_array() else {
            return Validation::Failure(type_mismatch(input, context, "array").into());
        };

        let results = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.item
                    .validate(item, &context.push_index(i, self.item.name()))
            })
            .collect();
        Validation::all_vec(results)
    }

    fn encode(&self, value: &Vec<T::Value>) -> Value {
        Value::Array(value.iter().map(|v| self.item.encode(v)).collect())
    }
}
