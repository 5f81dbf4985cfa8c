//! Codecs: named types that validate an input and encode a value back.
//!
//! A [`Type`] validates relative to a [`Context`] so that nested codecs can
//! report where a failure happened. [`decoder`] adapts a codec into a
//! [`Decoder`] rooted at the codec's own context entry.

use crate::context::Context;
use crate::decode::Decoder;
use crate::validation::Validation;

/// A named codec between an input type and a value type.
///
/// # Example
///
/// ```rust
/// use inquest::codec::{self, Type};
/// use inquest::validation::{failure_at, success};
/// use inquest::{Context, Decoder, Validation};
///
/// struct Port;
///
/// impl Type for Port {
///     type Input = str;
///     type Value = u16;
///     type Encoded = String;
///
///     fn name(&self) -> &str {
///         "port"
///     }
///
///     fn validate(&self, input: &str, context: &Context) -> Validation<u16> {
///         match input.parse() {
///             Ok(port) => success(port),
///             Err(_) => failure_at(context, "expected a port number"),
///         }
///     }
///
///     fn encode(&self, value: &u16) -> String {
///         value.to_string()
///     }
/// }
///
/// let port = codec::decoder(Port);
/// assert_eq!(port.decode("8080"), Validation::Success(8080));
/// assert_eq!(Port.encode(&8080), "8080");
/// ```
pub trait Type: Send + Sync {
    /// The raw input accepted by [`Type::validate`].
    type Input: ?Sized;
    /// The validated value.
    type Value;
    /// The representation produced by [`Type::encode`].
    type Encoded;

    /// A name for the type, recorded in the context of every failure.
    fn name(&self) -> &str;

    /// Validates `input` found at `context`.
    fn validate(&self, input: &Self::Input, context: &Context) -> Validation<Self::Value>;

    /// Encodes a value back into its external representation.
    fn encode(&self, value: &Self::Value) -> Self::Encoded;
}

impl<T: Type + ?Sized> Type for &T {
    type Input = T::Input;
    type Value = T::Value;
    type Encoded = T::Encoded;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn validate(&self, input: &Self::Input, context: &Context) -> Validation<Self::Value> {
        (**self).validate(input, context)
    }

    fn encode(&self, value: &Self::Value) -> Self::Encoded {
        (**self).encode(value)
    }
}

/// A codec used as a decoder. See [`decoder`].
#[derive(Debug, Clone)]
pub struct TypeDecoder<T> {
    codec: T,
    context: Context,
}

impl<T> TypeDecoder<T> {
    /// Returns the wrapped codec.
    pub fn codec(&self) -> &T {
        &self.codec
    }

    /// Returns the context validation starts from.
    pub fn context(&self) -> &Context {
        &self.context
    }
}

/// Adapts a codec into a decoder.
///
/// Validation starts at a context holding a single entry with an empty key
/// and the codec's name.
pub fn decoder<T: Type>(codec: T) -> TypeDecoder<T> {
    let context = Context::root().push_field("", codec.name());
    TypeDecoder { codec, context }
}

/// Adapts a codec into a decoder that validates at `context`.
pub fn decoder_at<T: Type>(codec: T, context: Context) -> TypeDecoder<T> {
    TypeDecoder { codec, context }
}

impl<T: Type> Decoder<T::Input> for TypeDecoder<T> {
    type Output = T::Value;

    fn decode(&self, input: &T::Input) -> Validation<T::Value> {
        self.codec.validate(input, &self.context)
    }
}
