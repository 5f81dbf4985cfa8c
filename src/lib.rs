//! # Inquest
//!
//! Composable decoders that report every failure with the path that led to
//! it.
//!
//! ## Overview
//!
//! A decoder turns a raw input into a typed value or a collection of
//! [`ValidationError`]s. Decoders are built from small pieces with a
//! combinator algebra, and the way two decoders are combined decides how
//! their errors are reported: sequencing stops at the first failure,
//! applicative combination runs both sides and concatenates all errors, and
//! alternatives keep the errors only when every attempt failed. Error
//! accumulation rides on stillwater's `Validation` and `Semigroup`.
//!
//! ## Core Types
//!
//! - [`Context`]: The path taken through nested input (e.g., `users[0].email`)
//! - [`ValidationError`]: A single failure with value, context, message and cause
//! - [`Errors`]: An ordered collection of failures, combined by concatenation
//! - [`Decoder`]: The decoder trait and its combinators
//! - [`Decode`]: A type-erased, cloneable decoder
//! - [`ApplicativeMonoid`], [`AlternativeMonoid`], [`AltMonoid`]: Monoids over decoders
//!
//! ## Example
//!
//! ```rust
//! use inquest::decode::do_;
//! use inquest::{codec, json, Decoder, Validation, ValidationExt};
//! use serde_json::json;
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! let user = do_(User::default())
//!     .ap_s(
//!         |u: User, name| User { name, ..u },
//!         codec::decoder(json::field("name", json::string().min_len(1))),
//!     )
//!     .ap_s(
//!         |u: User, age| User { age, ..u },
//!         codec::decoder(json::field("age", json::integer().min(0))),
//!     );
//!
//! let ok = user.decode(&json!({ "name": "Ada", "age": 36 }));
//! assert_eq!(ok, Validation::Success(User { name: "Ada".into(), age: 36 }));
//!
//! // both problems are reported
//! let errors = user.decode(&json!({ "name": "", "age": -1 })).into_errors();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.first().unwrap().to_string(), "name: length must be at least 1, got 0");
//! ```

pub mod codec;
pub mod context;
pub mod decode;
pub mod error;
pub mod json;
pub mod lens;
pub mod monoid;
pub mod registry;
pub mod validation;

pub use context::{Context, ContextEntry, Key};
pub use decode::{AltMonoid, AlternativeMonoid, ApplicativeMonoid, Decode, Decoder, Kleisli};
pub use error::{Errors, ValidationError};
pub use lens::{lens, Lens};
pub use registry::{DecoderRegistry, RegistryError};
pub use validation::{Validation, ValidationExt};
