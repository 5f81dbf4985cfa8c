//! Error types for decode failures.
//!
//! This module provides [`ValidationError`] for a single failure with its
//! context, and [`Errors`], the ordered monoid of failures that every
//! [`crate::Validation`] carries.

mod validation_error;

pub use validation_error::{Errors, ValidationError};
