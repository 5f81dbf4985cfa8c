//! Named decoder storage and reference resolution.
//!
//! This module provides [`DecoderRegistry`], which stores decoders under
//! string names so they can be looked up later or referred to from other
//! decoders, including themselves.

use parking_lot::RwLock;
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::context::Context;
use crate::decode::{Decode, Decoder};
use crate::validation::{failure_at, Validation};

/// Storage shared by a registry and its clones.
type DecoderMap<I, A> = Arc<RwLock<HashMap<String, Decode<I, A>>>>;

const DEFAULT_MAX_DEPTH: usize = 100;

// Nesting of reference decodes on the current thread, shared by every
// registry. A reference resolved on another thread (e.g. a rayon worker in
// `par_sequence`) starts from that thread's own count.
thread_local! {
    static REFERENCE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// A thread-safe registry of named decoders.
///
/// Decoders are stored type-erased as [`Decode<I, A>`]. A registry handle is
/// cheap to clone; clones share the same storage.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can look up and decode concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// The lock is never held while a decoder runs.
///
/// # Example
///
/// ```rust
/// use inquest::{Decode, DecoderRegistry, Validation};
///
/// let registry: DecoderRegistry<str, usize> = DecoderRegistry::new();
/// registry
///     .register("length", Decode::from_fn(|s: &str| Validation::Success(s.len())))
///     .unwrap();
///
/// assert_eq!(registry.decode("length", "four").unwrap(), Validation::Success(4));
/// assert!(registry.decode("missing", "four").is_err());
/// ```
pub struct DecoderRegistry<I: ?Sized, A> {
    decoders: DecoderMap<I, A>,
    max_depth: usize,
}

impl<I: ?Sized + 'static, A: 'static> DecoderRegistry<I, A> {
    /// Creates an empty registry with the default reference depth limit (100).
    pub fn new() -> Self {
        Self {
            decoders: Arc::new(RwLock::new(HashMap::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how deeply references may nest during a single decode.
    ///
    /// Applies to references created after the call. Exceeding the limit is a
    /// decode failure.
    ///
    /// The limit counts nesting per thread of evaluation: references decoded
    /// on another thread, such as a rayon worker inside
    /// [`par_sequence`](crate::decode::par_sequence), count from that
    /// thread's own depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Registers `decoder` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register<D>(&self, name: impl Into<String>, decoder: D) -> Result<(), RegistryError>
    where
        D: Decoder<I, Output = A> + 'static,
    {
        let name = name.into();
        let mut decoders = self.decoders.write();

        if decoders.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(name = %name, "registered decoder");
        decoders.insert(name, Decode::new(decoder));
        Ok(())
    }

    /// Returns the decoder registered under `name`.
    pub fn get(&self, name: &str) -> Option<Decode<I, A>> {
        self.decoders.read().get(name).cloned()
    }

    /// Returns whether a decoder is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.decoders.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.decoders.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered decoders.
    pub fn len(&self) -> usize {
        self.decoders.read().len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.decoders.read().is_empty()
    }

    /// Decodes `input` with the decoder registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name isn't registered.
    pub fn decode(&self, name: &str, input: &I) -> Result<Validation<A>, RegistryError> {
        let decoder = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(decoder.decode(input))
    }

    /// Returns a decoder that resolves `name` every time it decodes.
    ///
    /// The name does not need to be registered yet, which is what makes
    /// recursive decoders possible. The reference holds only a weak handle on
    /// the registry: an unknown name, a dropped registry or nesting beyond the
    /// depth limit makes the decode fail.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inquest::validation::{failure_at, success};
    /// use inquest::{Context, Decode, DecoderRegistry, Decoder, Validation};
    ///
    /// // counts balanced parentheses around an empty core: "((()))" -> 3
    /// let registry: DecoderRegistry<str, usize> = DecoderRegistry::new();
    /// let nested = registry.reference("nested");
    /// registry
    ///     .register(
    ///         "nested",
    ///         Decode::from_fn(move |s: &str| {
    ///             if s.is_empty() {
    ///                 return success(0);
    ///             }
    ///             match s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
    ///                 Some(inner) => nested.decode(inner).map(|depth| depth + 1),
    ///                 None => failure_at(&Context::root(), "unbalanced"),
    ///             }
    ///         }),
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(registry.decode("nested", "((()))").unwrap(), Validation::Success(3));
    /// ```
    pub fn reference(&self, name: impl Into<String>) -> Decode<I, A> {
        Decode::new(Reference {
            name: name.into(),
            decoders: Arc::downgrade(&self.decoders),
            max_depth: self.max_depth,
        })
    }
}

impl<I: ?Sized + 'static, A: 'static> Default for DecoderRegistry<I, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized, A> Clone for DecoderRegistry<I, A> {
    fn clone(&self) -> Self {
        Self {
            decoders: Arc::clone(&self.decoders),
            max_depth: self.max_depth,
        }
    }
}

/// A late-bound lookup into a registry. See [`DecoderRegistry::reference`].
struct Reference<I: ?Sized, A> {
    name: String,
    decoders: Weak<RwLock<HashMap<String, Decode<I, A>>>>,
    max_depth: usize,
}

/// Decrements the reference depth when a resolved reference returns.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> (Self, usize) {
        let depth = REFERENCE_DEPTH.with(|d| {
            let depth = d.get() + 1;
            d.set(depth);
            depth
        });
        (DepthGuard, depth)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        REFERENCE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

impl<I: ?Sized, A> Decoder<I> for Reference<I, A> {
    type Output = A;

    fn decode(&self, input: &I) -> Validation<A> {
        let Some(decoders) = self.decoders.upgrade() else {
            tracing::debug!(name = %self.name, "decoder reference outlived its registry");
            return failure_at(
                &Context::root(),
                format!("registry holding '{}' was dropped", self.name),
            );
        };

        // clone out so the read lock is released before decoding
        let decoder = decoders.read().get(&self.name).cloned();
        let Some(decoder) = decoder else {
            tracing::debug!(name = %self.name, "unresolved decoder reference");
            return failure_at(
                &Context::root(),
                format!("decoder '{}' not found", self.name),
            );
        };

        let (_guard, depth) = DepthGuard::enter();
        if depth > self.max_depth {
            return failure_at(
                &Context::root(),
                format!("maximum reference depth {} exceeded", self.max_depth),
            );
        }
        decoder.decode(input)
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a decoder with a name that already exists.
    #[error("decoder '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to decode with a decoder name that doesn't exist.
    #[error("decoder '{0}' not found")]
    NotFound(String),
}
