//! Monoids over decoders.
//!
//! Three ways to combine two decoders of the same input and output:
//!
//! - [`ApplicativeMonoid`] runs both and merges the values with an inner
//!   [`Monoid`]; failures accumulate.
//! - [`AlternativeMonoid`] merges when both succeed and otherwise falls back
//!   to whichever decoder succeeds on its own.
//! - [`AltMonoid`] keeps the first success, like a priority list of
//!   strategies; values are never merged.
//!
//! All of them operate on the boxed [`Decode`] so that arbitrarily many
//! decoders can be folded with [`crate::monoid::concat_all`].

use std::sync::Arc;

use crate::monoid::{Monoid, Semigroup};

use super::{Decode, Decoder};

/// Combines decoders by running both and merging their values with `M`.
///
/// `concat(d1, d2)` evaluates both decoders against the same input. Two
/// successes are merged with the inner monoid; any failure makes the result
/// fail with every error collected, `d1`'s first. The identity always
/// succeeds with the inner monoid's identity.
///
/// # Example
///
/// ```rust
/// use inquest::decode::{ApplicativeMonoid, Decode, Decoder};
/// use inquest::monoid::{Semigroup, StringConcat};
/// use inquest::Validation;
///
/// let m = ApplicativeMonoid::new(StringConcat);
/// let greeting = m.concat(
///     Decode::<(), String>::of("Hello".to_string()),
///     Decode::of(" World".to_string()),
/// );
///
/// assert_eq!(greeting.decode(&()), Validation::Success("Hello World".to_string()));
/// ```
pub struct ApplicativeMonoid<M> {
    inner: Arc<M>,
}

impl<M> ApplicativeMonoid<M> {
    /// Lifts the inner monoid `m`.
    pub fn new(m: M) -> Self {
        Self { inner: Arc::new(m) }
    }
}

impl<M> Clone for ApplicativeMonoid<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, A, M> Semigroup<Decode<I, A>> for ApplicativeMonoid<M>
where
    I: ?Sized + 'static,
    A: Send + Sync + 'static,
    M: Semigroup<A> + Send + Sync + 'static,
{
    fn concat(&self, x: Decode<I, A>, y: Decode<I, A>) -> Decode<I, A> {
        let m = Arc::clone(&self.inner);
        x.map(move |a: A| {
            let m = Arc::clone(&m);
            move |b: A| m.concat(a, b)
        })
        .ap(y)
        .boxed()
    }
}

impl<I, A, M> Monoid<Decode<I, A>> for ApplicativeMonoid<M>
where
    I: ?Sized + 'static,
    A: Clone + Send + Sync + 'static,
    M: Monoid<A> + Send + Sync + 'static,
{
    fn empty(&self) -> Decode<I, A> {
        Decode::of(self.inner.empty())
    }
}

/// Combines decoders by merging when possible and falling back otherwise.
///
/// `concat(d1, d2)` first tries the [`ApplicativeMonoid`] combination. If
/// that fails, `d1` is tried on its own and then `d2` on its own. When every
/// attempt fails, the errors of all attempts are kept in attempt order, so a
/// failure of both decoders reports each of their errors twice.
///
/// The identity succeeds with the inner monoid's identity. It is a two-sided
/// identity for succeeding decoders; combined with a failing decoder the
/// fallback recovers to the identity value.
pub struct AlternativeMonoid<M> {
    applicative: ApplicativeMonoid<M>,
}

impl<M> AlternativeMonoid<M> {
    /// Lifts the inner monoid `m`.
    pub fn new(m: M) -> Self {
        Self {
            applicative: ApplicativeMonoid::new(m),
        }
    }
}

impl<M> Clone for AlternativeMonoid<M> {
    fn clone(&self) -> Self {
        Self {
            applicative: self.applicative.clone(),
        }
    }
}

impl<I, A, M> Semigroup<Decode<I, A>> for AlternativeMonoid<M>
where
    I: ?Sized + 'static,
    A: Send + Sync + 'static,
    M: Semigroup<A> + Send + Sync + 'static,
{
    fn concat(&self, x: Decode<I, A>, y: Decode<I, A>) -> Decode<I, A> {
        let merged = self.applicative.concat(x.clone(), y.clone());
        merged
            .alt(move || {
                let y = y.clone();
                x.clone().alt(move || y.clone())
            })
            .boxed()
    }
}

impl<I, A, M> Monoid<Decode<I, A>> for AlternativeMonoid<M>
where
    I: ?Sized + 'static,
    A: Clone + Send + Sync + 'static,
    M: Monoid<A> + Send + Sync + 'static,
{
    fn empty(&self) -> Decode<I, A> {
        self.applicative.empty()
    }
}

/// Combines decoders by "first success wins".
///
/// `concat(d1, d2)` is `d1.alt(|| d2)`. The identity is whatever decoder
/// `zero` builds, not a value derived from an inner monoid. With
/// `zero = || Decode::left(Errors::empty())` the identity laws hold for every
/// decoder, failing ones included.
///
/// # Example
///
/// ```rust
/// use inquest::decode::{AltMonoid, Decode, Decoder};
/// use inquest::monoid::Semigroup;
/// use inquest::{Errors, Validation};
///
/// let m = AltMonoid::new(|| Decode::<(), i32>::of(0));
/// let first_success = m.concat(
///     m.concat(Decode::left(Errors::empty()), Decode::left(Errors::empty())),
///     Decode::of(42),
/// );
///
/// assert_eq!(first_success.decode(&()), Validation::Success(42));
/// ```
#[derive(Clone)]
pub struct AltMonoid<Z> {
    zero: Z,
}

impl<Z> AltMonoid<Z> {
    /// Creates the monoid with `zero` as the identity thunk.
    pub fn new(zero: Z) -> Self {
        Self { zero }
    }
}

impl<I, A, Z> Semigroup<Decode<I, A>> for AltMonoid<Z>
where
    I: ?Sized + 'static,
    A: 'static,
{
    fn concat(&self, x: Decode<I, A>, y: Decode<I, A>) -> Decode<I, A> {
        x.alt(move || y.clone()).boxed()
    }
}

impl<I, A, Z> Monoid<Decode<I, A>> for AltMonoid<Z>
where
    I: ?Sized + 'static,
    A: 'static,
    Z: Fn() -> Decode<I, A>,
{
    fn empty(&self) -> Decode<I, A> {
        (self.zero)()
    }
}
