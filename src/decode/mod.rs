//! Decoders and their combinator algebra.
//!
//! A decoder turns a borrowed input `&I` into a [`Validation`]. Decoders are
//! composed the way iterators are: every combinator method on [`Decoder`]
//! returns an adapter struct, and [`Decoder::boxed`] erases the type into a
//! cloneable [`Decode<I, A>`] when one concrete type is needed (for example to
//! combine decoders with the monoids in this module).
//!
//! # Composition strategies
//!
//! - [`Decoder::chain`] and [`Decoder::bind`] are sequential: the first
//!   failure short-circuits.
//! - [`Decoder::ap`], [`Decoder::zip`] and [`Decoder::ap_s`] are parallel:
//!   both sides are evaluated and all failures are reported together.
//! - [`Decoder::alt`] is a fallback: the alternative only runs when the first
//!   decoder failed, and errors are kept only when every attempt failed.
//! - [`Decoder::chain_left`] recovers from a failure, keeping the original
//!   errors if the recovery fails as well.
//!
//! # Example
//!
//! ```rust
//! use inquest::{decode, Context, Decoder, Validation};
//! use inquest::validation::{failure_at, success};
//!
//! let parse = decode::from_fn(|input: &str| match input.trim().parse::<i64>() {
//!     Ok(n) => success(n),
//!     Err(_) => failure_at(&Context::root(), "not a number"),
//! });
//!
//! let doubled = parse.map(|n| n * 2).alt(|| decode::of(0));
//!
//! assert_eq!(doubled.decode(" 21 "), Validation::Success(42));
//! assert_eq!(doubled.decode("many"), Validation::Success(0));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::Errors;
use crate::lens::Lens;
use crate::validation::Validation;

mod bind;
mod combinators;
mod monoid;
mod traverse;

pub use bind::{do_, ApS, Bind, BindL, LensSetter, Let, LetL, LetTo, Setter};
pub use combinators::{
    from_fn, lazy, left, of, Alt, Ap, Chain, ChainK, ChainLeft, DedupErrors, FromFn, Lazy, Left, Map, Of,
    Zip,
};
pub use monoid::{AltMonoid, AlternativeMonoid, ApplicativeMonoid};
pub use traverse::{par_sequence, sequence, ParSequence, Sequence};

/// A function from a raw input to a typed value or accumulated errors.
///
/// Decoders are pure: decoding the same input twice yields the same result,
/// and the `Send + Sync` bound lets one decoder be shared by many threads.
pub trait Decoder<I: ?Sized>: Send + Sync {
    /// The type produced by a successful decode.
    type Output;

    /// Decodes `input`.
    fn decode(&self, input: &I) -> Validation<Self::Output>;

    /// Transforms the decoded value. `f` is never called on failure.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> B + Send + Sync,
    {
        Map::new(self, f)
    }

    /// Sequences a dependent decoder (monadic bind).
    ///
    /// On success `f` builds the next decoder from the value, and that
    /// decoder runs against the same input. Failures short-circuit.
    fn chain<D, F>(self, f: F) -> Chain<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> D + Send + Sync,
        D: Decoder<I>,
    {
        Chain::new(self, f)
    }

    /// Sequences a dependent decoder through a boxed [`Kleisli`] arrow.
    ///
    /// Same as [`Decoder::chain`], for arrows stored or passed around as
    /// values.
    fn chain_k<B>(
        self,
        k: Kleisli<I, Self::Output, B>,
    ) -> ChainK<Self, Kleisli<I, Self::Output, B>>
    where
        Self: Sized,
    {
        ChainK::new(self, k)
    }

    /// Recovers from a failure with a decoder built from the errors.
    ///
    /// If the recovery decoder fails too, the result carries the original
    /// errors followed by the recovery's errors.
    fn chain_left<D, F>(self, f: F) -> ChainLeft<Self, F>
    where
        Self: Sized,
        F: Fn(Errors) -> D + Send + Sync,
        D: Decoder<I, Output = Self::Output>,
    {
        ChainLeft::new(self, f)
    }

    /// Alias of [`Decoder::chain_left`].
    fn or_else<D, F>(self, f: F) -> ChainLeft<Self, F>
    where
        Self: Sized,
        F: Fn(Errors) -> D + Send + Sync,
        D: Decoder<I, Output = Self::Output>,
    {
        ChainLeft::new(self, f)
    }

    /// Applies the decoded function to the value decoded by `fa`.
    ///
    /// Both decoders always run; when both fail, their errors are
    /// concatenated with this decoder's errors first.
    fn ap<DA, B>(self, fa: DA) -> Ap<Self, DA>
    where
        Self: Sized,
        DA: Decoder<I>,
        Self::Output: FnOnce(DA::Output) -> B,
    {
        Ap::new(self, fa)
    }

    /// Decodes both values into a pair, accumulating failures like [`Decoder::ap`].
    fn zip<DB>(self, other: DB) -> Zip<Self, DB>
    where
        Self: Sized,
        DB: Decoder<I>,
    {
        Zip::new(self, other)
    }

    /// Falls back to the decoder produced by `second` when this one fails.
    ///
    /// `second` is only invoked after a failure, once per decode. If the
    /// alternative fails as well, both error sets are kept in attempt order.
    fn alt<D, L>(self, second: L) -> Alt<Self, L>
    where
        Self: Sized,
        L: Fn() -> D + Send + Sync,
        D: Decoder<I, Output = Self::Output>,
    {
        Alt::new(self, second)
    }

    /// Removes repeated errors from a failure, keeping first occurrences.
    fn dedup_errors(self) -> DedupErrors<Self>
    where
        Self: Sized,
    {
        DedupErrors::new(self)
    }

    /// Binds a field from a decoder that may read the fields bound so far.
    ///
    /// Sequential: a failure of `f`'s decoder ends the pipeline.
    fn bind<S2, Set, F, D>(self, setter: Set, f: F) -> Bind<Self, Set, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> D + Send + Sync,
        D: Decoder<I>,
        Set: Fn(Self::Output, D::Output) -> S2 + Send + Sync,
    {
        Bind::new(self, setter, f)
    }

    /// Sets a field computed from the fields bound so far. Never fails.
    fn let_<S2, T, Set, F>(self, setter: Set, f: F) -> Let<Self, Set, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> T + Send + Sync,
        Set: Fn(Self::Output, T) -> S2 + Send + Sync,
    {
        Let::new(self, setter, f)
    }

    /// Sets a field to a constant. Never fails.
    fn let_to<S2, T, Set>(self, setter: Set, value: T) -> LetTo<Self, Set, T>
    where
        Self: Sized,
        T: Clone + Send + Sync,
        Set: Fn(Self::Output, T) -> S2 + Send + Sync,
    {
        LetTo::new(self, setter, value)
    }

    /// Starts a pipeline by placing the decoded value into a struct.
    fn bind_to<S, F>(self, setter: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> S + Send + Sync,
    {
        Map::new(self, setter)
    }

    /// Sets a field from an independent decoder.
    ///
    /// Parallel: `fa` runs even when the pipeline already failed, and its
    /// errors are appended to the pipeline's.
    fn ap_s<S2, Set, DA>(self, setter: Set, fa: DA) -> ApS<Self, Set, DA>
    where
        Self: Sized,
        DA: Decoder<I>,
        Set: Fn(Self::Output, DA::Output) -> S2 + Send + Sync,
    {
        ApS::new(self, setter, fa)
    }

    /// [`Decoder::bind`] through a lens; `f` receives the field's current value.
    fn bind_l<L, F, D>(self, lens: L, f: F) -> BindL<Self, L, F>
    where
        Self: Sized,
        L: Lens<Self::Output>,
        F: Fn(L::Field) -> D + Send + Sync,
        D: Decoder<I, Output = L::Field>,
    {
        BindL::new(self, lens, f)
    }

    /// [`Decoder::let_`] through a lens; `f` maps the field's current value.
    fn let_l<L, F>(self, lens: L, f: F) -> LetL<Self, L, F>
    where
        Self: Sized,
        L: Lens<Self::Output>,
        F: Fn(L::Field) -> L::Field + Send + Sync,
    {
        LetL::new(self, lens, f)
    }

    /// [`Decoder::let_to`] through a lens.
    fn let_to_l<L>(self, lens: L, value: L::Field) -> LetTo<Self, LensSetter<L>, L::Field>
    where
        Self: Sized,
        L: Lens<Self::Output>,
        L::Field: Clone + Send + Sync,
    {
        LetTo::new(self, LensSetter::new(lens), value)
    }

    /// [`Decoder::ap_s`] through a lens.
    fn ap_s_l<L, DA>(self, lens: L, fa: DA) -> ApS<Self, LensSetter<L>, DA>
    where
        Self: Sized,
        L: Lens<Self::Output>,
        DA: Decoder<I, Output = L::Field>,
    {
        ApS::new(self, LensSetter::new(lens), fa)
    }

    /// Erases the decoder's type.
    fn boxed(self) -> Decode<I, Self::Output>
    where
        Self: Sized + 'static,
    {
        Decode::new(self)
    }
}

impl<I: ?Sized, D: Decoder<I> + ?Sized> Decoder<I> for &D {
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<Self::Output> {
        (**self).decode(input)
    }
}

impl<I: ?Sized, D: Decoder<I> + ?Sized> Decoder<I> for Box<D> {
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<Self::Output> {
        (**self).decode(input)
    }
}

impl<I: ?Sized, D: Decoder<I> + ?Sized> Decoder<I> for Arc<D> {
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<Self::Output> {
        (**self).decode(input)
    }
}

/// A type-erased, cloneable decoder.
///
/// `Decode` is the currency of the decoder monoids, registries and any API
/// that stores decoders of different concrete types side by side. Cloning is
/// cheap: the underlying decoder is shared.
///
/// # Example
///
/// ```rust
/// use inquest::{Decode, Decoder, Errors, Validation};
///
/// let decoders: Vec<Decode<str, usize>> = vec![
///     Decode::of(1),
///     Decode::from_fn(|s: &str| Validation::Success(s.len())),
/// ];
///
/// let lengths: Vec<_> = decoders.iter().map(|d| d.decode("four")).collect();
/// assert_eq!(lengths, vec![Validation::Success(1), Validation::Success(4)]);
///
/// let failing: Decode<str, usize> = Decode::left(Errors::empty());
/// assert!(failing.decode("x").is_failure());
/// ```
pub struct Decode<I: ?Sized, A> {
    inner: Arc<dyn Decoder<I, Output = A>>,
}

impl<I: ?Sized, A> Decode<I, A> {
    /// Wraps any decoder.
    pub fn new<D>(decoder: D) -> Self
    where
        D: Decoder<I, Output = A> + 'static,
    {
        Self {
            inner: Arc::new(decoder),
        }
    }

    /// Wraps a decoding function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&I) -> Validation<A> + Send + Sync + 'static,
        A: 'static,
    {
        Self::new(from_fn(f))
    }

    /// A decoder that ignores its input and always succeeds with `value`.
    pub fn of(value: A) -> Self
    where
        A: Clone + Send + Sync + 'static,
    {
        Self::new(of(value))
    }

    /// A decoder that ignores its input and always fails with `errors`.
    pub fn left(errors: Errors) -> Self
    where
        A: 'static,
    {
        Self::new(left(errors))
    }

    /// Defers building the decoder until decode time.
    ///
    /// Needed for recursive definitions, where a decoder refers to itself.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Decode<I, A> + Send + Sync + 'static,
        A: 'static,
    {
        Self::new(lazy(f))
    }

}

impl<I: ?Sized, A> Clone for Decode<I, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: ?Sized, A> fmt::Debug for Decode<I, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decode").finish_non_exhaustive()
    }
}

impl<I: ?Sized, A> Decoder<I> for Decode<I, A> {
    type Output = A;

    fn decode(&self, input: &I) -> Validation<A> {
        self.inner.decode(input)
    }
}

/// A boxed Kleisli arrow: builds the next decoder from a value.
pub type Kleisli<I, A, B> = Arc<dyn Fn(A) -> Decode<I, B> + Send + Sync>;

// Decoders are shared across threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Decode<str, i32>>();
    assert_sync::<Decode<str, i32>>();
};
