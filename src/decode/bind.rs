//! Do-notation: building a struct one field at a time.
//!
//! A pipeline starts from [`do_`] (or [`Decoder::bind_to`]) and threads a
//! partially filled struct through a series of steps. Each step either
//! short-circuits ([`Bind`], [`BindL`]) or aggregates ([`ApS`]); the pure
//! steps ([`Let`], [`LetTo`], [`LetL`]) never fail.
//!
//! # Example
//!
//! ```rust
//! use inquest::decode::{do_, Decode, Decoder};
//! use inquest::{Context, Validation, ValidationExt};
//! use inquest::validation::{failure_at, success};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct Account {
//!     name: String,
//!     age: u8,
//! }
//!
//! let name = Decode::from_fn(|input: &str| match input.split_once(',') {
//!     Some((name, _)) => success(name.to_string()),
//!     None => failure_at(&Context::root().push_field("name", "string"), "missing"),
//! });
//! let age = Decode::from_fn(|input: &str| {
//!     match input.split_once(',').map(|(_, age)| age.parse::<u8>()) {
//!         Some(Ok(age)) => success(age),
//!         _ => failure_at(&Context::root().push_field("age", "u8"), "not a number"),
//!     }
//! });
//!
//! let account = do_(Account::default())
//!     .ap_s(|a: Account, name| Account { name, ..a }, name)
//!     .ap_s(|a: Account, age| Account { age, ..a }, age);
//!
//! assert_eq!(
//!     account.decode("ada,36"),
//!     Validation::Success(Account { name: "ada".to_string(), age: 36 })
//! );
//! assert_eq!(account.decode("ada").into_errors().len(), 2);
//! ```

use crate::lens::Lens;
use crate::validation::{Validation, ValidationExt};

use super::combinators::{of, Of};
use super::Decoder;

/// Places a decoded field into the pipeline's struct.
///
/// Implemented by every `Fn(S, T) -> S2` closure and by [`LensSetter`].
pub trait Setter<S, T>: Send + Sync {
    /// The struct after the field was set.
    type Output;

    /// Stores `value` into `s`.
    fn set(&self, s: S, value: T) -> Self::Output;
}

impl<S, T, S2, F> Setter<S, T> for F
where
    F: Fn(S, T) -> S2 + Send + Sync,
{
    type Output = S2;

    fn set(&self, s: S, value: T) -> S2 {
        self(s, value)
    }
}

/// A [`Setter`] that writes through a [`Lens`].
#[derive(Debug, Clone, Copy)]
pub struct LensSetter<L> {
    lens: L,
}

impl<L> LensSetter<L> {
    /// Wraps `lens`.
    pub fn new(lens: L) -> Self {
        Self { lens }
    }
}

impl<S, L: Lens<S>> Setter<S, L::Field> for LensSetter<L> {
    type Output = S;

    fn set(&self, s: S, value: L::Field) -> S {
        self.lens.set(s, value)
    }
}

/// Starts a do-notation pipeline from an initial, usually empty, struct.
///
/// The returned decoder accepts any input type. A pipeline made only of pure
/// steps (`let_`, `let_to`) never fixes it, so annotate the input, e.g. with
/// `Decoder::<str>::boxed(do_(s))`.
pub fn do_<S: Clone + Send + Sync>(initial: S) -> Of<S> {
    of(initial)
}

/// See [`Decoder::bind`].
#[derive(Clone)]
pub struct Bind<D, Set, F> {
    inner: D,
    setter: Set,
    f: F,
}

impl<D, Set, F> Bind<D, Set, F> {
    pub(crate) fn new(inner: D, setter: Set, f: F) -> Self {
        Self { inner, setter, f }
    }
}

impl<I: ?Sized, D, Set, F, D2> Decoder<I> for Bind<D, Set, F>
where
    D: Decoder<I>,
    F: Fn(&D::Output) -> D2 + Send + Sync,
    D2: Decoder<I>,
    Set: Setter<D::Output, D2::Output>,
{
    type Output = Set::Output;

    fn decode(&self, input: &I) -> Validation<Set::Output> {
        let s = match self.inner.decode(input) {
            Validation::Success(s) => s,
            Validation::Failure(errors) => return Validation::Failure(errors),
        };
        let field = (self.f)(&s).decode(input);
        field.map(|t| self.setter.set(s, t))
    }
}

/// See [`Decoder::let_`].
#[derive(Clone)]
pub struct Let<D, Set, F> {
    inner: D,
    setter: Set,
    f: F,
}

impl<D, Set, F> Let<D, Set, F> {
    pub(crate) fn new(inner: D, setter: Set, f: F) -> Self {
        Self { inner, setter, f }
    }
}

impl<I: ?Sized, D, Set, F, T> Decoder<I> for Let<D, Set, F>
where
    D: Decoder<I>,
    F: Fn(&D::Output) -> T + Send + Sync,
    Set: Setter<D::Output, T>,
{
    type Output = Set::Output;

    fn decode(&self, input: &I) -> Validation<Set::Output> {
        self.inner.decode(input).map(|s| {
            let value = (self.f)(&s);
            self.setter.set(s, value)
        })
    }
}

/// See [`Decoder::let_to`].
#[derive(Clone)]
pub struct LetTo<D, Set, T> {
    inner: D,
    setter: Set,
    value: T,
}

impl<D, Set, T> LetTo<D, Set, T> {
    pub(crate) fn new(inner: D, setter: Set, value: T) -> Self {
        Self {
            inner,
            setter,
            value,
        }
    }
}

impl<I: ?Sized, D, Set, T> Decoder<I> for LetTo<D, Set, T>
where
    D: Decoder<I>,
    T: Clone + Send + Sync,
    Set: Setter<D::Output, T>,
{
    type Output = Set::Output;

    fn decode(&self, input: &I) -> Validation<Set::Output> {
        self.inner
            .decode(input)
            .map(|s| self.setter.set(s, self.value.clone()))
    }
}

/// See [`Decoder::ap_s`].
#[derive(Clone)]
pub struct ApS<D, Set, DA> {
    inner: D,
    setter: Set,
    fa: DA,
}

impl<D, Set, DA> ApS<D, Set, DA> {
    pub(crate) fn new(inner: D, setter: Set, fa: DA) -> Self {
        Self { inner, setter, fa }
    }
}

impl<I: ?Sized, D, Set, DA> Decoder<I> for ApS<D, Set, DA>
where
    D: Decoder<I>,
    DA: Decoder<I>,
    Set: Setter<D::Output, DA::Output>,
{
    type Output = Set::Output;

    fn decode(&self, input: &I) -> Validation<Set::Output> {
        let pipeline = self.inner.decode(input);
        let field = self.fa.decode(input);
        pipeline
            .map(|s| move |t: DA::Output| self.setter.set(s, t))
            .ap(field)
    }
}

/// See [`Decoder::bind_l`].
#[derive(Clone)]
pub struct BindL<D, L, F> {
    inner: D,
    lens: L,
    f: F,
}

impl<D, L, F> BindL<D, L, F> {
    pub(crate) fn new(inner: D, lens: L, f: F) -> Self {
        Self { inner, lens, f }
    }
}

impl<I: ?Sized, D, L, F, D2> Decoder<I> for BindL<D, L, F>
where
    D: Decoder<I>,
    L: Lens<D::Output>,
    F: Fn(L::Field) -> D2 + Send + Sync,
    D2: Decoder<I, Output = L::Field>,
{
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<D::Output> {
        let s = match self.inner.decode(input) {
            Validation::Success(s) => s,
            Validation::Failure(errors) => return Validation::Failure(errors),
        };
        let current = self.lens.get(&s);
        (self.f)(current)
            .decode(input)
            .map(|value| self.lens.set(s, value))
    }
}

/// See [`Decoder::let_l`].
#[derive(Clone)]
pub struct LetL<D, L, F> {
    inner: D,
    lens: L,
    f: F,
}

impl<D, L, F> LetL<D, L, F> {
    pub(crate) fn new(inner: D, lens: L, f: F) -> Self {
        Self { inner, lens, f }
    }
}

impl<I: ?Sized, D, L, F> Decoder<I> for LetL<D, L, F>
where
    D: Decoder<I>,
    L: Lens<D::Output>,
    F: Fn(L::Field) -> L::Field + Send + Sync,
{
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<D::Output> {
        self.inner.decode(input).map(|s| {
            let value = (self.f)(self.lens.get(&s));
            self.lens.set(s, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::context::Context;
    use crate::decode::Decode;
    use crate::error::{Errors, ValidationError};
    use crate::lens::lens;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Pair {
        first: i32,
        second: i32,
    }

    fn fail(message: &str) -> Decode<str, i32> {
        Decode::left(Errors::single(ValidationError::new(Context::root(), message)))
    }

    fn len() -> Decode<str, i32> {
        Decode::from_fn(|s: &str| Validation::Success(s.len() as i32))
    }

    #[test]
    fn test_bind_reads_previous_fields() {
        let decoder = do_(Pair::default())
            .ap_s(|p: Pair, first| Pair { first, ..p }, len())
            .bind(
                |p: Pair, second| Pair { second, ..p },
                |p: &Pair| Decode::<str, i32>::of(p.first * 10),
            );

        assert_eq!(
            decoder.decode("abc"),
            Validation::Success(Pair {
                first: 3,
                second: 30
            })
        );
    }

    #[test]
    fn test_bind_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let decoder = do_(Pair::default())
            .bind(|p: Pair, first| Pair { first, ..p }, |_: &Pair| fail("first"))
            .bind(
                |p: Pair, second| Pair { second, ..p },
                move |_: &Pair| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    fail("second")
                },
            );

        let errors = decoder.decode("x").into_errors();
        assert_eq!(errors.messages(), vec!["first"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ap_s_aggregates_in_pipeline_order() {
        let decoder = do_(Pair::default())
            .ap_s(|p: Pair, first| Pair { first, ..p }, fail("first"))
            .ap_s(|p: Pair, second| Pair { second, ..p }, fail("second"));

        let errors = decoder.decode("x").into_errors();
        assert_eq!(errors.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_let_and_let_to() {
        let decoder = Decoder::<str>::boxed(do_(Pair::default()))
            .let_to(|p: Pair, first| Pair { first, ..p }, 5)
            .let_(|p: Pair, second| Pair { second, ..p }, |p: &Pair| p.first + 1);

        assert_eq!(
            decoder.decode("ignored"),
            Validation::Success(Pair {
                first: 5,
                second: 6
            })
        );
    }

    #[test]
    fn test_lens_variants() {
        let first = lens(|p: &Pair| p.first, |p: Pair, first| Pair { first, ..p });
        let second = lens(|p: &Pair| p.second, |p: Pair, second| Pair { second, ..p });

        let decoder = do_(Pair::default())
            .ap_s_l(first, len())
            .let_to_l(second, 1)
            .let_l(second, |n: i32| n + 1)
            .bind_l(first, |n: i32| Decode::<str, i32>::of(n * 2));

        assert_eq!(
            decoder.decode("four"),
            Validation::Success(Pair {
                first: 8,
                second: 2
            })
        );
    }
}
