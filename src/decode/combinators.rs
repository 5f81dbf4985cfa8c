//! Adapter types behind the [`Decoder`] combinator methods.

use std::marker::PhantomData;

use crate::error::Errors;
use crate::validation::{Validation, ValidationExt};

use super::{Decoder, Kleisli};

/// Decoder that ignores its input and succeeds. See [`of`].
#[derive(Debug, Clone)]
pub struct Of<A> {
    value: A,
}

/// Creates a decoder that always succeeds with a clone of `value`.
pub fn of<A: Clone + Send + Sync>(value: A) -> Of<A> {
    Of { value }
}

impl<I: ?Sized, A: Clone + Send + Sync> Decoder<I> for Of<A> {
    type Output = A;

    fn decode(&self, _input: &I) -> Validation<A> {
        Validation::Success(self.value.clone())
    }
}

/// Decoder that ignores its input and fails. See [`left`].
#[derive(Debug)]
pub struct Left<A> {
    errors: Errors,
    _output: PhantomData<fn() -> A>,
}

/// Creates a decoder that always fails with `errors`.
pub fn left<A>(errors: Errors) -> Left<A> {
    Left {
        errors,
        _output: PhantomData,
    }
}

impl<A> Clone for Left<A> {
    fn clone(&self) -> Self {
        left(self.errors.clone())
    }
}

impl<I: ?Sized, A> Decoder<I> for Left<A> {
    type Output = A;

    fn decode(&self, _input: &I) -> Validation<A> {
        Validation::Failure(self.errors.clone())
    }
}

/// Decoder backed by a plain function. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

/// Creates a decoder from a function of the input.
pub fn from_fn<I, A, F>(f: F) -> FromFn<F>
where
    I: ?Sized,
    F: Fn(&I) -> Validation<A> + Send + Sync,
{
    FromFn { f }
}

impl<I: ?Sized, A, F> Decoder<I> for FromFn<F>
where
    F: Fn(&I) -> Validation<A> + Send + Sync,
{
    type Output = A;

    fn decode(&self, input: &I) -> Validation<A> {
        (self.f)(input)
    }
}

/// Decoder built on demand at every decode. See [`lazy`].
#[derive(Clone)]
pub struct Lazy<F> {
    f: F,
}

/// Creates a decoder whose definition is produced by `f` at decode time.
///
/// The bounds are checked where the decoder is used, so `lazy` works for any
/// input type.
pub fn lazy<F>(f: F) -> Lazy<F> {
    Lazy { f }
}

impl<I: ?Sized, D, F> Decoder<I> for Lazy<F>
where
    F: Fn() -> D + Send + Sync,
    D: Decoder<I>,
{
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<D::Output> {
        (self.f)().decode(input)
    }
}

/// See [`Decoder::map`].
#[derive(Clone)]
pub struct Map<D, F> {
    inner: D,
    f: F,
}

impl<D, F> Map<D, F> {
    pub(crate) fn new(inner: D, f: F) -> Self {
        Self { inner, f }
    }
}

impl<I: ?Sized, D, F, B> Decoder<I> for Map<D, F>
where
    D: Decoder<I>,
    F: Fn(D::Output) -> B + Send + Sync,
{
    type Output = B;

    fn decode(&self, input: &I) -> Validation<B> {
        self.inner.decode(input).map(&self.f)
    }
}

/// See [`Decoder::chain`].
#[derive(Clone)]
pub struct Chain<D, F> {
    inner: D,
    f: F,
}

impl<D, F> Chain<D, F> {
    pub(crate) fn new(inner: D, f: F) -> Self {
        Self { inner, f }
    }
}

impl<I: ?Sized, D, F, D2> Decoder<I> for Chain<D, F>
where
    D: Decoder<I>,
    F: Fn(D::Output) -> D2 + Send + Sync,
    D2: Decoder<I>,
{
    type Output = D2::Output;

    fn decode(&self, input: &I) -> Validation<D2::Output> {
        match self.inner.decode(input) {
            Validation::Success(value) => (self.f)(value).decode(input),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }
}

/// See [`Decoder::chain_k`].
pub struct ChainK<D, K> {
    inner: D,
    k: K,
}

impl<D: Clone, K: Clone> Clone for ChainK<D, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            k: self.k.clone(),
        }
    }
}

impl<D, K> ChainK<D, K> {
    pub(crate) fn new(inner: D, k: K) -> Self {
        Self { inner, k }
    }
}

impl<I: ?Sized, D, A, B> Decoder<I> for ChainK<D, Kleisli<I, A, B>>
where
    D: Decoder<I, Output = A>,
{
    type Output = B;

    fn decode(&self, input: &I) -> Validation<B> {
        match self.inner.decode(input) {
            Validation::Success(value) => (self.k)(value).decode(input),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }
}

/// See [`Decoder::chain_left`].
#[derive(Clone)]
pub struct ChainLeft<D, F> {
    inner: D,
    f: F,
}

impl<D, F> ChainLeft<D, F> {
    pub(crate) fn new(inner: D, f: F) -> Self {
        Self { inner, f }
    }
}

impl<I: ?Sized, D, F, D2> Decoder<I> for ChainLeft<D, F>
where
    D: Decoder<I>,
    F: Fn(Errors) -> D2 + Send + Sync,
    D2: Decoder<I, Output = D::Output>,
{
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<D::Output> {
        self.inner.decode(input).or_else_with(|errors| {
            tracing::trace!(errors = errors.len(), "decoder failed, attempting recovery");
            (self.f)(errors).decode(input)
        })
    }
}

/// See [`Decoder::ap`].
#[derive(Clone)]
pub struct Ap<DF, DA> {
    ff: DF,
    fa: DA,
}

impl<DF, DA> Ap<DF, DA> {
    pub(crate) fn new(ff: DF, fa: DA) -> Self {
        Self { ff, fa }
    }
}

impl<I: ?Sized, DF, DA, F, B> Decoder<I> for Ap<DF, DA>
where
    DF: Decoder<I, Output = F>,
    DA: Decoder<I>,
    F: FnOnce(DA::Output) -> B,
{
    type Output = B;

    fn decode(&self, input: &I) -> Validation<B> {
        let ff = self.ff.decode(input);
        let fa = self.fa.decode(input);
        ff.ap(fa)
    }
}

/// See [`Decoder::zip`].
#[derive(Clone)]
pub struct Zip<DA, DB> {
    first: DA,
    second: DB,
}

impl<DA, DB> Zip<DA, DB> {
    pub(crate) fn new(first: DA, second: DB) -> Self {
        Self { first, second }
    }
}

impl<I: ?Sized, DA, DB> Decoder<I> for Zip<DA, DB>
where
    DA: Decoder<I>,
    DB: Decoder<I>,
{
    type Output = (DA::Output, DB::Output);

    fn decode(&self, input: &I) -> Validation<Self::Output> {
        let first = self.first.decode(input);
        let second = self.second.decode(input);
        first.and(second)
    }
}

/// See [`Decoder::alt`].
#[derive(Clone)]
pub struct Alt<D, L> {
    first: D,
    second: L,
}

impl<D, L> Alt<D, L> {
    pub(crate) fn new(first: D, second: L) -> Self {
        Self { first, second }
    }
}

impl<I: ?Sized, D, L, D2> Decoder<I> for Alt<D, L>
where
    D: Decoder<I>,
    L: Fn() -> D2 + Send + Sync,
    D2: Decoder<I, Output = D::Output>,
{
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<D::Output> {
        // the alternative is a recovery that ignores the errors it recovers from
        self.first.decode(input).or_else_with(|errors| {
            tracing::trace!(errors = errors.len(), "decoder failed, trying alternative");
            (self.second)().decode(input)
        })
    }
}

/// See [`Decoder::dedup_errors`].
#[derive(Clone)]
pub struct DedupErrors<D> {
    inner: D,
}

impl<D> DedupErrors<D> {
    pub(crate) fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<I: ?Sized, D: Decoder<I>> Decoder<I> for DedupErrors<D> {
    type Output = D::Output;

    fn decode(&self, input: &I) -> Validation<D::Output> {
        self.inner.decode(input).map_err(Errors::dedup)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::context::Context;
    use crate::decode::Decode;
    use crate::error::ValidationError;

    fn errors(message: &str) -> Errors {
        Errors::single(ValidationError::new(Context::root(), message))
    }

    #[test]
    fn test_of_ignores_input() {
        let decoder = of(7);
        assert_eq!(decoder.decode("anything"), Validation::Success(7));
        assert_eq!(decoder.decode(""), Validation::Success(7));
    }

    #[test]
    fn test_left_ignores_input() {
        let decoder: Left<i32> = left(errors("boom"));
        assert_eq!(
            Decoder::<str>::decode(&decoder, "x"),
            Validation::Failure(errors("boom"))
        );
    }

    #[test]
    fn test_map_not_called_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let decoder = Decode::<str, i32>::left(errors("bad")).map(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            n + 1
        });

        assert!(decoder.decode("x").is_failure());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_chain_uses_same_input() {
        let decoder = Decode::from_fn(|s: &str| Validation::Success(s.len())).chain(|n| {
            Decode::from_fn(move |s: &str| Validation::Success(format!("{}:{}", s, n)))
        });
        assert_eq!(decoder.decode("abc"), Validation::Success("abc:3".to_string()));
    }

    #[test]
    fn test_lazy_builds_per_decode() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let decoder = lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            of(1)
        });

        assert_eq!(builds.load(Ordering::SeqCst), 0);
        let _ = Decoder::<str>::decode(&decoder, "a");
        let _ = Decoder::<str>::decode(&decoder, "b");
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_zip_accumulates() {
        let decoder =
            Decode::<str, i32>::left(errors("a")).zip(Decode::<str, i32>::left(errors("b")));
        let result = decoder.decode("x");
        assert_eq!(result.into_errors().messages(), vec!["a", "b"]);
    }

    #[test]
    fn test_zip_pairs_values() {
        let decoder = Decode::<str, i32>::of(1).zip(Decode::<str, &str>::of("one"));
        assert_eq!(decoder.decode("x"), Validation::Success((1, "one")));
    }

    #[test]
    fn test_chain_k_runs_arrow_on_success() {
        let k: Kleisli<str, usize, String> = Arc::new(|n| Decode::of("#".repeat(n)));
        let decoder = from_fn(|s: &str| Validation::Success(s.len())).chain_k(k);
        assert_eq!(decoder.decode("abc"), Validation::Success("###".to_string()));
    }

    #[test]
    fn test_chain_k_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let k: Kleisli<str, i32, i32> = Arc::new(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            Decode::of(n)
        });

        let decoder = Decoder::<str>::boxed(left::<i32>(errors("first"))).chain_k(k);
        assert_eq!(decoder.decode("x").into_errors().messages(), vec!["first"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dedup_errors() {
        let decoder = Decode::<str, i32>::left(errors("same"))
            .alt(|| left(errors("same")))
            .dedup_errors();
        let result = decoder.decode("x");
        assert_eq!(result.into_errors().len(), 1);
    }
}
