//! Decoding many values at once.
//!
//! [`sequence`] runs a list of decoders of one output type, and tuples of up
//! to six decoders are decoders of the tuple of their outputs. Both evaluate
//! every element and collect all failures in declaration order.

use rayon::prelude::*;
use stillwater::validation::ValidateAll;

use crate::validation::Validation;

use super::Decoder;

/// See [`sequence`].
#[derive(Debug, Clone)]
pub struct Sequence<D> {
    decoders: Vec<D>,
}

/// Decodes the same input with every decoder, collecting the values in order.
///
/// An empty list succeeds with an empty vector.
///
/// # Example
///
/// ```rust
/// use inquest::decode::{sequence, Decode, Decoder};
/// use inquest::Validation;
///
/// let all = sequence(vec![
///     Decode::from_fn(|s: &str| Validation::Success(s.len())),
///     Decode::of(7),
/// ]);
///
/// assert_eq!(all.decode("abc"), Validation::Success(vec![3, 7]));
/// ```
pub fn sequence<D>(decoders: Vec<D>) -> Sequence<D> {
    Sequence { decoders }
}

impl<I: ?Sized, D: Decoder<I>> Decoder<I> for Sequence<D> {
    type Output = Vec<D::Output>;

    fn decode(&self, input: &I) -> Validation<Vec<D::Output>> {
        let results = self.decoders.iter().map(|d| d.decode(input)).collect();
        Validation::all_vec(results)
    }
}

/// See [`par_sequence`].
#[derive(Debug, Clone)]
pub struct ParSequence<D> {
    decoders: Vec<D>,
}

/// Like [`sequence`], but the decoders run on the rayon thread pool.
///
/// Values and errors are still collected in declaration order.
pub fn par_sequence<D>(decoders: Vec<D>) -> ParSequence<D> {
    ParSequence { decoders }
}

impl<I, D> Decoder<I> for ParSequence<D>
where
    I: ?Sized + Sync,
    D: Decoder<I>,
    D::Output: Send,
{
    type Output = Vec<D::Output>;

    fn decode(&self, input: &I) -> Validation<Vec<D::Output>> {
        let results: Vec<_> = self.decoders.par_iter().map(|d| d.decode(input)).collect();
        Validation::all_vec(results)
    }
}

macro_rules! impl_tuple_decoder {
    ($($D:ident),+) => {
        impl<In: ?Sized, $($D: Decoder<In>),+> Decoder<In> for ($($D,)+) {
            type Output = ($($D::Output,)+);

            #[allow(non_snake_case)]
            fn decode(&self, input: &In) -> Validation<Self::Output> {
                let ($($D,)+) = self;
                ($($D.decode(input),)+).validate_all()
            }
        }
    };
}

impl_tuple_decoder!(D1, D2);
impl_tuple_decoder!(D1, D2, D3);
impl_tuple_decoder!(D1, D2, D3, D4);
impl_tuple_decoder!(D1, D2, D3, D4, D5);
impl_tuple_decoder!(D1, D2, D3, D4, D5, D6);
