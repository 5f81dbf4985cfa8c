//! Value-level semigroups and monoids.
//!
//! Unlike [`stillwater::Semigroup`], which fixes one combination per type,
//! the traits here are implemented by *instances*: the same `i64` can be
//! combined by [`Sum`] in one place and by [`Product`] in another. The decoder
//! monoid constructors in [`crate::decode`] are parameterized by these
//! instances.
//!
//! # Example
//!
//! ```rust
//! use inquest::monoid::{concat_all, Monoid, Semigroup, StringConcat, Sum};
//!
//! assert_eq!(Sum.concat(2, 3), 5);
//! assert_eq!(concat_all(&Sum, vec![1, 2, 3, 4]), 10);
//!
//! let words = vec!["Hello".to_string(), " ".to_string(), "World".to_string()];
//! assert_eq!(concat_all(&StringConcat, words), "Hello World");
//! assert_eq!(StringConcat.empty(), "");
//! ```

use std::ops::{Add, Mul};

/// An associative binary operation over values of type `A`.
///
/// Implementations must satisfy `concat(concat(x, y), z) == concat(x, concat(y, z))`.
pub trait Semigroup<A> {
    /// Combines two values.
    fn concat(&self, x: A, y: A) -> A;
}

/// A semigroup with an identity element.
///
/// Implementations must satisfy `concat(empty(), x) == x == concat(x, empty())`.
pub trait Monoid<A>: Semigroup<A> {
    /// Returns the identity element.
    fn empty(&self) -> A;
}

impl<A, M: Semigroup<A> + ?Sized> Semigroup<A> for &M {
    fn concat(&self, x: A, y: A) -> A {
        (**self).concat(x, y)
    }
}

impl<A, M: Monoid<A> + ?Sized> Monoid<A> for &M {
    fn empty(&self) -> A {
        (**self).empty()
    }
}

/// Additive monoid, identity `A::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

impl<A: Add<Output = A>> Semigroup<A> for Sum {
    fn concat(&self, x: A, y: A) -> A {
        x + y
    }
}

impl<A: Add<Output = A> + Default> Monoid<A> for Sum {
    fn empty(&self) -> A {
        A::default()
    }
}

/// Multiplicative monoid, identity `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Product;

impl<A: Mul<Output = A>> Semigroup<A> for Product {
    fn concat(&self, x: A, y: A) -> A {
        x * y
    }
}

impl<A: Mul<Output = A> + From<u8>> Monoid<A> for Product {
    fn empty(&self) -> A {
        A::from(1)
    }
}

/// String concatenation, identity `""`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringConcat;

impl Semigroup<String> for StringConcat {
    fn concat(&self, mut x: String, y: String) -> String {
        x.push_str(&y);
        x
    }
}

impl Monoid<String> for StringConcat {
    fn empty(&self) -> String {
        String::new()
    }
}

/// Lifts a type-level [`stillwater::Monoid`] into an instance.
///
/// Any type stillwater already knows how to combine (`Vec<T>`, `String`,
/// [`crate::Errors`]) can be used wherever a [`Monoid`] instance is expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Combine;

impl<A: stillwater::Semigroup> Semigroup<A> for Combine {
    fn concat(&self, x: A, y: A) -> A {
        x.combine(y)
    }
}

impl<A: stillwater::Monoid> Monoid<A> for Combine {
    fn empty(&self) -> A {
        A::empty()
    }
}

/// A monoid assembled from an identity thunk and a combining function.
///
/// Built with [`monoid`].
#[derive(Clone)]
pub struct FnMonoid<E, C> {
    empty: E,
    concat: C,
}

/// Creates a monoid instance from closures.
///
/// The caller is responsible for the monoid laws.
///
/// # Example
///
/// ```rust
/// use inquest::monoid::{monoid, Monoid, Semigroup};
///
/// let max = monoid(|| i32::MIN, |a: i32, b: i32| a.max(b));
/// assert_eq!(max.concat(3, 7), 7);
/// assert_eq!(max.concat(max.empty(), 3), 3);
/// ```
pub fn monoid<A, E, C>(empty: E, concat: C) -> FnMonoid<E, C>
where
    E: Fn() -> A,
    C: Fn(A, A) -> A,
{
    FnMonoid { empty, concat }
}

impl<A, E, C> Semigroup<A> for FnMonoid<E, C>
where
    C: Fn(A, A) -> A,
{
    fn concat(&self, x: A, y: A) -> A {
        (self.concat)(x, y)
    }
}

impl<A, E, C> Monoid<A> for FnMonoid<E, C>
where
    E: Fn() -> A,
    C: Fn(A, A) -> A,
{
    fn empty(&self) -> A {
        (self.empty)()
    }
}

/// Folds every item with `m`, starting from `m.empty()`.
///
/// Works for plain values as well as for decoders combined by one of the
/// decoder monoids.
pub fn concat_all<A, M, It>(m: &M, items: It) -> A
where
    M: Monoid<A> + ?Sized,
    It: IntoIterator<Item = A>,
{
    items
        .into_iter()
        .fold(m.empty(), |acc, item| m.concat(acc, item))
}
