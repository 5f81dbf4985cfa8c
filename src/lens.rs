//! Getter/setter pairs focused on one field of a struct.
//!
//! The lens-based do-notation steps ([`Decoder::bind_l`], [`Decoder::let_l`],
//! [`Decoder::let_to_l`], [`Decoder::ap_s_l`]) only need to read and replace a
//! single field, so a lens here is nothing more than that capability pair.
//!
//! [`Decoder::bind_l`]: crate::Decoder::bind_l
//! [`Decoder::let_l`]: crate::Decoder::let_l
//! [`Decoder::let_to_l`]: crate::Decoder::let_to_l
//! [`Decoder::ap_s_l`]: crate::Decoder::ap_s_l

use std::fmt;

/// Focus on one field of `S`.
///
/// Implementations must be lawful: setting the value just read changes
/// nothing, and reading after a set returns the value that was set.
pub trait Lens<S>: Send + Sync {
    /// The focused field's type.
    type Field;

    /// Reads the field.
    fn get(&self, s: &S) -> Self::Field;

    /// Returns `s` with the field replaced by `value`.
    fn set(&self, s: S, value: Self::Field) -> S;
}

impl<S, L: Lens<S> + ?Sized> Lens<S> for &L {
    type Field = L::Field;

    fn get(&self, s: &S) -> Self::Field {
        (**self).get(s)
    }

    fn set(&self, s: S, value: Self::Field) -> S {
        (**self).set(s, value)
    }
}

/// A lens built from two closures. See [`lens`].
#[derive(Clone, Copy)]
pub struct FnLens<G, St> {
    getter: G,
    setter: St,
}

impl<G, St> fmt::Debug for FnLens<G, St> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLens").finish_non_exhaustive()
    }
}

/// Builds a lens from a getter and a setter.
///
/// # Example
///
/// ```rust
/// use inquest::lens::{lens, Lens};
///
/// #[derive(Debug, Clone, PartialEq, Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let port = lens(
///     |s: &Server| s.port,
///     |s: Server, port| Server { port, ..s },
/// );
///
/// let server = port.set(Server::default(), 8080);
/// assert_eq!(port.get(&server), 8080);
/// ```
pub fn lens<S, T, G, St>(getter: G, setter: St) -> FnLens<G, St>
where
    G: Fn(&S) -> T + Send + Sync,
    St: Fn(S, T) -> S + Send + Sync,
{
    FnLens { getter, setter }
}

impl<S, T, G, St> Lens<S> for FnLens<G, St>
where
    G: Fn(&S) -> T + Send + Sync,
    St: Fn(S, T) -> S + Send + Sync,
{
    type Field = T;

    fn get(&self, s: &S) -> T {
        (self.getter)(s)
    }

    fn set(&self, s: S, value: T) -> S {
        (self.setter)(s, value)
    }
}
