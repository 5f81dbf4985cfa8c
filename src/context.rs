//! Decode context: the path taken through a nested input.
//!
//! This module provides [`Context`], [`ContextEntry`] and [`Key`] for recording
//! where in a nested structure a decode attempt happened. Every entry carries
//! the key that was followed and the name of the type expected at that point.

use std::fmt::{self, Display};

/// How a [`ContextEntry`] was reached from its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl Key {
    /// Creates a new field key.
    pub fn field(name: impl Into<String>) -> Self {
        Key::Field(name.into())
    }

    /// Creates a new index key.
    pub fn index(idx: usize) -> Self {
        Key::Index(idx)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => write!(f, "{}", name),
            Key::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// One step of a decode path: the key followed and the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextEntry {
    /// The key followed to reach this value.
    pub key: Key,
    /// Name of the type the decoder expected at this position.
    pub type_name: String,
}

impl ContextEntry {
    /// Creates an entry from a key and a type name.
    pub fn new(key: Key, type_name: impl Into<String>) -> Self {
        Self {
            key,
            type_name: type_name.into(),
        }
    }
}

/// An append-only path of [`ContextEntry`] values.
///
/// `Context` represents locations like `users[0].email`. Pushing returns a
/// new context; the receiver is left untouched, so one parent context can be
/// shared by every child decode.
///
/// # Example
///
/// ```rust
/// use inquest::Context;
///
/// let context = Context::root()
///     .push_field("users", "array")
///     .push_index(0, "User")
///     .push_field("email", "string");
///
/// assert_eq!(context.to_string(), "users[0].email");
/// assert_eq!(context.last().unwrap().type_name, "string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Context {
    entries: Vec<ContextEntry>,
}

impl Context {
    /// Creates an empty context representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new context with `entry` appended.
    pub fn push(&self, entry: ContextEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// Returns a new context with a field entry appended.
    pub fn push_field(&self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.push(ContextEntry::new(Key::Field(name.into()), type_name))
    }

    /// Returns a new context with an index entry appended.
    pub fn push_index(&self, index: usize, type_name: impl Into<String>) -> Self {
        self.push(ContextEntry::new(Key::Index(index), type_name))
    }

    /// Returns true if this is the root context (no entries).
    pub fn is_root(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this context has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries, root first.
    pub fn entries(&self) -> impl Iterator<Item = &ContextEntry> {
        self.entries.iter()
    }

    /// Returns the parent context, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.entries.is_empty() {
            None
        } else {
            Some(Self {
                entries: self.entries[..self.entries.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last entry, or None if this is root.
    pub fn last(&self) -> Option<&ContextEntry> {
        self.entries.last()
    }

    /// Returns true if `self` is `other` or lies underneath it.
    pub fn starts_with(&self, other: &Context) -> bool {
        self.entries.starts_with(&other.entries)
    }
}

impl FromIterator<ContextEntry> for Context {
    fn from_iter<T: IntoIterator<Item = ContextEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_field = false;
        for entry in &self.entries {
            match &entry.key {
                // the entry a codec pushes for the whole input has no key
                Key::Field(name) if name.is_empty() => {}
                Key::Field(name) => {
                    if wrote_field {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                    wrote_field = true;
                }
                Key::Index(idx) => {
                    write!(f, "[{}]", idx)?;
                    wrote_field = true;
                }
            }
        }
        Ok(())
    }
}
