//! Contains the definition of [`Arena`], [`Map`] and [`ID`].
//!
//! [`Arena`] is a data structure that allows storing items of type `T` and
//! referencing them by your own custom index type. This is useful for
//! providing more type safety when working with various containers of
//! different types.

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::Debug,
    hash::Hash,
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

/// Represents a key type that can be used to index items in the [`Arena`].
pub trait Key:
    Debug
    + Clone
    + Copy
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + 'static
    + Send
    + Sync
{
    /// Creates a new [`Key`] from the given index.
    fn from_index(index: usize) -> Self;

    /// Returns the index of the [`Key`].
    fn into_index(self) -> usize;
}

/// Represents an unique identifier to a particular entry in the [`Arena`] of
/// type `T`.
pub struct ID<T> {
    index: usize,
    _marker: PhantomData<Box<T>>,
}

impl<T: 'static> Key for ID<T> {
    fn from_index(index: usize) -> Self { Self::new(index) }

    fn into_index(self) -> usize { self.index }
}

unsafe impl<T> Send for ID<T> {}
unsafe impl<T> Sync for ID<T> {}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID({})", self.index)
    }
}

impl<T> ID<T> {
    /// Creates a new [`ID`] with the given index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// Returns the index of the [`ID`].
    #[must_use]
    pub const fn index(&self) -> usize { self.index }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T> Eq for ID<T> {}

impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> Serialize for ID<T> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.index.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ID<T> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        usize::deserialize(deserializer).map(Self::new)
    }
}

/// Represents a collection of items of type `T` that can be referenced by an
/// [`ID`].
///
/// Internally, all the items are stored in a [`Vec`], and the [`ID`] is just
/// an index to the item in the [`Vec`]. However, unlike [`Vec`], [`Arena`]
/// doesn't allow removing items in between since it will invalidate all the
/// [`ID`]s given out before. This data structure is commonly used in graph
/// structures where the nodes are stored in an [`Arena`] and the edges are
/// represented by [`ID`]s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arena<T, Idx: Key = ID<T>> {
    _marker: PhantomData<Idx>,
    items: Vec<T>,
}

impl<T, Idx: Key> Default for Arena<T, Idx> {
    fn default() -> Self { Self { _marker: PhantomData, items: Vec::new() } }
}

impl<T, Idx: Key> Arena<T, Idx> {
    /// Creates a new empty [`Arena`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the number of items in the [`Arena`].
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` if the [`Arena`] contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Inserts a new item into the [`Arena`] and returns its `Idx`.
    pub fn insert(&mut self, item: T) -> Idx {
        let index = self.items.len();
        self.items.push(item);
        Idx::from_index(index)
    }

    /// Returns a reference to the item in the [`Arena`] with the given `Idx`.
    #[must_use]
    pub fn get(&self, id: Idx) -> Option<&T> { self.items.get(id.into_index()) }

    /// Returns a mutable reference to the item in the [`Arena`] with the
    /// given `Idx`.
    #[must_use]
    pub fn get_mut(&mut self, id: Idx) -> Option<&mut T> {
        self.items.get_mut(id.into_index())
    }
}

/// Represents a map that allows referencing items in the [`Map`] by either
/// their `Secondary` key or their `Primary` ID.
///
/// Accessing the items by their ID is more efficient than accessing them by
/// their key since the former is just an index to the item in the [`Arena`],
/// while the latter requires a hash map lookup. A [`Map`] whose key is the
/// item itself works as an interner: structurally equal items share one ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map<T, Secondary: Hash + Eq = T, Primary: Key = ID<T>> {
    arena: Arena<T, Primary>,

    items: HashMap<Secondary, Primary>,
}

impl<T, Secondary: Hash + Eq, Primary: Key> Map<T, Secondary, Primary> {
    /// Creates a new empty [`Map`].
    #[must_use]
    pub fn new() -> Self { Self { arena: Arena::new(), items: HashMap::new() } }

    /// Inserts a new item into the [`Map`] with the given key.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a tuple of the ID of the existing item and the new
    /// item if the key already exists in the [`Map`].
    pub fn insert(
        &mut self,
        key: Secondary,
        item: T,
    ) -> Result<Primary, (Primary, T)> {
        match self.items.entry(key) {
            Entry::Occupied(entry) => Err((*entry.get(), item)),
            Entry::Vacant(entry) => {
                let id = self.arena.insert(item);
                entry.insert(id);
                Ok(id)
            }
        }
    }

    /// Returns a reference to the item in the [`Map`] with the given ID.
    #[must_use]
    pub fn get(&self, id: Primary) -> Option<&T> { self.arena.get(id) }
}

impl<T: Clone + Hash + Eq, Primary: Key> Map<T, T, Primary> {
    /// Interns the item, returning the ID of the structurally equal item if
    /// one was inserted before.
    pub fn intern(&mut self, item: T) -> Primary {
        match self.insert(item.clone(), item) {
            Ok(id) | Err((id, _)) => id,
        }
    }
}

impl<T, K: Eq + Hash, Idx: Key> Default for Map<T, K, Idx> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test;
