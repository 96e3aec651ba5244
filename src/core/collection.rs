//! Collection shapes and the iteration/reduction primitives
//!
//! A [`Collection`] is resolved once, at the call boundary, from whatever the caller
//! holds (slices, vectors, string-keyed maps, JSON values). Downstream operations only
//! ever see the two variants and never re-inspect the original shape.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Position of an element: an index into a sequence or a key of a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

impl<'a> Key<'a> {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&'a str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(*name),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Borrowed view over an ordered sequence or a string-keyed mapping
#[derive(Debug)]
pub enum Collection<'a, T> {
    Sequence(&'a [T]),
    Mapping(Vec<(&'a str, &'a T)>),
}

impl<T> Clone for Collection<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Collection::Sequence(items) => Collection::Sequence(*items),
            Collection::Mapping(entries) => Collection::Mapping(entries.clone()),
        }
    }
}

impl<T> Collection<'_, T> {
    pub fn len(&self) -> usize {
        match self {
            Collection::Sequence(items) => items.len(),
            Collection::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Collection::Sequence(_))
    }
}

/// Conversion into a [`Collection`] view
///
/// Every operation that accepts "a collection" takes `impl IntoCollection`, so
/// callers can pass `&Vec<T>`, `&[T]`, `&[T; N]`, `&BTreeMap<String, T>`,
/// `&HashMap<String, T>`, `&serde_json::Map` or `&serde_json::Value` directly.
pub trait IntoCollection<'a> {
    type Item: 'a;

    fn into_collection(self) -> Collection<'a, Self::Item>;
}

impl<'a, T: 'a> IntoCollection<'a> for Collection<'a, T> {
    type Item = T;

    fn into_collection(self) -> Collection<'a, T> {
        self
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a [T] {
    type Item = T;

    fn into_collection(self) -> Collection<'a, T> {
        Collection::Sequence(self)
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a Vec<T> {
    type Item = T;

    fn into_collection(self) -> Collection<'a, T> {
        Collection::Sequence(self.as_slice())
    }
}

impl<'a, T: 'a, const N: usize> IntoCollection<'a> for &'a [T; N] {
    type Item = T;

    fn into_collection(self) -> Collection<'a, T> {
        Collection::Sequence(self.as_slice())
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a BTreeMap<String, T> {
    type Item = T;

    fn into_collection(self) -> Collection<'a, T> {
        Collection::Mapping(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl<'a, T: 'a> IntoCollection<'a> for &'a HashMap<String, T> {
    type Item = T;

    fn into_collection(self) -> Collection<'a, T> {
        // Sorted so that iteration order does not depend on the hasher
        let mut entries: Vec<(&'a str, &'a T)> =
            self.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Collection::Mapping(entries)
    }
}

impl<'a> IntoCollection<'a> for &'a serde_json::Map<String, Value> {
    type Item = Value;

    fn into_collection(self) -> Collection<'a, Value> {
        Collection::Mapping(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl<'a> IntoCollection<'a> for &'a Value {
    type Item = Value;

    /// Arrays become sequences and objects become mappings. Any other value
    /// resolves to an empty sequence, so operating on it is a no-op.
    fn into_collection(self) -> Collection<'a, Value> {
        match self {
            Value::Array(items) => Collection::Sequence(items.as_slice()),
            Value::Object(map) => map.into_collection(),
            _ => Collection::Sequence(&[]),
        }
    }
}

/// Call `iterator(value, key, collection)` for each element of the collection.
///
/// Sequences are visited in index order, mappings once per key.
pub fn each<'a, C, F>(collection: C, mut iterator: F)
where
    C: IntoCollection<'a>,
    F: FnMut(&'a C::Item, Key<'a>, &Collection<'a, C::Item>),
{
    let collection = collection.into_collection();
    match &collection {
        Collection::Sequence(items) => {
            let items: &'a [C::Item] = *items;
            for (index, value) in items.iter().enumerate() {
                iterator(value, Key::Index(index), &collection);
            }
        }
        Collection::Mapping(entries) => {
            for &(key, value) in entries.iter() {
                iterator(value, Key::Name(key), &collection);
            }
        }
    }
}

/// Fold a collection into `initial` by calling `reducer(&mut accumulator, value)`
/// for each element.
///
/// A reducer that leaves the accumulator alone keeps it unchanged for the next
/// element. This is the reduction primitive the other operations build on.
pub fn fold<'a, C, A, F>(collection: C, initial: A, mut reducer: F) -> A
where
    C: IntoCollection<'a>,
    F: FnMut(&mut A, &'a C::Item),
{
    let mut accumulator = initial;
    each(collection, |value, _, _| reducer(&mut accumulator, value));
    accumulator
}

/// Reduce a collection to a single value.
///
/// Without an `initial` value the first element seeds the accumulator and is not
/// passed to the reducer; an empty collection then reduces to `None`. When the
/// reducer returns `None` the accumulator is kept as it was.
///
/// ```
/// use underbar::reduce;
///
/// assert_eq!(reduce(&vec![1, 2, 3], |a, b| Some(a + b), Some(0)), Some(6));
/// assert_eq!(reduce(&vec![5], |a, b| Some(a + b * b), None), Some(5));
/// ```
pub fn reduce<'a, C, F>(collection: C, mut reducer: F, initial: Option<C::Item>) -> Option<C::Item>
where
    C: IntoCollection<'a>,
    C::Item: Clone,
    F: FnMut(&C::Item, &C::Item) -> Option<C::Item>,
{
    fold(collection, initial, |accumulator, value| {
        let next = match accumulator.take() {
            None => value.clone(),
            Some(current) => reducer(&current, value).unwrap_or(current),
        };
        *accumulator = Some(next);
    })
}
