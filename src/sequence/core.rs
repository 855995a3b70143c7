use std::fmt::Debug;
use std::rc::Rc;

use super::key::{IntoKey, Key, Slice};
use super::IndexedView;
use crate::error::{Error, Result};

/// Iterator over the elements of a sequence
///
/// Every element is read through to the underlying storage as it is yielded,
/// so reads may fail (for example, an index mapping that has gone stale after
/// its base shrank).
///
pub type Iter<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Sequence
///
/// The capability every base sequence and every view provides. Because views
/// implement it too, views can be layered over views without special cases.
///
/// All methods take `&self`; mutation goes through interior mutability. The
/// underlying data must not be mutated while a view access is in progress,
/// which `Rc`/`RefCell` enforce by making sequences `!Send` and `!Sync`.
///
pub trait Sequence<T> {
    /// Name used when reporting errors
    fn name(&self) -> &'static str;

    /// Number of elements, or `None` for unbounded sequences
    fn len(&self) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    fn get(&self, index: isize) -> Result<T>;

    fn set(&self, index: isize, value: T) -> Result<()>;

    fn slice(&self, slice: Slice) -> Result<View<T>>;

    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()>;

    fn iter(&self) -> Iter<'_, T>;

    /// Marker used to flatten nested index mappings
    fn as_indexed(&self) -> Option<&IndexedView<T>> {
        None
    }
}

/// View
///
/// A shared handle to any [`Sequence`]. Cloning a `View` shares the
/// underlying sequence; it never copies data.
///
pub struct View<T>(Rc<dyn Sequence<T>>);

impl<T> View<T> {
    pub fn new<S: Sequence<T> + 'static>(sequence: S) -> Self {
        View(Rc::new(sequence))
    }

    /// Whether both handles refer to the same sequence
    pub fn ptr_eq(&self, other: &View<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Materialize a View
    ///
    /// Read every element into a new vector. Unbounded views cannot be
    /// materialized.
    ///
    pub fn materialize(&self) -> Result<Vec<T>> {
        if self.len().is_none() {
            return Err(Error::InvalidArgument(format!(
                "cannot materialize unbounded {}",
                self.name()
            )));
        }
        self.iter().collect()
    }
}

impl<T> Clone for View<T> {
    fn clone(&self) -> Self {
        View(Rc::clone(&self.0))
    }
}

impl<T> Debug for View<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.len() {
            Some(n) => write!(f, "<{} of length {n}>", self.name()),
            None => write!(f, "<unbounded {}>", self.name()),
        }
    }
}

impl<T> Sequence<T> for View<T> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn len(&self) -> Option<usize> {
        self.0.len()
    }

    fn get(&self, index: isize) -> Result<T> {
        self.0.get(index)
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        self.0.set(index, value)
    }

    fn slice(&self, slice: Slice) -> Result<View<T>> {
        self.0.slice(slice)
    }

    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        self.0.assign(slice, values)
    }

    fn iter(&self) -> Iter<'_, T> {
        self.0.iter()
    }

    fn as_indexed(&self) -> Option<&IndexedView<T>> {
        self.0.as_indexed()
    }
}

/// Conversion into a shared [`View`] handle
pub trait IntoView<T> {
    fn into_view(self) -> View<T>;
}

impl<T> IntoView<T> for View<T> {
    fn into_view(self) -> View<T> {
        self
    }
}

/// The result of indexing by a [`Key`]
#[derive(Debug, Clone)]
pub enum Selection<T> {
    Item(T),
    View(View<T>),
}

impl<T> Selection<T> {
    pub fn into_item(self) -> Option<T> {
        match self {
            Selection::Item(x) => Some(x),
            Selection::View(_) => None,
        }
    }

    pub fn into_view(self) -> Option<View<T>> {
        match self {
            Selection::View(v) => Some(v),
            Selection::Item(_) => None,
        }
    }
}

/// The right-hand side of an assignment by [`Key`]
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment<T> {
    Item(T),
    Items(Vec<T>),
}

/// Keyed access
///
/// Dispatches on [`Key`] to the index or slice operations of a sequence. Keys
/// that cannot be converted are reported as a type mismatch naming both the
/// sequence and the offending type.
///
pub trait SequenceExt<T>: Sequence<T> {
    fn key<K: IntoKey>(&self, key: K) -> Result<Key> {
        key.into_key().map_err(|found| Error::TypeMismatch {
            view: self.name(),
            found,
        })
    }

    fn getitem<K: IntoKey>(&self, key: K) -> Result<Selection<T>> {
        match self.key(key)? {
            Key::Index(i) => self.get(i).map(Selection::Item),
            Key::Slice(s) => self.slice(s).map(Selection::View),
        }
    }

    fn setitem<K: IntoKey>(&self, key: K, value: Assignment<T>) -> Result<()> {
        match (self.key(key)?, value) {
            (Key::Index(i), Assignment::Item(x)) => self.set(i, x),
            (Key::Slice(s), Assignment::Items(xs)) => self.assign(s, xs),
            (Key::Index(_), Assignment::Items(_)) => Err(Error::InvalidArgument(format!(
                "{} index assignment requires a single value",
                self.name()
            ))),
            (Key::Slice(_), Assignment::Item(_)) => Err(Error::InvalidArgument(format!(
                "{} slice assignment requires a sequence of values",
                self.name()
            ))),
        }
    }
}

impl<T, S: Sequence<T> + ?Sized> SequenceExt<T> for S {}

/// One-to-one slice assignment for bounded sequences
///
/// The slice must select exactly as many positions as there are values; the
/// shape is checked before anything is written.
///
pub(crate) fn assign_each<T, S>(seq: &S, len: usize, slice: Slice, values: Vec<T>) -> Result<()>
where
    S: Sequence<T> + ?Sized,
{
    let indices = slice.indices(len)?;
    if indices.len != values.len() {
        return Err(Error::ShapeMismatch {
            view: seq.name(),
            expected: indices.len,
            found: values.len(),
        });
    }

    indices
        .iter()
        .zip(values)
        .try_for_each(|(i, x)| seq.set(i, x))
}
