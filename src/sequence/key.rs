use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{Error, Result};

/// Slice
///
/// A `start:stop:step` triple where every component may be absent. Absent
/// components take their defaults only once a length is known (see
/// [`Slice::indices`]), so the same slice can be applied to sequences of
/// different lengths, or interpreted specially by unbounded views.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

/// A slice resolved against a concrete length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceIndices {
    pub start: isize,
    pub stop: isize,
    pub step: isize,
    pub len: usize,
}

impl SliceIndices {
    /// Positions selected by the slice, in order
    pub fn iter(&self) -> impl Iterator<Item = isize> {
        let SliceIndices {
            start, step, len, ..
        } = *self;
        (0..len).map(move |i| start + i as isize * step)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Slice { start, stop, step }
    }

    /// The full slice, `[:]`
    pub fn full() -> Self {
        Slice::default()
    }

    #[must_use]
    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// The step, defaulting to 1. A zero step is never valid.
    pub fn step(&self) -> Result<isize> {
        match self.step {
            None => Ok(1),
            Some(0) => Err(Error::InvalidStep),
            Some(step) => Ok(step),
        }
    }

    /// Resolve against a sequence of length `len`
    ///
    /// Absent bounds default to the ends of the sequence in the direction of
    /// the step. Negative bounds count from the end, and anything still out of
    /// range is clamped, so a resolved slice never selects a position outside
    /// `[0, len)`.
    ///
    /// ```
    /// use seqview::sequence::Slice;
    ///
    /// let s = Slice::new(None, None, Some(-2)).indices(5).unwrap();
    /// assert_eq!(s.iter().collect::<Vec<_>>(), vec![4, 2, 0]);
    /// ```
    ///
    pub fn indices(&self, len: usize) -> Result<SliceIndices> {
        let step = self.step()?;
        let len = len as isize;

        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self
            .start
            .map_or(if step < 0 { upper } else { lower }, clamp);
        let stop = self
            .stop
            .map_or(if step < 0 { lower } else { upper }, clamp);

        let span = if step > 0 { stop - start } else { start - stop };
        let len = if span > 0 {
            (span.unsigned_abs() - 1) / step.unsigned_abs() + 1
        } else {
            0
        };

        Ok(SliceIndices {
            start,
            stop,
            step,
            len,
        })
    }
}

impl From<Range<isize>> for Slice {
    fn from(value: Range<isize>) -> Self {
        Slice::new(Some(value.start), Some(value.end), None)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(value: RangeFrom<isize>) -> Self {
        Slice::new(Some(value.start), None, None)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(value: RangeTo<isize>) -> Self {
        Slice::new(None, Some(value.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = |b: Option<isize>| b.map(|b| b.to_string()).unwrap_or_default();
        write!(f, "{}:{}", bound(self.start), bound(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

/// Key
///
/// Everything a sequence can be indexed by. Entry points match on this
/// exhaustively; anything that cannot become a `Key` is rejected while
/// converting (see [`IntoKey`]).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Index(isize),
    Slice(Slice),
}

/// Conversion into a [`Key`]
///
/// On failure, returns the name of the offending type so that the caller can
/// report it alongside the view being indexed.
///
pub trait IntoKey {
    fn into_key(self) -> Result<Key, String>;
}

impl IntoKey for Key {
    fn into_key(self) -> Result<Key, String> {
        Ok(self)
    }
}

impl IntoKey for Slice {
    fn into_key(self) -> Result<Key, String> {
        Ok(Key::Slice(self))
    }
}

macro_rules! into_key_index {
    ($($t:ty),*) => {
        $(impl IntoKey for $t {
            fn into_key(self) -> Result<Key, String> {
                isize::try_from(self)
                    .map(Key::Index)
                    .map_err(|_| stringify!($t).to_string())
            }
        })*
    };
}

into_key_index!(isize, i64, i32, usize);

macro_rules! into_key_slice {
    ($($t:ty),*) => {
        $(impl IntoKey for $t {
            fn into_key(self) -> Result<Key, String> {
                Ok(Key::Slice(self.into()))
            }
        })*
    };
}

into_key_slice!(Range<isize>, RangeFrom<isize>, RangeTo<isize>, RangeFull);

/// Resolve an integer key against a bounded length
///
/// Keys outside `[-len, len)` are out of range; negative keys count from the
/// end.
///
pub fn resolve_index(view: &'static str, index: isize, len: usize) -> Result<usize> {
    let n = len as isize;
    if index < -n || index >= n {
        return Err(Error::OutOfRange(view));
    }

    Ok(if index < 0 { n + index } else { index } as usize)
}

/// Unbounded views only accept indices counted from the front
pub fn resolve_unbounded_index(view: &'static str, index: isize) -> Result<usize> {
    if index < 0 {
        Err(Error::InvalidIndex(view))
    } else {
        Ok(index as usize)
    }
}

/// Bounds of a slice applied to an unbounded view
///
/// The start defaults to 0, the stop must be given, and neither may be
/// negative, since there is no end to count back from.
///
pub fn resolve_unbounded_slice(view: &'static str, slice: &Slice) -> Result<(isize, isize)> {
    let start = slice.start.unwrap_or(0);
    match slice.stop {
        Some(stop) if start >= 0 && stop >= 0 => Ok((start, stop)),
        _ => Err(Error::InvalidIndex(view)),
    }
}
