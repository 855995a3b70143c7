use std::cell::RefCell;
use std::rc::Rc;

use super::core::{assign_each, Iter, IntoView, Sequence, View};
use super::key::{resolve_index, resolve_unbounded_index, resolve_unbounded_slice, Slice};
use crate::error::{Error, Result};

/// Repetition
///
/// A fixed number of positions that all alias one shared slot.
///
/// Writing to any position replaces the shared value, so every position
/// observes the write. Slices of a repetition alias the same slot. There is
/// no way to give one position a value of its own: a repetition is a single
/// value seen `times` times, not `times` copies of it.
///
#[derive(Debug, Clone)]
pub struct Repetition<T> {
    slot: Rc<RefCell<T>>,
    times: usize,
}

impl<T: Clone + 'static> Repetition<T> {
    pub fn new(value: T, times: usize) -> Self {
        Repetition {
            slot: Rc::new(RefCell::new(value)),
            times,
        }
    }

    /// The current value of the shared slot
    pub fn value(&self) -> T {
        self.slot.borrow().clone()
    }
}

impl<T: Clone + 'static> Sequence<T> for Repetition<T> {
    fn name(&self) -> &'static str {
        "Repetition"
    }

    fn len(&self) -> Option<usize> {
        Some(self.times)
    }

    fn get(&self, index: isize) -> Result<T> {
        resolve_index(self.name(), index, self.times)?;
        Ok(self.value())
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        resolve_index(self.name(), index, self.times)?;
        *self.slot.borrow_mut() = value;
        Ok(())
    }

    fn slice(&self, slice: Slice) -> Result<View<T>> {
        let times = slice.indices(self.times)?.len;
        Ok(View::new(Repetition {
            slot: Rc::clone(&self.slot),
            times,
        }))
    }

    /// Values are written in order, so the last one is left in the slot
    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        assign_each(self, self.times, slice, values)
    }

    fn iter(&self) -> Iter<'_, T> {
        Box::new((0..self.times).map(|_| Ok(self.value())))
    }
}

impl<T: Clone + 'static> IntoView<T> for Repetition<T> {
    fn into_view(self) -> View<T> {
        View::new(self)
    }
}

/// Unbounded Repetition
///
/// One shared value at every non-negative position.
///
#[derive(Debug, Clone)]
pub struct UnboundedRepetition<T> {
    slot: Rc<RefCell<T>>,
}

impl<T: Clone + 'static> UnboundedRepetition<T> {
    pub fn new(value: T) -> Self {
        UnboundedRepetition {
            slot: Rc::new(RefCell::new(value)),
        }
    }

    pub fn value(&self) -> T {
        self.slot.borrow().clone()
    }

    /// Number of positions a slice selects
    ///
    /// Counts the elements of the progression from `start` up to, but
    /// excluding, `stop`. A step pointing away from `stop` selects nothing.
    ///
    fn count(&self, slice: &Slice) -> Result<usize> {
        let (start, stop) = resolve_unbounded_slice(self.name(), slice)?;
        let step = slice.step()?;

        let span = stop - start;
        if span == 0 || span.signum() != step.signum() {
            return Ok(0);
        }

        let count = (span.unsigned_abs() - 1) / step.unsigned_abs() + 1;
        tracing::trace!(start, stop, step, count, "counting unbounded repetition slice");
        Ok(count)
    }
}

impl<T: Clone + 'static> Sequence<T> for UnboundedRepetition<T> {
    fn name(&self) -> &'static str {
        "InfiniteRepetition"
    }

    fn len(&self) -> Option<usize> {
        None
    }

    fn get(&self, index: isize) -> Result<T> {
        resolve_unbounded_index(self.name(), index)?;
        Ok(self.value())
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        resolve_unbounded_index(self.name(), index)?;
        *self.slot.borrow_mut() = value;
        Ok(())
    }

    /// A slice is a bounded repetition of the current value with a slot of
    /// its own. Writes to it do not reach this view.
    fn slice(&self, slice: Slice) -> Result<View<T>> {
        match self.count(&slice)? {
            0 => Ok(View::from(Vec::new())),
            n => Ok(View::new(Repetition::new(self.value(), n))),
        }
    }

    /// Last write wins
    ///
    /// Assigning to a non-empty slice leaves the last assigned value in the
    /// slot. Assigning to an empty slice does nothing.
    ///
    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        let n = self.count(&slice)?;
        if n == 0 {
            return Ok(());
        }

        match values.into_iter().last() {
            Some(value) => {
                *self.slot.borrow_mut() = value;
                Ok(())
            }
            None => Err(Error::ShapeMismatch {
                view: self.name(),
                expected: n,
                found: 0,
            }),
        }
    }

    fn iter(&self) -> Iter<'_, T> {
        Box::new(std::iter::repeat_with(|| Ok(self.value())))
    }
}

impl<T: Clone + 'static> IntoView<T> for UnboundedRepetition<T> {
    fn into_view(self) -> View<T> {
        View::new(self)
    }
}

/// Return a view of the repeated value with an optional size limit
///
/// Without a limit the view is unbounded. A limit must be greater than one.
///
/// ```
/// use seqview::sequence::{repeat, Sequence, Slice};
///
/// let r = repeat(5, None).unwrap();
/// let s = r.slice(Slice::new(Some(2), Some(9), Some(2))).unwrap();
/// assert_eq!(s.materialize(), Ok(vec![5, 5, 5, 5]));
///
/// let r = repeat('a', Some(3)).unwrap();
/// r.set(0, 'b').unwrap();
/// assert_eq!(r.materialize(), Ok(vec!['b', 'b', 'b']));
/// ```
///
pub fn repeat<T>(value: T, times: Option<isize>) -> Result<View<T>>
where
    T: Clone + 'static,
{
    match times {
        None => Ok(View::new(UnboundedRepetition::new(value))),
        Some(n) if n > 1 => Ok(View::new(Repetition::new(value, n as usize))),
        Some(_) => Err(Error::InvalidArgument(
            "times must be a positive integer or unbounded".to_string(),
        )),
    }
}
