use super::core::{assign_each, Iter, IntoView, Sequence, View};
use super::indexed::IndexedView;
use super::key::{resolve_index, resolve_unbounded_index, resolve_unbounded_slice, Slice};
use crate::error::{Error, Result};

/// Map a position onto a base of length `len`
///
/// Unbounded bases are never exhausted, so positions map onto themselves.
///
fn wrap(view: &'static str, position: usize, len: Option<usize>) -> Result<isize> {
    match len {
        Some(0) => Err(Error::DivideByZero(view)),
        Some(n) => Ok((position % n) as isize),
        None => Ok(position as isize),
    }
}

/// Bounded Cycle
///
/// A window of `size` elements over the base sequence repeated end to end:
/// position `k` reads and writes `base[k mod len(base)]`.
///
#[derive(Debug, Clone)]
pub struct BoundedCycle<T> {
    base: View<T>,
    size: usize,
}

impl<T: Clone + 'static> BoundedCycle<T> {
    pub fn new(base: View<T>, size: usize) -> Self {
        BoundedCycle { base, size }
    }

    pub fn base(&self) -> &View<T> {
        &self.base
    }

    fn position(&self, index: isize) -> Result<isize> {
        let k = resolve_index(self.name(), index, self.size)?;
        wrap(self.name(), k, self.base.len())
    }
}

impl<T: Clone + 'static> Sequence<T> for BoundedCycle<T> {
    fn name(&self) -> &'static str {
        "Cycle"
    }

    fn len(&self) -> Option<usize> {
        Some(self.size)
    }

    fn get(&self, index: isize) -> Result<T> {
        self.base.get(self.position(index)?)
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        self.base.set(self.position(index)?, value)
    }

    /// Slicing selects the wrapped positions directly from the base
    fn slice(&self, slice: Slice) -> Result<View<T>> {
        let n = self.base.len();
        let indexes = slice
            .indices(self.size)?
            .iter()
            .map(|k| wrap(self.name(), k as usize, n))
            .collect::<Result<Vec<_>>>()?;

        IndexedView::new(self.base.clone(), indexes).map(View::new)
    }

    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        assign_each(self, self.size, slice, values)
    }

    fn iter(&self) -> Iter<'_, T> {
        Box::new((0..self.size).map(|k| {
            let i = wrap(self.name(), k, self.base.len())?;
            self.base.get(i)
        }))
    }
}

impl<T: Clone + 'static> IntoView<T> for BoundedCycle<T> {
    fn into_view(self) -> View<T> {
        View::new(self)
    }
}

/// Unbounded Cycle
///
/// The base sequence repeated forever. Only positions counted from the front
/// are meaningful, so negative indices and open-ended slices are rejected.
///
#[derive(Debug, Clone)]
pub struct UnboundedCycle<T> {
    base: View<T>,
}

impl<T: Clone + 'static> UnboundedCycle<T> {
    pub fn new(base: View<T>) -> Self {
        UnboundedCycle { base }
    }

    pub fn base(&self) -> &View<T> {
        &self.base
    }

    /// Reduce a slice to an equivalent slice of a bounded cycle
    ///
    /// Both bounds are shifted down by the same whole number of periods, so
    /// that the lower one lands in the first period, and the cycle is made
    /// just long enough to contain them.
    ///
    fn reduce(&self, slice: &Slice) -> Result<(BoundedCycle<T>, Slice)> {
        let (start, stop) = resolve_unbounded_slice(self.name(), slice)?;
        let step = slice.step()?;

        let offset = match self.base.len() {
            Some(0) => return Err(Error::DivideByZero(self.name())),
            Some(n) => {
                let lower = start.min(stop);
                lower - lower % n as isize
            }
            None => 0,
        };

        let (start, stop) = (start - offset, stop - offset);
        let size = if step < 0 {
            // a descending slice reads `start` itself
            let end = start.checked_add(1).ok_or(Error::OutOfRange(self.name()))?;
            stop.max(end)
        } else {
            stop
        };

        tracing::trace!(offset, start, stop, size, "reducing unbounded cycle slice");

        let cycle = BoundedCycle::new(self.base.clone(), size as usize);
        Ok((cycle, Slice::new(Some(start), Some(stop), Some(step))))
    }
}

impl<T: Clone + 'static> Sequence<T> for UnboundedCycle<T> {
    fn name(&self) -> &'static str {
        "InfiniteCycle"
    }

    fn len(&self) -> Option<usize> {
        None
    }

    fn get(&self, index: isize) -> Result<T> {
        let k = resolve_unbounded_index(self.name(), index)?;
        self.base.get(wrap(self.name(), k, self.base.len())?)
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        let k = resolve_unbounded_index(self.name(), index)?;
        self.base.set(wrap(self.name(), k, self.base.len())?, value)
    }

    fn slice(&self, slice: Slice) -> Result<View<T>> {
        let (cycle, slice) = self.reduce(&slice)?;
        cycle.slice(slice)
    }

    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        let (cycle, slice) = self.reduce(&slice)?;
        cycle.assign(slice, values)
    }

    fn iter(&self) -> Iter<'_, T> {
        Box::new((0..).map(|k| {
            let i = wrap(self.name(), k, self.base.len())?;
            self.base.get(i)
        }))
    }
}

impl<T: Clone + 'static> IntoView<T> for UnboundedCycle<T> {
    fn into_view(self) -> View<T> {
        View::new(self)
    }
}

/// Return a view of the repeated sequence with an optional size limit
///
/// Without a limit the view is unbounded.
///
/// ```
/// use seqview::sequence::{cycle, Sequence};
///
/// let c = cycle(vec![1, 2, 3], Some(7)).unwrap();
/// assert_eq!(c.materialize(), Ok(vec![1, 2, 3, 1, 2, 3, 1]));
///
/// let c = cycle(vec![1, 2, 3], None).unwrap();
/// assert_eq!(c.get(10), Ok(2));
/// assert_eq!(c.slice((4..8).into()).unwrap().materialize(), Ok(vec![2, 3, 1, 2]));
/// ```
///
pub fn cycle<T, S>(sequence: S, limit: Option<isize>) -> Result<View<T>>
where
    T: Clone + 'static,
    S: IntoView<T>,
{
    let base = sequence.into_view();
    match limit {
        None => Ok(View::new(UnboundedCycle::new(base))),
        Some(n) if n >= 0 => Ok(View::new(BoundedCycle::new(base, n as usize))),
        Some(n) => Err(Error::InvalidArgument(format!(
            "limit must be a non-negative integer or unbounded, not {n}"
        ))),
    }
}
