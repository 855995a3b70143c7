use super::core::{Iter, IntoView, Sequence, View};
use super::key::{resolve_index, resolve_unbounded_index, Slice};
use crate::error::{Error, Result};

/// Indexed View
///
/// Reorders or selects the elements of a base sequence through an explicit
/// list of indexes. Indexes may repeat and may appear in any order; they are
/// only checked against the base when they are used, since the base may
/// change size after the view is created.
///
/// Building an `IndexedView` over another `IndexedView` composes the two
/// index lists up front and keeps the innermost base, so reads and writes go
/// through a single level of indirection no matter how deeply views are
/// nested.
///
#[derive(Debug, Clone)]
pub struct IndexedView<T> {
    base: View<T>,
    indexes: Vec<isize>,
}

impl<T: Clone + 'static> IndexedView<T> {
    pub fn new(base: View<T>, indexes: Vec<isize>) -> Result<Self> {
        if let Some(inner) = base.as_indexed() {
            tracing::trace!(
                outer = indexes.len(),
                inner = inner.indexes.len(),
                "flattening nested indexed view"
            );

            let n = inner.indexes.len();
            let indexes = indexes
                .into_iter()
                .map(|i| Ok(inner.indexes[resolve_index(inner.name(), i, n)?]))
                .collect::<Result<Vec<_>>>()?;

            return Ok(IndexedView {
                base: inner.base.clone(),
                indexes,
            });
        }

        Ok(IndexedView { base, indexes })
    }

    /// The sequence positions are ultimately read from
    pub fn base(&self) -> &View<T> {
        &self.base
    }

    pub fn indexes(&self) -> &[isize] {
        &self.indexes
    }

    fn position(&self, index: isize) -> Result<isize> {
        let i = resolve_index(self.name(), index, self.indexes.len())?;
        Ok(self.indexes[i])
    }
}

impl<T: Clone + 'static> Sequence<T> for IndexedView<T> {
    fn name(&self) -> &'static str {
        "IndexedView"
    }

    fn len(&self) -> Option<usize> {
        Some(self.indexes.len())
    }

    fn get(&self, index: isize) -> Result<T> {
        self.base.get(self.position(index)?)
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        self.base.set(self.position(index)?, value)
    }

    fn slice(&self, slice: Slice) -> Result<View<T>> {
        let indexes = slice
            .indices(self.indexes.len())?
            .iter()
            .map(|i| self.indexes[i as usize])
            .collect();

        Ok(View::new(IndexedView {
            base: self.base.clone(),
            indexes,
        }))
    }

    /// Assignment is all-or-nothing: the shape and every target are checked
    /// against the base before the first write.
    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        let targets: Vec<isize> = slice
            .indices(self.indexes.len())?
            .iter()
            .map(|i| self.indexes[i as usize])
            .collect();

        if targets.len() != values.len() {
            return Err(Error::ShapeMismatch {
                view: self.name(),
                expected: targets.len(),
                found: values.len(),
            });
        }

        let name = self.base.name();
        for &i in &targets {
            match self.base.len() {
                Some(n) => resolve_index(name, i, n)?,
                None => resolve_unbounded_index(name, i)?,
            };
        }

        targets
            .into_iter()
            .zip(values)
            .try_for_each(|(i, x)| self.base.set(i, x))
    }

    fn iter(&self) -> Iter<'_, T> {
        Box::new(self.indexes.iter().map(|&i| self.base.get(i)))
    }

    fn as_indexed(&self) -> Option<&IndexedView<T>> {
        Some(self)
    }
}

impl<T: Clone + 'static> IntoView<T> for IndexedView<T> {
    fn into_view(self) -> View<T> {
        View::new(self)
    }
}

/// Return a view on the sequence reordered by indexes
///
/// ```
/// use seqview::sequence::{take, Sequence, VecData};
///
/// let s = VecData::from(vec![10, 20, 30, 40]);
/// let v = take(s.clone(), [3, 0, 1]).unwrap();
///
/// assert_eq!(v.materialize(), Ok(vec![40, 10, 20]));
///
/// v.set(1, 99).unwrap();
/// assert_eq!(s.to_vec(), vec![99, 20, 30, 40]);
/// ```
///
pub fn take<T, S, I>(sequence: S, indexes: I) -> Result<View<T>>
where
    T: Clone + 'static,
    S: IntoView<T>,
    I: IntoIterator<Item = isize>,
{
    let view = IndexedView::new(sequence.into_view(), indexes.into_iter().collect())?;
    Ok(View::new(view))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::sequence::{cycle, SequenceExt, VecData};

    fn data() -> VecData<i32> {
        VecData::from(vec![10, 20, 30, 40])
    }

    #[test]
    fn reordering() {
        let s = data();
        let v = take(s.clone(), [3, 0, 1]).unwrap();

        assert_eq!(v.len(), Some(3));
        assert_eq!(v.get(0), Ok(40));
        assert_eq!(v.get(-1), Ok(20));

        v.set(1, 99).unwrap();
        assert_eq!(s.to_vec(), vec![99, 20, 30, 40]);

        v.set(-2, 11).unwrap();
        assert_eq!(s.to_vec(), vec![11, 20, 30, 40]);
    }

    #[test]
    fn out_of_range() {
        let v = take(data(), [3, 0, 1]).unwrap();
        assert_eq!(v.get(3), Err(Error::OutOfRange("IndexedView")));
        assert_eq!(v.get(-4), Err(Error::OutOfRange("IndexedView")));
        assert_eq!(v.set(5, 0), Err(Error::OutOfRange("IndexedView")));
    }

    #[test]
    fn duplicates_alias_one_position() {
        let s = data();
        let v = take(s.clone(), [2, 2, 2]).unwrap();
        v.set(0, 7).unwrap();
        assert_eq!(v.materialize(), Ok(vec![7, 7, 7]));
        assert_eq!(s.to_vec(), vec![10, 20, 7, 40]);
    }

    #[test]
    fn stale_indexes_fail_on_access() {
        let s = data();
        let v = take(s.clone(), [3, 0]).unwrap();
        s.with_inner_mut(|x| x.truncate(2));
        assert_eq!(v.get(1), Ok(10));
        assert_eq!(v.get(0), Err(Error::OutOfRange("list")));
        assert_eq!(v.materialize(), Err(Error::OutOfRange("list")));
    }

    #[test]
    fn slicing_keeps_the_base() {
        let s = data();
        let v = take(s.clone(), [3, 2, 1, 0]).unwrap();
        let w = v.slice(Slice::new(None, None, Some(-2))).unwrap();

        assert_eq!(w.materialize(), Ok(vec![10, 30]));
        let iw = w.as_indexed().unwrap();
        assert_eq!(iw.indexes(), &[0, 2]);

        w.set(0, 0).unwrap();
        assert_eq!(s.to_vec(), vec![0, 20, 30, 40]);

        let empty = v.slice((3..1).into()).unwrap();
        assert_eq!(empty.len(), Some(0));
        assert_eq!(
            v.slice(Slice::full().with_step(0)).err(),
            Some(Error::InvalidStep)
        );
    }

    #[test]
    fn slice_assignment() {
        let s = data();
        let v = take(s.clone(), [3, 2, 1, 0]).unwrap();
        v.assign((1..3).into(), vec![-2, -1]).unwrap();
        assert_eq!(s.to_vec(), vec![10, -1, -2, 40]);
    }

    #[test]
    fn slice_assignment_is_one_to_one() {
        let s = data();
        let v = take(s.clone(), [3, 2, 1, 0]).unwrap();
        let err = v.assign((1..3).into(), vec![1, 2, 3]);
        assert_eq!(
            err,
            Err(Error::ShapeMismatch {
                view: "IndexedView",
                expected: 2,
                found: 3
            })
        );
        assert_eq!(s.to_vec(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn slice_assignment_is_all_or_nothing() {
        let s = data();
        let v = take(s.clone(), [0, 9, 1]).unwrap();
        let err = v.assign(Slice::full(), vec![1, 2, 3]);
        assert_eq!(err, Err(Error::OutOfRange("list")));
        assert_eq!(s.to_vec(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn slice_assignment_over_a_cycle_is_all_or_nothing() {
        let s = VecData::from(vec![1, 2, 3]);
        let v = take(cycle(s.clone(), None).unwrap(), [0, -1]).unwrap();
        let err = v.assign(Slice::full(), vec![10, 20]);
        assert_eq!(err, Err(Error::InvalidIndex("InfiniteCycle")));
        assert_eq!(s.to_vec(), vec![1, 2, 3]);

        let v = take(cycle(s.clone(), None).unwrap(), [4, 0]).unwrap();
        v.assign(Slice::full(), vec![10, 20]).unwrap();
        assert_eq!(s.to_vec(), vec![20, 10, 3]);
    }

    #[test]
    fn nested_views_are_flattened() {
        let s: View<i32> = data().into_view();
        let inner = take(s.clone(), [3, 2, 1, 0]).unwrap();
        let outer = take(inner.clone(), [0, -1, 1]).unwrap();

        assert_eq!(outer.materialize(), Ok(vec![40, 10, 30]));

        let indexed = outer.as_indexed().unwrap();
        assert!(indexed.base().ptr_eq(&s));
        assert_eq!(indexed.indexes(), &[3, 0, 2]);
    }

    #[test]
    fn flattening_checks_outer_indexes() {
        let inner = take(data(), [3, 2]).unwrap();
        assert_eq!(
            take(inner, [0, 2]).err(),
            Some(Error::OutOfRange("IndexedView"))
        );
    }

    #[test]
    fn keyed_access() {
        let v = take(data(), [1, 3]).unwrap();
        assert_eq!(v.getitem(-1).unwrap().into_item(), Some(40));

        let w = v.getitem(..1).unwrap().into_view().unwrap();
        assert_eq!(w.materialize(), Ok(vec![20]));
    }

    #[test]
    fn random_permutations() {
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..20 {
            let n = rng.gen_range(1..30);
            let values: Vec<i32> = (0..n).map(|_| rng.gen_range(-100..100)).collect();
            let s = VecData::from(values.clone());

            let mut i: Vec<isize> = (0..n as isize).collect();
            i.shuffle(&mut rng);
            let mut j: Vec<isize> = (0..n as isize).collect();
            j.shuffle(&mut rng);

            let vi = take(s.clone(), i.clone()).unwrap();
            let vij = take(vi.clone(), j.clone()).unwrap();

            for k in 0..n {
                let expect = values[i[j[k] as usize] as usize];
                assert_eq!(vij.get(k as isize), Ok(expect));
                assert_eq!(vi.get(k as isize), Ok(values[i[k] as usize]));
            }

            let k = rng.gen_range(0..n);
            vij.set(k as isize, 1000).unwrap();
            assert_eq!(s.get(i[j[k] as usize]), Ok(1000));
        }
    }
}
