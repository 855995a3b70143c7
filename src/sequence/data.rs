use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::core::{Iter, IntoView, Sequence, View};
use super::key::{resolve_index, Slice};
use crate::error::{Error, Result};

/// Vector Data
///
/// The base sequence views are built over. It allows both to get mutable
/// views of the vector and to create lazy copies of it. The former is what
/// views hold, so that writes through a view land in the original data; the
/// latter is an independent copy-on-write snapshot.
///
/// Cloning a `VecData` shares it (the same as [`VecData::mutable_view`]).
///
#[derive(Debug)]
pub struct VecData<T>(Rc<RefCell<Rc<Vec<T>>>>);

pub struct VecDataIter<T> {
    data: VecData<T>,
    index: usize,
}

impl<T> VecDataIter<T> {
    pub fn new(data: VecData<T>) -> Self {
        VecDataIter { data, index: 0 }
    }
}

impl<T: Clone> Iterator for VecDataIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let vec = self.data.0.borrow();
        let item = vec.get(self.index).cloned();
        self.index += 1;
        item
    }
}

impl<T> Clone for VecData<T> {
    fn clone(&self) -> Self {
        self.mutable_view()
    }
}

impl<T> VecData<T> {
    pub fn new(x: Rc<RefCell<Rc<Vec<T>>>>) -> Self {
        VecData(x)
    }

    /// Create a (lazy) copy of the data.
    pub fn lazy_copy(&self) -> Self {
        Self::new(Rc::new(RefCell::new(self.0.borrow().clone())))
    }

    // Create a mutable view on the data.
    pub fn mutable_view(&self) -> Self {
        Self::new(Rc::clone(&self.0))
    }

    /// Get a mutable access to the data.
    pub fn borrow_mut(&self) -> RefMut<'_, Rc<Vec<T>>> {
        self.0.borrow_mut()
    }

    // Borrow the internal data immutably.
    pub fn borrow(&self) -> Ref<'_, Rc<Vec<T>>> {
        self.0.borrow()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> VecData<T> {
    /// Iterate over the elements, reading one element per step
    pub fn iter(&self) -> VecDataIter<T> {
        VecDataIter::new(self.mutable_view())
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.borrow().as_ref().clone()
    }

    pub fn with_inner<F, U>(&self, f: F) -> U
    where
        F: FnOnce(&Vec<T>) -> U,
    {
        let vec_rc = self.0.borrow();
        f(vec_rc.as_ref())
    }

    /// Mutate the data in place, copying it first if a lazy copy still
    /// shares it.
    pub fn with_inner_mut<F, U>(&self, f: F) -> U
    where
        F: FnOnce(&mut Vec<T>) -> U,
    {
        let mut vec_rc = self.0.borrow_mut();
        f(Rc::make_mut(&mut vec_rc))
    }
}

impl<T> From<Vec<T>> for VecData<T> {
    fn from(x: Vec<T>) -> Self {
        VecData::new(Rc::new(RefCell::new(Rc::new(x))))
    }
}

impl<T: Clone + 'static> From<Vec<T>> for View<T> {
    fn from(x: Vec<T>) -> Self {
        View::new(VecData::from(x))
    }
}

impl<T: Clone + 'static> IntoView<T> for VecData<T> {
    fn into_view(self) -> View<T> {
        View::new(self)
    }
}

impl<T: Clone + 'static> IntoView<T> for Vec<T> {
    fn into_view(self) -> View<T> {
        View::from(self)
    }
}

impl<T: Clone + 'static> Sequence<T> for VecData<T> {
    fn name(&self) -> &'static str {
        "list"
    }

    fn len(&self) -> Option<usize> {
        Some(VecData::len(self))
    }

    fn get(&self, index: isize) -> Result<T> {
        self.with_inner(|v| {
            let i = resolve_index(self.name(), index, v.len())?;
            Ok(v[i].clone())
        })
    }

    fn set(&self, index: isize, value: T) -> Result<()> {
        let i = resolve_index(self.name(), index, VecData::len(self))?;
        self.with_inner_mut(|v| v[i] = value);
        Ok(())
    }

    /// Slicing a list copies the selected elements into a new list
    fn slice(&self, slice: Slice) -> Result<View<T>> {
        let selected = self.with_inner(|v| -> Result<Vec<T>> {
            let indices = slice.indices(v.len())?;
            Ok(indices.iter().map(|i| v[i as usize].clone()).collect())
        })?;
        Ok(View::from(selected))
    }

    /// Contiguous slices are spliced and may change the length of the list;
    /// extended slices must be assigned exactly as many values as they select.
    fn assign(&self, slice: Slice, values: Vec<T>) -> Result<()> {
        let indices = slice.indices(VecData::len(self))?;

        if indices.step == 1 {
            let start = indices.start as usize;
            let stop = (indices.stop as usize).max(start);
            self.with_inner_mut(|v| {
                v.splice(start..stop, values);
            });
            return Ok(());
        }

        if indices.len != values.len() {
            return Err(Error::ShapeMismatch {
                view: self.name(),
                expected: indices.len,
                found: values.len(),
            });
        }

        self.with_inner_mut(|v| {
            for (i, x) in indices.iter().zip(values) {
                v[i as usize] = x;
            }
        });
        Ok(())
    }

    fn iter(&self) -> Iter<'_, T> {
        Box::new(VecData::iter(self).map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::VecData;
    use crate::error::Error;
    use crate::sequence::{Sequence, Slice};
    use std::ptr;
    use std::rc::Rc;

    #[test]
    fn lazy_copy() {
        let x1: VecData<i32> = vec![1].into();

        let x2: VecData<i32> = x1.lazy_copy();
        let x3: VecData<i32> = x1.lazy_copy();
        let x4 = x1.mutable_view();

        // all point to the same data
        assert!(ptr::eq(x1.borrow().as_ref(), x2.borrow().as_ref()));
        assert!(ptr::eq(x2.borrow().as_ref(), x3.borrow().as_ref()));
        assert!(ptr::eq(x3.borrow().as_ref(), x4.borrow().as_ref()));

        // mutate x4 and thereby also x1
        {
            let mut b = x4.borrow_mut();
            let xmm = Rc::make_mut(&mut b);

            xmm[0] = 10;
        }
        assert_eq!(x1.borrow().as_ref()[0], 10);
        assert_eq!(x4.borrow().as_ref()[0], 10);

        // they still point to the same data
        assert!(ptr::eq(x1.borrow().as_ref(), x4.borrow().as_ref()));

        // now we modify x2, which should not modify anything else
        x2.set(0, -10).unwrap();
        assert_eq!(x2.borrow().as_ref()[0], -10);
        assert_eq!(x3.borrow().as_ref()[0], 1);
    }

    #[test]
    fn mutable_view() {
        let x: VecData<i32> = vec![1, 2, 3].into();
        let y = x.clone();
        y.set(-1, 30).unwrap();
        assert_eq!(x.to_vec(), vec![1, 2, 30]);
    }

    #[test]
    fn index_convention() {
        let x: VecData<i32> = vec![1, 2, 3].into();
        assert_eq!(x.get(-3), Ok(1));
        assert_eq!(x.get(3), Err(Error::OutOfRange("list")));
        assert_eq!(x.set(-4, 0), Err(Error::OutOfRange("list")));
    }

    #[test]
    fn slices_are_copies() {
        let x: VecData<i32> = vec![1, 2, 3, 4].into();
        let y = x.slice(Slice::full().with_step(-2)).unwrap();
        assert_eq!(y.materialize(), Ok(vec![4, 2]));
        y.set(0, 40).unwrap();
        assert_eq!(x.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn contiguous_assignment_resizes() {
        let x: VecData<i32> = vec![1, 2, 3, 4].into();
        x.assign((1..3).into(), vec![7]).unwrap();
        assert_eq!(x.to_vec(), vec![1, 7, 4]);
        x.assign((3..).into(), vec![8, 9]).unwrap();
        assert_eq!(x.to_vec(), vec![1, 7, 4, 8, 9]);
        x.assign((3..1).into(), vec![0]).unwrap();
        assert_eq!(x.to_vec(), vec![1, 7, 4, 0, 8, 9]);
    }

    #[test]
    fn extended_assignment_is_one_to_one() {
        let x: VecData<i32> = vec![1, 2, 3, 4].into();
        x.assign(Slice::full().with_step(2), vec![10, 30]).unwrap();
        assert_eq!(x.to_vec(), vec![10, 2, 30, 4]);

        let err = x.assign(Slice::full().with_step(2), vec![0]);
        assert_eq!(
            err,
            Err(Error::ShapeMismatch {
                view: "list",
                expected: 2,
                found: 1
            })
        );
        assert_eq!(x.to_vec(), vec![10, 2, 30, 4]);
    }

    #[test]
    fn iteration_observes_writes() {
        let x: VecData<i32> = vec![1, 2, 3].into();
        let mut it = x.iter();
        assert_eq!(it.next(), Some(1));
        x.set(1, 20).unwrap();
        assert_eq!(it.collect::<Vec<_>>(), vec![20, 3]);
    }
}
