//! Index-translating views over mutable sequences
//!
//! A view never copies the elements of its base. Reads translate the
//! requested position into a position of the base and read it there; writes
//! translate the same way and write through. Views are sequences themselves,
//! so they can be layered freely:
//!
//! ```
//! use seqview::sequence::{cycle, take, Sequence, VecData};
//!
//! let data = VecData::from(vec![1, 2, 3]);
//! let view = cycle(take(data.clone(), [2, 0]).unwrap(), Some(5)).unwrap();
//!
//! assert_eq!(view.materialize(), Ok(vec![3, 1, 3, 1, 3]));
//!
//! view.set(3, 10).unwrap();
//! assert_eq!(data.to_vec(), vec![10, 2, 3]);
//! ```
//!

mod key;
pub use key::*;

mod core;
pub use core::*;

mod data;
pub use data::*;

mod indexed;
pub use indexed::*;

mod cycle;
pub use cycle::*;

mod repeat;
pub use repeat::*;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::error::Error;

    #[test]
    fn writes_reach_the_base_through_every_layer() {
        let s = VecData::from(vec![0, 1, 2, 3, 4, 5]);
        let v = take(s.clone(), [5, 4, 3, 2, 1, 0]).unwrap();
        let c = cycle(v.clone(), Some(9)).unwrap();
        let w = c.slice(Slice::new(Some(1), None, Some(3))).unwrap();

        // w[k] = c[1 + 3k] = v[(1 + 3k) mod 6] = s[5 - (1 + 3k) mod 6]
        assert_eq!(w.materialize(), Ok(vec![4, 1, 4]));

        w.set(1, 100).unwrap();
        assert_eq!(s.to_vec(), vec![0, 100, 2, 3, 4, 5]);
        assert_eq!(c.get(4), Ok(100));
        assert_eq!(v.get(4), Ok(100));
    }

    #[test]
    fn views_observe_later_base_writes() {
        let s = VecData::from(vec!['a', 'b', 'c']);
        let c = cycle(s.clone(), None).unwrap();
        let t = take(c.clone(), [0, 4, 8]).unwrap();

        assert_eq!(t.materialize(), Ok(vec!['a', 'b', 'c']));
        s.set(1, 'z').unwrap();
        assert_eq!(t.materialize(), Ok(vec!['a', 'z', 'c']));
    }

    #[test]
    fn bounded_and_unbounded_cycles_agree() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            let n = rng.gen_range(1..8);
            let size = rng.gen_range(0..40);
            let values: Vec<i32> = (0..n).collect();

            let bounded = cycle(values.clone(), Some(size)).unwrap();
            let unbounded = cycle(values.clone(), None).unwrap();

            for k in 0..size {
                assert_eq!(bounded.get(k), unbounded.get(k));
                assert_eq!(bounded.get(k), Ok(values[(k % n as isize) as usize]));
            }

            // bounded slices clamp a start past the end, so keep it in range
            let start = rng.gen_range(0..size.max(1));
            let stop = rng.gen_range(0..=size);
            let step = [-3, -1, 1, 2, 5][rng.gen_range(0..5)];
            let slice = Slice::new(Some(start), Some(stop), Some(step));

            assert_eq!(
                bounded.slice(slice.clone()).unwrap().materialize(),
                unbounded.slice(slice).unwrap().materialize(),
            );
        }
    }

    #[test]
    fn unbounded_views_reject_relative_positions() {
        let c = cycle(vec![1], None).unwrap();
        let r = repeat(1, None).unwrap();

        for v in [c, r] {
            let err = Some(Error::InvalidIndex(v.name()));
            assert_eq!(v.get(-1).err(), err);
            assert_eq!(v.slice((..).into()).err(), err);
            assert_eq!(v.getitem(-2).err(), err);
            assert!(v.materialize().is_err());
        }
    }

    #[test]
    fn bounded_views_report_their_length() {
        let s = VecData::from(vec![1, 2, 3]);
        let views = [
            take(s.clone(), [0, 0]).unwrap(),
            cycle(s.clone(), Some(7)).unwrap(),
            repeat(1, Some(4)).unwrap(),
        ];

        for v in views {
            let n = v.len().unwrap();
            assert_eq!(v.iter().count(), n);
            assert_eq!(v.get(n as isize).err(), Some(Error::OutOfRange(v.name())));
            assert!(v.get(-(n as isize)).is_ok());
        }
    }

    #[test]
    fn keys_of_the_wrong_kind() {
        let v = take(vec![1, 2, 3], [0, 1]).unwrap();
        assert_eq!(
            v.getitem(u64::MAX as usize).err(),
            Some(Error::TypeMismatch {
                view: "IndexedView",
                found: "usize".to_string()
            })
        );

        assert_eq!(
            v.setitem(0, Assignment::Items(vec![1])).err(),
            Some(Error::InvalidArgument(
                "IndexedView index assignment requires a single value".to_string()
            ))
        );

        v.setitem(.., Assignment::Items(vec![5, 6])).unwrap();
        assert_eq!(v.materialize(), Ok(vec![5, 6]));
    }
}
