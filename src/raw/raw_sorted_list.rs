use alloc::vec::Vec;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;

/// Ascending sequence of arena-resident values.
///
/// `order[i]` addresses the `i`-th smallest value. Positions shift on insert and remove; handles
/// do not, so a value never moves once it is in the arena.
#[derive(Clone)]
pub(crate) struct RawSortedList<T> {
    arena: Arena<T>,
    order: Vec<Handle>,
}

/// Whether `value` can take part in an ordering at all. Rejects `NaN`.
#[inline]
pub(crate) fn is_admissible<T: PartialOrd>(value: &T) -> bool {
    value.partial_cmp(value).is_some()
}

impl<T> RawSortedList<T> {
    pub(crate) const fn new() -> Self {
        Self {
            arena: Arena::new(),
            order: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub(crate) fn handles(&self) -> &[Handle] {
        &self.order
    }

    #[inline]
    pub(crate) const fn arena(&self) -> &Arena<T> {
        &self.arena
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.order.get(index).map(|&h| self.arena.get(h))
    }

    /// Binary search for `value`: `Ok(index)` if an equal element sits at `index`, otherwise
    /// `Err(index)` with the position that keeps the sequence ascending.
    ///
    /// Incomparable pairs are treated as "stored value is smaller", which only matters for values
    /// that [`is_admissible`] would have refused.
    pub(crate) fn locate(&self, value: &T) -> Result<usize, usize>
    where
        T: PartialOrd,
    {
        self.order.binary_search_by(|&h| self.arena.get(h).partial_cmp(value).unwrap_or(Ordering::Less))
    }

    /// Places `value` at `index`. The caller guarantees `index` came from [`locate`](Self::locate)
    /// on the current contents.
    pub(crate) fn insert_at(&mut self, index: usize, value: T) {
        let handle = self.arena.alloc(value);
        self.order.insert(index, handle);
        debug_assert_eq!(self.arena.len(), self.order.len());
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> T {
        let handle = self.order.remove(index);
        let value = self.arena.take(handle);
        debug_assert_eq!(self.arena.len(), self.order.len());
        value
    }

    /// Drops every element for which `keep` returns `false`, in ascending order.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let arena = &mut self.arena;
        self.order.retain(|&h| {
            if keep(arena.get(h)) {
                true
            } else {
                arena.free(h);
                false
            }
        });
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.arena.clear();
    }

    pub(crate) fn into_parts(self) -> (Arena<T>, Vec<Handle>) {
        (self.arena, self.order)
    }
}

#[cfg(test)]
#[allow(clippy::approx_constant, clippy::float_cmp)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn insert(list: &mut RawSortedList<f64>, value: f64) -> bool {
        match list.locate(&value) {
            Ok(_) => false,
            Err(index) => {
                list.insert_at(index, value);
                true
            }
        }
    }

    fn values(list: &RawSortedList<f64>) -> Vec<f64> {
        (0..list.len()).filter_map(|i| list.get(i).copied()).collect()
    }

    #[test]
    fn nan_is_not_admissible() {
        assert!(!is_admissible(&f64::NAN));
        assert!(is_admissible(&f64::INFINITY));
        assert!(is_admissible(&-0.0_f64));
    }

    #[test]
    fn locate_reports_insertion_points() {
        let mut list = RawSortedList::new();
        for v in [3.14, 2.71, 1.41] {
            assert!(insert(&mut list, v));
        }

        assert_eq!(values(&list), [1.41, 2.71, 3.14]);
        assert_eq!(list.locate(&2.71), Ok(1));
        assert_eq!(list.locate(&0.0), Err(0));
        assert_eq!(list.locate(&3.0), Err(2));
        assert_eq!(list.locate(&10.0), Err(3));
    }

    #[test]
    fn removed_slot_is_reused_by_next_insert() {
        let mut list = RawSortedList::with_capacity(2);
        insert(&mut list, 1.0);
        insert(&mut list, 2.0);
        let before = list.handles().to_vec();

        assert_eq!(list.remove_at(0), 1.0);
        insert(&mut list, 3.0);

        assert_eq!(list.handles(), [before[1], before[0]]);
        assert_eq!(values(&list), [2.0, 3.0]);
    }

    #[test]
    fn retain_frees_rejected_slots() {
        let mut list = RawSortedList::new();
        for v in 0..8 {
            insert(&mut list, f64::from(v));
        }

        list.retain(|v| v % 2.0 == 0.0);

        assert_eq!(values(&list), [0.0, 2.0, 4.0, 6.0]);
        assert_eq!(list.arena().len(), 4);
    }

    #[test]
    fn clear_empties_both_halves() {
        let mut list = RawSortedList::new();
        insert(&mut list, 1.0);
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.arena().len(), 0);
        assert_eq!(list.get(0), None);
    }

    proptest! {
        #[test]
        fn stays_strictly_ascending(ops in prop::collection::vec((any::<bool>(), -64i32..64), 0..512)) {
            let mut list = RawSortedList::new();
            let mut model: Vec<f64> = Vec::new();

            for (is_insert, raw) in ops {
                let value = f64::from(raw) / 4.0;
                if is_insert {
                    let inserted = insert(&mut list, value);
                    prop_assert_eq!(inserted, !model.contains(&value));
                    if inserted {
                        model.push(value);
                        model.sort_by(f64::total_cmp);
                    }
                } else if let Ok(index) = list.locate(&value) {
                    prop_assert_eq!(list.remove_at(index), value);
                    model.retain(|&v| v != value);
                } else {
                    prop_assert!(!model.contains(&value));
                }

                let current = values(&list);
                prop_assert!(current.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(&current, &model);
            }
        }
    }
}
