use super::OrderedSet;
use crate::raw::RawSortedList;

impl<T> OrderedSet<T> {
    /// Creates an empty set with capacity for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let set: OrderedSet<f64> = OrderedSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedSet {
            raw: RawSortedList::with_capacity(capacity),
        }
    }

    /// Returns the number of element slots allocated for the set.
    ///
    /// Slots freed by removals are reused, so the capacity only grows when the number of live
    /// elements does.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::with_capacity(4);
    /// let before = set.capacity();
    /// for round in 0..100 {
    ///     set.insert(round);
    ///     set.remove(&round);
    /// }
    /// assert_eq!(set.capacity(), before);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
