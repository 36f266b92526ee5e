use alloc::vec;
use core::cmp::Ordering::{self, Equal, Greater, Less};
use core::cmp::{max, min};
use core::fmt;
use core::iter::{FusedIterator, Peekable};
use core::ops::{BitAnd, BitOr, BitXor, Sub};
use core::slice;

use crate::raw::{Arena, Handle, RawSortedList, is_admissible};

mod capacity;
mod listing;

pub use listing::Labeled;

/// An ordered set of distinct values, kept in strictly ascending order.
///
/// Elements live in an arena and are visited through an ascending vector of handles, so lookups
/// are a binary search and every traversal is ascending. Removing an element frees its slot for
/// the next insertion.
///
/// The element type only needs [`PartialOrd`]. Values that are not comparable with themselves
/// (`f64::NAN`) are never admitted: [`insert`](Self::insert) refuses them and
/// [`contains`](Self::contains) reports them absent. Equality is exact comparison, so for floats
/// `-0.0` and `0.0` are the same element.
///
/// It is a logic error for two admitted values to be incomparable with each other. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated to the
/// `OrderedSet` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use ordset::OrderedSet;
///
/// let mut a = OrderedSet::new();
/// a.insert(3.14);
/// a.insert(2.71);
/// a.insert(1.41);
/// assert!(!a.insert(3.14)); // duplicates are refused
///
/// assert!(a.contains(&2.71));
/// assert!(!a.contains(&5.0));
///
/// a.remove(&2.71);
/// assert_eq!(a.to_string(), "{ 1.41, 3.14 }");
///
/// let b = OrderedSet::from([2.71, 3.14]);
/// assert_eq!(&a | &b, OrderedSet::from([1.41, 2.71, 3.14]));
/// assert_eq!(&a & &b, OrderedSet::from([3.14]));
/// assert_eq!(&a - &b, OrderedSet::from([1.41]));
/// assert_eq!(&a ^ &b, OrderedSet::from([1.41, 2.71]));
/// ```
#[derive(Clone)]
pub struct OrderedSet<T> {
    raw: RawSortedList<T>,
}

/// An iterator over the items of an `OrderedSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedSet`].
///
/// [`iter`]: OrderedSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    arena: &'a Arena<T>,
    handles: slice::Iter<'a, Handle>,
}

/// An owning iterator over the items of an `OrderedSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`OrderedSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: OrderedSet#method.into_iter
pub struct IntoIter<T> {
    arena: Arena<T>,
    handles: vec::IntoIter<Handle>,
}

/// A lazy iterator producing elements in the difference of `OrderedSet`s.
///
/// This `struct` is created by the [`difference`] method on [`OrderedSet`].
///
/// # Examples
///
/// ```
/// use ordset::OrderedSet;
///
/// let a = OrderedSet::from([1, 2, 3]);
/// let b = OrderedSet::from([2]);
/// let diff: Vec<_> = a.difference(&b).copied().collect();
/// assert_eq!(diff, [1, 3]);
/// ```
///
/// [`difference`]: OrderedSet::difference
#[must_use = "this returns the difference as an iterator, \
              without modifying either input set"]
pub struct Difference<'a, T: 'a> {
    inner: DifferenceInner<'a, T>,
}

/// A lazy iterator producing elements in the symmetric difference of `OrderedSet`s.
///
/// This `struct` is created by the [`symmetric_difference`] method on [`OrderedSet`].
///
/// [`symmetric_difference`]: OrderedSet::symmetric_difference
#[must_use = "this returns the symmetric difference as an iterator, \
              without modifying either input set"]
pub struct SymmetricDifference<'a, T: 'a> {
    inner: MergeIterInner<Iter<'a, T>>,
}

/// A lazy iterator producing elements in the intersection of `OrderedSet`s.
///
/// This `struct` is created by the [`intersection`] method on [`OrderedSet`].
///
/// [`intersection`]: OrderedSet::intersection
#[must_use = "this returns the intersection as an iterator, \
              without modifying either input set"]
pub struct Intersection<'a, T: 'a> {
    inner: IntersectionInner<'a, T>,
}

/// A lazy iterator producing elements in the union of `OrderedSet`s.
///
/// This `struct` is created by the [`union`] method on [`OrderedSet`].
///
/// [`union`]: OrderedSet::union
#[must_use = "this returns the union as an iterator, \
              without modifying either input set"]
pub struct Union<'a, T: 'a> {
    inner: MergeIterInner<Iter<'a, T>>,
}

enum DifferenceInner<'a, T: 'a> {
    Stitch {
        self_iter: Iter<'a, T>,
        other_iter: Peekable<Iter<'a, T>>,
    },
    Search {
        self_iter: Iter<'a, T>,
        other_set: &'a OrderedSet<T>,
    },
    Iterate(Iter<'a, T>),
}

enum IntersectionInner<'a, T: 'a> {
    Stitch {
        a: Iter<'a, T>,
        b: Iter<'a, T>,
    },
    Search {
        small_iter: Iter<'a, T>,
        large_set: &'a OrderedSet<T>,
    },
    Empty,
}

// Past this size ratio, probing the larger set by binary search beats walking it.
const ITER_PERFORMANCE_TIPPING_SIZE_DIFF: usize = 16;

struct MergeIterInner<I: Iterator> {
    a: I,
    b: I,
    peeked: Option<Peeked<I>>,
}

#[derive(Clone, Debug)]
enum Peeked<I: Iterator> {
    A(I::Item),
    B(I::Item),
}

/// Total order over admitted values.
#[inline]
fn compare<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Less)
}

impl<I: Iterator> Clone for MergeIterInner<I>
where
    I: Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        MergeIterInner {
            a: self.a.clone(),
            b: self.b.clone(),
            peeked: self.peeked.clone(),
        }
    }
}

impl<I: Iterator> fmt::Debug for MergeIterInner<I>
where
    I: fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeIterInner").field("a", &self.a).field("b", &self.b).field("peeked", &self.peeked).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for DifferenceInner<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceInner::Stitch {
                self_iter,
                other_iter,
            } => f.debug_struct("Stitch").field("self_iter", self_iter).field("other_iter", other_iter).finish(),
            DifferenceInner::Search {
                self_iter,
                other_set,
            } => f.debug_struct("Search").field("self_iter", self_iter).field("other_set", other_set).finish(),
            DifferenceInner::Iterate(iter) => f.debug_tuple("Iterate").field(iter).finish(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntersectionInner<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntersectionInner::Stitch {
                a,
                b,
            } => f.debug_struct("Stitch").field("a", a).field("b", b).finish(),
            IntersectionInner::Search {
                small_iter,
                large_set,
            } => f.debug_struct("Search").field("small_iter", small_iter).field("large_set", large_set).finish(),
            IntersectionInner::Empty => f.write_str("Empty"),
        }
    }
}

impl<I: Iterator> MergeIterInner<I> {
    fn new(a: I, b: I) -> Self {
        MergeIterInner {
            a,
            b,
            peeked: None,
        }
    }

    /// Returns the next pair of items from both iterators based on comparison.
    /// `(Some(a), None)` if a < b, `(None, Some(b))` if b < a, `(Some(a), Some(b))` if equal.
    fn nexts<Cmp: Fn(&I::Item, &I::Item) -> Ordering>(&mut self, cmp: Cmp) -> (Option<I::Item>, Option<I::Item>)
    where
        I: FusedIterator,
    {
        let a_next = match self.peeked.take() {
            Some(Peeked::A(a)) => Some(a),
            Some(Peeked::B(b)) => {
                self.peeked = Some(Peeked::B(b));
                self.a.next()
            }
            None => self.a.next(),
        };
        let b_next = match self.peeked.take() {
            Some(Peeked::B(b)) => Some(b),
            Some(Peeked::A(a)) => {
                self.peeked = Some(Peeked::A(a));
                self.b.next()
            }
            None => self.b.next(),
        };

        match (a_next, b_next) {
            (None, None) => (None, None),
            (Some(a), None) => (Some(a), None),
            (None, Some(b)) => (None, Some(b)),
            (Some(a), Some(b)) => match cmp(&a, &b) {
                Less => {
                    self.peeked = Some(Peeked::B(b));
                    (Some(a), None)
                }
                Greater => {
                    self.peeked = Some(Peeked::A(a));
                    (None, Some(b))
                }
                Equal => (Some(a), Some(b)),
            },
        }
    }

    fn lens(&self) -> (usize, usize)
    where
        I: ExactSizeIterator,
    {
        match &self.peeked {
            Some(Peeked::A(_)) => (1 + self.a.len(), self.b.len()),
            Some(Peeked::B(_)) => (self.a.len(), 1 + self.b.len()),
            None => (self.a.len(), self.b.len()),
        }
    }
}

impl<T> OrderedSet<T> {
    /// Makes a new, empty `OrderedSet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(1.0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> OrderedSet<T> {
        OrderedSet {
            raw: RawSortedList::new(),
        }
    }

    /// Returns `true` if the set contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from([1.41, 2.71, 3.14]);
    /// assert!(set.contains(&2.71));
    /// assert!(!set.contains(&5.0));
    /// assert!(!set.contains(&f64::NAN));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialOrd,
    {
        is_admissible(value) && self.raw.locate(value).is_ok()
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal value, `true` is
    ///   returned.
    /// - If the set already contained an equal value, or `value` is not comparable with itself,
    ///   `false` is returned and the set is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    ///
    /// assert_eq!(set.insert(2.71), true);
    /// assert_eq!(set.insert(2.71), false);
    /// assert_eq!(set.insert(f64::NAN), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) comparisons, O(n) to shift later elements.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: PartialOrd,
    {
        if !is_admissible(&value) {
            return false;
        }

        match self.raw.locate(&value) {
            Ok(_) => false,
            Err(index) => {
                self.raw.insert_at(index, value);
                true
            }
        }
    }

    /// If the set contains an element equal to `value`, removes it from the set and drops it.
    /// Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::from([2.71]);
    /// assert_eq!(set.remove(&2.71), true);
    /// assert_eq!(set.remove(&2.71), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) comparisons, O(n) to shift later elements.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialOrd,
    {
        if !is_admissible(value) {
            return false;
        }

        match self.raw.locate(value) {
            Ok(index) => {
                drop(self.raw.remove_at(index));
                true
            }
            Err(_) => false,
        }
    }

    /// Visits the elements representing the difference,
    /// i.e., the elements that are in `self` but not in `other`,
    /// in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1.41, 3.14]);
    /// let b = OrderedSet::from([2.71, 3.14]);
    ///
    /// let diff: Vec<_> = a.difference(&b).copied().collect();
    /// assert_eq!(diff, [1.41]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m + n) for stitch iteration or O(m log n) for search-based iteration,
    /// where m and n are the sizes of the two sets.
    pub fn difference<'a>(&'a self, other: &'a OrderedSet<T>) -> Difference<'a, T>
    where
        T: PartialOrd,
    {
        let (Some(self_min), Some(self_max)) = (self.first(), self.last()) else {
            return Difference {
                inner: DifferenceInner::Iterate(self.iter()),
            };
        };

        let (Some(other_min), Some(other_max)) = (other.first(), other.last()) else {
            return Difference {
                inner: DifferenceInner::Iterate(self.iter()),
            };
        };

        if self_max < other_min || other_max < self_min {
            return Difference {
                inner: DifferenceInner::Iterate(self.iter()),
            };
        }

        if other.len() > ITER_PERFORMANCE_TIPPING_SIZE_DIFF * self.len() {
            Difference {
                inner: DifferenceInner::Search {
                    self_iter: self.iter(),
                    other_set: other,
                },
            }
        } else {
            Difference {
                inner: DifferenceInner::Stitch {
                    self_iter: self.iter(),
                    other_iter: other.iter().peekable(),
                },
            }
        }
    }

    /// Visits the elements representing the symmetric difference,
    /// i.e., the elements that are in `self` or in `other` but not in both,
    /// in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1.41, 3.14]);
    /// let b = OrderedSet::from([2.71, 3.14]);
    ///
    /// let sym_diff: Vec<_> = a.symmetric_difference(&b).copied().collect();
    /// assert_eq!(sym_diff, [1.41, 2.71]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m + n) where m and n are the sizes of the two sets.
    pub fn symmetric_difference<'a>(&'a self, other: &'a OrderedSet<T>) -> SymmetricDifference<'a, T>
    where
        T: PartialOrd,
    {
        SymmetricDifference {
            inner: MergeIterInner::new(self.iter(), other.iter()),
        }
    }

    /// Visits the elements representing the intersection,
    /// i.e., the elements that are both in `self` and `other`,
    /// in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1.41, 3.14]);
    /// let b = OrderedSet::from([2.71, 3.14]);
    ///
    /// let intersection: Vec<_> = a.intersection(&b).copied().collect();
    /// assert_eq!(intersection, [3.14]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m + n) for stitch iteration or O(min(m, n) log max(m, n)) for search-based iteration,
    /// where m and n are the sizes of the two sets.
    pub fn intersection<'a>(&'a self, other: &'a OrderedSet<T>) -> Intersection<'a, T>
    where
        T: PartialOrd,
    {
        let (Some(self_min), Some(self_max)) = (self.first(), self.last()) else {
            return Intersection {
                inner: IntersectionInner::Empty,
            };
        };

        let (Some(other_min), Some(other_max)) = (other.first(), other.last()) else {
            return Intersection {
                inner: IntersectionInner::Empty,
            };
        };

        if self_max < other_min || other_max < self_min {
            return Intersection {
                inner: IntersectionInner::Empty,
            };
        }

        let self_len = self.len();
        let other_len = other.len();

        if self_len > ITER_PERFORMANCE_TIPPING_SIZE_DIFF * other_len {
            Intersection {
                inner: IntersectionInner::Search {
                    small_iter: other.iter(),
                    large_set: self,
                },
            }
        } else if other_len > ITER_PERFORMANCE_TIPPING_SIZE_DIFF * self_len {
            Intersection {
                inner: IntersectionInner::Search {
                    small_iter: self.iter(),
                    large_set: other,
                },
            }
        } else {
            Intersection {
                inner: IntersectionInner::Stitch {
                    a: self.iter(),
                    b: other.iter(),
                },
            }
        }
    }

    /// Visits the elements representing the union,
    /// i.e., all the elements in `self` or `other`, without duplicates,
    /// in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1.41, 3.14]);
    /// let b = OrderedSet::from([2.71, 3.14]);
    ///
    /// let union: Vec<_> = a.union(&b).copied().collect();
    /// assert_eq!(union, [1.41, 2.71, 3.14]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m + n) where m and n are the sizes of the two sets.
    pub fn union<'a>(&'a self, other: &'a OrderedSet<T>) -> Union<'a, T>
    where
        T: PartialOrd,
    {
        Union {
            inner: MergeIterInner::new(self.iter(), other.iter()),
        }
    }

    /// Returns `true` if `self` has no elements in common with `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1, 2, 3]);
    /// let mut b = OrderedSet::from([4]);
    ///
    /// assert!(a.is_disjoint(&b));
    /// b.insert(1);
    /// assert!(!a.is_disjoint(&b));
    /// ```
    #[must_use]
    pub fn is_disjoint(&self, other: &OrderedSet<T>) -> bool
    where
        T: PartialOrd,
    {
        self.intersection(other).next().is_none()
    }

    /// Returns `true` if the set is a subset of another,
    /// i.e., `other` contains at least all the values in `self`.
    ///
    /// The empty set is a subset of every set, and every set is a subset of itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let sup = OrderedSet::from([1.41, 2.71, 3.14]);
    /// let mut sub = OrderedSet::new();
    ///
    /// assert!(sub.is_subset(&sup));
    /// sub.insert(2.71);
    /// assert!(sub.is_subset(&sup));
    /// sub.insert(5.0);
    /// assert!(!sub.is_subset(&sup));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(m log n) where m is the size of `self` and n is the size of `other`.
    #[must_use]
    pub fn is_subset(&self, other: &OrderedSet<T>) -> bool
    where
        T: PartialOrd,
    {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if the set is a superset of another,
    /// i.e., `self` contains at least all the values in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let sup = OrderedSet::from([1, 2, 3]);
    /// let sub = OrderedSet::from([2]);
    ///
    /// assert!(sup.is_superset(&sub));
    /// assert!(!sub.is_superset(&sup));
    /// ```
    #[must_use]
    pub fn is_superset(&self, other: &OrderedSet<T>) -> bool
    where
        T: PartialOrd,
    {
        other.is_subset(self)
    }

    /// Returns the first element in the set, if any.
    /// This is the minimum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.get(0)
    }

    /// Returns the last element in the set, if any.
    /// This is the maximum element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.len().checked_sub(1).and_then(|index| self.raw.get(index))
    }

    /// Removes and returns the first element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::from([1, 2]);
    /// while let Some(n) = set.pop_first() {
    ///     assert!(set.iter().all(|&k| k > n));
    /// }
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn pop_first(&mut self) -> Option<T> {
        if self.is_empty() { None } else { Some(self.raw.remove_at(0)) }
    }

    /// Removes and returns the last element in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::from([1, 2]);
    /// while let Some(n) = set.pop_last() {
    ///     assert!(set.iter().all(|&k| k < n));
    /// }
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.raw.len().checked_sub(1)?;
        Some(self.raw.remove_at(last))
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns `false`.
    /// The elements are visited in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let mut set: OrderedSet<i32> = (0..8).collect();
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.into_iter().eq(vec![0, 2, 4, 6]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.raw.retain(f);
    }

    /// Clears the set, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator that visits the elements in the `OrderedSet` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from([3.14, 1.41, 2.71]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1.41));
    /// assert_eq!(iter.next_back(), Some(&3.14));
    /// assert_eq!(iter.next(), Some(&2.71));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: self.raw.arena(),
            handles: self.raw.handles().iter(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Builds a set from values already in strictly ascending order.
    fn from_ascending<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: PartialOrd,
    {
        let iter = iter.into_iter();
        let mut set = OrderedSet::with_capacity(iter.size_hint().0);
        for value in iter {
            debug_assert!(set.last().is_none_or(|last| *last < value));
            let end = set.raw.len();
            set.raw.insert_at(end, value);
        }
        set
    }
}

impl<T: PartialEq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &OrderedSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OrderedSet<T> {}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for OrderedSet<T> {
    /// Creates an empty `OrderedSet`.
    fn default() -> Self {
        OrderedSet::new()
    }
}

impl<T: PartialOrd> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<T: PartialOrd> Extend<T> for OrderedSet<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + PartialOrd + Copy> Extend<&'a T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: PartialOrd, const N: usize> From<[T; N]> for OrderedSet<T> {
    /// Converts a `[T; N]` into an `OrderedSet<T>`, dropping duplicates and non-admissible values.
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T: PartialOrd + Clone> Sub<&OrderedSet<T>> for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    /// Returns the difference of `self` and `rhs` as a new `OrderedSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1, 2, 3]);
    /// let b = OrderedSet::from([3, 4, 5]);
    ///
    /// let result = &a - &b;
    /// assert_eq!(result, OrderedSet::from([1, 2]));
    /// ```
    fn sub(self, rhs: &OrderedSet<T>) -> OrderedSet<T> {
        OrderedSet::from_ascending(self.difference(rhs).cloned())
    }
}

impl<T: PartialOrd + Clone> BitXor<&OrderedSet<T>> for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    /// Returns the symmetric difference of `self` and `rhs` as a new `OrderedSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1, 2, 3]);
    /// let b = OrderedSet::from([2, 3, 4]);
    ///
    /// let result = &a ^ &b;
    /// assert_eq!(result, OrderedSet::from([1, 4]));
    /// ```
    fn bitxor(self, rhs: &OrderedSet<T>) -> OrderedSet<T> {
        OrderedSet::from_ascending(self.symmetric_difference(rhs).cloned())
    }
}

impl<T: PartialOrd + Clone> BitAnd<&OrderedSet<T>> for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    /// Returns the intersection of `self` and `rhs` as a new `OrderedSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1, 2, 3]);
    /// let b = OrderedSet::from([2, 3, 4]);
    ///
    /// let result = &a & &b;
    /// assert_eq!(result, OrderedSet::from([2, 3]));
    /// ```
    fn bitand(self, rhs: &OrderedSet<T>) -> OrderedSet<T> {
        OrderedSet::from_ascending(self.intersection(rhs).cloned())
    }
}

impl<T: PartialOrd + Clone> BitOr<&OrderedSet<T>> for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    /// Returns the union of `self` and `rhs` as a new `OrderedSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from([1, 2, 3]);
    /// let b = OrderedSet::from([3, 4, 5]);
    ///
    /// let result = &a | &b;
    /// assert_eq!(result, OrderedSet::from([1, 2, 3, 4, 5]));
    /// ```
    fn bitor(self, rhs: &OrderedSet<T>) -> OrderedSet<T> {
        OrderedSet::from_ascending(self.union(rhs).cloned())
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `OrderedSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from([4, 1, 3, 2]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        let (arena, handles) = self.raw.into_parts();
        IntoIter {
            arena,
            handles: handles.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let arena = self.arena;
        self.handles.next().map(|&h| arena.get(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let arena = self.arena;
        self.handles.next_back().map(|&h| arena.get(h))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.handles.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            handles: self.handles.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.handles.next().map(|h| self.arena.take(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.handles.next_back().map(|h| self.arena.take(h))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.handles.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = &self.arena;
        f.debug_list().entries(self.handles.as_slice().iter().map(|&h| arena.get(h))).finish()
    }
}

impl<'a, T: PartialOrd> Iterator for Difference<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.inner {
            DifferenceInner::Stitch {
                self_iter,
                other_iter,
            } => loop {
                let self_next = self_iter.next()?;
                loop {
                    match other_iter.peek() {
                        None => return Some(self_next),
                        Some(&other_next) => match compare(self_next, other_next) {
                            Less => return Some(self_next),
                            Equal => {
                                other_iter.next();
                                break;
                            }
                            Greater => {
                                other_iter.next();
                            }
                        },
                    }
                }
            },
            DifferenceInner::Search {
                self_iter,
                other_set,
            } => loop {
                let self_next = self_iter.next()?;
                if !other_set.contains(self_next) {
                    return Some(self_next);
                }
            },
            DifferenceInner::Iterate(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = match &self.inner {
            DifferenceInner::Stitch {
                self_iter,
                other_iter,
            } => {
                // At most `other_len` elements of self can be cancelled.
                let self_len = self_iter.len();
                let other_len = other_iter.len();
                (self_len.saturating_sub(other_len), self_len)
            }
            DifferenceInner::Search {
                self_iter,
                ..
            } => (0, self_iter.len()),
            DifferenceInner::Iterate(iter) => {
                let len = iter.len();
                (len, len)
            }
        };
        (lower, Some(upper))
    }
}

impl<T: PartialOrd> FusedIterator for Difference<'_, T> {}

impl<T> Clone for Difference<'_, T> {
    fn clone(&self) -> Self {
        Difference {
            inner: match &self.inner {
                DifferenceInner::Stitch {
                    self_iter,
                    other_iter,
                } => DifferenceInner::Stitch {
                    self_iter: self_iter.clone(),
                    other_iter: other_iter.clone(),
                },
                DifferenceInner::Search {
                    self_iter,
                    other_set,
                } => DifferenceInner::Search {
                    self_iter: self_iter.clone(),
                    other_set,
                },
                DifferenceInner::Iterate(iter) => DifferenceInner::Iterate(iter.clone()),
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Difference<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Difference").field("inner", &self.inner).finish()
    }
}

impl<'a, T: PartialOrd> Iterator for SymmetricDifference<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            match self.inner.nexts(|a, b| compare(*a, *b)) {
                (None, None) => return None,
                (Some(a), None) => return Some(a),
                (None, Some(b)) => return Some(b),
                // Present in both: skip.
                (Some(_), Some(_)) => {}
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a_len, b_len) = self.inner.lens();
        (0, Some(a_len + b_len))
    }
}

impl<T: PartialOrd> FusedIterator for SymmetricDifference<'_, T> {}

impl<T> Clone for SymmetricDifference<'_, T> {
    fn clone(&self) -> Self {
        SymmetricDifference {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SymmetricDifference<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricDifference").field("inner", &self.inner).finish()
    }
}

impl<'a, T: PartialOrd> Iterator for Intersection<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.inner {
            IntersectionInner::Stitch {
                a,
                b,
            } => {
                let mut a_next = a.next()?;
                let mut b_next = b.next()?;
                loop {
                    match compare(a_next, b_next) {
                        Less => a_next = a.next()?,
                        Greater => b_next = b.next()?,
                        Equal => return Some(a_next),
                    }
                }
            }
            IntersectionInner::Search {
                small_iter,
                large_set,
            } => loop {
                let small_next = small_iter.next()?;
                if large_set.contains(small_next) {
                    return Some(small_next);
                }
            },
            IntersectionInner::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IntersectionInner::Stitch {
                a,
                b,
            } => (0, Some(min(a.len(), b.len()))),
            IntersectionInner::Search {
                small_iter,
                ..
            } => (0, Some(small_iter.len())),
            IntersectionInner::Empty => (0, Some(0)),
        }
    }
}

impl<T: PartialOrd> FusedIterator for Intersection<'_, T> {}

impl<T> Clone for Intersection<'_, T> {
    fn clone(&self) -> Self {
        Intersection {
            inner: match &self.inner {
                IntersectionInner::Stitch {
                    a,
                    b,
                } => IntersectionInner::Stitch {
                    a: a.clone(),
                    b: b.clone(),
                },
                IntersectionInner::Search {
                    small_iter,
                    large_set,
                } => IntersectionInner::Search {
                    small_iter: small_iter.clone(),
                    large_set,
                },
                IntersectionInner::Empty => IntersectionInner::Empty,
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Intersection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection").field("inner", &self.inner).finish()
    }
}

impl<'a, T: PartialOrd> Iterator for Union<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self.inner.nexts(|a, b| compare(*a, *b)) {
            (None, None) => None,
            (Some(a), None | Some(_)) => Some(a),
            (None, Some(b)) => Some(b),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a_len, b_len) = self.inner.lens();
        (max(a_len, b_len), Some(a_len + b_len))
    }
}

impl<T: PartialOrd> FusedIterator for Union<'_, T> {}

impl<T> Clone for Union<'_, T> {
    fn clone(&self) -> Self {
        Union {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Union<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Union").field("inner", &self.inner).finish()
    }
}
