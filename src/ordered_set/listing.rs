use core::fmt;

use super::OrderedSet;

/// A set paired with a display name, rendered as `name = { a, b, c }`.
///
/// This `struct` is created by the [`labeled`] method on [`OrderedSet`]. The name lives only in
/// the adapter; sets themselves carry no label.
///
/// # Examples
///
/// ```
/// use ordset::OrderedSet;
///
/// let a = OrderedSet::from([3.14, 1.41]);
/// assert_eq!(a.labeled("A").to_string(), "A = { 1.41, 3.14 }");
/// ```
///
/// [`labeled`]: OrderedSet::labeled
#[derive(Clone, Copy)]
pub struct Labeled<'a, T> {
    name: &'a str,
    set: &'a OrderedSet<T>,
}

impl<T> OrderedSet<T> {
    /// Pairs the set with `name` for display.
    pub fn labeled<'a>(&'a self, name: &'a str) -> Labeled<'a, T> {
        Labeled {
            name,
            set: self,
        }
    }
}

impl<T> Labeled<'_, T> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }
}

/// Lists the members in ascending order, e.g. `{ 1.41, 3.14 }`. The empty set renders as `{ }`.
impl<T: fmt::Display> fmt::Display for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        if !self.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}

impl<T: fmt::Display> fmt::Display for Labeled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.set)
    }
}

impl<T: fmt::Debug> fmt::Debug for Labeled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labeled").field("name", &self.name).field("set", self.set).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    #[test]
    fn empty_set_lists_braces_only() {
        let set: OrderedSet<f64> = OrderedSet::new();
        assert_eq!(set.to_string(), "{ }");
        assert_eq!(set.labeled("Empty").to_string(), "Empty = { }");
    }

    #[test]
    fn single_member_has_no_separator() {
        assert_eq!(OrderedSet::from([2.5]).to_string(), "{ 2.5 }");
    }

    #[test]
    fn members_are_listed_ascending() {
        let set = OrderedSet::from([3, -1, 2]);
        assert_eq!(set.labeled("C").to_string(), "C = { -1, 2, 3 }");
        assert_eq!(format!("{set:?}"), "{-1, 2, 3}");
    }

    #[test]
    fn element_format_spec_is_forwarded() {
        let set = OrderedSet::from([0.5, 1.26]);
        assert_eq!(format!("{set:.1}"), "{ 0.5, 1.3 }");
    }

    #[test]
    fn label_name_is_kept() {
        let set = OrderedSet::from([1]);
        let labeled = set.labeled("Union");
        assert_eq!(labeled.name(), "Union");
        assert_eq!(format!("{labeled:?}"), "Labeled { name: \"Union\", set: {1} }");
    }
}
