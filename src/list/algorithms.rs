use crate::list::{List, NodeId};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = (self.core(), other.core());
        lhs.len() == rhs.len() && lhs.values(0, lhs.len()).eq(rhs.values(0, rhs.len()))
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (lhs, rhs) = (self.core(), other.core());
        lhs.values(0, lhs.len())
            .partial_cmp(rhs.values(0, rhs.len()))
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = (self.core(), other.core());
        lhs.values(0, lhs.len()).cmp(rhs.values(0, rhs.len()))
    }
}

/// Clones the elements into a new list with the same pool capacity. Open
/// cursors and sub-lists stay with the original.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let core = self.core();
        let mut list = List::with_pool_capacity(core.pool_capacity());
        list.extend(core.values(0, core.len()).cloned());
        list
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let core = self.core();
        for elt in core.values(0, core.len()) {
            elt.hash(state);
        }
        core.len().hash(state);
    }
}

/// Renders the list as `[e0, e1, ..., en]`.
impl<T: Display> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let core = self.core();
        fmt_seq(f, core.values(0, core.len()))
    }
}

pub(crate) fn fmt_seq<'a, T, I>(f: &mut Formatter<'_>, iter: I) -> fmt::Result
where
    T: Display + 'a,
    I: Iterator<Item = &'a T>,
{
    f.write_str("[")?;
    for (i, elt) in iter.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        elt.fmt(f)?;
    }
    f.write_str("]")
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.index_of(x).is_some()
    }

    /// Returns the index of the first element equal to the given value.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'a']);
    /// assert_eq!(list.index_of(&'a'), Some(0));
    /// assert_eq!(list.index_of(&'z'), None);
    /// ```
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        let core = self.core();
        core.find(0, core.len(), |e| e == x).map(|(_, at)| at)
    }

    /// Returns the index of the last element equal to the given value,
    /// searching from the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'a']);
    /// assert_eq!(list.last_index_of(&'a'), Some(2));
    /// assert_eq!(list.last_index_of(&'b'), Some(1));
    /// ```
    pub fn last_index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        let core = self.core();
        let mut node = core.back_node();
        let mut at = core.len();
        while node != NodeId::GHOST {
            at -= 1;
            if core.value(node).map_or(false, |e| e == x) {
                return Some(at);
            }
            node = core.node(node).prev;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn list_cmp() {
        let a = List::from_iter([1, 2, 3]);
        let b = List::from_iter([1, 2, 4]);
        let c = List::from_iter([1, 2]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(a < b);
        assert!(c < a);
        assert_eq!(a.cmp(&a), std::cmp::Ordering::Equal);
        assert_eq!(hash_of(&a), hash_of(&a.clone()));
    }

    #[test]
    fn list_clone_is_independent() {
        let mut list = List::with_pool_capacity(3);
        list.extend([1, 2, 3]);
        let mut cursor = list.cursor();
        let copy = list.clone();
        assert_eq!(copy.pool_capacity(), 3);
        assert_eq!(copy.core().cursors.len(), 0);

        cursor.next().unwrap();
        cursor.remove().unwrap();
        list.push_back(4);
        assert_eq!(list.to_vec(), vec![2, 3, 4]);
        assert_eq!(copy.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn list_display() {
        assert_eq!(List::from_iter(["a", "b"]).to_string(), "[a, b]");
        assert_eq!(List::<u8>::new().to_string(), "[]");
    }

    #[test]
    fn list_search() {
        let list = List::from_iter([5, 6, 5, 7]);
        assert!(list.contains(&7));
        assert!(!list.contains(&8));
        assert_eq!(list.index_of(&5), Some(0));
        assert_eq!(list.last_index_of(&5), Some(2));
        assert_eq!(list.last_index_of(&7), Some(3));
        assert_eq!(list.last_index_of(&8), None);
        assert_eq!(List::<i32>::new().last_index_of(&1), None);
    }
}
