use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use crate::error::{check_index, check_position, Error, Result};
use crate::list::algorithms::fmt_seq;
use crate::list::cursor::Cursor;
use crate::list::iterator::Iter;
use crate::list::registry::RangeState;
use crate::list::{Core, List};

const CLOSED: &str = "sub-list is closed";
const DROPPED: &str = "list has been dropped";
const BORROWED: &str = "list is already borrowed";
const UNREGISTERED: &str = "sub-list is not registered";

/// A live view of the elements `from..to` of a `List`.
///
/// Index `j` of the view is index `from + j` of the list. The view does not
/// copy anything: reads go to the list, and edits through the view are
/// edits of the list, reported to every cursor and every other view.
///
/// The bounds are kept right when the list is edited through any other
/// handle:
///
/// - an insertion before the view shifts it;
/// - an insertion at one of its indices, from its start up to its last
///   element, grows it; an insertion right after its last element does not;
/// - a removal before the view shifts it back, a removal inside shrinks it.
///
/// Edits through the view itself always stay inside it: appending with
/// [`push_back`](SubList::push_back) grows the view and every view it was
/// opened from.
///
/// Clearing the list empties every view. Views nest: a sub-list of a
/// sub-list is another view of the same list.
///
/// # Examples
///
/// ```
/// use cursor_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter(0..10);
/// let mut sub = list.sub_list(2, 5).unwrap();
/// assert_eq!(sub.to_vec(), Ok(vec![2, 3, 4]));
///
/// list.pop_front().unwrap();
/// sub.push_back(40).unwrap();
/// assert_eq!(sub.to_vec(), Ok(vec![2, 3, 4, 40]));
/// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 40, 5, 6, 7, 8, 9]);
///
/// sub.clear().unwrap();
/// assert_eq!(list.to_vec(), vec![1, 5, 6, 7, 8, 9]);
/// ```
pub struct SubList<T> {
    core: Weak<RefCell<Core<T>>>,
    /// `None` once closed.
    id: Option<usize>,
}

// Private methods
impl<T> SubList<T> {
    /// Registers a view of `from..to`, nested in the view `parent` if any.
    pub(crate) fn new(
        core: &Rc<RefCell<Core<T>>>,
        from: usize,
        to: usize,
        parent: Option<usize>,
    ) -> Result<Self> {
        let id = {
            let mut core = core.borrow_mut();
            check_position(to, core.len())?;
            check_position(from, to)?;
            core.ranges.open(from, to, parent)
        };
        Ok(Self {
            core: Rc::downgrade(core),
            id: Some(id),
        })
    }

    fn upgrade(&self) -> Result<(Rc<RefCell<Core<T>>>, usize)> {
        let id = self.id.ok_or(Error::IllegalState(CLOSED))?;
        let rc = self.core.upgrade().ok_or(Error::IllegalState(DROPPED))?;
        Ok((rc, id))
    }

    fn read<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Core<T>, RangeState) -> Result<R>,
    {
        let (rc, id) = self.upgrade()?;
        let core = rc.try_borrow().map_err(|_| Error::IllegalState(BORROWED))?;
        let range = core.range_state(id)?;
        f(&core, range)
    }

    fn write<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Core<T>, RangeState, usize) -> Result<R>,
    {
        let (rc, id) = self.upgrade()?;
        let mut core = rc
            .try_borrow_mut()
            .map_err(|_| Error::IllegalState(BORROWED))?;
        let range = core.range_state(id)?;
        f(&mut core, range, id)
    }

    /// Opens another handle on the same registered range.
    fn share(&self) -> Result<SubList<T>> {
        let (rc, id) = self.upgrade()?;
        let mut core = rc
            .try_borrow_mut()
            .map_err(|_| Error::IllegalState(BORROWED))?;
        if !core.ranges.share(id) {
            return Err(Error::IllegalState(UNREGISTERED));
        }
        Ok(SubList {
            core: self.core.clone(),
            id: Some(id),
        })
    }

    /// The current bounds `(from, to)` in the backing list.
    pub(crate) fn bounds(&self) -> Result<(usize, usize)> {
        self.read(|_, range| Ok((range.from, range.to)))
    }
}

impl<T> SubList<T> {
    /// Returns the number of elements in the view.
    pub fn len(&self) -> Result<usize> {
        self.read(|_, range| Ok(range.len()))
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Returns a clone of the element at index `at` of the view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at` is not below the length
    /// of the view.
    pub fn get(&self, at: usize) -> Result<T>
    where
        T: Clone,
    {
        self.read(|core, range| {
            check_index(at, range.len())?;
            let node = core.get_node(range.from + at, false)?;
            core.value(node).map(T::clone)
        })
    }

    /// Replaces the element at index `at` of the view, returning the old one.
    pub fn set(&mut self, at: usize, elt: T) -> Result<T> {
        self.write(|core, range, _| {
            check_index(at, range.len())?;
            let node = core.get_node(range.from + at, false)?;
            core.value_mut(node)
                .map(|value| mem::replace(value, elt))
        })
    }

    /// Inserts an element at index `at` of the view, which grows by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at` is above the length of
    /// the view.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'c']);
    /// let mut sub = list.sub_list(1, 2).unwrap();
    /// sub.insert(0, 'x').unwrap();
    /// sub.insert(2, 'y').unwrap();
    /// assert_eq!(sub.to_vec(), Ok(vec!['x', 'b', 'y']));
    /// assert_eq!(list.to_vec(), vec!['a', 'x', 'b', 'y', 'c']);
    /// ```
    pub fn insert(&mut self, at: usize, elt: T) -> Result<()> {
        self.write(|core, range, id| {
            check_position(at, range.len())?;
            let at = range.from + at;
            let next = core.get_node(at, true)?;
            core.add_node_in_range(next, at, elt, id);
            Ok(())
        })
    }

    /// Appends an element right after the last element of the view.
    pub fn push_back(&mut self, elt: T) -> Result<()> {
        let len = self.len()?;
        self.insert(len, elt)
    }

    /// Removes the element at index `at` of the view and returns it.
    pub fn remove(&mut self, at: usize) -> Result<T> {
        self.write(|core, range, _| {
            check_index(at, range.len())?;
            let at = range.from + at;
            let node = core.get_node(at, false)?;
            core.remove_node(node, at)
        })
    }

    /// Removes the first element of the view equal to `x`. Returns `true`
    /// if one was found.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 1, 2]);
    /// let mut sub = list.sub_list(1, 3).unwrap();
    /// assert_eq!(sub.remove_item(&1), Ok(true));
    /// assert_eq!(sub.remove_item(&1), Ok(false));
    /// assert_eq!(list.to_vec(), vec![1, 2, 2]);
    /// ```
    pub fn remove_item(&mut self, x: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.write(|core, range, _| match core.find(range.from, range.to, |e| e == x) {
            Some((node, at)) => core.remove_node(node, at).map(|_| true),
            None => Ok(false),
        })
    }

    /// Returns `true` if the view contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.index_of(x).map(|found| found.is_some())
    }

    /// Returns the index in the view of the first element equal to `x`.
    pub fn index_of(&self, x: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.read(|core, range| {
            Ok(core
                .find(range.from, range.to, |e| e == x)
                .map(|(_, at)| at - range.from))
        })
    }

    /// Removes every element of the view from the list.
    pub fn clear(&mut self) -> Result<()> {
        self.write(|core, range, _| {
            let mut node = core.get_node(range.from, true)?;
            for _ in 0..range.len() {
                let next = core.node(node).next;
                core.remove_node(node, range.from)?;
                node = next;
            }
            Ok(())
        })
    }

    /// Provides an iterator over clones of the elements of the view.
    ///
    /// Like the view, the iterator follows edits of the list. It shares the
    /// bounds of the view, so it stops at the end of the view as it is when
    /// reached, including elements appended through the view meanwhile.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..6);
    /// let sub = list.sub_list(1, 4).unwrap();
    /// let mut iter = sub.iter().unwrap();
    /// assert_eq!(iter.next(), Some(1));
    /// list.remove(2).unwrap();
    /// assert_eq!(iter.collect::<Vec<_>>(), vec![3]);
    /// ```
    pub fn iter(&self) -> Result<Iter<T>> {
        let (rc, id) = self.upgrade()?;
        let (range, next) = {
            let core = rc.try_borrow().map_err(|_| Error::IllegalState(BORROWED))?;
            let range = core.range_state(id)?;
            (range, core.get_node(range.from, true)?)
        };
        let limit = self.share()?;
        let cursor = Cursor::register(&rc, next, range.from);
        Ok(Iter::bounded(cursor, limit))
    }

    /// Collects clones of the elements of the view into a `Vec`.
    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.read(|core, range| Ok(core.values(range.from, range.to).cloned().collect()))
    }

    /// Opens a view of the elements `from..to` of this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `to` is above the length of
    /// this view, or `from > to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(0..10);
    /// let outer = list.sub_list(2, 8).unwrap();
    /// let mut inner = outer.sub_list(1, 3).unwrap();
    /// assert_eq!(inner.to_vec(), Ok(vec![3, 4]));
    ///
    /// inner.push_back(100).unwrap();
    /// assert_eq!(outer.to_vec(), Ok(vec![2, 3, 4, 100, 5, 6, 7]));
    /// ```
    pub fn sub_list(&self, from: usize, to: usize) -> Result<SubList<T>> {
        let (rc, id) = self.upgrade()?;
        let range = rc
            .try_borrow()
            .map_err(|_| Error::IllegalState(BORROWED))?
            .range_state(id)?;
        check_position(to, range.len())?;
        check_position(from, to)?;
        SubList::new(&rc, range.from + from, range.from + to, Some(id))
    }

    /// Unregisters the view from its list. Every later call fails with
    /// [`Error::IllegalState`].
    ///
    /// Closing is idempotent, and dropping a view closes it. If the list is
    /// borrowed at that moment the view stays open.
    pub fn close(&mut self) {
        let id = match self.id {
            Some(id) => id,
            None => return,
        };
        match self.core.upgrade() {
            Some(rc) => {
                if let Ok(mut core) = rc.try_borrow_mut() {
                    core.ranges.close(id);
                    self.id = None;
                }
            }
            None => self.id = None,
        }
    }

    /// Returns `true` if the view has been closed.
    pub fn is_closed(&self) -> bool {
        self.id.is_none()
    }
}

impl<T> Drop for SubList<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: fmt::Debug> fmt::Debug for SubList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.read(|core, range| {
            Ok(f.debug_list()
                .entries(core.values(range.from, range.to))
                .finish())
        });
        match result {
            Ok(result) => result,
            Err(error) => f.debug_struct("SubList").field("error", &error).finish(),
        }
    }
}

/// Renders the view as `[e0, e1, ..., en]`.
impl<T: fmt::Display> fmt::Display for SubList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.read(|core, range| Ok(fmt_seq(f, core.values(range.from, range.to)))) {
            Ok(result) => result,
            Err(error) => write!(f, "<{}>", error),
        }
    }
}

/// Views are equal if they hold equal elements in the same order. A closed
/// view equals nothing.
impl<T: PartialEq> PartialEq for SubList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.read(|lhs, a| {
            other.read(|rhs, b| {
                Ok(a.len() == b.len() && lhs.values(a.from, a.to).eq(rhs.values(b.from, b.to)))
            })
        })
        .unwrap_or(false)
    }
}

impl<T: PartialEq> PartialEq<List<T>> for SubList<T> {
    fn eq(&self, other: &List<T>) -> bool {
        self.read(|lhs, a| {
            let rhs = other.core();
            Ok(a.len() == rhs.len() && lhs.values(a.from, a.to).eq(rhs.values(0, rhs.len())))
        })
        .unwrap_or(false)
    }
}

impl<T: PartialEq> PartialEq<[T]> for SubList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.read(|core, range| {
            Ok(range.len() == other.len() && core.values(range.from, range.to).eq(other.iter()))
        })
        .unwrap_or(false)
    }
}

impl<T> Core<T> {
    pub(crate) fn range_state(&self, id: usize) -> Result<RangeState> {
        self.ranges
            .get(id)
            .copied()
            .ok_or(Error::IllegalState(UNREGISTERED))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::list::List;
    use std::iter::FromIterator;

    #[test]
    fn sub_list_remove_item() {
        let list = List::from_iter(["A", "B", "C", "D", "E"]);
        let mut sub = list.sub_list(1, 4).unwrap();
        assert_eq!(sub.to_vec(), Ok(vec!["B", "C", "D"]));
        assert_eq!(sub.remove_item(&"C"), Ok(true));
        assert_eq!(sub.to_vec(), Ok(vec!["B", "D"]));
        assert_eq!(list.to_vec(), vec!["A", "B", "D", "E"]);
        assert_eq!(sub.remove_item(&"A"), Ok(false));
        assert_eq!(sub.len(), Ok(2));
        list.core().assert_ring();
    }

    #[test]
    fn sub_list_bounds() {
        let list = List::from_iter(0..5);
        assert!(list.sub_list(0, 0).is_ok());
        assert!(list.sub_list(5, 5).is_ok());
        assert!(list.sub_list(0, 5).is_ok());
        assert_eq!(
            list.sub_list(0, 6).unwrap_err(),
            Error::IndexOutOfBounds { index: 6, len: 5 }
        );
        assert_eq!(
            list.sub_list(3, 2).unwrap_err(),
            Error::IndexOutOfBounds { index: 3, len: 2 }
        );

        let sub = list.sub_list(1, 4).unwrap();
        assert_eq!(sub.get(2), Ok(3));
        assert!(sub.get(3).is_err());
        assert!(sub.sub_list(0, 4).is_err());
        assert_eq!(list.core().ranges.len(), 1);
    }

    #[test]
    fn sub_list_follows_list_edits() {
        let mut list = List::from_iter(0..6);
        let sub = list.sub_list(2, 4).unwrap();

        list.push_front(-1);
        assert_eq!(sub.to_vec(), Ok(vec![2, 3]));

        // at its first index the element joins, right after its last it does not
        list.insert(3, 20).unwrap();
        assert_eq!(sub.to_vec(), Ok(vec![20, 2, 3]));
        list.insert(6, 30).unwrap();
        assert_eq!(sub.to_vec(), Ok(vec![20, 2, 3]));

        list.insert(8, 40).unwrap();
        assert_eq!(sub.to_vec(), Ok(vec![20, 2, 3]));

        assert_eq!(list.remove(4), Ok(2));
        assert_eq!(sub.to_vec(), Ok(vec![20, 3]));
        assert_eq!(list.remove(0), Ok(-1));
        assert_eq!(sub.to_vec(), Ok(vec![20, 3]));
        assert_eq!(list.remove(6), Ok(40));
        assert_eq!(sub.to_vec(), Ok(vec![20, 3]));
        assert_eq!(list.to_vec(), vec![0, 1, 20, 3, 30, 4, 5]);

        list.clear();
        assert_eq!(sub.len(), Ok(0));
        list.push_back(1);
        assert_eq!(sub.to_vec(), Ok(Vec::<i32>::new()));
    }

    #[test]
    fn sub_list_adjacent_views_keep_their_elements() {
        let mut list = List::from_iter(0..4);
        let a = list.sub_list(0, 2).unwrap();
        let mut b = list.sub_list(2, 4).unwrap();

        b.insert(0, 9).unwrap();
        assert_eq!(a.to_vec(), Ok(vec![0, 1]));
        assert_eq!(b.to_vec(), Ok(vec![9, 2, 3]));

        list.push_back(4);
        assert_eq!(b.to_vec(), Ok(vec![9, 2, 3]));
        assert_eq!(list.to_vec(), vec![0, 1, 9, 2, 3, 4]);

        let mut list = List::from_iter(['A', 'B', 'C']);
        let sub = list.sub_list(1, 3).unwrap();
        list.push_back('D');
        assert_eq!(sub.to_vec(), Ok(vec!['B', 'C']));
        list.insert(3, 'X').unwrap();
        assert_eq!(sub.to_vec(), Ok(vec!['B', 'C']));
    }

    #[test]
    fn sub_list_append_extends_enclosing_views() {
        let list = List::from_iter(0..10);
        let outer = list.sub_list(2, 8).unwrap();
        let mut inner = outer.sub_list(4, 6).unwrap();
        assert_eq!(inner.to_vec(), Ok(vec![6, 7]));

        inner.push_back(99).unwrap();
        assert_eq!(inner.to_vec(), Ok(vec![6, 7, 99]));
        assert_eq!(outer.to_vec(), Ok(vec![2, 3, 4, 5, 6, 7, 99]));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4, 5, 6, 7, 99, 8, 9]);

        // a nested view outlives the view it was opened from
        let mut tail = outer.sub_list(7, 7).unwrap();
        drop(outer);
        tail.push_back(100).unwrap();
        assert_eq!(tail.to_vec(), Ok(vec![100]));
        assert_eq!(inner.to_vec(), Ok(vec![6, 7, 99]));
        assert_eq!(list.core().ranges.len(), 2);
    }

    #[test]
    fn sub_list_edits() {
        let list = List::from_iter(0..6);
        let mut sub = list.sub_list(1, 5).unwrap();
        assert_eq!(sub.set(0, 10), Ok(1));
        assert_eq!(sub.remove(3), Ok(4));
        sub.insert(3, 40).unwrap();
        sub.push_back(50).unwrap();
        assert_eq!(sub.to_vec(), Ok(vec![10, 2, 3, 40, 50]));
        assert_eq!(list.to_vec(), vec![0, 10, 2, 3, 40, 50, 5]);
        assert_eq!(sub.index_of(&3), Ok(Some(2)));
        assert_eq!(sub.index_of(&0), Ok(None));
        assert_eq!(sub.contains(&50), Ok(true));
        assert_eq!(sub.contains(&5), Ok(false));
        assert!(sub.remove(5).is_err());
        assert!(sub.insert(6, 0).is_err());

        sub.clear().unwrap();
        assert_eq!(sub.is_empty(), Ok(true));
        assert_eq!(list.to_vec(), vec![0, 5]);
        list.core().assert_ring();
    }

    #[test]
    fn sub_list_nested_views_share_edits() {
        let list = List::from_iter(0..10);
        let mut outer = list.sub_list(2, 8).unwrap();
        let mut inner = outer.sub_list(2, 4).unwrap();
        let sibling = list.sub_list(6, 9).unwrap();
        assert_eq!(inner.to_vec(), Ok(vec![4, 5]));

        assert_eq!(inner.remove(0), Ok(4));
        assert_eq!(outer.to_vec(), Ok(vec![2, 3, 5, 6, 7]));
        assert_eq!(sibling.to_vec(), Ok(vec![6, 7, 8]));

        outer.insert(0, 1).unwrap();
        assert_eq!(inner.to_vec(), Ok(vec![5]));
        assert_eq!(outer.to_vec(), Ok(vec![1, 2, 3, 5, 6, 7]));
        assert_eq!(list.to_vec(), vec![0, 1, 1, 2, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn sub_list_iter() {
        let list = List::from_iter(0..8);
        let mut sub = list.sub_list(2, 5).unwrap();
        assert_eq!(sub.iter().unwrap().collect::<Vec<_>>(), vec![2, 3, 4]);

        let mut iter = sub.iter().unwrap();
        assert_eq!(iter.next(), Some(2));
        sub.push_back(9).unwrap();
        assert_eq!(iter.collect::<Vec<_>>(), vec![3, 4, 9]);

        let empty = list.sub_list(3, 3).unwrap();
        assert_eq!(empty.iter().unwrap().next(), None);
        assert_eq!(list.core().cursors.len(), 0);
    }

    #[test]
    fn sub_list_close() {
        let list = List::from_iter(0..3);
        let mut sub = list.sub_list(0, 2).unwrap();
        sub.close();
        sub.close();
        assert!(sub.is_closed());
        assert_eq!(sub.len(), Err(Error::IllegalState("sub-list is closed")));
        assert!(sub.iter().is_err());
        assert_eq!(list.core().ranges.len(), 0);

        let sub = list.sub_list(0, 2).unwrap();
        drop(list);
        assert_eq!(sub.get(0), Err(Error::IllegalState("list has been dropped")));
    }

    #[test]
    fn sub_list_close_while_borrowed() {
        let list = List::from_iter(0..3);
        let mut sub = list.sub_list(0, 2).unwrap();
        let guard = list.core();
        sub.close();
        drop(guard);
        assert!(!sub.is_closed());
        assert_eq!(list.core().ranges.len(), 1);
        assert_eq!(sub.to_vec(), Ok(vec![0, 1]));

        sub.close();
        assert!(sub.is_closed());
        assert_eq!(list.core().ranges.len(), 0);
    }

    #[test]
    fn sub_list_eq_and_display() {
        let list = List::from_iter([1, 2, 3, 1, 2]);
        let a = list.sub_list(0, 2).unwrap();
        let b = list.sub_list(3, 5).unwrap();
        let c = list.sub_list(1, 3).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a == List::from_iter([1, 2]));
        assert!(a == [1, 2][..]);
        assert_eq!(a.to_string(), "[1, 2]");
        assert_eq!(format!("{:?}", c), "[2, 3]");
        assert_eq!(list.sub_list(0, 0).unwrap().to_string(), "[]");
    }
}
