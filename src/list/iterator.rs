use crate::list::cursor::Cursor;
use crate::list::sublist::SubList;
use crate::list::List;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over clones of the elements of a `List` or a `SubList`.
///
/// The `Iter` is driven by a registered [`Cursor`], so it does not borrow
/// the list: the list may be edited while the iterator is alive, and the
/// iterator follows the edits the same way a cursor does. Elements removed
/// before the iterator reaches them are never yielded.
///
/// # Examples
///
/// ```
/// use cursor_list::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3, 4]);
/// let mut iter = list.iter();
/// assert_eq!(iter.next(), Some(1));
///
/// list.remove(1).unwrap();
/// list.push_back(5);
/// assert_eq!(iter.collect::<Vec<_>>(), vec![3, 4, 5]);
/// ```
pub struct Iter<T> {
    cursor: Cursor<T>,
    /// The view whose end stops the iteration, if not the end of the list.
    limit: Option<SubList<T>>,
}

impl<T> Iter<T> {
    pub(crate) fn new(cursor: Cursor<T>) -> Self {
        Self {
            cursor,
            limit: None,
        }
    }

    pub(crate) fn bounded(cursor: Cursor<T>, limit: SubList<T>) -> Self {
        Self {
            cursor,
            limit: Some(limit),
        }
    }
}

impl<T> fmt::Debug for Iter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(limit) = &self.limit {
            let (_, to) = limit.bounds().ok()?;
            if self.cursor.next_index().ok()? >= to {
                return None;
            }
        }
        self.cursor.next().ok()
    }
}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). Elements are popped off the
/// list, so cursors still open on it see them being removed.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T: Clone> IntoIterator for &'a List<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}
