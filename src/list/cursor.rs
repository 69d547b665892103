use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::list::registry::{CursorState, Returned};
use crate::list::{Core, NodeId};

const CLOSED: &str = "cursor is closed";
const DROPPED: &str = "list has been dropped";
const BORROWED: &str = "list is already borrowed";
const UNREGISTERED: &str = "cursor is not registered";
const NOTHING_RETURNED: &str = "neither next nor previous has been called since the last add or remove";

/// A persistent cursor over a `List`.
///
/// A `Cursor` rests *between* two elements. In a list with length *n*,
/// there are *n* + 1 valid locations for the cursor, indexed by 0, 1, ...,
/// *n*, where *n* is right before the ghost node of the list. `next()`
/// returns the element after the cursor and moves past it, `previous()`
/// returns the element before it and moves back.
///
/// Unlike an iterator, a cursor does not borrow the list. Any number of
/// cursors may be open at the same time, and the list may be edited through
/// the list itself, through a sub-list or through another cursor while they
/// are open. Every edit is reported to all the cursors before it returns, so
/// that:
///
/// - an element inserted right before a cursor is returned by its next
///   `previous()`, not by its next `next()`;
/// - if the element a cursor would return next is removed, the cursor moves
///   on to the element that followed it, and the removed element is never
///   returned;
/// - if the element returned by the last `next()`/`previous()` is removed,
///   `set` and `remove` are refused until the cursor moves again.
///
/// A cursor never fails because the list changed under it.
///
/// The cursor stays registered with the list, and is visited by every edit,
/// until [`close`] is called or it is dropped.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost node
/// of the list is denoted by `#`).
/// ```
/// use cursor_list::List;
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C D #]
/// let mut list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create two cursors at start: [|A B C D #]
/// let mut c1 = list.cursor();
/// let mut c2 = list.cursor();
///
/// // Move c1 forward: [ A B|C D #]
/// assert_eq!(c1.next(), Ok('A'));
/// assert_eq!(c1.next(), Ok('B'));
///
/// // Remove 'A' through c2 and 'C' through the list: [ B|D #]
/// assert_eq!(c2.next(), Ok('A'));
/// assert_eq!(c2.remove(), Ok('A'));
/// assert_eq!(list.remove(1), Ok('C'));
///
/// // c1 is still right after 'B'
/// assert_eq!(c1.next_index(), Ok(1));
/// assert_eq!(c1.next(), Ok('D'));
/// assert!(c1.next().is_err());
/// ```
///
/// [`close`]: Cursor::close
pub struct Cursor<T> {
    core: Weak<RefCell<Core<T>>>,
    /// `None` once closed.
    id: Option<usize>,
}

// Private methods
impl<T> Cursor<T> {
    /// Registers a new cursor resting right before `next`, at `index`.
    pub(crate) fn register(core: &Rc<RefCell<Core<T>>>, next: NodeId, index: usize) -> Self {
        let id = core.borrow_mut().cursors.open(next, index);
        Self {
            core: Rc::downgrade(core),
            id: Some(id),
        }
    }

    fn with_core<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Core<T>, usize) -> Result<R>,
    {
        let id = self.id.ok_or(Error::IllegalState(CLOSED))?;
        let rc = self.core.upgrade().ok_or(Error::IllegalState(DROPPED))?;
        let mut core = rc
            .try_borrow_mut()
            .map_err(|_| Error::IllegalState(BORROWED))?;
        f(&mut core, id)
    }

    fn state<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Core<T>, &CursorState) -> R,
    {
        self.with_core(|core, id| Ok(f(core, core.cursor_state(id)?)))
    }
}

impl<T> Cursor<T> {
    /// Returns `true` if a call to [`next`](Cursor::next) would return an
    /// element.
    pub fn has_next(&self) -> Result<bool> {
        self.state(|_, state| state.next != NodeId::GHOST)
    }

    /// Returns `true` if a call to [`previous`](Cursor::previous) would
    /// return an element.
    pub fn has_previous(&self) -> Result<bool> {
        self.state(|core, state| core.node(state.next).prev != NodeId::GHOST)
    }

    /// Returns the index of the element that [`next`](Cursor::next) would
    /// return, or the length of the list if the cursor is at the end.
    pub fn next_index(&self) -> Result<usize> {
        self.state(|_, state| state.index)
    }

    /// Returns the index of the element that
    /// [`previous`](Cursor::previous) would return, or `None` if the cursor
    /// is at the start.
    pub fn previous_index(&self) -> Result<Option<usize>> {
        self.state(|_, state| state.index.checked_sub(1))
    }

    /// Returns the element after the cursor and moves the cursor past it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] at the end of the list, and
    /// [`Error::IllegalState`] if the cursor is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next(), Ok(1));
    /// assert_eq!(cursor.next(), Ok(2));
    /// assert_eq!(cursor.next(), Err(Error::NoSuchElement));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<T>
    where
        T: Clone,
    {
        self.with_core(|core, id| {
            let node = core.cursor_next(id)?;
            core.value(node).map(T::clone)
        })
    }

    /// Returns the element before the cursor and moves the cursor back
    /// before it.
    ///
    /// Alternating calls to `next` and `previous` return the same element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] at the start of the list, and
    /// [`Error::IllegalState`] if the cursor is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next(), Ok(1));
    /// assert_eq!(cursor.next(), Ok(2));
    /// assert_eq!(cursor.previous(), Ok(2));
    /// assert_eq!(cursor.next(), Ok(2));
    /// ```
    pub fn previous(&mut self) -> Result<T>
    where
        T: Clone,
    {
        self.with_core(|core, id| {
            let node = core.cursor_previous(id)?;
            core.value(node).map(T::clone)
        })
    }

    /// Replaces the element returned by the last `next`/`previous` call,
    /// returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if there was no such call since the
    /// last `add`/`remove`, if that element has been removed since, or if
    /// the cursor is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert!(cursor.set(0).is_err());
    /// cursor.next().unwrap();
    /// assert_eq!(cursor.set(10), Ok(1));
    /// assert_eq!(cursor.set(20), Ok(10));
    /// assert_eq!(list.to_vec(), vec![20, 2, 3]);
    /// ```
    pub fn set(&mut self, elt: T) -> Result<T> {
        self.with_core(|core, id| core.cursor_set(id, elt))
    }

    /// Removes the element returned by the last `next`/`previous` call.
    ///
    /// Afterwards, `set` and `remove` are refused until the cursor moves
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if there was no such call since the
    /// last `add`/`remove`, if that element has been removed since, or if
    /// the cursor is closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// cursor.next().unwrap();
    /// cursor.next().unwrap();
    /// assert_eq!(cursor.remove(), Ok(2));
    /// assert!(cursor.remove().is_err());
    /// assert_eq!(cursor.next(), Ok(3));
    /// assert_eq!(list.to_vec(), vec![1, 3]);
    /// ```
    pub fn remove(&mut self) -> Result<T> {
        self.with_core(|core, id| core.cursor_remove(id))
    }

    /// Inserts an element right before the cursor.
    ///
    /// A following `next()` is not affected, a following `previous()`
    /// returns the new element. `set` and `remove` are refused until the
    /// cursor moves again.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(["1", "2", "3"]);
    /// let mut cursor = list.cursor();
    /// cursor.next().unwrap();
    /// cursor.add("X").unwrap();
    /// assert_eq!(list.to_vec(), vec!["1", "X", "2", "3"]);
    /// assert!(cursor.remove().is_err());
    /// assert_eq!(cursor.next(), Ok("2"));
    /// ```
    pub fn add(&mut self, elt: T) -> Result<()> {
        self.with_core(|core, id| core.cursor_add(id, elt))
    }

    /// Unregisters the cursor from its list. Every later call fails with
    /// [`Error::IllegalState`].
    ///
    /// Closing is idempotent, and dropping a cursor closes it. If the list
    /// is borrowed at that moment the cursor stays open.
    pub fn close(&mut self) {
        let id = match self.id {
            Some(id) => id,
            None => return,
        };
        match self.core.upgrade() {
            Some(rc) => {
                if let Ok(mut core) = rc.try_borrow_mut() {
                    core.cursors.close(id);
                    self.id = None;
                }
            }
            None => self.id = None,
        }
    }

    /// Returns `true` if the cursor has been closed.
    pub fn is_closed(&self) -> bool {
        self.id.is_none()
    }
}

impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Cursor");
        match self.state(|_, state| state.index) {
            Ok(index) => f.field("index", &index),
            Err(error) => f.field("error", &error),
        };
        f.finish()
    }
}

// the cursor protocol, on the shared state
impl<T> Core<T> {
    pub(crate) fn cursor_state(&self, id: usize) -> Result<&CursorState> {
        self.cursors
            .get(id)
            .ok_or(Error::IllegalState(UNREGISTERED))
    }

    fn cursor_state_mut(&mut self, id: usize) -> Result<&mut CursorState> {
        self.cursors
            .get_mut(id)
            .ok_or(Error::IllegalState(UNREGISTERED))
    }

    pub(crate) fn cursor_next(&mut self, id: usize) -> Result<NodeId> {
        let state = self.cursor_state(id)?;
        let (node, index) = (state.next, state.index);
        if node == NodeId::GHOST {
            return Err(Error::NoSuchElement);
        }
        let next = self.node(node).next;
        let state = self.cursor_state_mut(id)?;
        state.next = next;
        state.index = index + 1;
        state.last_returned = Some(Returned { node, index });
        Ok(node)
    }

    pub(crate) fn cursor_previous(&mut self, id: usize) -> Result<NodeId> {
        let state = self.cursor_state(id)?;
        let (next, index) = (state.next, state.index);
        let node = self.node(next).prev;
        if node == NodeId::GHOST {
            return Err(Error::NoSuchElement);
        }
        let state = self.cursor_state_mut(id)?;
        state.next = node;
        state.index = index - 1;
        state.last_returned = Some(Returned {
            node,
            index: index - 1,
        });
        Ok(node)
    }

    pub(crate) fn cursor_set(&mut self, id: usize, elt: T) -> Result<T> {
        let returned = self
            .cursor_state(id)?
            .last_returned
            .ok_or(Error::IllegalState(NOTHING_RETURNED))?;
        self.value_mut(returned.node)
            .map(|value| mem::replace(value, elt))
    }

    pub(crate) fn cursor_remove(&mut self, id: usize) -> Result<T> {
        let returned = self
            .cursor_state_mut(id)?
            .last_returned
            .take()
            .ok_or(Error::IllegalState(NOTHING_RETURNED))?;
        self.remove_node(returned.node, returned.index)
    }

    pub(crate) fn cursor_add(&mut self, id: usize, elt: T) -> Result<()> {
        let state = self.cursor_state_mut(id)?;
        state.last_returned = None;
        let (next, index) = (state.next, state.index);
        self.add_node_before(next, index, elt);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::list::List;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::iter::FromIterator;

    #[test]
    fn cursor_walks_both_ways() {
        let list = List::from_iter(0..5);
        let mut cursor = list.cursor();
        assert_eq!(cursor.has_previous(), Ok(false));
        assert_eq!(cursor.previous(), Err(Error::NoSuchElement));
        for i in 0..5 {
            assert_eq!(cursor.next_index(), Ok(i));
            assert_eq!(cursor.next(), Ok(i));
        }
        assert_eq!(cursor.has_next(), Ok(false));
        assert_eq!(cursor.next(), Err(Error::NoSuchElement));
        for i in (0..5).rev() {
            assert_eq!(cursor.previous_index(), Ok(Some(i)));
            assert_eq!(cursor.previous(), Ok(i));
        }
        assert_eq!(cursor.previous_index(), Ok(None));
    }

    #[test]
    fn cursor_next_then_previous_is_identity() {
        let list = List::from_iter(0..6);
        for at in 1..5 {
            let mut cursor = list.cursor_at(at).unwrap();
            let forward = cursor.next().unwrap();
            assert_eq!(cursor.previous(), Ok(forward));
            assert_eq!(cursor.next_index(), Ok(at));

            let backward = cursor.previous().unwrap();
            assert_eq!(cursor.next(), Ok(backward));
            assert_eq!(cursor.next_index(), Ok(at));
        }
    }

    #[test]
    fn cursor_on_empty_list() {
        let list = List::<u8>::new();
        let mut cursor = list.cursor();
        assert_eq!(cursor.has_next(), Ok(false));
        assert_eq!(cursor.has_previous(), Ok(false));
        assert_eq!(cursor.next(), Err(Error::NoSuchElement));
        assert_eq!(cursor.previous(), Err(Error::NoSuchElement));
        assert!(matches!(cursor.remove(), Err(Error::IllegalState(_))));
        cursor.add(7).unwrap();
        assert_eq!(list.to_vec(), vec![7]);
        assert_eq!(cursor.previous(), Ok(7));
    }

    #[test]
    fn cursor_survives_removal_by_another_cursor() {
        let list = List::from_iter([1, 2, 3, 4, 5]);
        let mut c1 = list.cursor();
        assert_eq!(c1.next(), Ok(1));
        assert_eq!(c1.next(), Ok(2));

        let mut c2 = list.cursor();
        assert_eq!(c2.next(), Ok(1));
        assert_eq!(c2.remove(), Ok(1));
        assert_eq!(list.to_vec(), vec![2, 3, 4, 5]);

        assert_eq!(c1.next(), Ok(3));
        assert_eq!(c1.previous(), Ok(3));
        assert_eq!(c1.previous(), Ok(2));
        assert_eq!(c1.has_previous(), Ok(false));
        list.core().assert_ring();
    }

    #[test]
    fn cursor_skips_removed_next_node() {
        let mut list = List::from_iter(['a', 'b', 'c', 'd']);
        let mut cursor = list.cursor_at(1).unwrap();
        assert_eq!(list.remove(1), Ok('b'));
        assert_eq!(cursor.next_index(), Ok(1));
        assert_eq!(cursor.next(), Ok('c'));
        assert_eq!(list.remove(0), Ok('a'));
        assert_eq!(cursor.next_index(), Ok(1));
        assert_eq!(cursor.previous(), Ok('c'));
        assert_eq!(cursor.has_previous(), Ok(false));
    }

    #[test]
    fn cursor_cannot_touch_a_removed_element() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.next(), Ok(1));
        assert_eq!(list.pop_front(), Ok(1));
        assert!(matches!(cursor.set(9), Err(Error::IllegalState(_))));
        assert!(matches!(cursor.remove(), Err(Error::IllegalState(_))));
        assert_eq!(cursor.next(), Ok(2));
        assert_eq!(cursor.set(9), Ok(2));
        assert_eq!(list.to_vec(), vec![9, 3]);
    }

    #[test]
    fn cursor_add_then_remove_is_refused() {
        let list = List::from_iter(vec!["1", "2", "3"]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.next(), Ok("1"));
        cursor.add("X").unwrap();
        assert_eq!(list.to_vec(), vec!["1", "X", "2", "3"]);
        assert!(matches!(cursor.remove(), Err(Error::IllegalState(_))));
        assert!(matches!(cursor.set("Y"), Err(Error::IllegalState(_))));
        assert_eq!(cursor.previous(), Ok("X"));
        assert_eq!(cursor.remove(), Ok("X"));
        assert_eq!(list.to_vec(), vec!["1", "2", "3"]);
    }

    #[test]
    fn cursor_remove_after_previous() {
        let list = List::from_iter(['a', 'b', 'c']);
        let mut cursor = list.cursor();
        cursor.next().unwrap();
        cursor.next().unwrap();
        assert_eq!(cursor.previous(), Ok('b'));
        assert_eq!(cursor.remove(), Ok('b'));
        assert_eq!(cursor.next_index(), Ok(1));
        assert_eq!(cursor.next(), Ok('c'));
        assert_eq!(list.to_vec(), vec!['a', 'c']);
    }

    #[test]
    fn cursor_insertion_before_it_is_behind_it() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_at(1).unwrap();
        list.insert(1, 10).unwrap();
        assert_eq!(cursor.next_index(), Ok(2));
        assert_eq!(cursor.next(), Ok(2));
        assert_eq!(cursor.previous(), Ok(2));
        assert_eq!(cursor.previous(), Ok(10));
    }

    #[test]
    fn cursor_remove_after_surrounding_edits() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.next(), Ok(1));
        assert_eq!(cursor.next(), Ok(2));
        list.insert(2, 20).unwrap();
        list.push_front(0);
        assert_eq!(list.to_vec(), vec![0, 1, 2, 20, 3]);
        assert_eq!(cursor.remove(), Ok(2));
        assert_eq!(list.to_vec(), vec![0, 1, 20, 3]);
        assert_eq!(cursor.next_index(), Ok(3));
        assert_eq!(cursor.next(), Ok(3));
    }

    #[test]
    fn cursor_close() {
        let list = List::from_iter([1, 2]);
        let mut cursor = list.cursor();
        assert_eq!(list.core().cursors.len(), 1);
        cursor.close();
        assert!(cursor.is_closed());
        cursor.close();
        assert_eq!(list.core().cursors.len(), 0);
        assert!(matches!(cursor.next(), Err(Error::IllegalState(_))));
        assert!(matches!(cursor.has_next(), Err(Error::IllegalState(_))));
        assert!(matches!(cursor.add(3), Err(Error::IllegalState(_))));

        let other = list.cursor();
        drop(other);
        assert_eq!(list.core().cursors.len(), 0);
    }

    #[test]
    fn cursor_close_while_borrowed() {
        let list = List::from_iter([1, 2]);
        let mut cursor = list.cursor();
        let guard = list.core();
        cursor.close();
        drop(guard);
        assert!(!cursor.is_closed());
        assert_eq!(list.core().cursors.len(), 1);
        assert_eq!(cursor.next(), Ok(1));

        cursor.close();
        assert!(cursor.is_closed());
        assert_eq!(list.core().cursors.len(), 0);
    }

    #[test]
    fn cursor_outlives_list() {
        let list = List::from_iter([1, 2]);
        let mut cursor = list.cursor();
        drop(list);
        assert_eq!(cursor.next(), Err(Error::IllegalState("list has been dropped")));
        cursor.close();
        assert!(cursor.is_closed());
    }

    #[test]
    fn cursor_after_clear() {
        let mut list = List::from_iter(0..4);
        let mut cursor = list.cursor_at(2).unwrap();
        cursor.next().unwrap();
        list.clear();
        assert_eq!(cursor.next_index(), Ok(0));
        assert_eq!(cursor.has_next(), Ok(false));
        assert!(matches!(cursor.remove(), Err(Error::IllegalState(_))));
        list.push_back(5);
        assert_eq!(cursor.has_next(), Ok(false));
        assert_eq!(cursor.previous(), Ok(5));
    }

    /// Interleaves random edits through the list with steps of a few cursors,
    /// checking each cursor against a plain position model.
    #[test]
    fn cursor_random_interleaving() {
        let mut rng = StdRng::seed_from_u64(0x5eed_c0de);
        let mut model: Vec<u32> = (0..20).collect();
        let mut list = List::from_iter(model.clone());
        let mut cursors: Vec<_> = (0..4).map(|_| list.cursor()).collect();
        let mut positions = vec![0_usize; cursors.len()];
        let mut fresh = 100;

        for _ in 0..3000 {
            let k = rng.gen_range(0..cursors.len());
            match rng.gen_range(0..6) {
                0 => {
                    let at = rng.gen_range(0..=model.len());
                    list.insert(at, fresh).unwrap();
                    model.insert(at, fresh);
                    fresh += 1;
                    for p in positions.iter_mut() {
                        if at <= *p {
                            *p += 1;
                        }
                    }
                }
                1 if !model.is_empty() => {
                    let at = rng.gen_range(0..model.len());
                    assert_eq!(list.remove(at), Ok(model.remove(at)));
                    for p in positions.iter_mut() {
                        if at < *p {
                            *p -= 1;
                        }
                    }
                }
                2 | 3 => {
                    let expected = model.get(positions[k]).copied();
                    assert_eq!(cursors[k].next().ok(), expected);
                    if expected.is_some() {
                        positions[k] += 1;
                    }
                }
                4 => {
                    let expected = positions[k].checked_sub(1).map(|i| model[i]);
                    assert_eq!(cursors[k].previous().ok(), expected);
                    if expected.is_some() {
                        positions[k] -= 1;
                    }
                }
                _ => {
                    let at = positions[k];
                    cursors[k].add(fresh).unwrap();
                    model.insert(at, fresh);
                    fresh += 1;
                    for p in positions.iter_mut() {
                        if at <= *p {
                            *p += 1;
                        }
                    }
                }
            }
            for (cursor, &p) in cursors.iter().zip(&positions) {
                assert_eq!(cursor.next_index(), Ok(p));
            }
            assert_eq!(list.to_vec(), model);
            list.core().assert_ring();
        }
    }
}
