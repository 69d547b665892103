use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::rc::Rc;

use log::debug;

use crate::error::{check_index, check_position, Error, Result};
use crate::list::cursor::Cursor;
use crate::list::iterator::Iter;
use crate::list::pool::{NodePool, DEFAULT_POOL_CAPACITY};
use crate::list::registry::{CursorState, Observer, RangeState, Registry};
use crate::list::sublist::SubList;

pub mod cursor;
pub mod iterator;
pub mod sublist;

mod algorithms;
#[cfg(feature = "serde")]
mod persist;
pub(crate) mod pool;
pub(crate) mod registry;

/// The `List` is a doubly-linked list implemented as a cyclic ring of nodes
/// anchored by a ghost node.
///
/// Any number of [`Cursor`]s and [`SubList`] views may be open on the same
/// list at once. They do not borrow the list: each holds a weak reference to
/// the ring and is registered with it, so a structural change made through
/// any handle (the list itself, a cursor, or a sub-list) is immediately
/// reflected in all the others. Cursors and sub-lists adjust themselves
/// instead of failing when the list changes under them.
///
/// Nodes live in an arena and are addressed by index. Removed nodes are
/// kept in a bounded pool for reuse by later insertions, see
/// [`List::with_pool_capacity`].
///
/// # Naming Conventions
///
/// - the *ghost* node is the sentinel header of the ring. It never holds a
///   value, and by convention it is at index `len`;
/// - `at` is the index a node has (or gets) in the list when an edit is
///   performed. Every edit carries it so the registered observers can keep
///   their positions exact.
pub struct List<T> {
    pub(crate) core: Rc<RefCell<Core<T>>>,
}

/// The index of a node in the arena of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    /// The ghost node, always the first slot of the arena.
    pub(crate) const GHOST: NodeId = NodeId(0);
}

pub(crate) struct Node<T> {
    /// `None` for the ghost node and for detached slots.
    pub(crate) value: Option<T>,
    pub(crate) next: NodeId,
    pub(crate) prev: NodeId,
}

impl<T> Node<T> {
    fn detached() -> Self {
        Self {
            value: None,
            next: NodeId::GHOST,
            prev: NodeId::GHOST,
        }
    }
}

/// The shared state behind a [`List`] and all of its cursors and sub-lists.
pub(crate) struct Core<T> {
    nodes: Vec<Node<T>>,
    len: usize,
    pool: NodePool,
    /// Detached slots that did not fit in the pool.
    vacant: Vec<NodeId>,
    pub(crate) cursors: Registry<CursorState>,
    pub(crate) ranges: Registry<RangeState>,
}

// ring operations
impl<T> Core<T> {
    pub(crate) fn new(pool_capacity: usize) -> Self {
        Self {
            nodes: vec![Node::detached()],
            len: 0,
            pool: NodePool::new(pool_capacity),
            vacant: Vec::new(),
            cursors: Registry::new(),
            ranges: Registry::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn node(&self, node: NodeId) -> &Node<T> {
        &self.nodes[node.0]
    }

    fn node_mut(&mut self, node: NodeId) -> &mut Node<T> {
        &mut self.nodes[node.0]
    }

    pub(crate) fn front_node(&self) -> NodeId {
        self.node(NodeId::GHOST).next
    }

    pub(crate) fn back_node(&self) -> NodeId {
        self.node(NodeId::GHOST).prev
    }

    /// Returns the value held by `node`, or `NoSuchElement` for the ghost node.
    pub(crate) fn value(&self, node: NodeId) -> Result<&T> {
        self.node(node).value.as_ref().ok_or(Error::NoSuchElement)
    }

    pub(crate) fn value_mut(&mut self, node: NodeId) -> Result<&mut T> {
        self.node_mut(node).value.as_mut().ok_or(Error::NoSuchElement)
    }

    fn connect(&mut self, prev: NodeId, next: NodeId) {
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;
    }

    /// Returns the node at index `at`.
    ///
    /// The valid range is `0..len`, or `0..=len` if `allow_end` is set, in
    /// which case `at == len` returns the ghost node. The walk starts from
    /// whichever end of the ring is nearer.
    pub(crate) fn get_node(&self, at: usize, allow_end: bool) -> Result<NodeId> {
        if allow_end {
            check_position(at, self.len)?;
        } else {
            check_index(at, self.len)?;
        }
        let mut node = NodeId::GHOST;
        if at < self.len / 2 {
            for _ in 0..=at {
                node = self.node(node).next;
            }
        } else {
            for _ in at..self.len {
                node = self.node(node).prev;
            }
        }
        Ok(node)
    }

    fn allocate(&mut self, value: T, prev: NodeId, next: NodeId) -> NodeId {
        let id = match self.pool.acquire().or_else(|| self.vacant.pop()) {
            Some(id) => id,
            None => {
                self.nodes.push(Node::detached());
                NodeId(self.nodes.len() - 1)
            }
        };
        let node = self.node_mut(id);
        node.value = Some(value);
        node.prev = prev;
        node.next = next;
        id
    }

    /// Returns an unlinked slot to the pool, or to the arena if the pool is full.
    fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, NodeId::GHOST, "Cannot release the ghost node");
        let node = self.node_mut(id);
        node.value = None;
        node.next = NodeId::GHOST;
        node.prev = NodeId::GHOST;
        if self.pool.release(id) {
            return;
        }
        if id.0 == self.nodes.len() - 1 {
            self.nodes.pop();
        } else {
            self.vacant.push(id);
        }
    }

    /// Links a new node holding `value` right before `next`, where the new
    /// node gets index `at`.
    pub(crate) fn add_node_before(&mut self, next: NodeId, at: usize, value: T) -> NodeId {
        let prev = self.node(next).prev;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let node = self.allocate(value, prev, next);
        self.connect(prev, node);
        self.connect(node, next);
        self.len += 1;
        self.notify(|observer| observer.node_inserted(at));
        node
    }

    /// Links a new node holding `value` right after `prev`, where the new
    /// node gets index `at`.
    pub(crate) fn add_node_after(&mut self, prev: NodeId, at: usize, value: T) -> NodeId {
        let next = self.node(prev).next;
        self.add_node_before(next, at, value)
    }

    /// Links a new node holding `value` right before `next` on behalf of the
    /// sub-list `range`, which keeps the node even when it lands right after
    /// its last element.
    pub(crate) fn add_node_in_range(
        &mut self,
        next: NodeId,
        at: usize,
        value: T,
        range: usize,
    ) -> NodeId {
        let node = self.add_node_before(next, at, value);
        self.ranges.extend(range, at);
        node
    }

    /// Unlinks `node`, which is at index `at`, and returns its value.
    ///
    /// Every cursor waiting on `node` is moved to its successor before the
    /// slot is recycled.
    pub(crate) fn remove_node(&mut self, node: NodeId, at: usize) -> Result<T> {
        let value = self.node_mut(node).value.take().ok_or(Error::NoSuchElement)?;
        let (prev, next) = (self.node(node).prev, self.node(node).next);
        self.connect(prev, next);
        self.len -= 1;
        self.notify(|observer| observer.node_removed(node, at, next));
        self.release(node);
        Ok(value)
    }

    /// Unlinks and drops every node, front to back.
    pub(crate) fn clear(&mut self) {
        let mut node = self.front_node();
        while node != NodeId::GHOST {
            let next = self.node(node).next;
            drop(self.node_mut(node).value.take());
            self.release(node);
            node = next;
        }
        self.connect(NodeId::GHOST, NodeId::GHOST);
        self.len = 0;
        self.notify(|observer| observer.cleared());
    }

    fn notify<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn Observer),
    {
        for cursor in self.cursors.iter_mut() {
            f(cursor as &mut dyn Observer);
        }
        for range in self.ranges.iter_mut() {
            f(range as &mut dyn Observer);
        }
    }

    pub(crate) fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub(crate) fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub(crate) fn set_pool_capacity(&mut self, capacity: usize) {
        let evicted = self.pool.set_capacity(capacity);
        if !evicted.is_empty() {
            debug!(
                "pool: capacity set to {}, evicted {} nodes",
                capacity,
                evicted.len()
            );
        }
        self.vacant.extend(evicted);
    }

    /// Iterates over the values of the nodes at `start..end`.
    pub(crate) fn values(&self, start: usize, end: usize) -> Values<'_, T> {
        let node = self.get_node(start, true).unwrap_or(NodeId::GHOST);
        Values {
            core: self,
            node,
            remaining: end.saturating_sub(start),
        }
    }

    /// Finds the first node in `start..end` whose value satisfies `pred`,
    /// returning it with its index.
    pub(crate) fn find<F>(&self, start: usize, end: usize, mut pred: F) -> Option<(NodeId, usize)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut node = self.get_node(start, true).ok()?;
        for at in start..end {
            if self.value(node).map_or(false, &mut pred) {
                return Some((node, at));
            }
            node = self.node(node).next;
        }
        None
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: NodeId, next: NodeId) {
        assert_eq!(self.node(prev).next, next);
        assert_eq!(self.node(next).prev, prev);
    }

    /// Checks that walking the ring `len` steps in either direction returns
    /// to the ghost node.
    #[cfg(test)]
    pub(crate) fn assert_ring(&self) {
        let mut node = NodeId::GHOST;
        for _ in 0..self.len {
            let next = self.node(node).next;
            assert_ne!(next, NodeId::GHOST, "ring shorter than len");
            assert_eq!(self.node(next).prev, node);
            node = next;
        }
        assert_eq!(self.node(node).next, NodeId::GHOST);
        let mut node = NodeId::GHOST;
        for _ in 0..self.len {
            node = self.node(node).prev;
            assert_ne!(node, NodeId::GHOST, "ring shorter than len");
        }
        assert_eq!(self.node(node).prev, NodeId::GHOST);
    }
}

impl<T> Drop for Core<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Borrowing iterator over the values of a range of nodes.
pub(crate) struct Values<'a, T> {
    core: &'a Core<T>,
    node: NodeId,
    remaining: usize,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.core.value(self.node).ok()?;
        self.node = self.core.node(self.node).next;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

// private methods
impl<T> List<T> {
    pub(crate) fn from_core(core: Core<T>) -> Self {
        Self {
            core: Rc::new(RefCell::new(core)),
        }
    }

    pub(crate) fn core(&self) -> Ref<'_, Core<T>> {
        self.core.borrow()
    }

    pub(crate) fn core_mut(&mut self) -> RefMut<'_, Core<T>> {
        self.core.borrow_mut()
    }
}

impl<T> List<T> {
    /// Creates an empty `List` with the default pool capacity
    /// ([`DEFAULT_POOL_CAPACITY`](crate::DEFAULT_POOL_CAPACITY)).
    ///
    /// # Examples
    /// ```
    /// use cursor_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_pool_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Creates an empty `List` that keeps up to `capacity` removed nodes for
    /// reuse.
    ///
    /// A capacity of 0 disables node recycling. The capacity never changes
    /// what the list contains, only how often it allocates.
    ///
    /// # Examples
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut queue = List::with_pool_capacity(2);
    /// queue.push_back(1);
    /// queue.push_back(2);
    /// queue.push_back(3);
    /// assert_eq!(queue.pop_front(), Ok(1));
    /// assert_eq!(queue.pop_front(), Ok(2));
    /// assert_eq!(queue.pop_front(), Ok(3));
    /// assert_eq!(queue.pool_len(), 2);
    /// ```
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self::from_core(Core::new(capacity))
    }

    /// Returns the maximum number of removed nodes kept for reuse.
    pub fn pool_capacity(&self) -> usize {
        self.core().pool_capacity()
    }

    /// Changes the maximum number of removed nodes kept for reuse. Shrinking
    /// it evicts the surplus immediately.
    pub fn set_pool_capacity(&mut self, capacity: usize) {
        self.core_mut().set_pool_capacity(capacity)
    }

    /// Returns the number of removed nodes currently kept for reuse.
    pub fn pool_len(&self) -> usize {
        self.core().pool_len()
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.core().len()
    }

    /// Removes all elements from the `List`.
    ///
    /// Every open cursor ends up at the (now empty) end of the list, and
    /// every sub-list becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert!(list.front().is_err());
    /// ```
    pub fn clear(&mut self) {
        self.core_mut().clear();
    }

    /// Returns a clone of the element at the given index.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'c']);
    /// assert_eq!(list.get(1), Ok('b'));
    /// assert_eq!(list.get(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, at: usize) -> Result<T>
    where
        T: Clone,
    {
        let core = self.core();
        let node = core.get_node(at, false)?;
        core.value(node).map(T::clone)
    }

    /// Replaces the element at the given index, returning the old one.
    ///
    /// This is not a structural change: cursors and sub-lists are not
    /// affected.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.set(1, 5), Ok(2));
    /// assert_eq!(list.to_vec(), vec![1, 5, 3]);
    /// ```
    pub fn set(&mut self, at: usize, elt: T) -> Result<T> {
        let mut core = self.core_mut();
        let node = core.get_node(at, false)?;
        core.value_mut(node).map(|value| mem::replace(value, elt))
    }

    /// Returns a clone of the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), Err(Error::NoSuchElement));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(1));
    /// ```
    pub fn front(&self) -> Result<T>
    where
        T: Clone,
    {
        let core = self.core();
        core.value(core.front_node()).map(T::clone)
    }

    /// Returns a clone of the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), Err(Error::NoSuchElement));
    ///
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Ok(3));
    /// ```
    pub fn back(&self) -> Result<T>
    where
        T: Clone,
    {
        let core = self.core();
        core.value(core.back_node()).map(T::clone)
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, plus *O*(*k*) for the
    /// *k* open cursors and sub-lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Ok(2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(1));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.core_mut().add_node_after(NodeId::GHOST, 0, elt);
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time, plus *O*(*k*) for the
    /// *k* open cursors and sub-lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Ok(3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        let mut core = self.core_mut();
        let at = core.len();
        core.add_node_before(NodeId::GHOST, at, elt);
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), Err(Error::NoSuchElement));
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Ok(3));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert_eq!(list.pop_front(), Err(Error::NoSuchElement));
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        let mut core = self.core_mut();
        let front = core.front_node();
        core.remove_node(front, 0)
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_back(), Err(Error::NoSuchElement));
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Ok(3));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        let mut core = self.core_mut();
        let back = core.back_node();
        let at = core.len().saturating_sub(1);
        core.remove_node(back, at)
    }

    /// Adds an element at the given index in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.insert(2, 4).unwrap();
    /// list.insert(4, 5).unwrap();
    /// assert!(list.insert(7, 6).is_err());
    ///
    /// assert_eq!(list.to_vec(), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, at: usize, elt: T) -> Result<()> {
        let mut core = self.core_mut();
        let next = core.get_node(at, true)?;
        core.add_node_before(next, at, elt);
        Ok(())
    }

    /// Removes the element at the given index and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(1);
    /// list.push_front(2);
    /// list.push_front(3);
    ///
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(3));
    /// assert_eq!(list.remove(0), Ok(1));
    /// assert!(list.remove(0).is_err());
    /// ```
    pub fn remove(&mut self, at: usize) -> Result<T> {
        let mut core = self.core_mut();
        let node = core.get_node(at, false)?;
        core.remove_node(node, at)
    }

    /// Removes the first element equal to `x`. Returns `true` if one was
    /// found.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 1]);
    /// assert!(list.remove_item(&1));
    /// assert_eq!(list.to_vec(), vec![2, 1]);
    /// assert!(!list.remove_item(&3));
    /// ```
    pub fn remove_item(&mut self, x: &T) -> bool
    where
        T: PartialEq,
    {
        let mut core = self.core_mut();
        let len = core.len();
        match core.find(0, len, |e| e == x) {
            Some((node, at)) => core.remove_node(node, at).is_ok(),
            None => false,
        }
    }

    /// Opens a cursor before the first element.
    ///
    /// The cursor stays registered with the list until it is closed or
    /// dropped.
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
    /// ```
    pub fn cursor(&self) -> Cursor<T> {
        let front = self.core().front_node();
        Cursor::register(&self.core, front, 0)
    }

    /// Opens a cursor before the element at the given index, so that
    /// `next()` returns element `at` first. `at == len` places the cursor
    /// at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_at(3).unwrap();
    /// assert!(!cursor.has_next().unwrap());
    /// assert_eq!(cursor.previous(), Ok(3));
    /// assert!(list.cursor_at(4).is_err());
    /// ```
    pub fn cursor_at(&self, at: usize) -> Result<Cursor<T>> {
        let next = self.core().get_node(at, true)?;
        Ok(Cursor::register(&self.core, next, at))
    }

    /// Opens a live view of the elements at `from..to`.
    ///
    /// Edits through the view are edits of this list, and the view keeps its
    /// bounds right when the list is edited through any other handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `to > len` or `from > to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(['A', 'B', 'C', 'D', 'E']);
    /// let mut sub = list.sub_list(1, 4).unwrap();
    /// assert_eq!(sub.to_vec(), Ok(vec!['B', 'C', 'D']));
    ///
    /// assert_eq!(sub.remove_item(&'C'), Ok(true));
    /// assert_eq!(sub.to_vec(), Ok(vec!['B', 'D']));
    /// assert_eq!(list.to_vec(), vec!['A', 'B', 'D', 'E']);
    ///
    /// list.push_front('Z');
    /// assert_eq!(sub.to_vec(), Ok(vec!['B', 'D']));
    /// ```
    pub fn sub_list(&self, from: usize, to: usize) -> Result<SubList<T>> {
        SubList::new(&self.core, from, to, None)
    }

    /// Provides a forward iterator that yields clones of the elements.
    ///
    /// The iterator is backed by a cursor, so it survives edits made to the
    /// list while it is alive and always observes the list as it is now.
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
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(0));
    /// list.remove(1).unwrap();
    /// assert_eq!(iter.next(), Some(2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T>
    where
        T: Clone,
    {
        Iter::new(self.cursor())
    }

    /// Collects clones of the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let core = self.core();
        core.values(0, core.len()).cloned().collect()
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let core = self.core();
        f.debug_list().entries(core.values(0, core.len())).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}
