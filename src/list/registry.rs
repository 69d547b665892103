//! Bookkeeping for the cursors and sub-lists open on a list.
//!
//! Every structural edit of the ring is reported to each registered
//! [`Observer`] before the edit returns. Positions are tracked both as node
//! ids and as indices, and an edit always carries the index it happened at,
//! so each observer can update itself in *O*(1).

use crate::list::NodeId;
use log::trace;

/// Something that tracks positions in a list and must follow its edits.
pub(crate) trait Observer {
    /// A node was inserted and now sits at index `at`.
    fn node_inserted(&mut self, at: usize);

    /// `node`, which was at index `at`, was unlinked; `successor` is the node
    /// that followed it.
    fn node_removed(&mut self, node: NodeId, at: usize, successor: NodeId);

    /// Every node was unlinked.
    fn cleared(&mut self);
}

/// A set of observer states addressed by small integer ids.
///
/// Ids of unregistered entries are reused.
#[derive(Debug)]
pub(crate) struct Registry<S> {
    entries: Vec<Option<S>>,
    free: Vec<usize>,
}

impl<S> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, state: S) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.entries[id] = Some(state);
                id
            }
            None => {
                self.entries.push(Some(state));
                self.entries.len() - 1
            }
        }
    }

    pub(crate) fn unregister(&mut self, id: usize) -> Option<S> {
        let state = self.entries.get_mut(id)?.take()?;
        self.free.push(id);
        Some(state)
    }

    pub(crate) fn get(&self, id: usize) -> Option<&S> {
        self.entries.get(id)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut S> {
        self.entries.get_mut(id)?.as_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.entries.iter_mut().filter_map(Option::as_mut)
    }
}

impl Registry<CursorState> {
    pub(crate) fn open(&mut self, next: NodeId, index: usize) -> usize {
        let id = self.register(CursorState::new(next, index));
        trace!(
            "cursor {} registered at index {} ({} open)",
            id,
            index,
            self.len()
        );
        id
    }

    pub(crate) fn close(&mut self, id: usize) {
        if self.unregister(id).is_some() {
            trace!("cursor {} unregistered", id);
        }
    }
}

impl Registry<RangeState> {
    pub(crate) fn open(&mut self, from: usize, to: usize, parent: Option<usize>) -> usize {
        let id = self.register(RangeState {
            from,
            to,
            parent,
            handles: 1,
        });
        trace!("range {} registered at {}..{}", id, from, to);
        id
    }

    /// Adds a handle to the range `id`, which stays registered until every
    /// handle is closed.
    pub(crate) fn share(&mut self, id: usize) -> bool {
        match self.get_mut(id) {
            Some(range) => {
                range.handles += 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn close(&mut self, id: usize) {
        let handles = match self.get(id) {
            Some(range) => range.handles,
            None => return,
        };
        if handles > 1 {
            if let Some(range) = self.get_mut(id) {
                range.handles -= 1;
            }
            return;
        }
        if let Some(closed) = self.unregister(id) {
            for range in self.iter_mut() {
                if range.parent == Some(id) {
                    range.parent = closed.parent;
                }
            }
            trace!("range {} unregistered", id);
        }
    }

    /// Keeps a node just inserted at `at` through the range `id` inside it
    /// and inside every range it was opened from.
    ///
    /// The notification pass only grows a range for insertions strictly
    /// before its end, so an append at the end of a view is claimed here.
    pub(crate) fn extend(&mut self, id: usize, at: usize) {
        let mut next = Some(id);
        while let Some(id) = next {
            let range = match self.get_mut(id) {
                Some(range) => range,
                None => break,
            };
            if range.to == at {
                range.to += 1;
            }
            next = range.parent;
        }
    }
}

/// The node returned by the last `next`/`previous` call, and its current
/// index.
///
/// Keeping the index rather than the direction of the call lets `remove`
/// report the right position even after other handles edited the list
/// around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Returned {
    pub(crate) node: NodeId,
    pub(crate) index: usize,
}

/// The position of a cursor.
///
/// The cursor rests between two nodes: `next` is the node the next forward
/// call returns (the ghost node at the end), and `index` is its index (`len`
/// at the end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CursorState {
    pub(crate) next: NodeId,
    pub(crate) index: usize,
    /// The target of `set`/`remove`, if there is one.
    pub(crate) last_returned: Option<Returned>,
}

impl CursorState {
    pub(crate) fn new(next: NodeId, index: usize) -> Self {
        Self {
            next,
            index,
            last_returned: None,
        }
    }
}

impl Observer for CursorState {
    fn node_inserted(&mut self, at: usize) {
        if at <= self.index {
            self.index += 1;
        }
        if let Some(returned) = &mut self.last_returned {
            if at <= returned.index {
                returned.index += 1;
            }
        }
    }

    fn node_removed(&mut self, node: NodeId, at: usize, successor: NodeId) {
        if self.next == node {
            self.next = successor;
        } else if at < self.index {
            self.index -= 1;
        }
        if let Some(returned) = self.last_returned {
            if returned.node == node {
                self.last_returned = None;
            } else if at < returned.index {
                self.last_returned = Some(Returned {
                    index: returned.index - 1,
                    ..returned
                });
            }
        }
    }

    fn cleared(&mut self) {
        self.next = NodeId::GHOST;
        self.index = 0;
        self.last_returned = None;
    }
}

/// The bounds `from..to` of a sub-list, as indices of the backing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeState {
    pub(crate) from: usize,
    pub(crate) to: usize,
    /// The range this one was opened from, if it is a nested view.
    pub(crate) parent: Option<usize>,
    /// Open handles sharing this range.
    handles: usize,
}

impl RangeState {
    pub(crate) fn len(&self) -> usize {
        self.to - self.from
    }
}

impl Observer for RangeState {
    /// An insertion before the range shifts it, an insertion at one of its
    /// indices grows it. Index `to` is outside the range.
    fn node_inserted(&mut self, at: usize) {
        if at < self.from {
            self.from += 1;
            self.to += 1;
        } else if at < self.to {
            self.to += 1;
        }
    }

    fn node_removed(&mut self, _node: NodeId, at: usize, _successor: NodeId) {
        if at < self.from {
            self.from -= 1;
            self.to -= 1;
        } else if at < self.to {
            self.to -= 1;
        }
    }

    fn cleared(&mut self) {
        self.from = 0;
        self.to = 0;
    }
}
