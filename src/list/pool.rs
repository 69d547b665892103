use crate::list::NodeId;
use log::trace;

/// The default number of detached nodes kept by a list for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 20;

/// A bounded cache of detached node slots.
///
/// Removing an element from a list releases its node slot here, and
/// inserting acquires one back before falling back to a fresh slot. This
/// makes queue-like usage (push at one end, pop at the other) run without
/// touching the allocator once the list has warmed up.
///
/// The pool is purely a performance layer: a list behaves identically with
/// a capacity of 0.
///
/// The pool never holds more than `capacity` slots.
#[derive(Debug, Clone)]
pub(crate) struct NodePool {
    free: Vec<NodeId>,
    capacity: usize,
}

impl NodePool {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.free.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Caches a detached slot, or returns `false` if the pool is full.
    ///
    /// The slot must already be cleared (no value, no links).
    pub(crate) fn release(&mut self, node: NodeId) -> bool {
        if self.free.len() < self.capacity {
            trace!("pool: cached node {:?} ({} cached)", node, self.free.len() + 1);
            self.free.push(node);
            true
        } else {
            false
        }
    }

    /// Takes a cached slot, or `None` if a fresh one must be allocated.
    pub(crate) fn acquire(&mut self) -> Option<NodeId> {
        let node = self.free.pop();
        if let Some(node) = node {
            trace!("pool: reused node {:?}", node);
        }
        node
    }

    /// Changes the capacity, returning the slots evicted by a shrink.
    pub(crate) fn set_capacity(&mut self, capacity: usize) -> Vec<NodeId> {
        self.capacity = capacity;
        if self.free.len() > capacity {
            self.free.split_off(capacity)
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_bounded() {
        let mut pool = NodePool::new(3);
        let released: Vec<_> = (1..=4).map(|i| pool.release(NodeId(i))).collect();
        assert_eq!(released, vec![true, true, true, false]);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn pool_acquire() {
        let mut pool = NodePool::new(2);
        assert_eq!(pool.acquire(), None);
        pool.release(NodeId(7));
        assert_eq!(pool.acquire(), Some(NodeId(7)));
        assert_eq!(pool.acquire(), None);
    }

    #[test]
    fn pool_zero_capacity() {
        let mut pool = NodePool::new(0);
        assert!(!pool.release(NodeId(1)));
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.acquire(), None);
    }

    #[test]
    fn pool_shrink_evicts() {
        let mut pool = NodePool::new(4);
        for i in 1..=4 {
            pool.release(NodeId(i));
        }
        let evicted = pool.set_capacity(1);
        assert_eq!(evicted, vec![NodeId(2), NodeId(3), NodeId(4)]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.capacity(), 1);
        assert!(pool.set_capacity(8).is_empty());
    }
}
