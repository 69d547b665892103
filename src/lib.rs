//! This crate provides a doubly-linked list with persistent cursors,
//! implemented as a cyclic list anchored by a ghost node.
//!
//! The [`List`] allows inserting and removing elements at a known position in
//! constant time. In compromise, accessing or mutating elements by index
//! takes *O*(*n*) time.
//!
//! What sets it apart is that any number of [`Cursor`]s and [`SubList`] views
//! can be open on the same list while it is being edited. They are *not*
//! fail-fast: every edit, whatever handle it comes through, is reported to
//! all of them, and they adjust themselves to keep pointing at the same
//! elements.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use cursor_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4, 5]);
//!
//! let mut c1 = list.cursor();
//! assert_eq!(c1.next(), Ok(1));
//! assert_eq!(c1.next(), Ok(2));
//!
//! // remove 1 through another cursor
//! let mut c2 = list.cursor();
//! assert_eq!(c2.next(), Ok(1));
//! assert_eq!(c2.remove(), Ok(1));
//! assert_eq!(list.to_vec(), vec![2, 3, 4, 5]);
//!
//! // c1 has not lost its place
//! assert_eq!(c1.next(), Ok(3));
//!
//! // and neither has a view
//! let sub = list.sub_list(1, 3).unwrap();
//! list.push_front(0);
//! assert_eq!(sub.to_vec(), Ok(vec![3, 4]));
//! ```
//!
//! # Memory Layout
//!
//! The nodes of a list live in an arena and refer to each other by index.
//! Slot 0 of the arena is the ghost node, which marks both ends of the ring:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                    (Ghost) slot 0   │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢    index 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │     index 0                 index 1                               ↑
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In an empty list, the `next` and `prev` of the ghost node point to itself.
//! As elements are inserted, `ghost.next` is the first element and
//! `ghost.prev` is the last one.
//!
//! In convention, in a list with length *n*, the elements are indexed by 0,
//! 1, ..., *n* - 1, and the ghost node is always indexed by *n*.
//!
//! Removed slots are kept in a bounded pool and reused by later insertions,
//! so a list used as a queue stops allocating once it has warmed up. See
//! [`List::with_pool_capacity`] and [`DEFAULT_POOL_CAPACITY`].
//!
//! The arena, the length, the pool and the registries of open cursors and
//! views are shared through an `Rc<RefCell<_>>` owned by the `List`. Cursors
//! and views only hold a `Weak` reference, so they never keep a dropped list
//! alive: once the list is gone they return [`Error::IllegalState`].
//!
//! # Cursors
//!
//! A [`Cursor`] rests between two elements. In a list with length *n*, there
//! are *n* + 1 valid locations for the cursor, indexed by 0, 1, ..., *n*.
//!
//! - an element inserted right before a cursor ends up behind it;
//! - if the element a cursor would return next is removed, the cursor moves
//!   on to the element that followed it;
//! - `set` and `remove` act on the element returned by the last `next` or
//!   `previous`, and are refused once that element is gone.
//!
//! A cursor stays registered until [`Cursor::close`] is called or it is
//! dropped.
//!
//! # Sub-lists
//!
//! A [`SubList`] is a live view of a range `from..to` of the list. Its bounds
//! follow the edits of the list: insertions and removals before the view
//! shift it, insertions and removals inside it resize it.
//!
//! ```
//! use cursor_list::List;
//! use std::iter::FromIterator;
//!
//! let list = List::from_iter(['A', 'B', 'C', 'D', 'E']);
//! let mut sub = list.sub_list(1, 4).unwrap();
//! assert_eq!(sub.to_vec(), Ok(vec!['B', 'C', 'D']));
//!
//! assert_eq!(sub.remove_item(&'C'), Ok(true));
//! assert_eq!(sub.to_vec(), Ok(vec!['B', 'D']));
//! assert_eq!(list.to_vec(), vec!['A', 'B', 'D', 'E']);
//! ```
//!
//! # Serialization
//!
//! With the `serde` feature (on by default), a list serializes as a sequence
//! of its elements from front to back. Both directions run in a loop, so
//! lists of any length round-trip without growing the stack.

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
pub use list::pool::DEFAULT_POOL_CAPACITY;
#[doc(inline)]
pub use list::sublist::SubList;
#[doc(inline)]
pub use list::List;

pub mod error;
pub mod list;
