//! Position-tracking cursors.
//!
//! A [`Cursor`] remembers a node of its list, that node's index and a copy of
//! its value. It only ever moves forward one node at a time; to start over or
//! jump, open a new cursor with [`List::cursor`].
//!
//! The cursor's own record is allocated from the list's provider, so opening
//! a cursor can fail like any other allocation.

use core::{fmt, ptr::NonNull};

use alloc_binding::RawAlloc;
use log::trace;

use crate::{
    error::{EmptySnafu, EndOfListSnafu, ListError, OutOfBoundsSnafu},
    list::{List, Node},
    raw,
};

#[derive(Debug)]
struct Position {
    node: NonNull<Node>,
    index: usize,
    value: u32,
}

/// A forward-only cursor over a [`List`].
///
/// # Examples
///
/// ```
/// use alloc_binding::heap::Heap;
/// use slist::List;
///
/// let mut list = List::new_in(Heap).unwrap();
/// for v in [10, 20, 30] {
///     list.insert_at_end(v).unwrap();
/// }
///
/// let mut cursor = list.cursor(1).unwrap();
/// assert_eq!((cursor.index(), cursor.value()), (1, 20));
/// cursor.advance().unwrap();
/// assert_eq!((cursor.index(), cursor.value()), (2, 30));
/// assert!(cursor.advance().is_err());
/// ```
pub struct Cursor<'a, A>
where
    A: RawAlloc,
{
    list: &'a List<A>,
    position: NonNull<Position>,
}

impl<'a, A> Cursor<'a, A>
where
    A: RawAlloc,
{
    pub(crate) fn new(list: &'a List<A>, index: usize) -> Result<Self, ListError> {
        if list.is_empty() {
            return EmptySnafu.fail();
        }
        let node = list
            .walk(index)
            .map_err(|len| OutOfBoundsSnafu { index, len }.build())?;
        let value = unsafe { node.as_ref().value };
        let position = raw::emplace(list.allocator(), Position { node, index, value })?;
        trace!("opened cursor at {index}");
        Ok(Self { list, position })
    }

    /// Releases the cursor record. The list is not touched.
    ///
    /// Equivalent to dropping the cursor.
    pub fn destroy(self) {
        drop(self);
    }

    /// Returns the list this cursor walks.
    #[must_use]
    pub fn list(&self) -> &'a List<A> {
        self.list
    }

    /// Zero-based position of the current node.
    #[must_use]
    pub fn index(&self) -> usize {
        self.position().index
    }

    /// Value of the current node.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.position().value
    }

    /// Moves to the next node.
    ///
    /// On the last node this fails with [`ListError::EndOfList`] and the
    /// cursor stays where it is.
    pub fn advance(&mut self) -> Result<(), ListError> {
        let position = unsafe { self.position.as_mut() };
        let Some(next) = (unsafe { position.node.as_ref().next }) else {
            return EndOfListSnafu {
                index: position.index,
            }
            .fail();
        };
        position.node = next;
        position.index += 1;
        position.value = unsafe { next.as_ref().value };
        Ok(())
    }

    fn position(&self) -> &Position {
        unsafe { self.position.as_ref() }
    }
}

impl<A> Drop for Cursor<'_, A>
where
    A: RawAlloc,
{
    fn drop(&mut self) {
        unsafe { raw::dispose(self.list.allocator(), self.position); }
    }
}

impl<A> fmt::Debug for Cursor<'_, A>
where
    A: RawAlloc,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index())
            .field("value", &self.value())
            .finish_non_exhaustive()
    }
}
