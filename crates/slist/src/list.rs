//! The list engine.
//!
//! A [`List`] owns a forward chain of nodes. The list record and every node
//! are allocated from the provider the list was created with; nothing is ever
//! taken from the platform allocator directly.
//!
//! # Memory Layout
//!
//! ```text
//! List ──► Record { head } ──► Node { value, next } ──► Node { .. } ──► None
//! ```
//!
//! Each node is owned by the record (the first node) or by its predecessor.
//! No operation creates a cycle, so walking from `head` always terminates.
//!
//! # Performance Characteristics
//!
//! - [`insert_at_front`](List::insert_at_front), removal at index 0,
//!   [`is_empty`](List::is_empty): O(1)
//! - [`insert_at_end`](List::insert_at_end), [`insert_at`](List::insert_at),
//!   [`remove_at`](List::remove_at), [`find`](List::find), [`len`](List::len):
//!   O(n); the length is not cached

use core::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use alloc_binding::RawAlloc;
use log::{debug, trace};
use snafu::OptionExt as _;

use crate::{
    cursor::Cursor,
    error::{EmptySnafu, ListError, NotFoundSnafu, OutOfBoundsSnafu},
    raw,
};

pub(crate) type Link = Option<NonNull<Node>>;

/// A cell of the chain.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) value: u32,
    pub(crate) next: Link,
}

/// The list record, allocated from the list's provider.
#[derive(Debug)]
struct Record {
    head: Link,
}

/// A singly-linked list of `u32` values.
///
/// # Examples
///
/// ```
/// use alloc_binding::heap::Heap;
/// use slist::List;
///
/// let mut list = List::new_in(Heap).unwrap();
/// list.insert_at_end(1).unwrap();
/// list.insert_at_end(2).unwrap();
/// list.insert_at_end(4).unwrap();
/// list.insert_at(2, 3).unwrap();
///
/// assert_eq!(list.iter().collect::<Vec<_>>(), [1, 2, 3, 4]);
/// assert_eq!(list.find(3).unwrap(), 2);
/// assert_eq!(list.remove_at(0).unwrap(), 1);
/// assert_eq!(list.len(), 3);
/// ```
pub struct List<A>
where
    A: RawAlloc,
{
    record: NonNull<Record>,
    alloc: A,
    _owns: PhantomData<Node>,
}

unsafe impl<A> Send for List<A> where A: RawAlloc + Send {}

impl<A> List<A>
where
    A: RawAlloc,
{
    /// Creates an empty list whose storage comes from `alloc`.
    ///
    /// Fails if `alloc` is missing one of its functions or refuses to
    /// allocate the list record.
    pub fn new_in(alloc: A) -> Result<Self, ListError> {
        let record = raw::emplace(&alloc, Record { head: None })?;
        trace!("created list record at {record:p}");
        Ok(Self {
            record,
            alloc,
            _owns: PhantomData,
        })
    }

    /// Releases every node, then the list record.
    ///
    /// Equivalent to dropping the list.
    pub fn destroy(self) {
        drop(self);
    }

    /// Returns the provider this list allocates from.
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Counts the nodes by walking the whole chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the list has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }

    /// Returns an iterator over the values, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head(),
            _marker: PhantomData,
        }
    }

    /// Appends `value` after the last node.
    ///
    /// Fails only when the node cannot be allocated.
    pub fn insert_at_end(&mut self, value: u32) -> Result<(), ListError> {
        let node = raw::emplace(&self.alloc, Node { value, next: None })?;
        match self.last() {
            Some(mut last) => unsafe { last.as_mut().next = Some(node) },
            None => self.set_head(Some(node)),
        }
        trace!("appended {value}");
        Ok(())
    }

    /// Makes `value` the new first node.
    pub fn insert_at_front(&mut self, value: u32) -> Result<(), ListError> {
        let node = raw::emplace(
            &self.alloc,
            Node {
                value,
                next: self.head(),
            },
        )?;
        self.set_head(Some(node));
        trace!("prepended {value}");
        Ok(())
    }

    /// Inserts `value` so that it ends up at position `index`.
    ///
    /// `index == len()` appends. Any larger index fails with
    /// [`ListError::OutOfBounds`]; unlike [`insert_at_end`](Self::insert_at_end)
    /// this never appends past the end.
    ///
    /// The node is allocated before the chain is walked, so an allocation
    /// failure is reported even for an out-of-bounds index.
    pub fn insert_at(&mut self, index: usize, value: u32) -> Result<(), ListError> {
        let node = raw::emplace(&self.alloc, Node { value, next: None })?;

        if index == 0 {
            unsafe { (*node.as_ptr()).next = self.head(); }
            self.set_head(Some(node));
            trace!("inserted {value} at 0");
            return Ok(());
        }

        match self.walk(index - 1) {
            Ok(mut prev) => unsafe {
                (*node.as_ptr()).next = prev.as_ref().next;
                prev.as_mut().next = Some(node);
            },
            Err(len) => {
                unsafe { raw::dispose(&self.alloc, node); }
                debug!("insert at {index} rejected, length is {len}");
                return OutOfBoundsSnafu { index, len }.fail();
            }
        }
        trace!("inserted {value} at {index}");
        Ok(())
    }

    /// Returns the position of the first node holding `value`.
    pub fn find(&self, value: u32) -> Result<usize, ListError> {
        self.iter()
            .position(|v| v == value)
            .context(NotFoundSnafu { value })
    }

    /// Unlinks the node at `index`, releases it and returns its value.
    pub fn remove_at(&mut self, index: usize) -> Result<u32, ListError> {
        let Some(head) = self.head() else {
            debug!("remove at {index} rejected, list is empty");
            return EmptySnafu.fail();
        };

        let target = if index == 0 {
            self.set_head(unsafe { head.as_ref().next });
            head
        } else {
            let mut prev = self
                .walk(index - 1)
                .map_err(|len| OutOfBoundsSnafu { index, len }.build())?;
            let Some(target) = (unsafe { prev.as_ref().next }) else {
                debug!("remove at {index} rejected, length is {index}");
                return OutOfBoundsSnafu { index, len: index }.fail();
            };
            unsafe { prev.as_mut().next = target.as_ref().next; }
            target
        };

        let node = unsafe { raw::dispose(&self.alloc, target) };
        trace!("removed {} at {index}", node.value);
        Ok(node.value)
    }

    /// Opens a cursor on the node at `index`.
    ///
    /// The cursor borrows the list, so the list cannot be changed or dropped
    /// while the cursor exists.
    pub fn cursor(&self, index: usize) -> Result<Cursor<'_, A>, ListError> {
        Cursor::new(self, index)
    }

    /// Returns the node `steps` links after the head.
    ///
    /// If the chain is too short, returns its length instead.
    pub(crate) fn walk(&self, steps: usize) -> Result<NonNull<Node>, usize> {
        let Some(mut node) = self.head() else {
            return Err(0);
        };
        for reached in 0..steps {
            match unsafe { node.as_ref().next } {
                Some(next) => node = next,
                None => return Err(reached + 1),
            }
        }
        Ok(node)
    }

    fn last(&self) -> Link {
        let mut node = self.head()?;
        while let Some(next) = unsafe { node.as_ref().next } {
            node = next;
        }
        Some(node)
    }

    fn head(&self) -> Link {
        unsafe { self.record.as_ref().head }
    }

    fn set_head(&mut self, head: Link) {
        unsafe { self.record.as_mut().head = head; }
    }
}

impl<A> Drop for List<A>
where
    A: RawAlloc,
{
    fn drop(&mut self) {
        let mut link = self.head();
        let mut released = 0_usize;
        while let Some(node) = link {
            let node = unsafe { raw::dispose(&self.alloc, node) };
            link = node.next;
            released += 1;
        }
        unsafe { raw::dispose(&self.alloc, self.record); }
        trace!("destroyed list, released {released} nodes");
    }
}

impl<A> fmt::Debug for List<A>
where
    A: RawAlloc,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, A> IntoIterator for &'a List<A>
where
    A: RawAlloc,
{
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`List`].
///
/// Created by [`List::iter`]. Allocates nothing.
#[derive(Clone)]
pub struct Iter<'a> {
    next: Link,
    _marker: PhantomData<&'a Node>,
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let node = unsafe { self.next?.as_ref() };
        self.next = node.next;
        Some(node.value)
    }
}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
