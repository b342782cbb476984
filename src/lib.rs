//! A max-priority queue whose queued elements can be re-prioritized in place.
//!
//! [`IndexedMaxHeap`] is a binary max-heap paired with a position index that
//! maps every queued element to the slot it currently occupies. The index
//! turns a priority change into a direct lookup followed by a single sift, so
//! inserting, extracting the maximum and updating a priority all cost
//! *O*(log(*n*)).
//!
//! Elements are identified by value (`E: Hash + Eq`) and are unique within a
//! heap: inserting an element that is already queued is rejected with
//! [`HeapError::DuplicateElement`].
//!
//! ```
//! use indexed_heap::IndexedMaxHeap;
//!
//! let mut tasks = IndexedMaxHeap::new();
//! tasks.insert("compact", 1).unwrap();
//! tasks.insert("flush", 2).unwrap();
//! tasks.insert("snapshot", 3).unwrap();
//!
//! assert_eq!(tasks.remove_max(), Some("snapshot"));
//!
//! // The compaction became urgent.
//! tasks.update_priority("compact", 4).unwrap();
//! assert_eq!(tasks.remove_max(), Some("compact"));
//! assert_eq!(tasks.remove_max(), Some("flush"));
//! assert_eq!(tasks.remove_max(), None);
//! ```
//!
//! The heap does no internal synchronization. Share it between threads
//! behind a lock of your choice.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::mem;

use log::{debug, trace};

mod error;
mod iter;

pub use error::HeapError;
pub use iter::{DrainSorted, IntoIterSorted, Iter};

/// An element together with the priority it is queued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapEntry<E, P> {
    pub element: E,
    pub priority: P,
}

/// A priority queue implemented with a binary max-heap and a position index.
///
/// Every queued element is recorded in an index alongside the heap slot it
/// occupies. Each time entries move during a sift, the index is updated in
/// the same step, so both structures always agree.
///
/// # Examples
///
/// ```
/// use indexed_heap::{HeapEntry, IndexedMaxHeap};
///
/// let mut heap = IndexedMaxHeap::new();
/// assert_eq!(heap.peek(), None);
///
/// heap.insert("Bob", 1).unwrap();
/// heap.insert("Alice", 5).unwrap();
/// heap.insert("Eve", 2).unwrap();
///
/// assert_eq!(heap.peek(), Some(&HeapEntry { element: "Alice", priority: 5 }));
/// assert_eq!(heap.len(), 3);
///
/// // Bob jumps the queue.
/// assert_eq!(heap.update_priority("Bob", 9), Ok(1));
///
/// assert_eq!(heap.remove_max(), Some("Bob"));
/// assert_eq!(heap.remove_max(), Some("Alice"));
/// assert_eq!(heap.remove_max(), Some("Eve"));
/// assert_eq!(heap.remove_max(), None);
/// ```
///
/// # Time complexity
///
/// | [insert]      | [remove_max]  | [update_priority] | [peek]/[contains] |
/// |---------------|---------------|-------------------|-------------------|
/// | *O*(log(*n*)) | *O*(log(*n*)) | *O*(log(*n*))     | *O*(1)            |
///
/// Index lookups are expected costs of the underlying [`HashMap`].
///
/// [insert]: IndexedMaxHeap::insert
/// [remove_max]: IndexedMaxHeap::remove_max
/// [update_priority]: IndexedMaxHeap::update_priority
/// [peek]: IndexedMaxHeap::peek
/// [contains]: IndexedMaxHeap::contains
#[derive(Clone)]
pub struct IndexedMaxHeap<E, P> {
    data: Vec<HeapEntry<E, P>>,
    positions: HashMap<E, usize>,
}

impl<E, P> Default for IndexedMaxHeap<E, P> {
    /// Creates an empty `IndexedMaxHeap<E, P>`.
    #[inline]
    fn default() -> IndexedMaxHeap<E, P> {
        IndexedMaxHeap::new()
    }
}

impl<E: fmt::Debug, P: fmt::Debug> fmt::Debug for IndexedMaxHeap<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<E, P> IndexedMaxHeap<E, P> {
    /// Creates an empty `IndexedMaxHeap`.
    #[must_use]
    pub fn new() -> IndexedMaxHeap<E, P> {
        IndexedMaxHeap {
            data: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Creates an empty `IndexedMaxHeap` with room for `capacity` entries in
    /// both the heap and its index.
    ///
    /// ```
    /// use indexed_heap::IndexedMaxHeap;
    /// let mut heap = IndexedMaxHeap::with_capacity(10);
    /// assert!(heap.capacity() >= 10);
    /// heap.insert("job", 4).unwrap();
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> IndexedMaxHeap<E, P> {
        IndexedMaxHeap {
            data: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the heap is empty.
    ///
    /// ```
    /// use indexed_heap::IndexedMaxHeap;
    /// let mut heap = IndexedMaxHeap::new();
    /// assert!(heap.is_empty());
    ///
    /// heap.insert('a', 3).unwrap();
    /// assert!(!heap.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of entries the heap can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity().min(self.positions.capacity())
    }

    /// Returns the entry with the greatest priority, or `None` if the heap
    /// is empty.
    #[must_use]
    pub fn peek(&self) -> Option<&HeapEntry<E, P>> {
        self.data.first()
    }

    /// Returns an iterator visiting all entries in the underlying heap order,
    /// which is arbitrary with respect to priority apart from the first entry.
    pub fn iter(&self) -> Iter<'_, E, P> {
        Iter {
            iter: self.data.iter(),
        }
    }

    /// Consumes the heap and returns its entries in arbitrary order.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_vec(self) -> Vec<HeapEntry<E, P>> {
        self.data
    }

    /// Drops every entry, leaving the allocated capacity in place.
    pub fn clear(&mut self) {
        self.data.clear();
        self.positions.clear();
    }
}

impl<E: Hash + Eq + Clone, P: Ord> IndexedMaxHeap<E, P> {
    /// Queues `element` under `priority`.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::DuplicateElement`] carrying `element` back if it
    /// is already queued. The heap is left unchanged in that case; use
    /// [`update_priority`] to re-prioritize a queued element.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_heap::{HeapError, IndexedMaxHeap};
    /// let mut heap = IndexedMaxHeap::new();
    /// heap.insert("Bob", 3).unwrap();
    /// heap.insert("Alice", 5).unwrap();
    ///
    /// assert_eq!(heap.insert("Bob", 7), Err(HeapError::DuplicateElement("Bob")));
    /// assert_eq!(heap.len(), 2);
    /// assert_eq!(heap.priority("Bob"), Some(&3));
    /// ```
    ///
    /// [`update_priority`]: IndexedMaxHeap::update_priority
    pub fn insert(&mut self, element: E, priority: P) -> Result<(), HeapError<E>> {
        if self.positions.contains_key(&element) {
            debug!("rejected insert: element is already queued");
            return Err(HeapError::DuplicateElement(element));
        }

        let index = self.data.len();
        self.positions.insert(element.clone(), index);
        self.data.push(HeapEntry { element, priority });

        let settled = self.sift_up(index);
        trace!("inserted entry settled at slot {} of {}", settled, self.len());
        Ok(())
    }

    /// Removes the entry with the greatest priority and returns it, or `None`
    /// if the heap is empty.
    ///
    /// ```
    /// use indexed_heap::{HeapEntry, IndexedMaxHeap};
    /// let mut heap = IndexedMaxHeap::new();
    /// heap.insert('x', 1).unwrap();
    /// heap.insert('y', 3).unwrap();
    ///
    /// assert_eq!(heap.pop(), Some(HeapEntry { element: 'y', priority: 3 }));
    /// assert_eq!(heap.pop(), Some(HeapEntry { element: 'x', priority: 1 }));
    /// assert_eq!(heap.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<HeapEntry<E, P>> {
        let mut entry = self.data.pop()?;
        if !self.data.is_empty() {
            // The former last entry takes over the root and sinks from there.
            mem::swap(&mut entry, &mut self.data[0]);
            self.record_position(0);
            self.sift_down(0);
        }

        self.positions.remove(&entry.element);
        Some(entry)
    }

    /// Removes the element with the greatest priority and returns it, or
    /// `None` if the heap is empty.
    ///
    /// Among equal priorities, which element comes out first is unspecified.
    pub fn remove_max(&mut self) -> Option<E> {
        self.pop().map(|entry| entry.element)
    }

    /// Changes the priority of a queued element and returns its previous
    /// priority.
    ///
    /// A raised priority moves the element toward the root; a lowered or
    /// unchanged one lets it sink toward the leaves as far as needed.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::ElementNotFound`] if `element` is not queued,
    /// either because it was never inserted or because it was already
    /// removed. The heap is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use indexed_heap::{HeapError, IndexedMaxHeap};
    /// let mut heap = IndexedMaxHeap::new();
    /// heap.insert(String::from("render"), 10).unwrap();
    /// heap.insert(String::from("upload"), 20).unwrap();
    ///
    /// assert_eq!(heap.update_priority("render", 30), Ok(10));
    /// assert_eq!(heap.peek().map(|e| e.element.as_str()), Some("render"));
    ///
    /// assert_eq!(heap.update_priority("encode", 1), Err(HeapError::ElementNotFound));
    /// ```
    pub fn update_priority<Q>(&mut self, element: &Q, priority: P) -> Result<P, HeapError<E>>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = match self.positions.get(element) {
            Some(&index) => index,
            None => {
                debug!("skipped priority update: element is not queued");
                return Err(HeapError::ElementNotFound);
            }
        };

        let raised = priority > self.data[index].priority;
        let previous = mem::replace(&mut self.data[index].priority, priority);
        let settled = if raised {
            self.sift_up(index)
        } else {
            self.sift_down(index)
        };

        trace!("re-prioritized entry moved from slot {} to {}", index, settled);
        Ok(previous)
    }

    /// Removes an arbitrary queued element and returns its entry, or `None`
    /// if it is not queued.
    ///
    /// ```
    /// use indexed_heap::IndexedMaxHeap;
    /// let mut heap = IndexedMaxHeap::new();
    /// heap.insert(1u32, 'a').unwrap();
    /// heap.insert(2u32, 'b').unwrap();
    ///
    /// assert_eq!(heap.remove(&1).map(|e| e.priority), Some('a'));
    /// assert!(heap.remove(&1).is_none());
    /// assert_eq!(heap.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, element: &Q) -> Option<HeapEntry<E, P>>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = match self.positions.remove(element) {
            Some(index) => index,
            None => {
                debug!("skipped removal: element is not queued");
                return None;
            }
        };

        let mut entry = self.data.pop()?;
        if index < self.data.len() {
            // Fill the vacated slot with the former last entry.
            mem::swap(&mut entry, &mut self.data[index]);
            self.record_position(index);
            if self.data[index].priority > entry.priority {
                self.sift_up(index);
            } else {
                self.sift_down(index);
            }
        }

        Some(entry)
    }

    /// Returns `true` if `element` is queued.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(element)
    }

    /// Returns the priority `element` is currently queued under.
    #[must_use]
    pub fn priority<Q>(&self, element: &Q) -> Option<&P>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions
            .get(element)
            .map(|&index| &self.data[index].priority)
    }

    /// Reserves capacity for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
        self.positions.reserve(additional);
    }

    /// Discards as much additional capacity as possible.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
        self.positions.shrink_to_fit();
    }

    /// Returns an owning iterator that yields entries in descending priority
    /// order.
    ///
    /// ```
    /// use indexed_heap::IndexedMaxHeap;
    /// let mut heap = IndexedMaxHeap::new();
    /// for (element, priority) in [("a", 2), ("b", 7), ("c", 4)] {
    ///     heap.insert(element, priority).unwrap();
    /// }
    ///
    /// let order: Vec<_> = heap.into_iter_sorted().map(|e| e.element).collect();
    /// assert_eq!(order, ["b", "c", "a"]);
    /// ```
    pub fn into_iter_sorted(self) -> IntoIterSorted<E, P> {
        IntoIterSorted { inner: self }
    }

    /// Clears the heap, returning an iterator over the removed entries in
    /// descending priority order. Entries left unconsumed are dropped along
    /// with the iterator.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, E, P> {
        DrainSorted { inner: self }
    }

    /// Consumes the heap and returns its entries sorted by ascending
    /// priority.
    ///
    /// The sort runs in place over the heap's storage.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(self) -> Vec<HeapEntry<E, P>> {
        let mut data = self.data;
        let mut end = data.len();
        while end > 1 {
            end -= 1;
            data.swap(0, end);
            sift_down_range(&mut data[..end], 0);
        }
        data
    }

    /// Checks that every parent outranks its children and that the position
    /// index maps each queued element to exactly the slot holding it.
    #[must_use]
    pub fn check_integrity(&self) -> bool {
        if self.positions.len() != self.data.len() {
            return false;
        }

        self.data.iter().enumerate().all(|(index, entry)| {
            let ordered = index == 0 || self.data[(index - 1) / 2].priority >= entry.priority;
            ordered && self.positions.get(&entry.element) == Some(&index)
        })
    }

    /// Moves the entry at `index` toward the root while it outranks its
    /// parent. Returns the slot it settles in.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].priority <= self.data[parent].priority {
                break;
            }

            self.swap_slots(index, parent);
            index = parent;
        }
        index
    }

    /// Moves the entry at `index` toward the leaves while a child outranks
    /// it, always following the greater child. The left child wins ties.
    /// Returns the slot it settles in.
    fn sift_down(&mut self, mut index: usize) -> usize {
        loop {
            let child = greater_child(&self.data, index);
            if child == index {
                return index;
            }

            self.swap_slots(index, child);
            index = child;
        }
    }

    /// Exchanges two slots and re-records both of their positions.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.record_position(a);
        self.record_position(b);
    }

    fn record_position(&mut self, index: usize) {
        if let Some(slot) = self.positions.get_mut(&self.data[index].element) {
            *slot = index;
        }
    }
}

/// Returns the child of `index` to swap with during a sift-down, or `index`
/// itself when neither child has a strictly greater priority.
fn greater_child<E, P: Ord>(data: &[HeapEntry<E, P>], index: usize) -> usize {
    let left = 2 * index + 1;
    let right = left + 1;

    let mut greatest = index;
    if left < data.len() && data[left].priority > data[greatest].priority {
        greatest = left;
    }
    if right < data.len() && data[right].priority > data[greatest].priority {
        greatest = right;
    }
    greatest
}

// Index-free sift-down used once the position index has been discarded.
fn sift_down_range<E, P: Ord>(data: &mut [HeapEntry<E, P>], mut index: usize) {
    loop {
        let child = greater_child(data, index);
        if child == index {
            return;
        }

        data.swap(index, child);
        index = child;
    }
}

impl<'a, E, P> IntoIterator for &'a IndexedMaxHeap<E, P> {
    type Item = &'a HeapEntry<E, P>;
    type IntoIter = Iter<'a, E, P>;

    fn into_iter(self) -> Iter<'a, E, P> {
        self.iter()
    }
}
