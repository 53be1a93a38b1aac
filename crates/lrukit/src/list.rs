//! Recency-ordered index of cache entries
//!
//! Arena-backed doubly linked list: entries live in a slot vector and link to
//! each other by slot index, so relinking an entry is O(1) given its handle.
//! The head is the least-recently-used entry and the tail the most recent.

/// Stable reference to a live entry in an [`OrderedIndex`]
///
/// A slot's generation is bumped every time its entry is removed, so a handle
/// kept past removal never resolves to whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u64,
}

/// Entry in the doubly linked list
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<K, V> {
    generation: u64,
    entry: Option<Entry<K, V>>,
}

/// Doubly linked list of entries ordered from least to most recently used
#[derive(Debug)]
pub struct OrderedIndex<K, V> {
    slots: Vec<Slot<K, V>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> OrderedIndex<K, V> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether `handle` still refers to a linked entry
    pub fn is_live(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.index)
            .is_some_and(|slot| slot.generation == handle.generation && slot.entry.is_some())
    }

    /// Append a new entry at the most-recently-used end
    pub fn push_most_recent(&mut self, key: K, value: V) -> Handle {
        let idx = self.alloc_slot();
        self.slots[idx].entry = Some(Entry {
            key,
            value,
            prev: None,
            next: None,
        });
        self.link_back(idx);
        self.len += 1;

        Handle {
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    /// Move a linked entry to the most-recently-used end
    ///
    /// # Panics
    /// If `handle` does not refer to a linked entry.
    pub fn promote(&mut self, handle: Handle) {
        let idx = self.live_index(handle);
        if self.tail == Some(idx) {
            return;
        }

        self.unlink(idx);
        self.link_back(idx);
    }

    /// Detach an entry and return its key and value
    ///
    /// # Panics
    /// If `handle` does not refer to a linked entry. Removing twice is a bug
    /// in the caller, not something to paper over by adjusting the count.
    pub fn remove(&mut self, handle: Handle) -> (K, V) {
        let idx = self.live_index(handle);
        self.remove_at(idx)
    }

    /// Remove and return the least-recently-used entry
    pub fn pop_least_recent(&mut self) -> Option<(K, V)> {
        let head = self.head?;
        Some(self.remove_at(head))
    }

    /// Key and value of a linked entry
    pub fn get(&self, handle: Handle) -> Option<(&K, &V)> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index]
            .entry
            .as_ref()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Mutable value of a linked entry
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index]
            .entry
            .as_mut()
            .map(|entry| &mut entry.value)
    }

    /// Key of the least-recently-used entry
    pub fn least_recent(&self) -> Option<&K> {
        let head = self.head?;
        self.slots[head].entry.as_ref().map(|entry| &entry.key)
    }

    /// Iterate from least to most recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            index: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn live_index(&self, handle: Handle) -> usize {
        if !self.is_live(handle) {
            panic!("stale handle {:?}: entry is no longer linked", handle);
        }
        handle.index
    }

    fn remove_at(&mut self, idx: usize) -> (K, V) {
        self.unlink(idx);

        let slot = &mut self.slots[idx];
        let entry = match slot.entry.take() {
            Some(entry) => entry,
            None => panic!("slot {} unlinked without an entry", idx),
        };
        slot.generation = slot.generation.wrapping_add(1);

        self.free_list.push(idx);
        self.len -= 1;
        (entry.key, entry.value)
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;

        if let Some(entry) = &mut self.slots[idx].entry {
            entry.prev = old_tail;
            entry.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.slots[tail_idx].entry {
                    tail.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &mut self.slots[idx].entry {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = &mut self.slots[prev_idx].entry {
                    prev_entry.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = &mut self.slots[next_idx].entry {
                    next_entry.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                entry: None,
            });
            idx
        }
    }

    /// Walk the list both ways and check links, ends and count
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);

        let mut visited = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let entry = self.slots[idx]
                .entry
                .as_ref()
                .expect("linked slot has no entry");
            assert_eq!(entry.prev, prev, "broken back-link at slot {}", idx);
            visited += 1;
            assert!(visited <= self.len, "cycle in ordered index");
            prev = Some(idx);
            cursor = entry.next;
        }
        assert_eq!(visited, self.len);
        assert_eq!(prev, self.tail);

        let occupied = self.slots.iter().filter(|slot| slot.entry.is_some()).count();
        assert_eq!(occupied, self.len);
    }
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries from least to most recently used
pub struct Iter<'a, K, V> {
    index: &'a OrderedIndex<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let entry = self.index.slots[idx].entry.as_ref()?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
