//! The raw engine shared by [`ArrayMap`](crate::ArrayMap) and
//! [`ArraySet`](crate::ArraySet).
//!
//! A [`HashTable`] stores its values contiguously, sorted by a caller
//! supplied `u64` hash, next to a parallel array holding those hashes.
//! Lookups binary-search the hash array and then scan the run of equal
//! hashes with an equality predicate. Insertions and removals shift the tail
//! of both arrays.
//!
//! The table never hashes anything itself: every operation that locates a
//! value takes the precomputed hash and a predicate, so the same engine
//! serves key/value pairs and bare keys alike.

use core::fmt::Debug;
use core::iter::FusedIterator;
use std::sync::Arc;

use crate::error::Error;
use crate::error::Result;
use crate::pool::ArrayPool;
use crate::pool::BASE_SIZE;
use crate::pool::Block;

/// Capacity to move to when an insert finds the arrays full.
#[inline(always)]
fn grown_capacity(capacity: usize) -> usize {
    if capacity >= BASE_SIZE * 2 {
        capacity + (capacity >> 1)
    } else if capacity >= BASE_SIZE {
        BASE_SIZE * 2
    } else {
        BASE_SIZE
    }
}

/// Capacity to move to after removing one of `old_len` entries, if the
/// arrays have become too sparse.
///
/// Never shrinks below `2 * BASE_SIZE`, and the target always leaves room
/// for the removed entry to come back without an immediate regrow.
#[inline(always)]
fn shrunk_capacity(capacity: usize, old_len: usize) -> Option<usize> {
    let new_len = old_len - 1;
    if capacity > BASE_SIZE * 2 && new_len < capacity / 3 {
        if old_len > BASE_SIZE * 2 {
            Some(old_len + (old_len >> 1))
        } else {
            Some(BASE_SIZE * 2)
        }
    } else {
        None
    }
}

fn allocate<V>(pool: Option<&ArrayPool<V>>, capacity: usize) -> Block<V> {
    pool.and_then(|pool| pool.acquire(capacity))
        .unwrap_or_else(|| Block::with_capacity(capacity))
}

/// A compact table of values kept in hash order.
///
/// Memory overhead is one `u64` per slot on top of the values themselves.
/// Lookup is `O(log n)`, insertion and removal are `O(n)`. The table is
/// meant for small collections, from a handful to a few hundred values.
///
/// # Capacity
///
/// An empty table owns no storage. The first insertion allocates 4 slots,
/// the next growth goes to 8, and from there capacity grows by half. When a
/// removal leaves fewer than a third of the slots in use, the table shrinks,
/// but never below 8 slots. Removing the last value releases the storage.
///
/// # Examples
///
/// ```rust
/// use core::hash::BuildHasher;
///
/// use array_hash::DefaultHashBuilder;
/// use array_hash::hash_table::Entry;
/// use array_hash::hash_table::HashTable;
///
/// let state = DefaultHashBuilder::default();
/// let mut table = HashTable::new();
///
/// for word in ["apple", "banana", "cherry"] {
///     let hash = state.hash_one(word);
///     match table.entry(hash, |v: &&str| *v == word).unwrap() {
///         Entry::Vacant(entry) => {
///             entry.insert(word);
///         }
///         Entry::Occupied(_) => unreachable!(),
///     }
/// }
///
/// let hash = state.hash_one("banana");
/// assert_eq!(table.find(hash, |v| *v == "banana"), Some(&"banana"));
/// assert_eq!(table.len(), 3);
/// ```
pub struct HashTable<V> {
    hashes: Box<[u64]>,
    slots: Vec<V>,

    modifications: u64,
    immutable: bool,

    pool: Option<Arc<ArrayPool<V>>>,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field(
                "hashes",
                &self
                    .hashes()
                    .iter()
                    .map(|h| format!("{h:016x}"))
                    .collect::<Vec<_>>(),
            )
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("immutable", &self.immutable)
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut block = allocate(self.pool.as_deref(), self.capacity());
        block.hashes.copy_from_slice(&self.hashes);
        block.slots.extend(self.slots.iter().cloned());

        Self {
            hashes: block.hashes,
            slots: block.slots,
            modifications: 0,
            immutable: self.immutable,
            pool: self.pool.clone(),
        }
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        if self.pool.is_some() {
            self.release_arrays();
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table without allocating.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a table with room for exactly `capacity` values.
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// let table: HashTable<u32> = HashTable::with_capacity(10);
    /// assert_eq!(table.capacity(), 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(Block::with_capacity(capacity), None)
    }

    /// Creates a table that draws and returns its small arrays through
    /// `pool`.
    pub fn with_capacity_in(capacity: usize, pool: Arc<ArrayPool<V>>) -> Self {
        Self::build(allocate(Some(&*pool), capacity), Some(pool))
    }

    /// Creates an empty table that refuses every operation needing storage.
    ///
    /// ```rust
    /// # use array_hash::Error;
    /// # use array_hash::hash_table::HashTable;
    /// let mut table: HashTable<u32> = HashTable::immutable();
    /// assert!(matches!(table.entry(7, |&v| v == 7), Err(Error::Unsupported { .. })));
    /// assert_eq!(table.remove(7, |&v| v == 7), None);
    /// ```
    pub fn immutable() -> Self {
        let mut table = Self::new();
        table.immutable = true;
        table
    }

    fn build(block: Block<V>, pool: Option<Arc<ArrayPool<V>>>) -> Self {
        Self {
            hashes: block.hashes,
            slots: block.slots,
            modifications: 0,
            immutable: false,
            pool,
        }
    }

    /// Returns the number of values in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of slots currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.hashes.len()
    }

    /// Returns `true` if the table was created with [`HashTable::immutable`].
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Returns the structural modification counter.
    ///
    /// The counter changes on every insertion, removal, clear and capacity
    /// change. It does not change when a value is replaced in place.
    pub fn modifications(&self) -> u64 {
        self.modifications
    }

    /// Returns the hashes of the live values, in ascending order.
    #[inline]
    pub fn hashes(&self) -> &[u64] {
        &self.hashes[..self.slots.len()]
    }

    /// Returns the live values in table order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.slots
    }

    /// Returns the live values in table order.
    ///
    /// Changing a value in a way that changes its hash or its equality with
    /// other values breaks the table's lookups.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.slots
    }

    fn check_mutable(&self, operation: &'static str) -> Result<()> {
        if self.immutable {
            return Err(Error::unsupported(operation));
        }
        Ok(())
    }

    #[inline]
    fn touch(&mut self) {
        self.modifications = self.modifications.wrapping_add(1);
    }

    fn install(&mut self, block: Block<V>) -> Block<V> {
        Block {
            hashes: core::mem::replace(&mut self.hashes, block.hashes),
            slots: core::mem::replace(&mut self.slots, block.slots),
        }
    }

    fn free(&self, block: Block<V>) {
        if let Some(pool) = &self.pool {
            pool.release(block);
        }
    }

    fn release_arrays(&mut self) {
        let old = self.install(Block::empty());
        self.free(old);
    }

    fn resize(&mut self, capacity: usize) {
        let len = self.slots.len();
        debug_assert!(capacity >= len);

        let mut fresh = allocate(self.pool.as_deref(), capacity);
        fresh.hashes[..len].copy_from_slice(&self.hashes[..len]);
        fresh.slots.append(&mut self.slots);

        log::trace!(
            "array table resized from {} to {capacity} slots",
            self.hashes.len()
        );
        let old = self.install(fresh);
        self.free(old);
        self.touch();
    }

    /// Locates a value by hash and predicate.
    ///
    /// Returns `Ok(index)` with the position of the matching value, or
    /// `Err(index)` with the position at which a value with this hash would
    /// be inserted. A new value joins the end of the run of values that
    /// share its hash.
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// let mut table = HashTable::new();
    /// table.entry(10, |&v| v == 'a').unwrap().or_insert('a');
    /// table.entry(10, |&v| v == 'b').unwrap().or_insert('b');
    ///
    /// assert_eq!(table.index_of(10, |&v| v == 'b'), Ok(1));
    /// assert_eq!(table.index_of(10, |&v| v == 'c'), Err(2));
    /// assert_eq!(table.index_of(5, |&v| v == 'c'), Err(0));
    /// ```
    pub fn index_of(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Result<usize, usize> {
        let len = self.slots.len();
        if len == 0 {
            return Err(0);
        }

        let hashes = &self.hashes[..len];
        let found = hashes.binary_search(&hash)?;
        if eq(&self.slots[found]) {
            return Ok(found);
        }

        let mut end = found + 1;
        while end < len && hashes[end] == hash {
            if eq(&self.slots[end]) {
                return Ok(end);
            }
            end += 1;
        }

        let mut start = found;
        while start > 0 && hashes[start - 1] == hash {
            start -= 1;
            if eq(&self.slots[start]) {
                return Ok(start);
            }
        }

        Err(end)
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.index_of(hash, eq).ok()?;
        Some(&self.slots[index])
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.index_of(hash, eq).ok()?;
        Some(&mut self.slots[index])
    }

    /// Returns the value at `index`.
    pub fn get(&self, index: usize) -> Result<&V> {
        let len = self.slots.len();
        self.slots.get(index).ok_or(Error::out_of_range(index, len))
    }

    /// Returns the value at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut V> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(Error::out_of_range(index, len))
    }

    /// Returns the hash stored for the value at `index`.
    pub fn hash_at(&self, index: usize) -> Result<u64> {
        self.hashes()
            .get(index)
            .copied()
            .ok_or(Error::out_of_range(index, self.len()))
    }

    /// Gets the entry for the given hash and predicate.
    ///
    /// Fails with [`Error::Unsupported`] when the value is absent and the
    /// table is immutable.
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Result<Entry<'_, V>> {
        match self.index_of(hash, eq) {
            Ok(index) => Ok(Entry::Occupied(OccupiedEntry { table: self, index })),
            Err(index) => {
                self.check_mutable("insert")?;
                Ok(Entry::Vacant(VacantEntry {
                    table: self,
                    hash,
                    index,
                }))
            }
        }
    }

    fn insert_at(&mut self, index: usize, hash: u64, value: V) -> &mut V {
        debug_assert!(!self.immutable);
        let len = self.slots.len();
        if len == self.hashes.len() {
            self.resize(grown_capacity(len));
        }
        debug_assert_eq!(self.slots.len(), len, "table changed size while growing");

        self.hashes.copy_within(index..len, index + 1);
        self.hashes[index] = hash;
        self.slots.insert(index, value);
        self.touch();

        &mut self.slots[index]
    }

    /// Removes and returns the value matching `hash` and `eq`.
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.index_of(hash, eq).ok()?;
        Some(self.remove_unchecked(index))
    }

    /// Removes and returns the value at `index`.
    ///
    /// ```rust
    /// # use array_hash::Error;
    /// # use array_hash::hash_table::HashTable;
    /// let mut table = HashTable::new();
    /// table.entry(1, |&v| v == "one").unwrap().or_insert("one");
    ///
    /// assert_eq!(table.remove_at(3), Err(Error::IndexOutOfRange { index: 3, len: 1 }));
    /// assert_eq!(table.remove_at(0), Ok("one"));
    /// assert_eq!(table.capacity(), 0);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<V> {
        let len = self.slots.len();
        if index >= len {
            return Err(Error::out_of_range(index, len));
        }
        Ok(self.remove_unchecked(index))
    }

    fn remove_unchecked(&mut self, index: usize) -> V {
        let len = self.slots.len();
        let capacity = self.hashes.len();
        let value = self.slots.remove(index);
        let new_len = len - 1;

        if new_len == 0 {
            self.release_arrays();
        } else if let Some(target) = shrunk_capacity(capacity, len) {
            let mut fresh = allocate(self.pool.as_deref(), target);
            fresh.hashes[..index].copy_from_slice(&self.hashes[..index]);
            fresh.hashes[index..new_len].copy_from_slice(&self.hashes[index + 1..len]);
            fresh.slots.append(&mut self.slots);

            log::trace!("array table shrunk from {capacity} to {target} slots");
            let old = self.install(fresh);
            self.free(old);
        } else {
            self.hashes.copy_within(index + 1..len, index);
        }

        debug_assert_eq!(self.slots.len(), new_len, "table changed size while removing");
        self.touch();
        value
    }

    /// Makes sure the table has at least `min_capacity` slots.
    ///
    /// Grows to exactly `min_capacity` when it has fewer. Fails with
    /// [`Error::Unsupported`] on an immutable table that would need to grow.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        if self.capacity() >= min_capacity {
            return Ok(());
        }
        self.check_mutable("ensure_capacity")?;
        self.resize(min_capacity);
        Ok(())
    }

    /// Reserves room for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.ensure_capacity(self.len().saturating_add(additional))
    }

    /// Removes all values and releases the storage.
    pub fn clear(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        self.release_arrays();
        self.touch();
    }

    /// Keeps only the values for which `f` returns `true`.
    ///
    /// Values are visited once each, in table order. Capacity ends where
    /// removing the rejected values one at a time would leave it.
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        let len = self.slots.len();
        let hashes = &mut self.hashes;
        let mut read = 0;
        let mut write = 0;
        self.slots.retain_mut(|value| {
            let keep = f(value);
            if keep {
                hashes[write] = hashes[read];
                write += 1;
            }
            read += 1;
            keep
        });

        let new_len = self.slots.len();
        if new_len == len {
            return;
        }
        if new_len == 0 {
            self.release_arrays();
        } else {
            // Settle on the capacity the same removals would reach one by one.
            let mut capacity = self.hashes.len();
            for old_len in (new_len + 1..=len).rev() {
                if let Some(target) = shrunk_capacity(capacity, old_len) {
                    capacity = target;
                }
            }
            if capacity != self.hashes.len() {
                self.resize(capacity);
            }
        }
        self.touch();
    }

    /// Copies every value of `other` into this empty table, hashes and
    /// order included. Capacity grows to `other.len()` at most.
    pub(crate) fn fill_from(&mut self, other: &HashTable<V>) -> Result<()>
    where
        V: Clone,
    {
        debug_assert!(self.is_empty());
        if other.is_empty() {
            return Ok(());
        }
        self.ensure_capacity(other.len())?;

        let len = other.len();
        self.hashes[..len].copy_from_slice(other.hashes());
        self.slots.extend(other.slots.iter().cloned());
        self.touch();
        Ok(())
    }

    /// Returns an iterator over the values in table order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: self.slots.iter_mut(),
        }
    }

    /// Removes every value, yielding them in table order.
    ///
    /// The table keeps its capacity.
    pub fn drain(&mut self) -> Drain<'_, V> {
        if !self.slots.is_empty() {
            self.touch();
        }
        Drain {
            inner: self.slots.drain(..),
        }
    }

    /// Starts a detached traversal of the table.
    pub fn cursor(&self) -> RawCursor {
        RawCursor {
            next: 0,
            current: None,
            expected: self.modifications,
        }
    }
}

/// A view into a single entry of a [`HashTable`].
pub enum Entry<'a, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Returns the position of the entry in the table.
    ///
    /// For a vacant entry this is the position the value will be inserted
    /// at.
    pub fn index(&self) -> usize {
        match self {
            Entry::Occupied(entry) => entry.index,
            Entry::Vacant(entry) => entry.index,
        }
    }
}

/// A vacant entry of a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    index: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Returns the hash the value will be stored under.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Inserts `value`, growing the table if it is full.
    pub fn insert(self, value: V) -> &'a mut V {
        self.table.insert_at(self.index, self.hash, value)
    }
}

/// An occupied entry of a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Returns a reference to the value.
    pub fn get(&self) -> &V {
        &self.table.slots[self.index]
    }

    /// Returns a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.slots[self.index]
    }

    /// Converts the entry into a mutable reference with the table's
    /// lifetime.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.slots[self.index]
    }

    /// Removes the value from the table.
    pub fn remove(self) -> V {
        self.table.remove_unchecked(self.index)
    }
}

/// Detached traversal state for a [`HashTable`].
///
/// Unlike [`Iter`], a cursor does not borrow the table between steps. Each
/// step takes the table as an argument and first compares the table's
/// modification counter with the one it recorded; a mismatch means the
/// table was structurally changed outside the cursor and the step fails
/// with [`Error::ConcurrentModification`].
///
/// The check is a diagnostic aid. It cannot tell two tables apart, and it
/// is no substitute for synchronisation.
///
/// ```rust
/// # use array_hash::Error;
/// # use array_hash::hash_table::HashTable;
/// let mut table = HashTable::new();
/// for v in [1u64, 2, 3] {
///     table.entry(v, |&x| x == v).unwrap().or_insert(v);
/// }
///
/// let mut cursor = table.cursor();
/// while let Some(&v) = cursor.advance(&table).unwrap() {
///     if v == 2 {
///         cursor.remove(&mut table).unwrap();
///     }
/// }
/// assert_eq!(table.as_slice(), &[1, 3]);
///
/// let mut stale = table.cursor();
/// table.clear();
/// assert_eq!(stale.advance(&table), Err(Error::ConcurrentModification));
/// ```
#[derive(Debug, Clone)]
pub struct RawCursor {
    next: usize,
    current: Option<usize>,
    expected: u64,
}

impl RawCursor {
    fn check<V>(&self, table: &HashTable<V>) -> Result<()> {
        if table.modifications != self.expected {
            return Err(Error::ConcurrentModification);
        }
        Ok(())
    }

    /// Returns `true` if another call to [`advance`](Self::advance) would
    /// yield a value.
    pub fn has_next<V>(&self, table: &HashTable<V>) -> bool {
        self.next < table.len()
    }

    /// Returns the position of the current value, if there is one.
    pub fn position(&self) -> Option<usize> {
        self.current
    }

    /// Moves to the next value and returns it.
    pub fn advance<'a, V>(&mut self, table: &'a HashTable<V>) -> Result<Option<&'a V>> {
        self.check(table)?;
        match table.slots.get(self.next) {
            Some(value) => {
                self.current = Some(self.next);
                self.next += 1;
                Ok(Some(value))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    /// Returns the current value.
    pub fn current<'a, V>(&self, table: &'a HashTable<V>) -> Result<&'a V> {
        self.check(table)?;
        let index = self.current.ok_or(Error::NoCurrentElement)?;
        table.get(index)
    }

    /// Returns the current value mutably.
    pub fn current_mut<'a, V>(&self, table: &'a mut HashTable<V>) -> Result<&'a mut V> {
        self.check(table)?;
        let index = self.current.ok_or(Error::NoCurrentElement)?;
        table.get_mut(index)
    }

    /// Removes the current value from the table.
    ///
    /// Allowed once per successful [`advance`](Self::advance). The next
    /// advance yields the value that followed the removed one.
    pub fn remove<V>(&mut self, table: &mut HashTable<V>) -> Result<V> {
        self.check(table)?;
        let index = self.current.take().ok_or(Error::NoCurrentElement)?;
        let value = table.remove_at(index)?;
        self.next = index;
        self.expected = table.modifications;
        Ok(value)
    }
}

/// An iterator over the values of a [`HashTable`].
pub struct Iter<'a, V> {
    inner: core::slice::Iter<'a, V>,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the values of a [`HashTable`].
pub struct IterMut<'a, V> {
    inner: core::slice::IterMut<'a, V>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IterMut<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// A draining iterator over the values of a [`HashTable`].
pub struct Drain<'a, V> {
    inner: std::vec::Drain<'a, V>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}
impl<V> FusedIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    inner: std::vec::IntoIter<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(mut self) -> Self::IntoIter {
        let block = self.install(Block::empty());
        IntoIter {
            inner: block.slots.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
