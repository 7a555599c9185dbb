//! Recycling cache for the smallest backing arrays.
//!
//! Small containers are created, cleared and regrown constantly. The pool
//! keeps a bounded free list for each of the two capacity classes the growth
//! policy produces from empty (`BASE_SIZE` and `2 * BASE_SIZE`), so those
//! containers can reuse array pairs instead of going back to the allocator.
//!
//! The pool carries no semantic state. A container without a pool behaves
//! exactly like one with a pool; only allocation traffic differs.

use core::fmt::Debug;
#[cfg(feature = "stats")]
use core::sync::atomic::AtomicU64;
#[cfg(feature = "stats")]
use core::sync::atomic::Ordering;

use parking_lot::Mutex;

/// Capacity of the first allocation of an empty container.
pub(crate) const BASE_SIZE: usize = 4;

/// Upper bound of array pairs resident in one capacity class.
pub(crate) const MAX_POOLED: usize = 10;

/// A pair of backing arrays: the hash array and the payload array.
///
/// `hashes.len()` is the logical capacity. `slots` holds the live payload
/// and always has room for at least `hashes.len()` elements, so inserting
/// below capacity never reallocates it.
pub(crate) struct Block<V> {
    pub(crate) hashes: Box<[u64]>,
    pub(crate) slots: Vec<V>,
}

impl<V> Block<V> {
    pub(crate) fn empty() -> Self {
        Self {
            hashes: Box::default(),
            slots: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::empty();
        }
        Self {
            hashes: vec![0; capacity].into_boxed_slice(),
            slots: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.hashes.len()
    }

    fn is_reusable(&self, class: usize) -> bool {
        self.hashes.len() == class && self.slots.is_empty() && self.slots.capacity() >= class
    }
}

#[derive(Clone, Copy)]
enum Event {
    Hit,
    Miss,
    Recycled,
    Discarded,
    Corrupted,
}

/// Snapshot of pool activity counters.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Requests served from a free list.
    pub hits: u64,
    /// Requests for a pooled class that found the free list empty.
    pub misses: u64,
    /// Array pairs accepted back into a free list.
    pub recycled: u64,
    /// Array pairs dropped because their free list was full.
    pub discarded: u64,
    /// Free lists dropped after a malformed node was found.
    pub corruptions: u64,
}

#[cfg(feature = "stats")]
#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    recycled: AtomicU64,
    discarded: AtomicU64,
    corruptions: AtomicU64,
}

#[cfg(feature = "stats")]
impl Counters {
    fn note(&self, event: Event) {
        let counter = match event {
            Event::Hit => &self.hits,
            Event::Miss => &self.misses,
            Event::Recycled => &self.recycled,
            Event::Discarded => &self.discarded,
            Event::Corrupted => &self.corruptions,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            corruptions: self.corruptions.load(Ordering::Relaxed),
        }
    }
}

/// A shared free list of small backing arrays.
///
/// Each capacity class sits behind its own lock, so traffic on one class
/// never contends with the other. No lock is held across a container
/// operation: acquire and release are short and bounded.
///
/// Containers opt in by being constructed with an `Arc<ArrayPool<_>>`, e.g.
/// [`ArrayMap::with_pool_and_hasher`](crate::ArrayMap::with_pool_and_hasher).
/// The payload type of the pool is the payload type of the container: `(K,
/// V)` for maps, `T` for sets.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use array_hash::ArrayMap;
/// use array_hash::ArrayPool;
/// use array_hash::DefaultHashBuilder;
///
/// let pool = Arc::new(ArrayPool::new());
/// let mut map = ArrayMap::with_pool_and_hasher(Arc::clone(&pool), DefaultHashBuilder::default());
/// map.insert(1, "one").unwrap();
/// map.clear();
///
/// // The four-slot arrays of the cleared map wait in the pool.
/// assert_eq!(pool.pooled(4), 1);
/// ```
pub struct ArrayPool<V> {
    small: Mutex<Vec<Block<V>>>,
    large: Mutex<Vec<Block<V>>>,
    #[cfg(feature = "stats")]
    counters: Counters,
}

impl<V> Debug for ArrayPool<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArrayPool")
            .field("small", &self.small.lock().len())
            .field("large", &self.large.lock().len())
            .finish()
    }
}

impl<V> Default for ArrayPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ArrayPool<V> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            small: Mutex::new(Vec::new()),
            large: Mutex::new(Vec::new()),
            #[cfg(feature = "stats")]
            counters: Counters::default(),
        }
    }

    fn class(&self, capacity: usize) -> Option<&Mutex<Vec<Block<V>>>> {
        match capacity {
            BASE_SIZE => Some(&self.small),
            c if c == BASE_SIZE * 2 => Some(&self.large),
            _ => None,
        }
    }

    #[inline(always)]
    fn note(&self, event: Event) {
        #[cfg(feature = "stats")]
        self.counters.note(event);
        #[cfg(not(feature = "stats"))]
        let _ = event;
    }

    /// Returns the number of array pairs resident for `capacity`.
    ///
    /// Always 0 for capacities that are not a pooled class.
    pub fn pooled(&self, capacity: usize) -> usize {
        self.class(capacity).map_or(0, |list| list.lock().len())
    }

    /// Drops every pooled array pair.
    pub fn clear(&self) {
        let small = core::mem::take(&mut *self.small.lock());
        let large = core::mem::take(&mut *self.large.lock());
        drop(small);
        drop(large);
    }

    /// Returns a snapshot of the pool counters.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }

    /// Pops an array pair of exactly `capacity` slots, if one is pooled.
    pub(crate) fn acquire(&self, capacity: usize) -> Option<Block<V>> {
        let list = self.class(capacity)?;
        let mut blocks = list.lock();
        let Some(block) = blocks.pop() else {
            drop(blocks);
            self.note(Event::Miss);
            return None;
        };

        if !block.is_reusable(capacity) {
            let dropped = core::mem::take(&mut *blocks);
            drop(blocks);
            log::error!(
                "array pool class {capacity} is corrupted (hashes: {}, slots: {}/{}); dropping {} \
                 pooled arrays",
                block.hashes.len(),
                block.slots.len(),
                block.slots.capacity(),
                dropped.len() + 1,
            );
            drop(block);
            drop(dropped);
            self.note(Event::Corrupted);
            return None;
        }

        drop(blocks);
        self.note(Event::Hit);
        Some(block)
    }

    /// Offers an array pair back to the pool.
    ///
    /// Pairs that are not of a pooled class, or that arrive while their free
    /// list is full, are dropped.
    pub(crate) fn release(&self, mut block: Block<V>) {
        let capacity = block.capacity();
        let Some(list) = self.class(capacity) else {
            return;
        };

        // Scrub outside the lock: dropping payload runs user code.
        block.slots.clear();

        let mut blocks = list.lock();
        if blocks.len() < MAX_POOLED {
            blocks.push(block);
            drop(blocks);
            self.note(Event::Recycled);
        } else {
            drop(blocks);
            log::debug!("array pool class {capacity} is full; discarding released arrays");
            self.note(Event::Discarded);
        }
    }

    #[cfg(test)]
    pub(crate) fn push_unchecked(&self, block: Block<V>) {
        if let Some(list) = self.class(block.capacity()) {
            list.lock().push(block);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn empty_pool_misses() {
        let pool: ArrayPool<u32> = ArrayPool::new();
        assert!(pool.acquire(BASE_SIZE).is_none());
        assert!(pool.acquire(BASE_SIZE * 2).is_none());
        assert!(pool.acquire(12).is_none());
    }

    #[test]
    fn release_then_acquire_reuses_arrays() {
        let pool: ArrayPool<String> = ArrayPool::new();
        let mut block = Block::with_capacity(BASE_SIZE);
        block.slots.push("stale".to_string());
        let hashes_ptr = block.hashes.as_ptr();

        pool.release(block);
        assert_eq!(pool.pooled(BASE_SIZE), 1);
        assert_eq!(pool.pooled(BASE_SIZE * 2), 0);

        let reused = pool.acquire(BASE_SIZE).expect("pooled block");
        assert_eq!(reused.hashes.as_ptr(), hashes_ptr);
        assert_eq!(reused.capacity(), BASE_SIZE);
        assert!(reused.slots.is_empty());
        assert_eq!(pool.pooled(BASE_SIZE), 0);
    }

    #[test]
    fn non_class_capacities_are_not_pooled() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        pool.release(Block::with_capacity(12));
        pool.release(Block::with_capacity(0));
        assert_eq!(pool.pooled(12), 0);
        assert_eq!(pool.pooled(0), 0);
    }

    #[test]
    fn free_list_is_bounded() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        for _ in 0..MAX_POOLED + 5 {
            pool.release(Block::with_capacity(BASE_SIZE * 2));
        }
        assert_eq!(pool.pooled(BASE_SIZE * 2), MAX_POOLED);

        pool.clear();
        assert_eq!(pool.pooled(BASE_SIZE * 2), 0);
    }

    #[test]
    fn corrupted_list_is_dropped() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        pool.release(Block::with_capacity(BASE_SIZE));
        pool.release(Block::with_capacity(BASE_SIZE));

        let mut bad = Block::with_capacity(BASE_SIZE);
        bad.slots.push(9);
        pool.push_unchecked(bad);
        assert_eq!(pool.pooled(BASE_SIZE), 3);

        assert!(pool.acquire(BASE_SIZE).is_none());
        assert_eq!(pool.pooled(BASE_SIZE), 0);

        // The pool keeps working afterwards.
        pool.release(Block::with_capacity(BASE_SIZE));
        assert!(pool.acquire(BASE_SIZE).is_some());
    }

    #[test]
    fn classes_are_shared_across_threads() {
        let pool: Arc<ArrayPool<u64>> = Arc::new(ArrayPool::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    let class = if i % 2 == 0 { BASE_SIZE } else { BASE_SIZE * 2 };
                    for _ in 0..1000 {
                        let block = pool
                            .acquire(class)
                            .unwrap_or_else(|| Block::with_capacity(class));
                        assert_eq!(block.capacity(), class);
                        pool.release(block);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(pool.pooled(BASE_SIZE) <= MAX_POOLED);
        assert!(pool.pooled(BASE_SIZE * 2) <= MAX_POOLED);
    }

    #[cfg(feature = "stats")]
    #[test]
    fn stats_track_activity() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        assert!(pool.acquire(BASE_SIZE).is_none());
        for _ in 0..MAX_POOLED + 1 {
            pool.release(Block::with_capacity(BASE_SIZE));
        }
        assert!(pool.acquire(BASE_SIZE).is_some());

        let stats = pool.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.recycled, MAX_POOLED as u64);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.corruptions, 0);
    }
}
