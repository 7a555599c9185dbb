use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::Index;
use std::sync::Arc;

use crate::DefaultHashBuilder;
use crate::error::Result;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hash_table::RawCursor;
use crate::key_mode::ByIdentity;
use crate::key_mode::ByValue;
use crate::key_mode::KeyMode;
use crate::pool::ArrayPool;

/// A map backed by two parallel arrays sorted by key hash.
///
/// `ArrayMap<K, V, S, M>` stores its entries contiguously and finds them by
/// binary search over the hashes, so it costs one `u64` per slot on top of
/// the `(K, V)` pairs. Lookups are `O(log n)`; insertions and removals move
/// the tail of the arrays and are `O(n)`. It is meant for maps of a few
/// dozen to a few hundred entries, where that trade buys a much smaller
/// footprint than an open-addressing table.
///
/// The `M` parameter picks how keys are hashed and compared: [`ByValue`]
/// through `Hash` and `Eq`, or [`ByIdentity`] by the address a pointer-like
/// key refers to. See [`IdentityArrayMap`](crate::IdentityArrayMap).
///
/// Iteration order is the storage order: ascending hash, and insertion order
/// among keys with the same hash.
///
/// # Examples
///
/// ```rust
/// use array_hash::ArrayMap;
///
/// let mut scores = ArrayMap::new();
/// scores.insert("ada", 36).unwrap();
/// scores.insert("grace", 85).unwrap();
/// assert_eq!(scores.insert("ada", 37).unwrap(), Some(36));
///
/// assert_eq!(scores.len(), 2);
/// assert_eq!(scores[&"ada"], 37);
/// ```
pub struct ArrayMap<K, V, S = DefaultHashBuilder, M = ByValue> {
    table: HashTable<(K, V)>,
    hash_builder: S,
    mode: PhantomData<M>,
}

impl<K, V, S, M> Debug for ArrayMap<K, V, S, M>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, M> Clone for ArrayMap<K, V, S, M>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            hash_builder: self.hash_builder.clone(),
            mode: PhantomData,
        }
    }
}

impl<K, V, S, M> Default for ArrayMap<K, V, S, M>
where
    S: Default,
{
    fn default() -> Self {
        Self::from_parts(HashTable::new(), S::default())
    }
}

impl<K, V> ArrayMap<K, V, DefaultHashBuilder, ByValue> {
    /// Creates an empty map using the default hasher builder.
    ///
    /// The map does not allocate until the first insertion.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with room for exactly `capacity` entries.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// let map: ArrayMap<u32, String> = ArrayMap::with_capacity(10);
    /// assert_eq!(map.capacity(), 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates an empty map that refuses every insertion.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// # use array_hash::Error;
    /// let mut map: ArrayMap<&str, i32> = ArrayMap::immutable();
    /// assert!(matches!(map.insert("k", 1), Err(Error::Unsupported { .. })));
    /// assert_eq!(map.remove(&"k"), None);
    /// ```
    pub fn immutable() -> Self {
        Self::immutable_with_hasher(DefaultHashBuilder::default())
    }
}

impl<K, V, S> ArrayMap<K, V, S, ByValue> {
    /// Creates an empty map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use array_hash::ArrayMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: ArrayMap<i32, String, _> = ArrayMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map with room for exactly `capacity` entries and the
    /// given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity(capacity), hash_builder)
    }

    /// Creates an empty map whose small arrays are recycled through `pool`.
    pub fn with_pool_and_hasher(pool: Arc<ArrayPool<(K, V)>>, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity_in(0, pool), hash_builder)
    }

    /// Creates an empty, immutable map with the given hasher builder.
    pub fn immutable_with_hasher(hash_builder: S) -> Self {
        Self::from_parts(HashTable::immutable(), hash_builder)
    }
}

impl<K, V> ArrayMap<K, V, DefaultHashBuilder, ByIdentity> {
    /// Creates an empty map that compares keys by address.
    ///
    /// ```rust
    /// use std::rc::Rc;
    ///
    /// use array_hash::ArrayMap;
    ///
    /// let a = Rc::new("key".to_string());
    /// let b = Rc::new("key".to_string());
    ///
    /// let mut map = ArrayMap::identity();
    /// map.insert(Rc::clone(&a), 1).unwrap();
    /// map.insert(Rc::clone(&b), 2).unwrap();
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&a), Some(&1));
    /// ```
    pub fn identity() -> Self {
        Self::identity_with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty identity map with room for exactly `capacity`
    /// entries.
    pub fn identity_with_capacity(capacity: usize) -> Self {
        Self::identity_with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ArrayMap<K, V, S, ByIdentity> {
    /// Creates an empty identity map with the given hasher builder.
    pub fn identity_with_hasher(hash_builder: S) -> Self {
        Self::identity_with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty identity map with room for exactly `capacity`
    /// entries and the given hasher builder.
    pub fn identity_with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity(capacity), hash_builder)
    }

    /// Creates an empty identity map whose small arrays are recycled through
    /// `pool`.
    pub fn identity_with_pool_and_hasher(pool: Arc<ArrayPool<(K, V)>>, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity_in(0, pool), hash_builder)
    }
}

impl<K, V, S, M> ArrayMap<K, V, S, M> {
    fn from_parts(table: HashTable<(K, V)>, hash_builder: S) -> Self {
        Self {
            table,
            hash_builder,
            mode: PhantomData,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of entries the map can hold before it grows.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `true` if the map was created immutable.
    pub fn is_immutable(&self) -> bool {
        self.table.is_immutable()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all entries and releases the backing arrays.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// let mut map = ArrayMap::new();
    /// map.insert(1, "a").unwrap();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Makes sure the map can hold `min_capacity` entries without growing.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        self.table.ensure_capacity(min_capacity)
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.table.reserve(additional)
    }

    /// Returns the key stored at `index`.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// # use array_hash::Error;
    /// let mut map = ArrayMap::new();
    /// map.insert("only", 1).unwrap();
    /// assert_eq!(map.key_at(0), Ok(&"only"));
    /// assert_eq!(map.key_at(1), Err(Error::IndexOutOfRange { index: 1, len: 1 }));
    /// ```
    pub fn key_at(&self, index: usize) -> Result<&K> {
        self.table.get(index).map(|(k, _)| k)
    }

    /// Returns the value stored at `index`.
    pub fn value_at(&self, index: usize) -> Result<&V> {
        self.table.get(index).map(|(_, v)| v)
    }

    /// Returns the value stored at `index` mutably.
    pub fn value_at_mut(&mut self, index: usize) -> Result<&mut V> {
        self.table.get_mut(index).map(|(_, v)| v)
    }

    /// Replaces the value stored at `index`, returning the old one.
    ///
    /// Replacing a value is not a structural change.
    pub fn set_value_at(&mut self, index: usize, value: V) -> Result<V> {
        self.table
            .get_mut(index)
            .map(|(_, v)| core::mem::replace(v, value))
    }

    /// Removes the entry stored at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<(K, V)> {
        self.table.remove_at(index)
    }

    /// Returns the position of the first entry holding `value`.
    ///
    /// This is a linear scan.
    pub fn index_of_value(&self, value: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        self.table.iter().position(|(_, v)| v == value)
    }

    /// Returns `true` if some entry holds `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.index_of_value(value).is_some()
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(|(k, v)| f(k, v));
    }

    /// Returns an iterator over the entries in storage order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the entries with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys in storage order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in storage order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes every entry, yielding them in storage order.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Starts a detached traversal that can remove entries as it goes.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// let mut map: ArrayMap<i32, i32> = (0..6).map(|i| (i, i * i)).collect();
    ///
    /// let mut cursor = map.cursor();
    /// while let Some((_, &square)) = cursor.next(&map).unwrap() {
    ///     if square % 2 == 1 {
    ///         cursor.remove(&mut map).unwrap();
    ///     }
    /// }
    /// assert_eq!(map.len(), 3);
    /// assert!(map.values().all(|v| v % 2 == 0));
    /// ```
    pub fn cursor(&self) -> Cursor<K, V> {
        Cursor {
            raw: self.table.cursor(),
            marker: PhantomData,
        }
    }
}

impl<K, V, S, M> ArrayMap<K, V, S, M>
where
    M: KeyMode<K>,
    S: BuildHasher,
{
    #[inline]
    fn hash_of(&self, key: &K) -> u64 {
        M::hash_key(&self.hash_builder, key)
    }

    /// Returns the position of `key`, or `Err` with the position an entry
    /// for it would be inserted at.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// let mut map = ArrayMap::new();
    /// map.insert("a", 1).unwrap();
    /// map.insert("b", 2).unwrap();
    /// map.insert("a", 3).unwrap();
    ///
    /// let at = map.index_of_key(&"a").unwrap();
    /// assert_eq!(map.value_at(at), Ok(&3));
    /// assert!(map.index_of_key(&"c").is_err());
    /// ```
    pub fn index_of_key(&self, key: &K) -> Result<usize, usize> {
        self.table.index_of(self.hash_of(key), |(k, _)| M::key_eq(k, key))
    }

    /// Inserts a key-value pair, returning the value previously stored for
    /// the key.
    ///
    /// An existing entry keeps its key and position; only the value is
    /// replaced. Fails with [`Error::Unsupported`](crate::Error::Unsupported)
    /// on an immutable map.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// let mut map = ArrayMap::new();
    /// assert_eq!(map.insert(37, "a").unwrap(), None);
    /// assert_eq!(map.insert(37, "b").unwrap(), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = self.hash_of(&key);
        match self.table.entry(hash, |(k, _)| M::key_eq(k, &key))? {
            TableEntry::Occupied(mut entry) => {
                Ok(Some(core::mem::replace(&mut entry.get_mut().1, value)))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                Ok(None)
            }
        }
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table
            .find(self.hash_of(key), |(k, _)| M::key_eq(k, key))
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_of(key);
        self.table
            .find_mut(hash, |(k, _)| M::key_eq(k, key))
            .map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.table
            .find(self.hash_of(key), |(k, _)| M::key_eq(k, key))
            .map(|(k, v)| (k, v))
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of_key(key).is_ok()
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_of(key);
        self.table.remove(hash, |(k, _)| M::key_eq(k, key))
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// Fails with [`Error::Unsupported`](crate::Error::Unsupported) when the
    /// key is absent and the map is immutable.
    ///
    /// ```rust
    /// # use array_hash::ArrayMap;
    /// let mut counts = ArrayMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.entry(word).unwrap().or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Result<Entry<'_, K, V>> {
        let hash = self.hash_of(&key);
        Ok(match self.table.entry(hash, |(k, _)| M::key_eq(k, &key))? {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        })
    }

    /// Inserts clones of every entry of `other`.
    ///
    /// When this map is empty it takes over `other`'s arrays wholesale,
    /// along with a clone of its hasher builder, instead of inserting entry
    /// by entry.
    pub fn insert_all(&mut self, other: &Self) -> Result<()>
    where
        K: Clone,
        V: Clone,
        S: Clone,
    {
        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            self.table.fill_from(&other.table)?;
            self.hash_builder = other.hash_builder.clone();
            return Ok(());
        }

        self.reserve(other.len())?;
        for (k, v) in other.iter() {
            self.insert(k.clone(), v.clone())?;
        }
        Ok(())
    }
}

impl<K, V, S, M> PartialEq for ArrayMap<K, V, S, M>
where
    M: KeyMode<K>,
    S: BuildHasher,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, M> Eq for ArrayMap<K, V, S, M>
where
    M: KeyMode<K>,
    S: BuildHasher,
    V: Eq,
{
}

/// Order-independent: the sum of `key_hash ^ value_hash` over all entries.
///
/// Only maps on the fixed-seed [`DefaultHashBuilder`] are hashable, since
/// every instance of it produces the same key hashes.
impl<K, V, M> Hash for ArrayMap<K, V, DefaultHashBuilder, M>
where
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self
            .table
            .hashes()
            .iter()
            .zip(self.table.iter())
            .fold(0u64, |acc, (&hash, (_, v))| {
                acc.wrapping_add(hash ^ self.hash_builder.hash_one(v))
            });
        state.write_u64(sum);
    }
}

impl<K, V, S, M> Index<&K> for ArrayMap<K, V, S, M>
where
    M: KeyMode<K>,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// # Panics
///
/// Panics if the map is immutable and the iterator is not empty.
impl<K, V, S, M> Extend<(K, V)> for ArrayMap<K, V, S, M>
where
    M: KeyMode<K>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(err) = self.insert(k, v) {
                panic!("cannot extend map: {err}");
            }
        }
    }
}

impl<K, V, S, M> FromIterator<(K, V)> for ArrayMap<K, V, S, M>
where
    M: KeyMode<K>,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S, M> IntoIterator for ArrayMap<K, V, S, M> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S, M> IntoIterator for &'a ArrayMap<K, V, S, M> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S, M> IntoIterator for &'a mut ArrayMap<K, V, S, M> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`ArrayMap`].
///
/// [`entry`]: ArrayMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// A detached traversal of an [`ArrayMap`].
///
/// The cursor holds no borrow of the map between steps, so the map can be
/// modified through [`Cursor::remove`] and [`Cursor::set_value`] while
/// traversing. Any other structural change makes the following step fail
/// with [`Error::ConcurrentModification`](crate::Error::ConcurrentModification).
///
/// A cursor must only be used with the map that created it.
#[derive(Debug)]
pub struct Cursor<K, V> {
    raw: RawCursor,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Clone for Cursor<K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            marker: PhantomData,
        }
    }
}

impl<K, V> Cursor<K, V> {
    /// Returns `true` if another entry is left to visit.
    pub fn has_next<S, M>(&self, map: &ArrayMap<K, V, S, M>) -> bool {
        self.raw.has_next(&map.table)
    }

    /// Advances to the next entry and returns it.
    pub fn next<'a, S, M>(
        &mut self,
        map: &'a ArrayMap<K, V, S, M>,
    ) -> Result<Option<(&'a K, &'a V)>> {
        Ok(self.raw.advance(&map.table)?.map(|(k, v)| (k, v)))
    }

    /// Returns the key of the current entry.
    pub fn key<'a, S, M>(&self, map: &'a ArrayMap<K, V, S, M>) -> Result<&'a K> {
        self.raw.current(&map.table).map(|(k, _)| k)
    }

    /// Returns the value of the current entry.
    pub fn value<'a, S, M>(&self, map: &'a ArrayMap<K, V, S, M>) -> Result<&'a V> {
        self.raw.current(&map.table).map(|(_, v)| v)
    }

    /// Replaces the value of the current entry, returning the old one.
    pub fn set_value<S, M>(&self, map: &mut ArrayMap<K, V, S, M>, value: V) -> Result<V> {
        self.raw
            .current_mut(&mut map.table)
            .map(|(_, v)| core::mem::replace(v, value))
    }

    /// Removes the current entry.
    ///
    /// Fails with [`Error::NoCurrentElement`](crate::Error::NoCurrentElement)
    /// unless it directly follows a successful [`next`](Self::next).
    pub fn remove<S, M>(&mut self, map: &mut ArrayMap<K, V, S, M>) -> Result<(K, V)> {
        self.raw.remove(&mut map.table)
    }
}

/// An iterator over the entries of an `ArrayMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the entries of an `ArrayMap` with mutable values.
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of an `ArrayMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an `ArrayMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an `ArrayMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the entries of an `ArrayMap`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}
impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// An owning iterator over the entries of an `ArrayMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
