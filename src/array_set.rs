use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;
use core::marker::PhantomData;
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

/// A set backed by two parallel arrays sorted by value hash.
///
/// `ArraySet<T, S, M>` is the key-only sibling of
/// [`ArrayMap`](crate::ArrayMap): the same sorted hash array and binary
/// search, with the values themselves as payload. Memory overhead is one
/// `u64` per slot.
///
/// # Examples
///
/// ```rust
/// use array_hash::ArraySet;
///
/// let mut set = ArraySet::new();
/// assert_eq!(set.insert(5).unwrap(), true);
/// assert_eq!(set.insert(5).unwrap(), false);
/// assert!(set.remove(&5));
/// assert!(!set.remove(&5));
/// assert!(set.is_empty());
/// ```
pub struct ArraySet<T, S = DefaultHashBuilder, M = ByValue> {
    table: HashTable<T>,
    hash_builder: S,
    mode: PhantomData<M>,
}

impl<T, S, M> PartialEq for ArraySet<T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S, M> Eq for ArraySet<T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
}

/// Order-independent: the wrapping sum of the stored hashes.
///
/// Only sets on the fixed-seed [`DefaultHashBuilder`] are hashable, since
/// every instance of it produces the same value hashes.
impl<T, M> Hash for ArraySet<T, DefaultHashBuilder, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self
            .table
            .hashes()
            .iter()
            .fold(0u64, |acc, &hash| acc.wrapping_add(hash));
        state.write_u64(sum);
    }
}

impl<T, S, M> Debug for ArraySet<T, S, M>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S, M> Clone for ArraySet<T, S, M>
where
    T: Clone,
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

impl<T, S, M> Default for ArraySet<T, S, M>
where
    S: Default,
{
    fn default() -> Self {
        Self::from_parts(HashTable::new(), S::default())
    }
}

impl<T> ArraySet<T, DefaultHashBuilder, ByValue> {
    /// Creates an empty set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty set with room for exactly `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates an empty set that refuses every insertion.
    pub fn immutable() -> Self {
        Self::immutable_with_hasher(DefaultHashBuilder::default())
    }
}

impl<T, S> ArraySet<T, S, ByValue> {
    /// Creates an empty set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty set with room for exactly `capacity` values and the
    /// given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity(capacity), hash_builder)
    }

    /// Creates an empty set whose small arrays are recycled through `pool`.
    pub fn with_pool_and_hasher(pool: Arc<ArrayPool<T>>, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity_in(0, pool), hash_builder)
    }

    /// Creates an empty, immutable set with the given hasher builder.
    pub fn immutable_with_hasher(hash_builder: S) -> Self {
        Self::from_parts(HashTable::immutable(), hash_builder)
    }
}

impl<T> ArraySet<T, DefaultHashBuilder, ByIdentity> {
    /// Creates an empty set that compares values by address.
    pub fn identity() -> Self {
        Self::identity_with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty identity set with room for exactly `capacity`
    /// values.
    pub fn identity_with_capacity(capacity: usize) -> Self {
        Self::identity_with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T, S> ArraySet<T, S, ByIdentity> {
    /// Creates an empty identity set with the given hasher builder.
    pub fn identity_with_hasher(hash_builder: S) -> Self {
        Self::identity_with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty identity set with room for exactly `capacity` values
    /// and the given hasher builder.
    pub fn identity_with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity(capacity), hash_builder)
    }

    /// Creates an empty identity set whose small arrays are recycled through
    /// `pool`.
    pub fn identity_with_pool_and_hasher(pool: Arc<ArrayPool<T>>, hash_builder: S) -> Self {
        Self::from_parts(HashTable::with_capacity_in(0, pool), hash_builder)
    }
}

impl<T, S, M> ArraySet<T, S, M> {
    fn from_parts(table: HashTable<T>, hash_builder: S) -> Self {
        Self {
            table,
            hash_builder,
            mode: PhantomData,
        }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of values the set can hold before it grows.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `true` if the set was created immutable.
    pub fn is_immutable(&self) -> bool {
        self.table.is_immutable()
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all values and releases the backing arrays.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Makes sure the set can hold `min_capacity` values without growing.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<()> {
        self.table.ensure_capacity(min_capacity)
    }

    /// Reserves room for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.table.reserve(additional)
    }

    /// Returns the value stored at `index`.
    pub fn value_at(&self, index: usize) -> Result<&T> {
        self.table.get(index)
    }

    /// Removes the value stored at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.table.remove_at(index)
    }

    /// Keeps only the values for which `f` returns `true`.
    ///
    /// ```rust
    /// # use array_hash::ArraySet;
    /// let mut set: ArraySet<i32> = (1..=4).collect();
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&2));
    /// assert!(set.contains(&4));
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.table.retain(|v| f(v));
    }

    /// Returns an iterator over the values in storage order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Removes every value, yielding them in storage order.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Starts a detached traversal that can remove values as it goes.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor {
            raw: self.table.cursor(),
            marker: PhantomData,
        }
    }
}

impl<T, S, M> ArraySet<T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        M::hash_key(&self.hash_builder, value)
    }

    /// Returns the position of `value`, or `Err` with the position it would
    /// be inserted at.
    pub fn index_of(&self, value: &T) -> Result<usize, usize> {
        self.table
            .index_of(self.hash_of(value), |v| M::key_eq(v, value))
    }

    /// Adds a value to the set. Returns whether the value was newly added.
    ///
    /// Fails with [`Error::Unsupported`](crate::Error::Unsupported) on an
    /// immutable set.
    pub fn insert(&mut self, value: T) -> Result<bool> {
        let hash = self.hash_of(&value);
        match self.table.entry(hash, |v| M::key_eq(v, &value))? {
            TableEntry::Occupied(_) => Ok(false),
            TableEntry::Vacant(entry) => {
                entry.insert(value);
                Ok(true)
            }
        }
    }

    /// Returns `true` if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_ok()
    }

    /// Removes a value from the set. Returns whether the value was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Adds a value to the set, replacing the existing value, if any, that is
    /// equal to the given one. Returns the replaced value.
    ///
    /// ```rust
    /// # use array_hash::ArraySet;
    /// let mut set = ArraySet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.replace(1).unwrap(), Some(1));
    /// assert_eq!(set.replace(2).unwrap(), None);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn replace(&mut self, value: T) -> Result<Option<T>> {
        let hash = self.hash_of(&value);
        match self.table.entry(hash, |v| M::key_eq(v, &value))? {
            TableEntry::Occupied(mut entry) => {
                Ok(Some(core::mem::replace(entry.get_mut(), value)))
            }
            TableEntry::Vacant(entry) => {
                entry.insert(value);
                Ok(None)
            }
        }
    }

    /// Removes and returns the value in the set, if any, that is equal to the
    /// given one.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_of(value);
        self.table.remove(hash, |v| M::key_eq(v, value))
    }

    /// Returns a reference to the stored value equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.table
            .find(self.hash_of(value), |v| M::key_eq(v, value))
    }

    /// Adds clones of every value of `other`. Returns whether the set
    /// changed.
    ///
    /// When this set is empty it takes over `other`'s arrays wholesale,
    /// along with a clone of its hasher builder.
    pub fn insert_all(&mut self, other: &Self) -> Result<bool>
    where
        T: Clone,
        S: Clone,
    {
        if other.is_empty() {
            return Ok(false);
        }
        if self.is_empty() {
            self.table.fill_from(&other.table)?;
            self.hash_builder = other.hash_builder.clone();
            return Ok(true);
        }

        let mut changed = false;
        for v in other.iter() {
            changed |= self.insert(v.clone())?;
        }
        Ok(changed)
    }

    /// Removes every value yielded by `values`. Returns whether the set
    /// changed.
    pub fn remove_all<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for v in values {
            changed |= self.remove(v);
        }
        changed
    }

    /// Keeps only the values also present in `other`. Returns whether the
    /// set changed.
    ///
    /// ```rust
    /// # use array_hash::ArraySet;
    /// let mut a: ArraySet<i32> = (0..10).collect();
    /// let b: ArraySet<i32> = (5..20).collect();
    /// assert!(a.retain_all(&b));
    /// assert_eq!(a.len(), 5);
    /// assert!(!a.retain_all(&b));
    /// ```
    pub fn retain_all(&mut self, other: &Self) -> bool {
        let before = self.len();
        self.table.retain(|v| other.contains(v));
        self.len() != before
    }

    /// Returns `true` if every value yielded by `values` is in the set.
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Returns `true` if `self` has no values in common with `other`.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if `other` contains every value of `self`.
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if `self` contains every value of `other`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the values in `self` or `other`, without
    /// duplicates.
    ///
    /// ```rust
    /// # use array_hash::ArraySet;
    /// let a: ArraySet<i32> = [1, 2].into_iter().collect();
    /// let b: ArraySet<i32> = [2, 3].into_iter().collect();
    /// assert_eq!(a.union(&b).count(), 3);
    /// ```
    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, T, S, M> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            set: self,
        }
    }

    /// Returns an iterator over the values in both `self` and `other`.
    pub fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, T, S, M> {
        if self.len() <= other.len() {
            Intersection {
                iter: self.iter(),
                other,
            }
        } else {
            Intersection {
                iter: other.iter(),
                other: self,
            }
        }
    }

    /// Returns an iterator over the values in `self` but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Self) -> Difference<'a, T, S, M> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in exactly one of `self` and
    /// `other`.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a Self,
    ) -> SymmetricDifference<'a, T, S, M> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

/// # Panics
///
/// Panics if the set is immutable and the iterator is not empty.
impl<T, S, M> Extend<T> for ArraySet<T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            if let Err(err) = self.insert(v) {
                panic!("cannot extend set: {err}");
            }
        }
    }
}

impl<T, S, M> FromIterator<T> for ArraySet<T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, S, M> IntoIterator for ArraySet<T, S, M> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S, M> IntoIterator for &'a ArraySet<T, S, M> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A detached traversal of an [`ArraySet`].
///
/// See [`array_map::Cursor`](crate::array_map::Cursor); a set cursor can
/// remove values but has nothing to replace.
#[derive(Debug)]
pub struct Cursor<T> {
    raw: RawCursor,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> Cursor<T> {
    /// Returns `true` if another value is left to visit.
    pub fn has_next<S, M>(&self, set: &ArraySet<T, S, M>) -> bool {
        self.raw.has_next(&set.table)
    }

    /// Advances to the next value and returns it.
    pub fn next<'a, S, M>(&mut self, set: &'a ArraySet<T, S, M>) -> Result<Option<&'a T>> {
        self.raw.advance(&set.table)
    }

    /// Returns the current value.
    pub fn current<'a, S, M>(&self, set: &'a ArraySet<T, S, M>) -> Result<&'a T> {
        self.raw.current(&set.table)
    }

    /// Removes the current value.
    pub fn remove<S, M>(&mut self, set: &mut ArraySet<T, S, M>) -> Result<T> {
        self.raw.remove(&mut set.table)
    }
}

/// An iterator over the values of an `ArraySet`.
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// A draining iterator over the values of an `ArraySet`.
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> FusedIterator for Drain<'_, T> {}

/// An owning iterator over the values of an `ArraySet`.
pub struct IntoIter<T> {
    inner: crate::hash_table::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// An iterator over the union of two sets.
pub struct Union<'a, T, S, M> {
    iter: Iter<'a, T>,
    other_iter: Iter<'a, T>,
    set: &'a ArraySet<T, S, M>,
}

impl<'a, T, S, M> Iterator for Union<'a, T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.set.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, T, S, M> {
    iter: Iter<'a, T>,
    other: &'a ArraySet<T, S, M>,
}

impl<'a, T, S, M> Iterator for Intersection<'a, T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, T, S, M> {
    iter: Iter<'a, T>,
    other: &'a ArraySet<T, S, M>,
}

impl<'a, T, S, M> Iterator for Difference<'a, T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, T, S, M> {
    iter: core::iter::Chain<Difference<'a, T, S, M>, Difference<'a, T, S, M>>,
}

impl<'a, T, S, M> Iterator for SymmetricDifference<'a, T, S, M>
where
    M: KeyMode<T>,
    S: BuildHasher,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
