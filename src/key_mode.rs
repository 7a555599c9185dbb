//! Strategies for hashing and comparing keys.

use core::hash::BuildHasher;
use core::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// Strategy deciding how a container hashes and compares its keys.
///
/// The strategy is a type parameter of [`ArrayMap`](crate::ArrayMap) and
/// [`ArraySet`](crate::ArraySet), so it is chosen at construction and cannot
/// change for the lifetime of the container.
pub trait KeyMode<K: ?Sized> {
    /// Hashes `key` with `hash_builder`.
    fn hash_key<S: BuildHasher>(hash_builder: &S, key: &K) -> u64;

    /// Returns `true` if the two keys denote the same entry.
    fn key_eq(a: &K, b: &K) -> bool;
}

/// Hash and compare keys by value, through [`Hash`] and [`Eq`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

/// Hash and compare keys by the address they point to.
///
/// Two keys that are equal by value but refer to different allocations are
/// distinct entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByIdentity;

/// Pointer-like keys that expose the address of their referent.
pub trait Identity {
    /// The address identifying this key.
    fn identity(&self) -> *const ();
}

impl<T: ?Sized> Identity for &T {
    fn identity(&self) -> *const () {
        core::ptr::from_ref::<T>(*self).cast()
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn identity(&self) -> *const () {
        Rc::as_ptr(self).cast()
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn identity(&self) -> *const () {
        Arc::as_ptr(self).cast()
    }
}

impl<K: Hash + Eq + ?Sized> KeyMode<K> for ByValue {
    #[inline]
    fn hash_key<S: BuildHasher>(hash_builder: &S, key: &K) -> u64 {
        hash_builder.hash_one(key)
    }

    #[inline]
    fn key_eq(a: &K, b: &K) -> bool {
        a == b
    }
}

impl<K: Identity + ?Sized> KeyMode<K> for ByIdentity {
    #[inline]
    fn hash_key<S: BuildHasher>(hash_builder: &S, key: &K) -> u64 {
        hash_builder.hash_one(key.identity().addr())
    }

    #[inline]
    fn key_eq(a: &K, b: &K) -> bool {
        core::ptr::eq(a.identity(), b.identity())
    }
}

#[cfg(test)]
mod tests {
    use std::hash::BuildHasherDefault;
    use std::hash::DefaultHasher;

    use super::*;

    type Builder = BuildHasherDefault<DefaultHasher>;

    #[test]
    fn by_value_matches_equal_keys() {
        let builder = Builder::default();
        let a = String::from("key");
        let b = String::from("key");
        assert!(ByValue::key_eq(&a, &b));
        assert_eq!(
            ByValue::hash_key(&builder, &a),
            ByValue::hash_key(&builder, &b)
        );
    }

    #[test]
    fn by_identity_separates_equal_allocations() {
        let a = Rc::new(String::from("key"));
        let b = Rc::new(String::from("key"));
        assert!(!ByIdentity::key_eq(&a, &b));
        assert!(ByIdentity::key_eq(&a, &Rc::clone(&a)));

        let x = Arc::new(5);
        let y = Arc::clone(&x);
        let builder = Builder::default();
        assert_eq!(
            ByIdentity::hash_key(&builder, &x),
            ByIdentity::hash_key(&builder, &y)
        );
    }

    #[test]
    fn references_use_referent_address() {
        let values = [1, 1];
        let first = &values[0];
        let second = &values[1];
        assert!(!ByIdentity::key_eq(&first, &second));
        assert!(ByIdentity::key_eq(&first, &&values[0]));
    }
}
