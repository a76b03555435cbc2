use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// An immutable key/value pair whose identity is its key.
///
/// **Equality, ordering and hashing look at the key only.** Two pairs with
/// the same key and different values compare equal. This lets a priority
/// queue treat cost-tied entries interchangeably while the consumer still
/// recovers the distinct value through [`value`](Self::value).
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexKeyValuePair<K, V> {
    key: K,
    value: V,
}

impl<K, V> HexKeyValuePair<K, V> {
    /// Create a new pair.
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// The key (priority).
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The associated value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Split into `(key, value)`.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for HexKeyValuePair<K, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for HexKeyValuePair<K, V> {}

impl<K: PartialOrd, V> PartialOrd for HexKeyValuePair<K, V> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for HexKeyValuePair<K, V> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: Hash, V> Hash for HexKeyValuePair<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
