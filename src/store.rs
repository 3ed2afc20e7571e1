//! Insertion-ordered, string-keyed containers backing every level of the IR.

use indexmap::IndexMap;

/// Ordered map from name to entity.
///
/// Iteration follows insertion order, which lowering keeps equal to source order.
/// Mutation is crate-private: once an [`Ir`](crate::Ir) is built, callers only
/// ever see read-only views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    inner: IndexMap<String, V>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts under a fresh key. An occupied key is left untouched and the
    /// rejected value is handed back.
    pub(crate) fn insert_new(&mut self, key: String, value: V) -> Result<usize, V> {
        match self.inner.entry(key) {
            indexmap::map::Entry::Occupied(_) => Err(value),
            indexmap::map::Entry::Vacant(slot) => {
                let index = slot.index();
                slot.insert(value);
                Ok(index)
            }
        }
    }

    /// Inserts or overwrites; an overwritten entry keeps its original position.
    pub(crate) fn replace(&mut self, key: String, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.inner.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&str, &V)> {
        self.inner.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.inner.get_index_of(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn first(&self) -> Option<(&str, &V)> {
        self.get_index(0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion_order() {
        let mut m = OrderedMap::new();
        for k in ["zeta", "alpha", "mid"] {
            m.insert_new(k.to_string(), k.len()).unwrap();
        }
        assert_eq!(m.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(m.index_of("alpha"), Some(1));
        assert_eq!(m.first(), Some(("zeta", &4)));
    }

    #[test]
    fn insert_new_rejects_duplicates() {
        let mut m = OrderedMap::new();
        assert_eq!(m.insert_new("a".into(), 1), Ok(0));
        assert_eq!(m.insert_new("a".into(), 2), Err(2));
        assert_eq!(m.get("a"), Some(&1));
    }

    #[test]
    fn replace_keeps_position() {
        let mut m = OrderedMap::new();
        m.insert_new("a".into(), 1).unwrap();
        m.insert_new("b".into(), 2).unwrap();
        assert_eq!(m.replace("a".into(), 10), Some(1));
        assert_eq!(m.iter().collect::<Vec<_>>(), [("a", &10), ("b", &2)]);
    }
}
