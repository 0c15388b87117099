use std::{borrow::Borrow, hash::Hash};

use indexmap::IndexMap;

/// Frequency counter that remembers the order in which keys were first seen.
///
/// Iteration yields `(key, count)` pairs in first-insertion order, which makes
/// tie-breaking between equally frequent keys deterministic.
///
/// # Examples
///
/// ```
/// use itemstat_stats::tally::Tally;
///
/// let mut tally = Tally::new();
/// for key in ["b", "a", "b", "c", "a"] {
///     tally.add(key.to_owned());
/// }
/// assert_eq!(tally.get("b"), 2);
/// assert_eq!(tally.get("z"), 0);
/// assert_eq!(tally.max_keys(), (vec![&"b".to_owned(), &"a".to_owned()], 2));
/// ```
#[derive(Debug, Clone)]
pub struct Tally<K> {
    counts: IndexMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::default(),
        }
    }
}

impl<K> Tally<K>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count of `key` by one.
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Returns the count of `key`, or `0` if it was never added.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.counts.iter().map(|(k, n)| (k, *n))
    }

    /// Returns every key tied for the highest count, in first-seen order,
    /// together with that count.
    ///
    /// An empty tally yields no keys and a count of `0`.
    #[must_use]
    pub fn max_keys(&self) -> (Vec<&K>, usize) {
        let max = self.counts.values().copied().max().unwrap_or(0);
        let keys = self
            .counts
            .iter()
            .filter(|(_, n)| **n == max && max > 0)
            .map(|(k, _)| k)
            .collect();
        (keys, max)
    }
}

impl<K> FromIterator<K> for Tally<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}
