use crate::error::{Result, TupsError};
use crate::traits::{Blank, Measure};
use crate::tuplist::TupList;
use crate::value::Value;
use indexmap::IndexMap;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Div, Index, Mul, Sub};

/// How strictly a bulk key operation treats keys the mapping does not hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Missing keys are skipped silently
    #[default]
    Lenient,
    /// Missing keys are an error
    Strict,
}

/// A key to value mapping with chainable transforms.
///
/// Keys keep their insertion order for iteration and display, but equality
/// ignores order. Methods that take `&self` return a new `SuperDict`; methods
/// that take `&mut self` edit in place and hand back `&mut Self` so calls can
/// keep chaining.
///
/// # Examples
///
/// ```
/// use sovran_tups::SuperDict;
///
/// let prices = SuperDict::from([("apple", 3), ("pear", 0), ("plum", 5)]);
///
/// let doubled = prices.vfilter(|v| *v > 0).apply(|v| v * 2);
/// assert_eq!(doubled, SuperDict::from([("apple", 6), ("plum", 10)]));
/// assert_eq!(doubled.keys_l(), vec!["apple", "plum"]);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "K: serde::Serialize, V: serde::Serialize",
            deserialize = "K: serde::Deserialize<'de> + Eq + Hash, V: serde::Deserialize<'de>"
        )
    )
)]
pub struct SuperDict<K, V> {
    items: IndexMap<K, V>,
}

impl<K, V> SuperDict<K, V>
where
    K: Hash + Eq,
{
    /// Creates a new, empty SuperDict
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: IndexMap::with_capacity(capacity),
        }
    }

    /// Wraps any collection of pairs. Wrapping is shallow: nested values are
    /// stored as they are.
    pub fn from_dict<I>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        data.into_iter().collect()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.contains_key(key)
    }

    /// Strict lookup.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if the key doesn't exist
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.items
            .get(key)
            .ok_or_else(|| TupsError::KeyNotFound(format!("{:?}", key)))
    }

    /// Strict mutable lookup.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if the key doesn't exist
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.items
            .get_mut(key)
            .ok_or_else(|| TupsError::KeyNotFound(format!("{:?}", key)))
    }

    /// Lenient lookup.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get(key)
    }

    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get_mut(key)
    }

    /// Stores a value in place, replacing any previous one under the same key.
    pub fn insert(&mut self, key: K, value: V) -> &mut Self {
        self.items.insert(key, value);
        self
    }

    /// Removes a key in place without disturbing the order of the others.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.shift_remove(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.items.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.items.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.items.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, K, V> {
        self.items.values_mut()
    }

    pub fn into_inner(self) -> IndexMap<K, V> {
        self.items
    }

    /// Merges `other` in place; its values win on key collisions.
    pub fn update<I>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.items.extend(other);
        self
    }

    /// Sets every key in `keys` to a clone of `value`, in place.
    pub fn set_m<I>(&mut self, keys: I, value: V) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        for key in keys {
            self.items.insert(key, value.clone());
        }
        self
    }

    /// Sets `keys[i]` to `values[i]`, in place.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if the counts differ. Nothing is
    /// written in that case.
    pub fn set_m_each<I, J>(&mut self, keys: I, values: J) -> Result<&mut Self>
    where
        I: IntoIterator<Item = K>,
        J: IntoIterator<Item = V>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        let values: Vec<V> = values.into_iter().collect();
        if keys.len() != values.len() {
            return Err(TupsError::shape("set_m", keys.len(), values.len()));
        }
        self.items.extend(keys.into_iter().zip(values));
        Ok(self)
    }
}

impl<K, V> SuperDict<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Returns a new mapping with every value replaced by `f(value)`.
    pub fn apply<U, F>(&self, mut f: F) -> SuperDict<K, U>
    where
        F: FnMut(&V) -> U,
    {
        self.iter().map(|(k, v)| (k.clone(), f(v))).collect()
    }

    /// Like [`apply`](Self::apply), with `args` handed to every call.
    ///
    /// ```
    /// use sovran_tups::SuperDict;
    ///
    /// let d = SuperDict::from([("a", 1), ("b", 2)]);
    /// let scaled = d.vapply(|v, (mul, add)| v * mul + add, &(10, 1));
    /// assert_eq!(scaled, SuperDict::from([("a", 11), ("b", 21)]));
    /// ```
    pub fn vapply<A, U, F>(&self, mut f: F, args: &A) -> SuperDict<K, U>
    where
        A: ?Sized,
        F: FnMut(&V, &A) -> U,
    {
        self.iter().map(|(k, v)| (k.clone(), f(v, args))).collect()
    }

    /// Fallible [`apply`](Self::apply). Stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::Apply` naming the key whose value failed
    pub fn try_apply<U, E, F>(&self, mut f: F) -> Result<SuperDict<K, U>>
    where
        K: Debug,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: FnMut(&V) -> std::result::Result<U, E>,
    {
        let mut out = SuperDict::with_capacity(self.len());
        for (key, value) in self.iter() {
            let mapped = f(value).map_err(|e| TupsError::Apply {
                key: format!("{:?}", key),
                source: e.into(),
            })?;
            out.items.insert(key.clone(), mapped);
        }
        Ok(out)
    }

    /// Values become `f(key)`.
    pub fn kapply<U, F>(&self, mut f: F) -> SuperDict<K, U>
    where
        F: FnMut(&K) -> U,
    {
        self.keys().map(|k| (k.clone(), f(k))).collect()
    }

    /// Values become `f(key, value)`.
    pub fn kvapply<U, F>(&self, mut f: F) -> SuperDict<K, U>
    where
        F: FnMut(&K, &V) -> U,
    {
        self.iter().map(|(k, v)| (k.clone(), f(k, v))).collect()
    }

    /// Rekeys the mapping. Keys that collide keep the last value.
    pub fn map_keys<K2, F>(&self, mut f: F) -> SuperDict<K2, V>
    where
        K2: Hash + Eq,
        V: Clone,
        F: FnMut(&K) -> K2,
    {
        self.iter().map(|(k, v)| (f(k), v.clone())).collect()
    }

    /// Left-join apply: `f(self[k], other[k])` for every key of `self`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if `other` lacks one of `self`'s keys
    pub fn sapply<W, U, F>(&self, other: &SuperDict<K, W>, mut f: F) -> Result<SuperDict<K, U>>
    where
        K: Debug,
        F: FnMut(&V, &W) -> U,
    {
        let mut out = SuperDict::with_capacity(self.len());
        for (key, value) in self.iter() {
            let rhs = other.get(key)?;
            out.items.insert(key.clone(), f(value, rhs));
        }
        Ok(out)
    }

    /// `f(value, scalar)` for every value.
    pub fn sapply_scalar<W, U, F>(&self, scalar: &W, f: F) -> SuperDict<K, U>
    where
        W: ?Sized,
        F: FnMut(&V, &W) -> U,
    {
        self.vapply(f, scalar)
    }
}

impl<K, V> SuperDict<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Keeps only `keys`. Keys the mapping does not hold are ignored; use
    /// [`filter_with`](Self::filter_with) for a strict projection. The result
    /// keeps this mapping's order.
    pub fn filter<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let wanted: HashSet<&K> = keys.into_iter().collect();
        self.kfilter(|k| wanted.contains(k))
    }

    /// [`filter`](Self::filter) with an explicit missing-key policy.
    ///
    /// # Errors
    ///
    /// With `KeyPolicy::Strict`, returns `TupsError::KeyNotFound` listing every
    /// requested key that is missing
    pub fn filter_with<'a, I>(&self, keys: I, policy: KeyPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a K>,
        K: Debug + 'a,
    {
        let wanted: Vec<&K> = keys.into_iter().collect();
        if policy == KeyPolicy::Strict {
            let missing: Vec<&K> = wanted
                .iter()
                .copied()
                .filter(|k| !self.contains_key(*k))
                .collect();
            if !missing.is_empty() {
                return Err(TupsError::KeyNotFound(format!("{:?}", missing)));
            }
        }
        Ok(self.filter(wanted))
    }

    /// Keeps entries whose value passes `pred`.
    pub fn vfilter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&V) -> bool,
    {
        self.kvfilter(|_, v| pred(v))
    }

    /// Keeps entries whose key passes `pred`.
    pub fn kfilter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&K) -> bool,
    {
        self.kvfilter(|k, _| pred(k))
    }

    pub fn kvfilter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter()
            .filter(|(k, v)| pred(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Drops keys whose value is blank (null, empty string, empty container).
    /// Order of the remaining keys is unchanged.
    pub fn clean(&self) -> Self
    where
        V: Blank,
    {
        self.clean_by(Blank::is_blank)
    }

    /// Drops keys whose value satisfies `pred`.
    pub fn clean_by<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&V) -> bool,
    {
        self.vfilter(|v| !pred(v))
    }

    /// Drops keys whose value equals `value`.
    pub fn clean_value(&self, value: &V) -> Self
    where
        V: PartialEq,
    {
        self.clean_by(|v| v == value)
    }

    /// Adds every key of `keys` that is missing, with a clone of `default`.
    /// Existing keys keep their values; new keys go at the end.
    pub fn fill_with_default<I>(&self, keys: I, default: V) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        self.fill_with(keys, |_| default.clone())
    }

    /// Like [`fill_with_default`](Self::fill_with_default), with the default
    /// computed per key.
    pub fn fill_with<I, F>(&self, keys: I, mut default: F) -> Self
    where
        I: IntoIterator<Item = K>,
        F: FnMut(&K) -> V,
    {
        let mut out = self.clone();
        for key in keys {
            if !out.items.contains_key(&key) {
                let value = default(&key);
                out.items.insert(key, value);
            }
        }
        out
    }

    /// Values for `keys` in the requested order, `default` for missing ones.
    pub fn get_m<'a, I>(&self, keys: I, default: V) -> Vec<V>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter()
            .map(|k| self.items.get(k).cloned().unwrap_or_else(|| default.clone()))
            .collect()
    }

    /// Strict [`get_m`](Self::get_m).
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` for the first missing key
    pub fn try_get_m<'a, I>(&self, keys: I) -> Result<Vec<V>>
    where
        I: IntoIterator<Item = &'a K>,
        K: Debug + 'a,
    {
        keys.into_iter().map(|k| self.get(k).cloned()).collect()
    }

    pub fn keys_l(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    pub fn values_l(&self) -> Vec<V> {
        self.values().cloned().collect()
    }

    pub fn keys_tl(&self) -> TupList<K> {
        self.keys().cloned().collect()
    }

    pub fn values_tl(&self) -> TupList<V> {
        self.values().cloned().collect()
    }

    pub fn items_tl(&self) -> TupList<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Copying [`update`](Self::update).
    pub fn updated<I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut out = self.clone();
        out.update(other);
        out
    }

    /// Reorders by key.
    pub fn sorted(&self, reverse: bool) -> Self
    where
        K: Ord,
    {
        self.sorted_by(|k1, _, k2, _| k1.cmp(k2), reverse)
    }

    /// Reorders by a sort key computed from each entry. The sort is stable.
    pub fn sorted_by_key<O, F>(&self, mut f: F, reverse: bool) -> Self
    where
        O: Ord,
        F: FnMut(&K, &V) -> O,
    {
        self.sorted_by(|k1, v1, k2, v2| f(k1, v1).cmp(&f(k2, v2)), reverse)
    }

    pub fn sorted_by<F>(&self, mut cmp: F, reverse: bool) -> Self
    where
        F: FnMut(&K, &V, &K, &V) -> Ordering,
    {
        let mut out = self.clone();
        out.items.sort_by(|k1, v1, k2, v2| {
            let ord = cmp(k1, v1, k2, v2);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        });
        out
    }

    /// Swaps keys and values. Values that repeat keep the last key.
    pub fn invert(&self) -> SuperDict<V, K>
    where
        V: Hash + Eq,
    {
        self.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
    }

    /// Length of every value.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::TypeMismatch` naming the first key whose value has
    /// no length
    pub fn to_lendict(&self) -> Result<SuperDict<K, usize>>
    where
        K: Debug,
        V: Measure,
    {
        let mut out = SuperDict::with_capacity(self.len());
        for (key, value) in self.iter() {
            let len = value.measure().ok_or_else(|| TupsError::TypeMismatch {
                key: format!("{:?}", key),
                reason: "value has no length".to_string(),
            })?;
            out.items.insert(key.clone(), len);
        }
        Ok(out)
    }

    /// Short rendering: the whole mapping when it has at most two entries,
    /// otherwise the first and last entries and the count.
    pub fn head(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        match (self.items.first(), self.items.last()) {
            (Some((first_k, first_v)), Some((last_k, last_v))) if self.len() > 2 => format!(
                "{{{:?}: {:?},\n...,\n{:?}: {:?}}}\n{} elements",
                first_k,
                first_v,
                last_k,
                last_v,
                self.len()
            ),
            _ => format!("{:?}", self.items),
        }
    }
}

impl<K, T> SuperDict<K, TupList<T>>
where
    K: Hash + Eq + Clone,
    T: Clone,
{
    /// Reverses the element order of every sequence value.
    pub fn list_reverse(&self) -> Self {
        self.apply(|list| list.iter().rev().cloned().collect())
    }

    /// Indexes by the sequence elements: every element maps to the keys whose
    /// sequence holds it. Elements appear in first-seen order.
    pub fn invert_lists(&self) -> SuperDict<T, TupList<K>>
    where
        T: Hash + Eq,
    {
        let mut out: SuperDict<T, TupList<K>> = SuperDict::new();
        for (key, list) in self.iter() {
            for el in list.iter() {
                out.items
                    .entry(el.clone())
                    .or_default()
                    .add(key.clone());
            }
        }
        out
    }
}

impl<K, P, W> SuperDict<K, SuperDict<P, W>>
where
    K: Hash + Eq + Clone,
    P: Hash + Eq + Clone,
    W: Clone,
{
    /// Picks `property` out of every inner mapping, skipping those without it.
    pub fn get_property(&self, property: &P) -> SuperDict<K, W> {
        self.iter()
            .filter_map(|(k, inner)| inner.items.get(property).map(|w| (k.clone(), w.clone())))
            .collect()
    }

    /// Groups the entries by the value of `property`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if an inner mapping lacks `property`
    pub fn index_by_property(&self, property: &P) -> Result<SuperDict<W, Self>>
    where
        P: Debug,
        W: Hash + Eq,
    {
        let mut out: SuperDict<W, Self> = SuperDict::new();
        for (key, inner) in self.iter() {
            let group = inner.get(property)?.clone();
            out.items
                .entry(group)
                .or_default()
                .items
                .insert(key.clone(), inner.clone());
        }
        Ok(out)
    }
}

impl<V> SuperDict<Value, V>
where
    V: Clone,
{
    /// Groups composite-keyed entries by the key field at `position`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if a key has no field at `position`
    pub fn index_by_part_of_tuple(&self, position: usize) -> Result<SuperDict<Value, Self>> {
        let mut out: SuperDict<Value, Self> = SuperDict::new();
        for (key, value) in self.iter() {
            let path = key.clone().into_path();
            let part = path
                .get(position)
                .cloned()
                .ok_or_else(|| TupsError::shape("index_by_part_of_tuple", position + 1, path.len()))?;
            out.items
                .entry(part)
                .or_default()
                .items
                .insert(key.clone(), value.clone());
        }
        Ok(out)
    }
}

impl<K, V> Default for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for SuperDict<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K, V> Eq for SuperDict<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, Q, V> Index<&Q> for SuperDict<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is missing; use [`SuperDict::get`] for a fallible lookup.
    fn index(&self, key: &Q) -> &V {
        &self.items[key]
    }
}

impl<K, V> FromIterator<(K, V)> for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<K, V> IntoIterator for SuperDict<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a SuperDict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<K, V> From<IndexMap<K, V>> for SuperDict<K, V> {
    fn from(items: IndexMap<K, V>) -> Self {
        Self { items }
    }
}

impl<K, V> From<HashMap<K, V>> for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn from(items: HashMap<K, V>) -> Self {
        items.into_iter().collect()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

// `&d op scalar` applies to every value. `&d op &other` is a left join on
// `d`'s keys and yields `Result`, failing with `KeyNotFound` when `other`
// lacks one of them.
macro_rules! impl_value_op {
    ($trait:ident, $method:ident) => {
        impl<K, V> $trait<V> for &SuperDict<K, V>
        where
            K: Hash + Eq + Clone,
            V: $trait<Output = V> + Clone,
        {
            type Output = SuperDict<K, V>;

            fn $method(self, rhs: V) -> SuperDict<K, V> {
                self.apply(|v| v.clone().$method(rhs.clone()))
            }
        }

        impl<K, V> $trait<&SuperDict<K, V>> for &SuperDict<K, V>
        where
            K: Hash + Eq + Clone + Debug,
            V: $trait<Output = V> + Clone,
        {
            type Output = Result<SuperDict<K, V>>;

            fn $method(self, rhs: &SuperDict<K, V>) -> Result<SuperDict<K, V>> {
                self.sapply(rhs, |l, r| l.clone().$method(r.clone()))
            }
        }
    };
}

impl_value_op!(Add, add);
impl_value_op!(Sub, sub);
impl_value_op!(Mul, mul);
impl_value_op!(Div, div);
