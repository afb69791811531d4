use crate::error::{Result, TupsError};
use crate::tuplist::TupList;
use indexmap::IndexSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Index, RangeBounds};

/// An ordered sequence of distinct values with a value to position index.
///
/// Useful for ordered axes such as a list of periods: `ord` gives the
/// position of a value, `next`/`prev` step along the axis and `dist` counts
/// the steps between two values.
///
/// # Examples
///
/// ```
/// use sovran_tups::OrderSet;
///
/// let months = OrderSet::from_list(["2019-01", "2019-02", "2019-03", "2019-04"])?;
/// assert_eq!(months.ord(&"2019-03")?, 2);
/// assert_eq!(*months.next(&"2019-01", 2)?, "2019-03");
/// assert_eq!(months.dist(&"2019-01", &"2019-04")?, 3);
/// # Ok::<(), sovran_tups::TupsError>(())
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "T: serde::Serialize",
            deserialize = "T: serde::Deserialize<'de> + Eq + Hash"
        )
    )
)]
pub struct OrderSet<T> {
    items: IndexSet<T>,
}

impl<T> OrderSet<T>
where
    T: Hash + Eq,
{
    /// Creates a new, empty OrderSet
    pub fn new() -> Self {
        Self {
            items: IndexSet::new(),
        }
    }

    /// Builds a set from `values`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::DuplicateValue` if a value repeats
    pub fn from_list<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Debug,
    {
        let mut out = Self::new();
        for value in values {
            out.append(value)?;
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get_index(pos)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Position of `value`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if the value is not in the set
    pub fn ord(&self, value: &T) -> Result<usize>
    where
        T: Debug,
    {
        self.items
            .get_index_of(value)
            .ok_or_else(|| TupsError::KeyNotFound(format!("{:?}", value)))
    }

    /// The value `steps` positions after `value`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if `value` is missing and
    /// `TupsError::ShapeMismatch` if the step lands past the end
    pub fn next(&self, value: &T, steps: usize) -> Result<&T>
    where
        T: Debug,
    {
        let target = self.ord(value)?.saturating_add(steps);
        self.items
            .get_index(target)
            .ok_or_else(|| TupsError::shape("OrderSet::next", target.saturating_add(1), self.len()))
    }

    /// The value `steps` positions before `value`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if `value` is missing and
    /// `TupsError::ShapeMismatch` if the step lands before the start
    pub fn prev(&self, value: &T, steps: usize) -> Result<&T>
    where
        T: Debug,
    {
        let pos = self.ord(value)?;
        pos.checked_sub(steps)
            .and_then(|target| self.items.get_index(target))
            .ok_or_else(|| TupsError::shape("OrderSet::prev", steps, pos))
    }

    /// Signed number of steps from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if either value is missing
    pub fn dist(&self, from: &T, to: &T) -> Result<i64>
    where
        T: Debug,
    {
        Ok(self.ord(to)? as i64 - self.ord(from)? as i64)
    }

    /// Appends `value` in place.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::DuplicateValue` if the value is already present
    pub fn append(&mut self, value: T) -> Result<&mut Self>
    where
        T: Debug,
    {
        if self.items.contains(&value) {
            return Err(TupsError::DuplicateValue(format!("{:?}", value)));
        }
        self.items.insert(value);
        Ok(self)
    }

    /// Replaces the value at `pos` in place; the other positions are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if `pos` is out of range and
    /// `TupsError::DuplicateValue` if `value` sits at another position
    pub fn set(&mut self, pos: usize, value: T) -> Result<&mut Self>
    where
        T: Debug,
    {
        if pos >= self.len() {
            return Err(TupsError::shape("OrderSet::set", pos + 1, self.len()));
        }
        match self.items.get_index_of(&value) {
            Some(existing) if existing == pos => {}
            Some(_) => return Err(TupsError::DuplicateValue(format!("{:?}", value))),
            None => {
                // the new value goes last, then swaps into `pos`
                self.items.insert(value);
                self.items.swap_remove_index(pos);
            }
        }
        Ok(self)
    }

    /// Removes and returns the value at `pos`, shifting later values down.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if `pos` is out of range
    pub fn remove(&mut self, pos: usize) -> Result<T> {
        let len = self.len();
        self.items
            .shift_remove_index(pos)
            .ok_or_else(|| TupsError::shape("OrderSet::remove", pos + 1, len))
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn to_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }

    /// The values in `range` as a [`TupList`], clamped like
    /// [`TupList::slice`].
    pub fn slice<R>(&self, range: R) -> TupList<T>
    where
        R: RangeBounds<usize>,
        T: Clone,
    {
        self.iter().cloned().collect::<TupList<T>>().slice(range)
    }
}

impl<T> Default for OrderSet<T>
where
    T: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Order matters: `[a, b]` and `[b, a]` are different sets.
impl<T> PartialEq for OrderSet<T>
where
    T: Hash + Eq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items.iter().eq(other.items.iter())
    }
}

impl<T> Eq for OrderSet<T> where T: Hash + Eq {}

impl<T> Index<usize> for OrderSet<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos` is out of range; use [`OrderSet::get`] instead.
    fn index(&self, pos: usize) -> &T {
        &self.items[pos]
    }
}

/// Repeated values keep their first position.
impl<T> FromIterator<T> for OrderSet<T>
where
    T: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for OrderSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
