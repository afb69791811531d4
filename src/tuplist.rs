use crate::error::{Result, TupsError};
use crate::traits::{Record, Spread};
use crate::tup::Tup;
use crate::value::Value;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Bound, Index, RangeBounds};

/// An ordered list of records with chainable transforms.
///
/// Order is significant: `first`/`last`, run compression and grouping all
/// follow it. Elements are not required to be unique and records are not
/// forced to share an arity, although positional operations expect them to.
///
/// Elements can be native tuples, [`Tup`] records, or anything else for the
/// operations that do not look inside an element.
///
/// # Examples
///
/// ```
/// use sovran_tups::TupList;
///
/// let mut tl = TupList::from(vec![("a", 1), ("b", 2), ("a", 1)]);
/// tl.add(("c", 3));
///
/// let big = tl.unique().filter(|(_, n)| *n > 1);
/// assert_eq!(big.to_list(), vec![("b", 2), ("c", 3)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TupList<T> {
    items: Vec<T>,
}

impl<T> TupList<T> {
    /// Creates a new, empty TupList
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Appends one element in place.
    pub fn add(&mut self, item: T) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Appends every element of `items` in place.
    pub fn add_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(items);
        self
    }

    /// Sorts in place.
    pub fn sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.items.sort();
        self
    }

    /// Returns a new list of `f(element)`. `f` may change the element shape.
    pub fn apply<U, F>(&self, f: F) -> TupList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// Like [`apply`](Self::apply), but `f` receives the fields of each
    /// tuple as separate arguments.
    ///
    /// ```
    /// use sovran_tups::TupList;
    ///
    /// let tl = TupList::from(vec![("a", 2), ("b", 3)]);
    /// let out = tl.vapply(|name: &str, n: i32| format!("{}{}", name, n * 10));
    /// assert_eq!(out.to_list(), vec!["a20".to_string(), "b30".to_string()]);
    /// ```
    pub fn vapply<R, F>(&self, mut f: F) -> TupList<R>
    where
        T: Spread<F, R>,
    {
        self.iter().map(|item| item.spread(&mut f)).collect()
    }

    /// `f(position, element)` for every element.
    pub fn kvapply<U, F>(&self, mut f: F) -> TupList<U>
    where
        F: FnMut(usize, &T) -> U,
    {
        self.iter().enumerate().map(|(i, item)| f(i, item)).collect()
    }
}

impl<T> TupList<T>
where
    T: Clone,
{
    /// Keeps elements that pass `pred`, in order.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|item| pred(item)).cloned().collect()
    }

    pub fn to_list(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Copies the elements in `range` into a new list. Bounds past the end are
    /// clamped, so an out-of-range slice is empty rather than a panic.
    pub fn slice<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);
        TupList::from(self.items[start.min(end)..end].to_vec())
    }

    /// Elements that also occur in `other`, each once, in this list's order.
    pub fn intersect(&self, other: &TupList<T>) -> Self
    where
        T: Hash + Eq,
    {
        let theirs: HashSet<&T> = other.iter().collect();
        self.iter()
            .filter(|item| theirs.contains(item))
            .cloned()
            .collect::<IndexSet<T>>()
            .into_iter()
            .collect()
    }

    /// Elements that do not occur in `other`, each once, in this list's order.
    pub fn set_diff(&self, other: &TupList<T>) -> Self
    where
        T: Hash + Eq,
    {
        let theirs: HashSet<&T> = other.iter().collect();
        self.iter()
            .filter(|item| !theirs.contains(item))
            .cloned()
            .collect::<IndexSet<T>>()
            .into_iter()
            .collect()
    }

    /// Drops repeated elements, keeping the first occurrence.
    pub fn unique(&self) -> Self
    where
        T: Hash + Eq,
    {
        self.to_set().into_iter().collect()
    }

    /// Drops elements whose `key` was already seen.
    pub fn unique_by<Q, F>(&self, mut key: F) -> Self
    where
        Q: Hash + Eq,
        F: FnMut(&T) -> Q,
    {
        let mut seen = HashSet::new();
        self.filter(|item| seen.insert(key(item)))
    }

    pub fn to_set(&self) -> IndexSet<T>
    where
        T: Hash + Eq,
    {
        self.iter().cloned().collect()
    }

    pub fn sorted(&self) -> Self
    where
        T: Ord,
    {
        let mut out = self.clone();
        out.sort();
        out
    }

    /// Stable sort by a key computed per element.
    pub fn sorted_by_key<O, F>(&self, mut f: F, reverse: bool) -> Self
    where
        O: Ord,
        F: FnMut(&T) -> O,
    {
        let mut out = self.clone();
        out.items.sort_by(|a, b| {
            let ord = f(a).cmp(&f(b));
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        });
        out
    }

    /// Short rendering: the whole list up to ten elements, otherwise the first
    /// five, the last five and the count.
    pub fn head(&self) -> String
    where
        T: Debug,
    {
        if self.len() <= 10 {
            return format!("{:?}", self.items);
        }
        let tail = &self.items[self.len() - 5..];
        format!(
            "[{:?},\n...,\n{:?}]\n({} elements)",
            &self.items[..5],
            tail,
            self.len()
        )
    }
}

impl<T> TupList<T>
where
    T: Record + Clone,
{
    /// Projects every record onto `positions`.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if a record is too short
    pub fn take(&self, positions: &[usize]) -> Result<TupList<Tup>> {
        self.iter()
            .map(|item| {
                positions
                    .iter()
                    .map(|&pos| field_at(item, pos, "take"))
                    .collect::<Result<Tup>>()
            })
            .collect()
    }

    /// The field at `pos` of every record.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if a record is too short
    pub fn take_one(&self, pos: usize) -> Result<TupList<Value>> {
        self.iter().map(|item| field_at(item, pos, "take")).collect()
    }

    /// Keeps records whose field at `positions[i]` equals `values[i]` for
    /// every `i`. A record too short to have one of the fields does not match.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if `positions` and `values` differ
    /// in length
    pub fn filter_list_f(&self, positions: &[usize], values: &[Value]) -> Result<Self> {
        if positions.len() != values.len() {
            return Err(TupsError::shape("filter_list_f", positions.len(), values.len()));
        }
        Ok(self.filter(|item| {
            positions
                .iter()
                .zip(values)
                .all(|(&pos, want)| item.field(pos).as_ref() == Some(want))
        }))
    }

    /// Drops records whose first `prefix` fields were already seen.
    pub fn unique2(&self, prefix: usize) -> Self {
        self.unique_by(|item| {
            (0..prefix.min(item.arity()))
                .filter_map(|pos| item.field(pos))
                .collect::<Vec<Value>>()
        })
    }

    /// One column per position.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if the records differ in arity
    pub fn to_columns(&self) -> Result<Vec<Vec<Value>>> {
        let arity = uniform_arity(self, "to_columns")?;
        let mut columns = vec![Vec::with_capacity(self.len()); arity];
        for item in self.iter() {
            for (pos, column) in columns.iter_mut().enumerate() {
                column.push(field_at(item, pos, "to_columns")?);
            }
        }
        Ok(columns)
    }
}

impl TupList<Tup> {
    /// Builds a list of [`Tup`] records from native tuples (or anything else
    /// convertible into a `Tup`).
    ///
    /// ```
    /// use sovran_tups::{tup, TupList};
    ///
    /// let tl = TupList::from_tuples(vec![("A", 1), ("B", 2)]);
    /// assert_eq!(tl[1], tup!["B", 2]);
    /// ```
    pub fn from_tuples<I, U>(items: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<Tup>,
    {
        items.into_iter().map(Into::into).collect()
    }
}

pub(crate) fn field_at<T: Record>(item: &T, pos: usize, context: &'static str) -> Result<Value> {
    item.field(pos)
        .ok_or_else(|| TupsError::shape(context, pos + 1, item.arity()))
}

/// Arity shared by every record, or zero for an empty list.
pub(crate) fn uniform_arity<T: Record>(list: &TupList<T>, context: &'static str) -> Result<usize> {
    let arity = list.first().map(Record::arity).unwrap_or(0);
    if let Some(odd) = list.iter().find(|item| item.arity() != arity) {
        return Err(TupsError::shape(context, arity, odd.arity()));
    }
    Ok(arity)
}

impl<T> Default for TupList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for TupList<T> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        &self.items[pos]
    }
}

impl<T> From<Vec<T>> for TupList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for TupList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for TupList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for TupList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TupList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tup;

    #[test]
    fn test_add_chains_in_place() {
        let mut tl = TupList::new();
        tl.add(("b", "t", "3", 5)).add(("c", "t", "4", 6));
        assert_eq!(tl.len(), 2);
        assert_eq!(tl[0], ("b", "t", "3", 5));
    }

    #[test]
    fn test_head() {
        let short: TupList<i32> = (0..3).collect();
        assert_eq!(short.head(), "[0, 1, 2]");

        let long: TupList<i32> = (0..12).collect();
        assert_eq!(
            long.head(),
            "[[0, 1, 2, 3, 4],\n...,\n[7, 8, 9, 10, 11]]\n(12 elements)"
        );
    }

    #[test]
    fn test_uniform_arity() {
        let tl = TupList::from(vec![tup!["a", 1], tup!["b"]]);
        let err = uniform_arity(&tl, "test").unwrap_err();
        assert!(err.is_shape_mismatch());
        assert_eq!(uniform_arity(&TupList::<Tup>::new(), "test").unwrap(), 0);
    }
}
