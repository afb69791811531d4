//! Conversions between the two container shapes.
//!
//! A mapping flattens into a list of rows with [`SuperDict::to_tuplist`]; a
//! list of records pivots back into a mapping with [`TupList::to_dict`] and
//! friends. Composite keys move between the flat `Tup`-keyed form and the
//! nested form with [`SuperDict::to_dictdict`] and [`SuperDict::to_dictup`].

use crate::error::{Result, TupsError};
use crate::nested::Nested;
use crate::superdict::SuperDict;
use crate::traits::{Flatten, Record};
use crate::tup::Tup;
use crate::tuplist::{field_at, uniform_arity, TupList};
use crate::value::Value;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Which record positions form the key and which form the value of a pivot.
///
/// When `indices` is `None` the key is every position not in `result`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pivot {
    pub indices: Option<Vec<usize>>,
    pub result: Vec<usize>,
}

impl Pivot {
    /// Pivot on `result`, keyed by the remaining positions.
    pub fn result(result: &[usize]) -> Self {
        Pivot {
            indices: None,
            result: result.to_vec(),
        }
    }

    /// Pivot on `result`, keyed by `indices` only.
    pub fn new(indices: &[usize], result: &[usize]) -> Self {
        Pivot {
            indices: Some(indices.to_vec()),
            result: result.to_vec(),
        }
    }

    /// Key and value positions for records of `arity` fields.
    fn resolve(&self, arity: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        if let Some(&pos) = self.result.iter().find(|&&pos| pos >= arity) {
            return Err(TupsError::shape("to_dict result column", pos + 1, arity));
        }
        let indices = match &self.indices {
            Some(indices) => {
                if let Some(&pos) = indices.iter().find(|&&pos| pos >= arity) {
                    return Err(TupsError::shape("to_dict key column", pos + 1, arity));
                }
                indices.clone()
            }
            None => (0..arity).filter(|pos| !self.result.contains(pos)).collect(),
        };
        if indices.is_empty() {
            return Err(TupsError::shape("to_dict key columns", 1, 0));
        }
        if self.result.is_empty() {
            return Err(TupsError::shape("to_dict result columns", 1, 0));
        }
        Ok((indices, self.result.clone()))
    }
}

fn project<T: Record>(item: &T, positions: &[usize]) -> Result<Value> {
    let fields = positions
        .iter()
        .map(|&pos| field_at(item, pos, "to_dict"))
        .collect::<Result<Vec<Value>>>()?;
    Ok(Value::from_path(fields))
}

impl<T> TupList<T>
where
    T: Record + Clone,
{
    /// Pivots into a mapping keyed by every position not in `result_col`.
    ///
    /// Keys and values with a single position are bare values, otherwise they
    /// are `Value::Tup`. Later records overwrite earlier ones with the same
    /// key; use [`to_dict_list`](Self::to_dict_list) to keep them all.
    ///
    /// ```
    /// use sovran_tups::{tup, TupList, Value};
    ///
    /// let tl = TupList::from(vec![("g1", "x", 1), ("g1", "y", 2), ("g2", "x", 3)]);
    /// let d = tl.to_dict(&[2])?;
    /// assert_eq!(d[&Value::from(tup!["g1", "y"])], Value::Int(2));
    /// # Ok::<(), sovran_tups::TupsError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if records differ in arity, a column
    /// is out of range, or no key column remains
    pub fn to_dict(&self, result_col: &[usize]) -> Result<SuperDict<Value, Value>> {
        self.pivot(&Pivot::result(result_col))
    }

    /// Groups into a mapping whose values list every matching record's
    /// `result_col` fields, in input order.
    ///
    /// # Errors
    ///
    /// Same as [`to_dict`](Self::to_dict)
    pub fn to_dict_list(&self, result_col: &[usize]) -> Result<SuperDict<Value, TupList<Value>>> {
        self.pivot_list(&Pivot::result(result_col))
    }

    /// Scalar pivot with explicit key positions.
    ///
    /// # Errors
    ///
    /// Same as [`to_dict`](Self::to_dict)
    pub fn pivot(&self, pivot: &Pivot) -> Result<SuperDict<Value, Value>> {
        let arity = uniform_arity(self, "to_dict")?;
        let mut out = SuperDict::with_capacity(self.len());
        if self.is_empty() {
            return Ok(out);
        }
        let (indices, result) = pivot.resolve(arity)?;
        for item in self.iter() {
            out.insert(project(item, &indices)?, project(item, &result)?);
        }
        debug!(rows = self.len(), keys = out.len(), "pivoted tuple list");
        Ok(out)
    }

    /// Grouping pivot with explicit key positions.
    ///
    /// # Errors
    ///
    /// Same as [`to_dict`](Self::to_dict)
    pub fn pivot_list(&self, pivot: &Pivot) -> Result<SuperDict<Value, TupList<Value>>> {
        let arity = uniform_arity(self, "to_dict")?;
        let mut out: SuperDict<Value, TupList<Value>> = SuperDict::new();
        if self.is_empty() {
            return Ok(out);
        }
        let (indices, result) = pivot.resolve(arity)?;
        for item in self.iter() {
            let key = project(item, &indices)?;
            let value = project(item, &result)?;
            match out.lookup_mut(&key) {
                Some(group) => {
                    group.add(value);
                }
                None => {
                    out.insert(key, TupList::from(vec![value]));
                }
            }
        }
        debug!(rows = self.len(), groups = out.len(), "grouped tuple list");
        Ok(out)
    }

    /// Keys every record by `indices`, keeping the whole record as the value.
    /// Later records overwrite earlier ones with the same key.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if a record is too short or
    /// `indices` is empty
    pub fn index_by(&self, indices: &[usize]) -> Result<SuperDict<Value, T>> {
        if indices.is_empty() {
            return Err(TupsError::shape("index_by key columns", 1, 0));
        }
        let mut out = SuperDict::with_capacity(self.len());
        for item in self.iter() {
            out.insert(project(item, indices)?, item.clone());
        }
        Ok(out)
    }
}

impl<K, V> SuperDict<K, V>
where
    K: Hash + Eq + Clone + Into<Value>,
    V: Flatten,
{
    /// Flattens into one row per leaf: the key's fields followed by the leaf.
    ///
    /// Composite (`Tup`) keys and values spread into several fields, sequence
    /// values produce one row per element, and nested mappings prefix their
    /// own keys. Rows follow iteration order at every level.
    ///
    /// ```
    /// use sovran_tups::{tup, SuperDict};
    ///
    /// let d = SuperDict::from([("a", SuperDict::from([("x", 1), ("y", 2)]))]);
    /// assert_eq!(d.to_tuplist().to_list(), vec![tup!["a", "x", 1], tup!["a", "y", 2]]);
    /// ```
    pub fn to_tuplist(&self) -> TupList<Tup> {
        let rows: TupList<Tup> = self.rows().into_iter().map(Tup::from).collect();
        debug!(keys = self.len(), rows = rows.len(), "flattened mapping");
        rows
    }
}

impl<V> SuperDict<Value, V>
where
    V: Clone,
{
    /// Expands composite keys into nested levels: `{("a", "b"): 1}` becomes
    /// `{"a": {"b": 1}}`. Scalar keys stay at the top level.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::InconsistentDepth` if one key is a prefix of
    /// another, and `TupsError::ShapeMismatch` for an empty composite key
    pub fn to_dictdict(&self) -> Result<SuperDict<Value, Nested<Value, V>>> {
        let mut out = SuperDict::new();
        for (key, value) in self.iter() {
            out.set_path(&key.clone().into_path(), value.clone())?;
        }
        debug!(keys = self.len(), top = out.len(), "nested mapping");
        Ok(out)
    }
}

impl<V> SuperDict<Value, Nested<Value, V>>
where
    V: Clone,
{
    /// Collapses nested levels into composite keys, the inverse of
    /// [`to_dictdict`](SuperDict::to_dictdict). Paths of one key stay bare.
    /// Empty nodes hold no leaves and disappear.
    pub fn to_dictup(&self) -> SuperDict<Value, V> {
        fn walk<V: Clone>(
            prefix: &mut Vec<Value>,
            node: &SuperDict<Value, Nested<Value, V>>,
            out: &mut SuperDict<Value, V>,
        ) {
            for (key, child) in node.iter() {
                prefix.push(key.clone());
                match child {
                    Nested::Leaf(value) => {
                        out.insert(Value::from_path(prefix.clone()), value.clone());
                    }
                    Nested::Node(inner) => walk(prefix, inner, out),
                }
                prefix.pop();
            }
        }

        let mut out = SuperDict::new();
        walk(&mut Vec::new(), self, &mut out);
        out
    }
}

impl<K, F, W> SuperDict<K, SuperDict<F, W>>
where
    K: Hash + Eq + Clone,
    F: Hash + Eq + Debug,
    W: Clone + Into<Value>,
{
    /// Narrows every inner mapping to a record of the `fields` values.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::KeyNotFound` if an inner mapping lacks a field
    pub fn dicts_to_tup(&self, fields: &[F]) -> Result<SuperDict<K, Tup>> {
        let mut out = SuperDict::with_capacity(self.len());
        for (key, inner) in self.iter() {
            let tup = fields
                .iter()
                .map(|field| inner.get(field).map(|w| w.clone().into()))
                .collect::<Result<Tup>>()?;
            out.insert(key.clone(), tup);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tup;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pivot_resolve() -> Result<()> {
        assert_eq!(Pivot::result(&[3]).resolve(4)?, (vec![0, 1, 2], vec![3]));
        assert_eq!(Pivot::new(&[0], &[2]).resolve(4)?, (vec![0], vec![2]));
        assert!(Pivot::result(&[4]).resolve(4).unwrap_err().is_shape_mismatch());
        assert!(Pivot::result(&[0, 1]).resolve(2).unwrap_err().is_shape_mismatch());
        assert!(Pivot::result(&[]).resolve(2).unwrap_err().is_shape_mismatch());
        Ok(())
    }

    #[test]
    fn test_index_by() -> Result<()> {
        let tl = TupList::from(vec![("Alex", 1980), ("Chloe", 1995)]);
        let by_name = tl.index_by(&[0])?;
        assert_eq!(by_name[&Value::from("Chloe")], ("Chloe", 1995));
        Ok(())
    }

    #[test]
    fn test_dictup_of_depth_one_is_bare() {
        let d: SuperDict<Value, i32> = SuperDict::from([(Value::from("c"), 1)]);
        let nested = d.to_dictdict().unwrap();
        assert_eq!(nested.to_dictup(), d);
        assert_eq!(nested[&Value::from("c")], Nested::Leaf(1));
    }

    #[test]
    fn test_empty_composite_key() {
        let d: SuperDict<Value, i32> = SuperDict::from([(Value::from(tup![]), 1)]);
        assert!(d.to_dictdict().unwrap_err().is_shape_mismatch());
    }
}
