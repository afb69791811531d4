use crate::error::{Result, TupsError};
use crate::value::Value;
use std::fmt;
use std::ops::Index;

/// An owned, fixed-arity record of [`Value`] fields.
///
/// `Tup` is what positional operations on a [`TupList`](crate::TupList)
/// produce (`take`, `to_start_finish`, `to_tuplist`) and what composite
/// mapping keys are made of. Build one with the [`tup!`](crate::tup) macro or
/// from a native tuple:
///
/// ```
/// use sovran_tups::{tup, Tup, Value};
///
/// let a = tup!["A", 1];
/// let b = Tup::from(("A", 1));
/// assert_eq!(a, b);
/// assert_eq!(a.get(1), Some(&Value::Int(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tup(Vec<Value>);

/// Builds a [`Tup`] from any list of `Into<Value>` expressions.
#[macro_export]
macro_rules! tup {
    () => {
        $crate::Tup::new()
    };
    ($($field:expr),+ $(,)?) => {
        $crate::Tup::from(vec![$($crate::Value::from($field)),+])
    };
}

impl Tup {
    pub fn new() -> Self {
        Tup(Vec::new())
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Value> {
        self.0.get(pos)
    }

    pub fn fields(&self) -> &[Value] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<Value> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Appends a field in place.
    pub fn push(&mut self, field: impl Into<Value>) -> &mut Self {
        self.0.push(field.into());
        self
    }

    /// Returns a new record with `other`'s fields after this one's.
    pub fn concat(&self, other: &Tup) -> Tup {
        let mut fields = self.0.clone();
        fields.extend(other.0.iter().cloned());
        Tup(fields)
    }

    /// Picks the fields at `positions`, in that order.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::ShapeMismatch` if a position is past the end.
    pub fn project(&self, positions: &[usize]) -> Result<Tup> {
        positions
            .iter()
            .map(|&pos| {
                self.0
                    .get(pos)
                    .cloned()
                    .ok_or_else(|| TupsError::shape("tuple projection", pos + 1, self.arity()))
            })
            .collect()
    }
}

impl Index<usize> for Tup {
    type Output = Value;

    fn index(&self, pos: usize) -> &Value {
        &self.0[pos]
    }
}

impl From<Vec<Value>> for Tup {
    fn from(fields: Vec<Value>) -> Self {
        Tup(fields)
    }
}

impl FromIterator<Value> for Tup {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Tup(iter.into_iter().collect())
    }
}

impl IntoIterator for Tup {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tup {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project() -> Result<()> {
        let t = tup!["a", "b", "c", 1];
        assert_eq!(t.project(&[3, 0])?, tup![1, "a"]);
        assert!(t.project(&[4]).unwrap_err().is_shape_mismatch());
        Ok(())
    }

    #[test]
    fn test_push_and_concat() {
        let mut t = tup!["a"];
        t.push(1).push("z");
        assert_eq!(t, tup!["a", 1, "z"]);
        assert_eq!(t.concat(&tup![true]), tup!["a", 1, "z", true]);
        assert_eq!(tup![1].to_string(), "(1,)");
        assert_eq!(tup![].arity(), 0);
    }
}
