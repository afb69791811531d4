use crate::error::{Result, TupsError};
use crate::superdict::SuperDict;
use std::fmt::Debug;
use std::hash::Hash;

/// A mapping whose depth is only known at runtime.
///
/// [`SuperDict::to_dictdict`] produces these from composite keys. A branch is
/// either a `Leaf` holding a value or a `Node` holding another level of keys.
#[derive(Debug, Clone)]
pub enum Nested<K, V> {
    Leaf(V),
    Node(SuperDict<K, Nested<K, V>>),
}

impl<K, V> Nested<K, V>
where
    K: Hash + Eq,
{
    pub fn leaf(value: V) -> Self {
        Nested::Leaf(value)
    }

    /// An empty node.
    pub fn node() -> Self {
        Nested::Node(SuperDict::new())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Nested::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Nested::Leaf(value) => Some(value),
            Nested::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&SuperDict<K, Nested<K, V>>> {
        match self {
            Nested::Node(node) => Some(node),
            Nested::Leaf(_) => None,
        }
    }

    /// Levels of keys below this point: 0 for a leaf, 1 for an empty node.
    pub fn depth(&self) -> usize {
        match self {
            Nested::Leaf(_) => 0,
            Nested::Node(node) => 1 + node.values().map(Nested::depth).max().unwrap_or(0),
        }
    }

    /// Follows `path` down from here.
    pub fn get_path(&self, path: &[K]) -> Option<&Nested<K, V>> {
        match path.split_first() {
            None => Some(self),
            Some(_) => match self {
                Nested::Node(node) => node.get_path(path),
                Nested::Leaf(_) => None,
            },
        }
    }

    /// Stores `value` at `path` in place, creating nodes on the way.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::InconsistentDepth` if the path runs through a leaf
    /// or ends on a node
    pub fn set_path(&mut self, path: &[K], value: V) -> Result<&mut Self>
    where
        K: Clone + Debug,
    {
        match self {
            Nested::Node(_) if path.is_empty() => {
                return Err(TupsError::InconsistentDepth {
                    key: format!("{:?}", path),
                })
            }
            Nested::Node(node) => {
                node.set_path(path, value)?;
            }
            Nested::Leaf(current) if path.is_empty() => *current = value,
            Nested::Leaf(_) => {
                return Err(TupsError::InconsistentDepth {
                    key: format!("{:?}", path),
                })
            }
        }
        Ok(self)
    }

    /// Deep merge in place. Two nodes merge key by key; anything else is
    /// replaced by `other`.
    pub fn merge(&mut self, other: Nested<K, V>) -> &mut Self {
        match other {
            Nested::Node(theirs) if !self.is_leaf() => {
                if let Nested::Node(mine) = self {
                    mine.merge(theirs);
                }
            }
            other => *self = other,
        }
        self
    }
}

impl<K, V> SuperDict<K, Nested<K, V>>
where
    K: Hash + Eq,
{
    /// Follows `path` through nested levels.
    pub fn get_path(&self, path: &[K]) -> Option<&Nested<K, V>> {
        let (head, rest) = path.split_first()?;
        self.lookup(head)?.get_path(rest)
    }

    /// Stores `value` at `path` in place, creating nodes on the way.
    ///
    /// # Errors
    ///
    /// Returns `TupsError::InconsistentDepth` if the path runs through a leaf
    /// or ends on a node, and `TupsError::ShapeMismatch` for an empty path
    pub fn set_path(&mut self, path: &[K], value: V) -> Result<&mut Self>
    where
        K: Clone + Debug,
    {
        let (head, rest) = path
            .split_first()
            .ok_or_else(|| TupsError::shape("set_path", 1, 0))?;
        if rest.is_empty() {
            if let Some(Nested::Node(_)) = self.lookup(head) {
                return Err(TupsError::InconsistentDepth {
                    key: format!("{:?}", head),
                });
            }
            self.insert(head.clone(), Nested::Leaf(value));
            return Ok(self);
        }
        if !self.contains_key(head) {
            self.insert(head.clone(), Nested::node());
        }
        match self.get_mut(head)? {
            Nested::Node(child) => {
                child.set_path(rest, value).map_err(|_| TupsError::InconsistentDepth {
                    key: format!("{:?}", path),
                })?;
            }
            Nested::Leaf(_) => {
                return Err(TupsError::InconsistentDepth {
                    key: format!("{:?}", head),
                })
            }
        }
        Ok(self)
    }

    /// Deep merge in place, `other` winning on leaf collisions.
    pub fn merge(&mut self, other: SuperDict<K, Nested<K, V>>) -> &mut Self {
        for (key, theirs) in other {
            match self.lookup_mut(&key) {
                Some(mine) => {
                    mine.merge(theirs);
                }
                None => {
                    self.insert(key, theirs);
                }
            }
        }
        self
    }
}

impl<K, V> PartialEq for Nested<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Nested::Leaf(a), Nested::Leaf(b)) => a == b,
            (Nested::Node(a), Nested::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl<K, V> From<V> for Nested<K, V> {
    fn from(value: V) -> Self {
        Nested::Leaf(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_path() -> Result<()> {
        let mut root: SuperDict<&str, Nested<&str, i32>> = SuperDict::new();
        root.set_path(&["a", "b", "c"], 1)?;
        root.set_path(&["a", "d"], 2)?;

        assert_eq!(root.get_path(&["a", "b", "c"]), Some(&Nested::Leaf(1)));
        assert_eq!(root.get_path(&["a", "d"]).and_then(Nested::as_leaf), Some(&2));
        assert_eq!(root.get_path(&["a", "x"]), None);
        assert_eq!(root.get_path(&["a"]).map(Nested::depth), Some(2));
        Ok(())
    }

    #[test]
    fn test_set_path_depth_conflicts() -> Result<()> {
        let mut root: SuperDict<&str, Nested<&str, i32>> = SuperDict::new();
        root.set_path(&["a", "b"], 1)?;

        // through a leaf
        let err = root.set_path(&["a", "b", "c"], 2).unwrap_err();
        assert!(err.is_shape_mismatch());

        // onto a node
        let err = root.set_path(&["a"], 3).unwrap_err();
        assert!(err.is_shape_mismatch());

        // overwriting a leaf at the same depth is fine
        root.set_path(&["a", "b"], 4)?;
        assert_eq!(root.get_path(&["a", "b"]), Some(&Nested::Leaf(4)));
        Ok(())
    }

    #[test]
    fn test_set_path_on_a_single_branch() -> Result<()> {
        let mut tree: Nested<&str, i32> = Nested::node();
        tree.set_path(&["a"], 1)?;
        assert_eq!(tree.get_path(&["a"]), Some(&Nested::Leaf(1)));

        // an empty path ends on the node itself
        let err = tree.set_path(&[], 2).unwrap_err();
        assert!(matches!(err, TupsError::InconsistentDepth { .. }));

        let mut leaf: Nested<&str, i32> = Nested::leaf(1);
        leaf.set_path(&[], 5)?;
        assert_eq!(leaf, Nested::Leaf(5));
        Ok(())
    }

    #[test]
    fn test_merge() -> Result<()> {
        let mut mine: SuperDict<&str, Nested<&str, i32>> = SuperDict::new();
        mine.set_path(&["a", "x"], 1)?.set_path(&["b"], 2)?;

        let mut theirs: SuperDict<&str, Nested<&str, i32>> = SuperDict::new();
        theirs.set_path(&["a", "y"], 3)?.set_path(&["b"], 4)?;

        mine.merge(theirs);
        assert_eq!(mine.get_path(&["a", "x"]), Some(&Nested::Leaf(1)));
        assert_eq!(mine.get_path(&["a", "y"]), Some(&Nested::Leaf(3)));
        assert_eq!(mine.get_path(&["b"]), Some(&Nested::Leaf(4)));
        Ok(())
    }
}
