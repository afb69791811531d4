// src/traits.rs
//! Capability traits.
//!
//! Values stored in a [`SuperDict`] or [`TupList`] are generic. Operations that
//! need something from a value (positional fields, a length, an emptiness
//! notion, leaf rows) are bounded on one of these traits instead of probing
//! the value at runtime.

use crate::nested::Nested;
use crate::superdict::SuperDict;
use crate::tup::Tup;
use crate::tuplist::TupList;
use crate::value::Value;
use std::hash::Hash;

/// Positional access to the fields of a record.
pub trait Record {
    /// Number of fields.
    fn arity(&self) -> usize;

    /// The field at `pos`, or `None` past the end.
    fn field(&self, pos: usize) -> Option<Value>;

    /// Copies every field into an owned [`Tup`].
    fn to_tup(&self) -> Tup {
        (0..self.arity()).filter_map(|pos| self.field(pos)).collect()
    }
}

/// Calls a closure with the record unpacked into positional arguments.
///
/// Used by [`TupList::vapply`]; implemented for native tuples up to six fields.
pub trait Spread<F, R> {
    fn spread(&self, f: &mut F) -> R;
}

/// Leaf rows of a value, as produced by
/// [`SuperDict::to_tuplist`](crate::SuperDict::to_tuplist).
///
/// A scalar is one row with one field. A record is one row of its fields.
/// A sequence is one row per element. A mapping prefixes each of its values'
/// rows with the key's fields.
pub trait Flatten {
    fn rows(&self) -> Vec<Vec<Value>>;
}

/// Emptiness predicate used by [`SuperDict::clean`](crate::SuperDict::clean).
pub trait Blank {
    fn is_blank(&self) -> bool;
}

/// Length notion used by [`SuperDict::to_lendict`](crate::SuperDict::to_lendict).
///
/// `None` means the value has no length (an integer, say).
pub trait Measure {
    fn measure(&self) -> Option<usize>;
}

impl Record for Tup {
    fn arity(&self) -> usize {
        Tup::arity(self)
    }

    fn field(&self, pos: usize) -> Option<Value> {
        self.get(pos).cloned()
    }

    fn to_tup(&self) -> Tup {
        self.clone()
    }
}

macro_rules! impl_tuple {
    ($len:expr; $($name:ident $idx:tt),+) => {
        impl<$($name),+> Record for ($($name,)+)
        where
            $($name: Into<Value> + Clone),+
        {
            fn arity(&self) -> usize {
                $len
            }

            fn field(&self, pos: usize) -> Option<Value> {
                match pos {
                    $($idx => Some(self.$idx.clone().into()),)+
                    _ => None,
                }
            }
        }

        impl<$($name),+> From<($($name,)+)> for Tup
        where
            $($name: Into<Value>),+
        {
            fn from(src: ($($name,)+)) -> Tup {
                Tup::from(vec![$(src.$idx.into()),+])
            }
        }

        impl<$($name),+> Flatten for ($($name,)+)
        where
            $($name: Into<Value> + Clone),+
        {
            fn rows(&self) -> Vec<Vec<Value>> {
                vec![vec![$(self.$idx.clone().into()),+]]
            }
        }

        impl<Func, Ret, $($name),+> Spread<Func, Ret> for ($($name,)+)
        where
            Func: FnMut($($name),+) -> Ret,
            $($name: Clone),+
        {
            fn spread(&self, f: &mut Func) -> Ret {
                f($(self.$idx.clone()),+)
            }
        }
    };
}

impl_tuple!(1; A 0);
impl_tuple!(2; A 0, B 1);
impl_tuple!(3; A 0, B 1, C 2);
impl_tuple!(4; A 0, B 1, C 2, D 3);
impl_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);

macro_rules! impl_scalar {
    ($($ty:ty),*) => {
        $(
            impl Flatten for $ty {
                fn rows(&self) -> Vec<Vec<Value>> {
                    vec![vec![Value::from(self.clone())]]
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, String);

impl Flatten for &str {
    fn rows(&self) -> Vec<Vec<Value>> {
        vec![vec![Value::from(*self)]]
    }
}

impl Flatten for Value {
    fn rows(&self) -> Vec<Vec<Value>> {
        match self {
            Value::Tup(tup) => tup.rows(),
            other => vec![vec![other.clone()]],
        }
    }
}

impl Flatten for Tup {
    fn rows(&self) -> Vec<Vec<Value>> {
        vec![self.fields().to_vec()]
    }
}

impl<T: Flatten> Flatten for Vec<T> {
    fn rows(&self) -> Vec<Vec<Value>> {
        self.iter().flat_map(Flatten::rows).collect()
    }
}

impl<T: Flatten> Flatten for TupList<T> {
    fn rows(&self) -> Vec<Vec<Value>> {
        self.iter().flat_map(Flatten::rows).collect()
    }
}

impl<K, V> Flatten for SuperDict<K, V>
where
    K: Hash + Eq + Clone + Into<Value>,
    V: Flatten,
{
    fn rows(&self) -> Vec<Vec<Value>> {
        let mut rows = Vec::new();
        for (key, value) in self.iter() {
            let path = Into::<Value>::into(key.clone()).into_path();
            for row in value.rows() {
                let mut full = path.clone();
                full.extend(row);
                rows.push(full);
            }
        }
        rows
    }
}

impl<K, V> Flatten for Nested<K, V>
where
    K: Hash + Eq + Clone + Into<Value>,
    V: Flatten,
{
    fn rows(&self) -> Vec<Vec<Value>> {
        match self {
            Nested::Leaf(value) => value.rows(),
            Nested::Node(node) => node.rows(),
        }
    }
}

impl Blank for Value {
    fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            Value::Tup(t) => t.is_empty(),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => false,
        }
    }
}

impl Blank for Tup {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for &str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for TupList<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        match self {
            Some(inner) => inner.is_blank(),
            None => true,
        }
    }
}

impl<K, V> Blank for Nested<K, V>
where
    K: Hash + Eq,
    V: Blank,
{
    fn is_blank(&self) -> bool {
        match self {
            Nested::Leaf(value) => value.is_blank(),
            Nested::Node(node) => node.is_empty(),
        }
    }
}

impl Measure for Value {
    fn measure(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Tup(t) => Some(t.arity()),
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => None,
        }
    }
}

impl Measure for Tup {
    fn measure(&self) -> Option<usize> {
        Some(self.arity())
    }
}

impl Measure for String {
    fn measure(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measure for &str {
    fn measure(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl<T> Measure for Vec<T> {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Measure for TupList<T> {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<K, V> Measure for SuperDict<K, V>
where
    K: Hash + Eq,
{
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<K, V> Measure for Nested<K, V>
where
    K: Hash + Eq,
    V: Measure,
{
    fn measure(&self) -> Option<usize> {
        match self {
            Nested::Leaf(value) => value.measure(),
            Nested::Node(node) => Some(node.len()),
        }
    }
}
