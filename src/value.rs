use crate::tup::Tup;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single field of a record.
///
/// Records in a [`TupList`](crate::TupList) are heterogeneous (`("A", 1)`), so
/// each field is carried as a `Value`. The enum is closed, hashable and totally
/// ordered, which is what grouping, dedup and sorting need.
///
/// Floats compare by [`f64::total_cmp`] after folding `-0.0` into `0.0` and
/// every NaN into one canonical NaN, so `Float` keys hash and dedup like any
/// other. `Int(1)` and `Float(1.0)` are different values.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Missing value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// String value
    Str(String),

    /// A nested record, also used for composite keys
    Tup(Tup),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub const fn is_tup(&self) -> bool {
        matches!(self, Value::Tup(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tup(&self) -> Option<&Tup> {
        match self {
            Value::Tup(v) => Some(v),
            _ => None,
        }
    }

    /// Splits a composite key into its parts. A `Tup` yields its fields, any
    /// other value yields itself.
    pub fn into_path(self) -> Vec<Value> {
        match self {
            Value::Tup(tup) => tup.into_fields(),
            other => vec![other],
        }
    }

    /// Inverse of [`into_path`](Self::into_path): one part is returned bare,
    /// several are wrapped in a `Tup`.
    pub fn from_path(mut path: Vec<Value>) -> Value {
        if path.len() == 1 {
            path.remove(0)
        } else {
            Value::Tup(Tup::from(path))
        }
    }
}

fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl Value {
    /// Position of the variant in the sort order.
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::Str(_) => 4,
            Value::Tup(_) => 5,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Tup(a), Value::Tup(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Float(v) => canonical(*v).to_bits().hash(state),
            Value::Str(v) => v.hash(state),
            Value::Tup(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Tup(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(src: $ty) -> Value {
                    Value::Int(i64::from(src))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(src: f32) -> Value {
        Value::Float(f64::from(src))
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Value {
        Value::Float(src)
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Value {
        Value::Bool(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Value {
        Value::Str(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Value {
        Value::Str(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Value {
        Value::Str(src.clone())
    }
}

impl From<Tup> for Value {
    fn from(src: Tup) -> Value {
        Value::Tup(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Value {
        match src {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self == &Value::Float(*other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}
