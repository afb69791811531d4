use thiserror::Error;

/// Errors raised by [`SuperDict`](crate::SuperDict) and
/// [`TupList`](crate::TupList) operations.
#[derive(Debug, Error)]
pub enum TupsError {
    /// A strict key lookup did not find the key(s)
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// An arity or count did not line up
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A nested path crosses an existing leaf, or a leaf lands on a node
    #[error("inconsistent nesting depth at key {key}")]
    InconsistentDepth { key: String },

    /// A value that must be unique is already present
    #[error("duplicate value: {0}")]
    DuplicateValue(String),

    /// The value does not support the requested operation
    #[error("type mismatch for key {key}: {reason}")]
    TypeMismatch { key: String, reason: String },

    /// A caller-supplied function failed while being applied to `key`
    #[error("apply failed for key {key}: {source}")]
    Apply {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TupsError {
    pub(crate) fn shape(context: &'static str, expected: usize, found: usize) -> Self {
        TupsError::ShapeMismatch {
            context,
            expected,
            found,
        }
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, TupsError::KeyNotFound(_))
    }

    /// Arity/count mismatches, including inconsistent nesting depth.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            TupsError::ShapeMismatch { .. } | TupsError::InconsistentDepth { .. }
        )
    }

    pub fn is_duplicate_value(&self) -> bool {
        matches!(self, TupsError::DuplicateValue(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TupsError::TypeMismatch { .. })
    }
}

pub type Result<T, E = TupsError> = std::result::Result<T, E>;
