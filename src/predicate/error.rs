use crate::schema::SchemaError;

/// Errors surfaced while building or mutating a [`KeyPredicate`](crate::KeyPredicate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    /// The requested key type is not one of the supported primitive key types.
    #[error("unsupported key type: {key_type}")]
    UnsupportedKeyType {
        /// Description of the rejected type.
        key_type: String,
    },
    /// The supplied schema declares no row key.
    #[error("row key does not exist on schema for key predicate")]
    KeyNotFound,
    /// Range and distinct conditions were mixed.
    #[error("condition conflict: {0}")]
    ConditionConflict(&'static str),
    /// A range bound was supplied for a key type that does not allow ranges.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// The value's runtime type differs from the predicate's key type.
    #[error("row key type unmatched: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Expected native type name.
        expected: &'static str,
        /// Supplied value's type name.
        actual: &'static str,
    },
    /// A row key's own schema does not fit the predicate's key schema.
    #[error("row key schema unmatched: {source}")]
    SchemaMismatch {
        /// Underlying resolution or compatibility failure.
        #[source]
        source: SchemaError,
    },
    /// A required value was `Null`.
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    /// The operation is not valid for this predicate's key shape.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
    /// The container schema could not be resolved.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}
