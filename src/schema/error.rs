use arrow::datatypes::DataType;

/// Error returned when a key schema cannot be resolved, or a key does not fit one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Referenced field by name was not found in the schema.
    #[error("no such field in schema: {name}")]
    NoSuchField {
        /// The missing field name.
        name: String,
    },
    /// A column was declared more than once in the key.
    #[error("duplicate key column: {name}")]
    DuplicateKeyColumn {
        /// The repeated column name.
        name: String,
    },
    /// A key column has a type that cannot participate in a row key.
    #[error("unsupported data type for key column {name}: {data_type:?}")]
    UnsupportedType {
        /// Name of the offending column.
        name: String,
        /// The Arrow data type that is not supported.
        data_type: DataType,
    },
    /// The key declaration stored in schema metadata could not be parsed.
    #[error("invalid key metadata {value:?}: {reason}")]
    InvalidKeyMetadata {
        /// Raw metadata value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// A key carries a different number of components than its schema.
    #[error("key arity mismatch: expected {expected} components, got {actual}")]
    ArityMismatch {
        /// Number of key columns in the schema.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },
    /// A key component does not match its column type.
    #[error("unexpected component type for column {col}: expected {expected:?}, got {actual:?}")]
    ComponentType {
        /// Column index with the mismatch.
        col: usize,
        /// Column data type.
        expected: DataType,
        /// Component data type.
        actual: DataType,
    },
    /// Column index is outside the key's range.
    #[error("column index {0} out of bounds (num_columns={1})")]
    ColumnOutOfBounds(usize, usize),
    /// A key without components has no schema.
    #[error("row key has no components")]
    EmptyKey,
    /// Two key schemas differ in column layout.
    #[error("incompatible key schemas: expected {expected:?}, got {actual:?}")]
    Incompatible {
        /// Column types of the schema being matched against.
        expected: Vec<DataType>,
        /// Column types of the schema under test.
        actual: Vec<DataType>,
    },
}
