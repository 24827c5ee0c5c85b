//! Key value types accepted by [`KeyPredicate`](crate::KeyPredicate).
//!
//! Single-column keys are carried by [`KeyValue`] directly. Composite keys are
//! [`RowKey`] values that describe their own column layout, so they can be
//! matched against a predicate's key schema before they are accepted.
//! [`Timestamp`] and [`RowKey`] are mutable in place; predicates copy them on
//! the way in and on the way out.

mod row;
mod timestamp;

use std::{
    any::{type_name, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

use arrow::datatypes::{DataType, TimeUnit};
pub use row::{KeyComponent, RowKey};
pub use timestamp::Timestamp;

/// Primitive types that may form a single-column row key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// UTF-8 text, stored as Arrow `Utf8`.
    String,
    /// 32-bit signed integer, stored as Arrow `Int32`.
    Integer,
    /// 64-bit signed integer, stored as Arrow `Int64`.
    Long,
    /// Millisecond instant, stored as Arrow `Timestamp(Millisecond, None)`.
    Timestamp,
}

impl KeyType {
    /// Every supported key type, in registry order.
    pub const ALL: [KeyType; 4] = [
        KeyType::String,
        KeyType::Integer,
        KeyType::Long,
        KeyType::Timestamp,
    ];

    /// Arrow data type used for a key column of this type.
    pub fn data_type(self) -> DataType {
        match self {
            KeyType::String => DataType::Utf8,
            KeyType::Integer => DataType::Int32,
            KeyType::Long => DataType::Int64,
            KeyType::Timestamp => DataType::Timestamp(TimeUnit::Millisecond, None),
        }
    }

    /// Map an Arrow data type back to a key type, if it is one.
    pub fn from_data_type(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Utf8 => Some(KeyType::String),
            DataType::Int32 => Some(KeyType::Integer),
            DataType::Int64 => Some(KeyType::Long),
            DataType::Timestamp(TimeUnit::Millisecond, None) => Some(KeyType::Timestamp),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            KeyType::String => 0,
            KeyType::Integer => 1,
            KeyType::Long => 2,
            KeyType::Timestamp => 3,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::String => "STRING",
            KeyType::Integer => "INTEGER",
            KeyType::Long => "LONG",
            KeyType::Timestamp => "TIMESTAMP",
        };
        f.write_str(name)
    }
}

/// Runtime descriptor of a native Rust type.
///
/// Equality and hashing only consider the [`TypeId`]; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct NativeType {
    id: TypeId,
    name: &'static str,
}

impl NativeType {
    /// Descriptor for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying type id.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for NativeType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NativeType {}

impl Hash for NativeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Dynamically typed key value.
///
/// `Null` is the absent value: it clears a range bound and is never a valid
/// member of a distinct key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum KeyValue {
    /// No value.
    #[default]
    Null,
    /// Text key.
    String(String),
    /// 32-bit integer key.
    Integer(i32),
    /// 64-bit integer key.
    Long(i64),
    /// Timestamp key.
    Timestamp(Timestamp),
    /// Schema-described, possibly multi-column key.
    Row(RowKey),
}

impl KeyValue {
    /// Whether this is the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, KeyValue::Null)
    }

    /// Native type carried by this value, `None` for `Null`.
    pub fn native_type(&self) -> Option<NativeType> {
        match self {
            KeyValue::Null => None,
            KeyValue::String(_) => Some(NativeType::of::<String>()),
            KeyValue::Integer(_) => Some(NativeType::of::<i32>()),
            KeyValue::Long(_) => Some(NativeType::of::<i64>()),
            KeyValue::Timestamp(_) => Some(NativeType::of::<Timestamp>()),
            KeyValue::Row(_) => Some(NativeType::of::<RowKey>()),
        }
    }

    /// Human readable type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.native_type().map_or("null", |native| native.name())
    }

    /// Borrow the text value, if this is a text key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// The 32-bit integer value, if this is one.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            KeyValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The 64-bit integer value, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            KeyValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the timestamp, if this is one.
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            KeyValue::Timestamp(value) => Some(value),
            _ => None,
        }
    }

    /// Mutably borrow the timestamp, if this is one.
    pub fn as_timestamp_mut(&mut self) -> Option<&mut Timestamp> {
        match self {
            KeyValue::Timestamp(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the row key, if this is one.
    pub fn as_row_key(&self) -> Option<&RowKey> {
        match self {
            KeyValue::Row(value) => Some(value),
            _ => None,
        }
    }

    /// Mutably borrow the row key, if this is one.
    pub fn as_row_key_mut(&mut self) -> Option<&mut RowKey> {
        match self {
            KeyValue::Row(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::String(value)
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::String(value.to_owned())
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        KeyValue::Integer(value)
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Long(value)
    }
}

impl From<Timestamp> for KeyValue {
    fn from(value: Timestamp) -> Self {
        KeyValue::Timestamp(value)
    }
}

impl From<RowKey> for KeyValue {
    fn from(value: RowKey) -> Self {
        KeyValue::Row(value)
    }
}

impl From<KeyComponent> for KeyValue {
    fn from(value: KeyComponent) -> Self {
        match value {
            KeyComponent::Utf8(v) => KeyValue::String(v),
            KeyComponent::I32(v) => KeyValue::Integer(v),
            KeyComponent::I64(v) => KeyValue::Long(v),
            KeyComponent::Timestamp(v) => KeyValue::Timestamp(v),
        }
    }
}

impl<T> From<Option<T>> for KeyValue
where
    T: Into<KeyValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(KeyValue::Null, Into::into)
    }
}
