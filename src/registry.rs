//! Process-wide tables for the primitive key types.
//!
//! Built on first use and read-only afterwards. The canonical schemas exist to
//! validate primitive keys, not to describe stored data.

use std::sync::Arc;

use arrow::datatypes::DataType;
use once_cell::sync::Lazy;

use crate::{
    key::{KeyType, NativeType, Timestamp},
    schema::KeySchema,
};

/// Column name used by the canonical single-column schemas.
pub const PRIMITIVE_KEY_COLUMN: &str = "key";

struct Registry {
    natives: [NativeType; 4],
    schemas: [Arc<KeySchema>; 4],
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let natives = KeyType::ALL.map(native_for);
    let schemas =
        KeyType::ALL.map(|key_type| Arc::new(KeySchema::single(PRIMITIVE_KEY_COLUMN, key_type)));
    Registry { natives, schemas }
});

fn native_for(key_type: KeyType) -> NativeType {
    match key_type {
        KeyType::String => NativeType::of::<String>(),
        KeyType::Integer => NativeType::of::<i32>(),
        KeyType::Long => NativeType::of::<i64>(),
        KeyType::Timestamp => NativeType::of::<Timestamp>(),
    }
}

/// Canonical single-column key schema for `key_type`.
pub fn primitive_schema(key_type: KeyType) -> Arc<KeySchema> {
    Arc::clone(&REGISTRY.schemas[key_type.index()])
}

/// Native Rust type that carries values of `key_type`.
pub fn native_type_for_key(key_type: KeyType) -> NativeType {
    REGISTRY.natives[key_type.index()]
}

/// Key type whose values are carried by `native`, if any.
pub fn key_type_for_native(native: NativeType) -> Option<KeyType> {
    KeyType::ALL
        .into_iter()
        .find(|key_type| REGISTRY.natives[key_type.index()] == native)
}

/// Key type stored as the Arrow `data_type`, if any.
pub fn key_type_for_data_type(data_type: &DataType) -> Option<KeyType> {
    KeyType::from_data_type(data_type)
}
