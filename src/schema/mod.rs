//! Key schema resolution over Arrow schemas.
//!
//! A container schema is an ordinary Arrow [`Schema`] whose metadata entry
//! [`KEY_METADATA`] lists the key columns, in key order, as a JSON array of
//! column names. [`KeySchema::resolve`] extracts those columns into a key-only
//! schema; non-key columns are ignored.

mod builder;
mod error;

use std::{collections::HashSet, sync::Arc};

use arrow::datatypes::{DataType, Field, Fields, Schema, SchemaRef};
pub use builder::KeySchemaBuilder;
pub use error::SchemaError;

use crate::{key::KeyType, logging::keymatch_log};

/// Metadata entry naming the key columns of a container schema.
pub const KEY_METADATA: &str = "keymatch.keys";

/// Whether a key consists of one column or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Exactly one key column.
    Single,
    /// More than one key column.
    Composite,
}

/// Key-only schema: the ordered, non-nullable columns forming a row key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    schema: SchemaRef,
}

impl KeySchema {
    /// Resolve the key columns declared in `container`'s metadata.
    ///
    /// A schema without a key declaration resolves to a key schema for which
    /// [`has_key`](Self::has_key) is `false`.
    pub fn resolve(container: &SchemaRef) -> Result<Self, SchemaError> {
        let Some(raw) = container.metadata().get(KEY_METADATA) else {
            keymatch_log!(
                log::Level::Debug,
                "key_schema_undeclared",
                "fields={}",
                container.fields().len(),
            );
            return Self::from_key_fields(std::iter::empty::<Field>());
        };
        let names: Vec<String> =
            serde_json::from_str(raw).map_err(|err| SchemaError::InvalidKeyMetadata {
                value: raw.clone(),
                reason: err.to_string(),
            })?;

        let mut seen = HashSet::with_capacity(names.len());
        let mut key_fields = Vec::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateKeyColumn { name });
            }
            let Some(field) = container.fields().iter().find(|f| f.name() == &name) else {
                return Err(SchemaError::NoSuchField { name });
            };
            key_fields.push(field.as_ref().clone());
        }
        Self::from_key_fields(key_fields)
    }

    /// Build a key schema from `(column name, key type)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, KeyType)>,
        S: Into<String>,
    {
        Self::from_key_fields(
            columns
                .into_iter()
                .map(|(name, key_type)| Field::new(name, key_type.data_type(), false)),
        )
    }

    /// Single-column key schema.
    pub fn single(name: impl Into<String>, key_type: KeyType) -> Self {
        let field = Field::new(name, key_type.data_type(), false);
        Self {
            schema: Arc::new(Schema::new(vec![field])),
        }
    }

    pub(crate) fn from_key_fields<I>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = Field>,
    {
        let mut key_fields = Vec::new();
        for field in fields {
            if KeyType::from_data_type(field.data_type()).is_none() {
                return Err(SchemaError::UnsupportedType {
                    name: field.name().clone(),
                    data_type: field.data_type().clone(),
                });
            }
            key_fields.push(field.with_nullable(false).with_metadata(Default::default()));
        }
        Ok(Self {
            schema: Arc::new(Schema::new(key_fields)),
        })
    }

    /// Whether at least one key column exists.
    pub fn has_key(&self) -> bool {
        !self.schema.fields().is_empty()
    }

    /// Single or composite; a key-less schema reports `Single`.
    pub fn category(&self) -> KeyCategory {
        if self.schema.fields().len() > 1 {
            KeyCategory::Composite
        } else {
            KeyCategory::Single
        }
    }

    /// Number of key columns.
    pub fn len(&self) -> usize {
        self.schema.fields().len()
    }

    /// Whether the schema has no key columns.
    pub fn is_empty(&self) -> bool {
        self.schema.fields().is_empty()
    }

    /// Arrow data types of the key columns, in key order.
    pub fn column_types(&self) -> Vec<DataType> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.data_type().clone())
            .collect()
    }

    /// Key types of the key columns, in key order.
    pub fn key_types(&self) -> Vec<KeyType> {
        self.schema
            .fields()
            .iter()
            .filter_map(|f| KeyType::from_data_type(f.data_type()))
            .collect()
    }

    /// Key column descriptors.
    pub fn fields(&self) -> &Fields {
        self.schema.fields()
    }

    /// The key-only Arrow schema.
    pub fn arrow_schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    /// Check that `other` has the same column layout as `self`.
    ///
    /// Layouts match when the column count and the column types agree position
    /// by position; names are not compared.
    pub fn check_compatible(&self, other: &KeySchema) -> Result<(), SchemaError> {
        let expected = self.column_types();
        let actual = other.column_types();
        if expected != actual {
            return Err(SchemaError::Incompatible { expected, actual });
        }
        Ok(())
    }

    /// Boolean form of [`check_compatible`](Self::check_compatible).
    pub fn is_compatible_with(&self, other: &KeySchema) -> bool {
        self.check_compatible(other).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use arrow::datatypes::{DataType, Field, Schema};

    use super::{KeyCategory, KeySchema, SchemaError, KEY_METADATA};
    use crate::{key::KeyType, logging::keymatch_log};

    fn container(keys: Option<&str>) -> Arc<Schema> {
        let fields = vec![
            Field::new("region", DataType::Utf8, true),
            Field::new("id", DataType::Int64, false),
            Field::new("score", DataType::Float64, true),
        ];
        let metadata = keys
            .map(|k| HashMap::from([(KEY_METADATA.to_string(), k.to_string())]))
            .unwrap_or_default();
        Arc::new(Schema::new_with_metadata(fields, metadata))
    }

    #[test]
    fn resolves_declared_key_columns_only() {
        let key = KeySchema::resolve(&container(Some(r#"["id","region"]"#))).expect("resolve");
        assert!(key.has_key());
        assert_eq!(key.category(), KeyCategory::Composite);
        assert_eq!(key.column_types(), vec![DataType::Int64, DataType::Utf8]);
        assert_eq!(key.key_types(), vec![KeyType::Long, KeyType::String]);
        assert!(key.fields().iter().all(|f| !f.is_nullable()));
    }

    #[test]
    fn missing_declaration_has_no_key() {
        let key = KeySchema::resolve(&container(None)).expect("resolve");
        assert!(!key.has_key());
        assert!(key.is_empty());
    }

    #[test]
    fn resolution_errors() {
        assert!(matches!(
            KeySchema::resolve(&container(Some("id"))),
            Err(SchemaError::InvalidKeyMetadata { .. })
        ));
        assert_eq!(
            KeySchema::resolve(&container(Some(r#"["missing"]"#))),
            Err(SchemaError::NoSuchField {
                name: "missing".into()
            })
        );
        assert_eq!(
            KeySchema::resolve(&container(Some(r#"["id","id"]"#))),
            Err(SchemaError::DuplicateKeyColumn { name: "id".into() })
        );
        assert!(matches!(
            KeySchema::resolve(&container(Some(r#"["score"]"#))),
            Err(SchemaError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn compatibility_ignores_names() {
        let a = KeySchema::from_columns([("a", KeyType::Integer), ("b", KeyType::String)]).unwrap();
        let b = KeySchema::from_columns([("x", KeyType::Integer), ("y", KeyType::String)]).unwrap();
        let c = KeySchema::from_columns([("a", KeyType::Integer)]).unwrap();
        assert!(a.is_compatible_with(&b));
        assert!(!a.is_compatible_with(&c));
        assert_eq!(
            a.check_compatible(&c),
            Err(SchemaError::Incompatible {
                expected: vec![DataType::Int32, DataType::Utf8],
                actual: vec![DataType::Int32],
            })
        );
    }

    #[test]
    fn single_column_schema() {
        let key = KeySchema::single("key", KeyType::Timestamp);
        assert_eq!(key.category(), KeyCategory::Single);
        assert_eq!(key.len(), 1);
        assert_eq!(key.column_types(), vec![KeyType::Timestamp.data_type()]);
    }
}
