//! Declaring row keys on an Arrow container schema.

use std::sync::Arc;

use arrow::datatypes::{Schema, SchemaRef};
use serde_json::json;

use super::{KeySchema, SchemaError, KEY_METADATA};

/// Builder for declaring the row key of an Arrow schema.
///
/// The declaration is written back into the schema metadata under
/// [`KEY_METADATA`], which is where [`KeySchema::resolve`] and
/// [`KeyPredicate::for_schema`](crate::KeyPredicate::for_schema) look for it.
#[derive(Clone)]
pub struct KeySchemaBuilder {
    schema: SchemaRef,
    key_parts: Vec<String>,
}

impl KeySchemaBuilder {
    /// Start a builder from an Arrow schema reference.
    pub fn from_schema(schema: SchemaRef) -> Self {
        Self {
            schema,
            key_parts: Vec::new(),
        }
    }

    /// Declare a single-column key, replacing any prior selection.
    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.key_parts = vec![field.into()];
        self
    }

    /// Declare a composite key with fields in the provided order, replacing any prior selection.
    pub fn composite_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_parts = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append a field to the key definition.
    pub fn add_key_part(mut self, field: impl Into<String>) -> Self {
        self.key_parts.push(field.into());
        self
    }

    /// Finalise the builder, producing the schema with its key declaration.
    ///
    /// An empty declaration is written as-is and yields a schema without a row key.
    pub fn build(self) -> Result<SchemaRef, SchemaError> {
        let mut metadata = self.schema.metadata().clone();
        metadata.insert(KEY_METADATA.to_string(), json!(self.key_parts).to_string());
        let field_refs = self.schema.fields().iter().cloned().collect::<Vec<_>>();
        let schema = Arc::new(Schema::new_with_metadata(field_refs, metadata));

        KeySchema::resolve(&schema)?;
        Ok(schema)
    }
}
