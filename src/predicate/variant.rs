//! Copy policies for the closed set of key shapes.

use crate::{
    key::{KeyType, KeyValue, Timestamp},
    schema::{KeySchema, SchemaError},
};

/// How key values of a predicate are duplicated.
///
/// Plain keys are immutable and pass through unchanged. Temporal and composite
/// keys can be changed in place by whoever holds them, so the predicate copies
/// them whenever they cross its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyVariant {
    /// Text, 32-bit and 64-bit integer keys.
    Plain,
    /// Timestamp keys.
    Temporal,
    /// Schema-described [`RowKey`](crate::RowKey) keys.
    Composite,
}

impl KeyVariant {
    pub(crate) fn for_key_type(key_type: KeyType) -> Self {
        match key_type {
            KeyType::Timestamp => KeyVariant::Temporal,
            KeyType::String | KeyType::Integer | KeyType::Long => KeyVariant::Plain,
        }
    }

    /// Whether values of this variant can never change after construction.
    pub fn is_immutable(self) -> bool {
        matches!(self, KeyVariant::Plain)
    }

    /// Independent copy of a value about to be stored as a range bound.
    pub(crate) fn copy_for_storage(self, value: KeyValue) -> KeyValue {
        match self {
            KeyVariant::Plain => value,
            KeyVariant::Temporal | KeyVariant::Composite => self.independent_copy(&value),
        }
    }

    /// Copy of a value about to join a distinct key set.
    ///
    /// Composite keys are rebound to `schema` so that keys with equal
    /// components hash and compare equal inside the set.
    pub(crate) fn copy_for_identity(
        self,
        value: KeyValue,
        schema: &KeySchema,
    ) -> Result<KeyValue, SchemaError> {
        match (self, value) {
            (KeyVariant::Composite, KeyValue::Row(row)) => {
                Ok(KeyValue::Row(row.identical_key(schema)?))
            }
            (KeyVariant::Plain, value) => Ok(value),
            (_, value) => Ok(self.independent_copy(&value)),
        }
    }

    /// Copy of a stored value handed back to a caller.
    pub(crate) fn copy_for_return(self, value: &KeyValue) -> KeyValue {
        match self {
            KeyVariant::Plain => value.clone(),
            KeyVariant::Temporal | KeyVariant::Composite => self.independent_copy(value),
        }
    }

    fn independent_copy(self, value: &KeyValue) -> KeyValue {
        match value {
            KeyValue::Timestamp(ts) => KeyValue::Timestamp(Timestamp::from_millis(ts.millis())),
            KeyValue::Row(row) => KeyValue::Row(row.create_key()),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::KeyVariant;
    use crate::{
        key::{KeyType, KeyValue, RowKey, Timestamp},
        schema::KeySchema,
    };

    #[test]
    fn variant_selection() {
        assert_eq!(
            KeyVariant::for_key_type(KeyType::Timestamp),
            KeyVariant::Temporal
        );
        assert_eq!(KeyVariant::for_key_type(KeyType::String), KeyVariant::Plain);
        assert!(KeyVariant::Plain.is_immutable());
        assert!(!KeyVariant::Temporal.is_immutable());
        assert!(!KeyVariant::Composite.is_immutable());
    }

    #[test]
    fn temporal_copies_are_detached() {
        let stored = KeyVariant::Temporal.copy_for_storage(Timestamp::from_millis(10).into());
        let mut returned = KeyVariant::Temporal.copy_for_return(&stored);
        returned
            .as_timestamp_mut()
            .expect("timestamp")
            .set_millis(99);
        assert_eq!(stored, KeyValue::Timestamp(Timestamp::from_millis(10)));
    }

    #[test]
    fn composite_identity_copy_uses_schema_names() {
        let schema =
            KeySchema::from_columns([("a", KeyType::Integer), ("b", KeyType::Long)]).unwrap();
        let key = RowKey::from_components(vec![1_i32.into(), 2_i64.into()]);
        let copy = KeyVariant::Composite
            .copy_for_identity(key.into(), &schema)
            .expect("compatible");
        let names = copy
            .as_row_key()
            .expect("row key")
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
