use std::hash::{Hash, Hasher};

use arrow::datatypes::{DataType, Field, Fields};

use super::{KeyType, Timestamp};
use crate::schema::{KeySchema, SchemaError};

/// One column value of a [`RowKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyComponent {
    /// UTF-8 text component.
    Utf8(String),
    /// 32-bit signed integer component.
    I32(i32),
    /// 64-bit signed integer component.
    I64(i64),
    /// Millisecond timestamp component.
    Timestamp(Timestamp),
}

impl KeyComponent {
    /// Key type of this component.
    pub fn key_type(&self) -> KeyType {
        match self {
            KeyComponent::Utf8(_) => KeyType::String,
            KeyComponent::I32(_) => KeyType::Integer,
            KeyComponent::I64(_) => KeyType::Long,
            KeyComponent::Timestamp(_) => KeyType::Timestamp,
        }
    }

    /// Arrow data type of this component.
    pub fn data_type(&self) -> DataType {
        self.key_type().data_type()
    }
}

impl From<&str> for KeyComponent {
    fn from(value: &str) -> Self {
        KeyComponent::Utf8(value.to_owned())
    }
}

impl From<String> for KeyComponent {
    fn from(value: String) -> Self {
        KeyComponent::Utf8(value)
    }
}

impl From<i32> for KeyComponent {
    fn from(value: i32) -> Self {
        KeyComponent::I32(value)
    }
}

impl From<i64> for KeyComponent {
    fn from(value: i64) -> Self {
        KeyComponent::I64(value)
    }
}

impl From<Timestamp> for KeyComponent {
    fn from(value: Timestamp) -> Self {
        KeyComponent::Timestamp(value)
    }
}

/// Mutable, schema-described row key.
///
/// A `RowKey` carries the names and types of its columns alongside the values,
/// which lets it resolve its own [`KeySchema`]. Two row keys are equal when
/// both their column names and their components are equal.
#[derive(Debug, Clone)]
pub struct RowKey {
    fields: Fields,
    components: Vec<KeyComponent>,
}

impl RowKey {
    /// Build a key for `schema`, checking arity and component types.
    pub fn new(schema: &KeySchema, components: Vec<KeyComponent>) -> Result<Self, SchemaError> {
        let fields = schema.fields();
        if fields.len() != components.len() {
            return Err(SchemaError::ArityMismatch {
                expected: fields.len(),
                actual: components.len(),
            });
        }
        for (col, (field, component)) in fields.iter().zip(&components).enumerate() {
            check_component(col, field.data_type(), component)?;
        }
        Ok(Self {
            fields: fields.clone(),
            components,
        })
    }

    /// Build an anonymous key whose columns are named `c0`, `c1`, ...
    pub fn from_components(components: Vec<KeyComponent>) -> Self {
        let fields = components
            .iter()
            .enumerate()
            .map(|(idx, component)| Field::new(format!("c{idx}"), component.data_type(), false))
            .collect::<Vec<_>>();
        Self {
            fields: Fields::from(fields),
            components,
        }
    }

    /// Number of key columns.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the key has no columns.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component at `col`.
    pub fn get(&self, col: usize) -> Option<&KeyComponent> {
        self.components.get(col)
    }

    /// Replace the component at `col` with a value of the same column type.
    pub fn set(&mut self, col: usize, component: KeyComponent) -> Result<(), SchemaError> {
        let Some(field) = self.fields.get(col) else {
            return Err(SchemaError::ColumnOutOfBounds(col, self.fields.len()));
        };
        check_component(col, field.data_type(), &component)?;
        self.components[col] = component;
        Ok(())
    }

    /// All components in key order.
    pub fn components(&self) -> &[KeyComponent] {
        &self.components
    }

    /// Consume the key and return its components.
    pub fn into_components(self) -> Vec<KeyComponent> {
        self.components
    }

    /// Column descriptors of this key.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Resolve the key schema described by this value.
    pub fn key_schema(&self) -> Result<KeySchema, SchemaError> {
        if self.components.is_empty() {
            return Err(SchemaError::EmptyKey);
        }
        KeySchema::from_key_fields(self.fields.iter().map(|f| f.as_ref().clone()))
    }

    /// Independent deep copy that shares nothing mutable with `self`.
    pub fn create_key(&self) -> RowKey {
        RowKey {
            fields: self.fields.clone(),
            components: self.components.to_vec(),
        }
    }

    /// Deep copy bound to `schema`'s column names.
    ///
    /// Keys with compatible layouts but different column names produce equal
    /// copies, which keeps set membership consistent.
    pub fn identical_key(&self, schema: &KeySchema) -> Result<RowKey, SchemaError> {
        schema.check_compatible(&self.key_schema()?)?;
        Ok(RowKey {
            fields: schema.fields().clone(),
            components: self.components.to_vec(),
        })
    }
}

fn check_component(
    col: usize,
    expected: &DataType,
    component: &KeyComponent,
) -> Result<(), SchemaError> {
    let actual = component.data_type();
    if &actual != expected {
        return Err(SchemaError::ComponentType {
            col,
            expected: expected.clone(),
            actual,
        });
    }
    Ok(())
}

impl PartialEq for RowKey {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(lhs, rhs)| lhs.name() == rhs.name())
    }
}

impl Eq for RowKey {}

impl Hash for RowKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for field in self.fields.iter() {
            field.name().hash(state);
        }
        self.components.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyComponent, RowKey};
    use crate::{
        key::{KeyType, Timestamp},
        schema::{KeySchema, SchemaError},
    };

    fn order_schema() -> KeySchema {
        KeySchema::from_columns([("region", KeyType::String), ("id", KeyType::Long)])
            .expect("schema")
    }

    #[test]
    fn new_checks_arity_and_types() {
        let schema = order_schema();
        let err = RowKey::new(&schema, vec!["eu".into()]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );

        let err = RowKey::new(&schema, vec!["eu".into(), 1_i32.into()]).unwrap_err();
        assert!(matches!(err, SchemaError::ComponentType { col: 1, .. }));

        let key = RowKey::new(&schema, vec!["eu".into(), 1_i64.into()]).expect("key");
        assert_eq!(key.len(), 2);
        assert_eq!(key.get(0), Some(&KeyComponent::Utf8("eu".into())));
    }

    #[test]
    fn set_is_type_checked() {
        let mut key = RowKey::new(&order_schema(), vec!["eu".into(), 1_i64.into()]).unwrap();
        key.set(1, 9_i64.into()).expect("same type");
        assert_eq!(key.get(1), Some(&KeyComponent::I64(9)));
        assert!(matches!(
            key.set(0, Timestamp::from_millis(1).into()),
            Err(SchemaError::ComponentType { col: 0, .. })
        ));
        assert_eq!(
            key.set(5, 1_i64.into()),
            Err(SchemaError::ColumnOutOfBounds(5, 2))
        );
    }

    #[test]
    fn create_key_is_independent() {
        let original = RowKey::new(&order_schema(), vec!["eu".into(), 1_i64.into()]).unwrap();
        let mut copy = original.create_key();
        assert_eq!(copy, original);
        copy.set(0, "us".into()).unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.get(0), Some(&KeyComponent::Utf8("eu".into())));
    }

    #[test]
    fn identical_key_rebinds_column_names() {
        let schema = order_schema();
        let anonymous = RowKey::from_components(vec!["eu".into(), 1_i64.into()]);
        let named = RowKey::new(&schema, vec!["eu".into(), 1_i64.into()]).unwrap();
        assert_ne!(anonymous, named);

        let rebound = anonymous.identical_key(&schema).expect("compatible");
        assert_eq!(rebound, named);
    }

    #[test]
    fn identical_key_rejects_incompatible_layout() {
        let anonymous = RowKey::from_components(vec![1_i64.into(), "eu".into()]);
        assert!(matches!(
            anonymous.identical_key(&order_schema()),
            Err(SchemaError::Incompatible { .. })
        ));
    }

    #[test]
    fn empty_key_has_no_schema() {
        assert_eq!(
            RowKey::from_components(Vec::new()).key_schema(),
            Err(SchemaError::EmptyKey)
        );
    }
}
