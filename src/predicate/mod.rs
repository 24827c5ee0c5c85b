//! Row-key match predicates.
//!
//! A [`KeyPredicate`] selects rows either by a key range (`start`/`finish`) or
//! by an explicit set of keys (`add`), never both. Every value is checked
//! against the predicate's key schema before it is stored, and values of
//! mutable key types are copied on the way in and on the way out so callers
//! cannot reach predicate state through a key they still hold.
//!
//! A predicate is a plain value: mutation needs `&mut self`, so sharing one
//! across threads requires the caller's own synchronization.

mod condition;
mod error;
mod policy;
mod variant;

use std::{collections::HashSet, sync::Arc};

use arrow::datatypes::{DataType, SchemaRef};
pub use condition::{DistinctKeys, KeyCondition};
pub use error::PredicateError;
pub use variant::KeyVariant;

use crate::{
    key::{KeyType, KeyValue, NativeType, RowKey},
    logging::{keymatch_log, LogContext},
    option::PredicateOptions,
    registry,
    schema::{KeyCategory, KeySchema},
};

const PREDICATE_LOG_CTX: LogContext = LogContext::new("component=key_predicate");

/// Key type a predicate was bound to by its factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundType {
    /// Built from a type tag. Accepts matching primitive values as well as
    /// single-column row keys, which are unwrapped.
    Dynamic(KeyType),
    /// Built from a native type descriptor. Accepts only values of that type.
    Native {
        /// Descriptor supplied by the caller.
        native: NativeType,
        /// Key type the descriptor maps to.
        key_type: KeyType,
    },
    /// Built from a schema. Accepts only [`RowKey`] values.
    GenericKey,
}

impl BoundType {
    /// Primitive key type, `None` for generic keys.
    pub fn key_type(&self) -> Option<KeyType> {
        match self {
            BoundType::Dynamic(key_type) | BoundType::Native { key_type, .. } => Some(*key_type),
            BoundType::GenericKey => None,
        }
    }
}

/// Range or distinct-set condition over row keys.
#[derive(Debug, Clone)]
pub struct KeyPredicate {
    bound_type: BoundType,
    schema: Arc<KeySchema>,
    variant: KeyVariant,
    range_eligible: bool,
    start: Option<KeyValue>,
    finish: Option<KeyValue>,
    distinct_keys: Option<HashSet<KeyValue>>,
}

impl KeyPredicate {
    /// Predicate over a single-column key of `key_type`.
    pub fn for_key_type(
        key_type: KeyType,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        Self::primitive(BoundType::Dynamic(key_type), key_type, options)
    }

    /// Predicate over a single-column key stored as the Arrow `data_type`.
    pub fn for_data_type(
        data_type: &DataType,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        let Some(key_type) = registry::key_type_for_data_type(data_type) else {
            return Err(PredicateError::UnsupportedKeyType {
                key_type: format!("{data_type:?}"),
            });
        };
        Self::for_key_type(key_type, options)
    }

    /// Predicate over a single-column key carried by the native type `native`.
    pub fn for_native(
        native: NativeType,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        let Some(key_type) = registry::key_type_for_native(native) else {
            return Err(PredicateError::UnsupportedKeyType {
                key_type: native.name().to_string(),
            });
        };
        Self::primitive(BoundType::Native { native, key_type }, key_type, options)
    }

    /// Shorthand for [`for_native`](Self::for_native) with `NativeType::of::<T>()`.
    pub fn for_native_type<T: 'static>(options: &PredicateOptions) -> Result<Self, PredicateError> {
        Self::for_native(NativeType::of::<T>(), options)
    }

    /// Predicate over the row key declared by a container schema.
    ///
    /// Only the key columns are kept. Values must be [`RowKey`]s even when the
    /// key has a single column.
    pub fn for_schema(
        container: &SchemaRef,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        let schema = KeySchema::resolve(container)?;
        Self::for_key_schema(Arc::new(schema), options)
    }

    /// Predicate over an already resolved key schema.
    pub fn for_key_schema(
        schema: Arc<KeySchema>,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        Self::new(BoundType::GenericKey, schema, KeyVariant::Composite, options)
    }

    fn primitive(
        bound_type: BoundType,
        key_type: KeyType,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        Self::new(
            bound_type,
            registry::primitive_schema(key_type),
            KeyVariant::for_key_type(key_type),
            options,
        )
    }

    fn new(
        bound_type: BoundType,
        schema: Arc<KeySchema>,
        variant: KeyVariant,
        options: &PredicateOptions,
    ) -> Result<Self, PredicateError> {
        if !schema.has_key() {
            return Err(PredicateError::KeyNotFound);
        }
        let range_eligible = policy::range_eligible(&bound_type, &schema, options);
        keymatch_log!(
            log::Level::Debug,
            ctx: PREDICATE_LOG_CTX,
            "predicate_created",
            "bound_type={:?} variant={:?} key_columns={} range_eligible={}",
            bound_type,
            variant,
            schema.len(),
            range_eligible,
        );
        Ok(Self {
            bound_type,
            schema,
            variant,
            range_eligible,
            start: None,
            finish: None,
            distinct_keys: None,
        })
    }

    /// Set the inclusive lower bound; `Null` clears it.
    pub fn set_start(&mut self, value: impl Into<KeyValue>) -> Result<(), PredicateError> {
        self.start = self
            .checked_range_bound(value.into())
            .map_err(|err| self.rejected("set_start", err))?;
        Ok(())
    }

    /// Set the inclusive upper bound; `Null` clears it.
    pub fn set_finish(&mut self, value: impl Into<KeyValue>) -> Result<(), PredicateError> {
        self.finish = self
            .checked_range_bound(value.into())
            .map_err(|err| self.rejected("set_finish", err))?;
        Ok(())
    }

    /// Add a key to the distinct set. Adding a key equal to one already present is a no-op.
    pub fn add(&mut self, value: impl Into<KeyValue>) -> Result<(), PredicateError> {
        let key = self
            .checked_distinct_key(value.into())
            .map_err(|err| self.rejected("add", err))?;
        self.distinct_keys
            .get_or_insert_with(HashSet::new)
            .insert(key);
        Ok(())
    }

    fn checked_range_bound(&self, value: KeyValue) -> Result<Option<KeyValue>, PredicateError> {
        if self.distinct_keys.is_some() {
            return Err(PredicateError::ConditionConflict(
                "distinct keys have already been specified",
            ));
        }
        if value.is_null() {
            return Ok(None);
        }
        if !self.range_eligible {
            return Err(PredicateError::UnsupportedOperation(
                "range condition is not supported for text keys",
            ));
        }
        let checked = self.check_key_type(value)?;
        Ok(Some(self.variant.copy_for_storage(checked)))
    }

    fn checked_distinct_key(&self, value: KeyValue) -> Result<KeyValue, PredicateError> {
        if self.start.is_some() || self.finish.is_some() {
            return Err(PredicateError::ConditionConflict(
                "start or finish key has already been specified",
            ));
        }
        if value.is_null() {
            return Err(PredicateError::MissingValue("distinct key"));
        }
        let checked = self.check_key_type(value)?;
        self.variant
            .copy_for_identity(checked, &self.schema)
            .map_err(|source| PredicateError::SchemaMismatch { source })
    }

    fn check_key_type(&self, value: KeyValue) -> Result<KeyValue, PredicateError> {
        match self.bound_type {
            BoundType::GenericKey => match &value {
                KeyValue::Row(row) => {
                    self.check_row_schema(row)?;
                    Ok(value)
                }
                _ => Err(PredicateError::TypeMismatch {
                    expected: NativeType::of::<RowKey>().name(),
                    actual: value.type_name(),
                }),
            },
            BoundType::Dynamic(key_type) => match value {
                KeyValue::Row(row) => {
                    self.check_row_schema(&row)?;
                    let element = row
                        .into_components()
                        .into_iter()
                        .next()
                        .map(KeyValue::from)
                        .unwrap_or_default();
                    check_native(key_type, element)
                }
                value => check_native(key_type, value),
            },
            BoundType::Native { key_type, .. } => check_native(key_type, value),
        }
    }

    fn check_row_schema(&self, row: &RowKey) -> Result<(), PredicateError> {
        let row_schema = row
            .key_schema()
            .map_err(|source| PredicateError::SchemaMismatch { source })?;
        self.schema
            .check_compatible(&row_schema)
            .map_err(|source| PredicateError::SchemaMismatch { source })
    }

    fn rejected(&self, op: &'static str, err: PredicateError) -> PredicateError {
        keymatch_log!(
            log::Level::Trace,
            ctx: PREDICATE_LOG_CTX,
            "predicate_mutation_rejected",
            "op={} variant={:?} error={}",
            op,
            self.variant,
            err,
        );
        err
    }

    /// Copy of the lower bound, if set.
    pub fn start(&self) -> Option<KeyValue> {
        self.start
            .as_ref()
            .map(|value| self.variant.copy_for_return(value))
    }

    /// Copy of the upper bound, if set.
    pub fn finish(&self) -> Option<KeyValue> {
        self.finish
            .as_ref()
            .map(|value| self.variant.copy_for_return(value))
    }

    /// The distinct keys, or `None` if [`add`](Self::add) was never called.
    pub fn distinct_keys(&self) -> Option<DistinctKeys<'_>> {
        let keys = self.distinct_keys.as_ref()?;
        if self.variant.is_immutable() {
            return Some(DistinctKeys::Shared(keys));
        }
        Some(DistinctKeys::Copied(
            keys.iter()
                .map(|key| self.variant.copy_for_return(key))
                .collect(),
        ))
    }

    /// Type of a single-column key.
    ///
    /// Fails with [`PredicateError::IllegalState`] for composite keys.
    pub fn key_type(&self) -> Result<KeyType, PredicateError> {
        if self.schema.category() != KeyCategory::Single {
            return Err(PredicateError::IllegalState(
                "key type is undefined for a composite row key",
            ));
        }
        self.bound_type
            .key_type()
            .or_else(|| self.schema.key_types().first().copied())
            .ok_or(PredicateError::IllegalState(
                "key schema has no supported key column",
            ))
    }

    /// The key-only schema values are checked against.
    pub fn key_schema(&self) -> Arc<KeySchema> {
        Arc::clone(&self.schema)
    }

    /// Key type the predicate was bound to.
    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    /// Copy policy in effect for this predicate's keys.
    pub fn variant(&self) -> KeyVariant {
        self.variant
    }

    /// Whether range bounds may be set.
    pub fn is_range_eligible(&self) -> bool {
        self.range_eligible
    }

    /// The condition in the form a lookup engine consumes.
    pub fn condition(&self) -> KeyCondition {
        match self.distinct_keys() {
            Some(keys) => KeyCondition::distinct(keys.into_vec()),
            None => KeyCondition::range(self.start(), self.finish()),
        }
    }
}

fn check_native(key_type: KeyType, value: KeyValue) -> Result<KeyValue, PredicateError> {
    let expected = registry::native_type_for_key(key_type);
    if value.native_type() != Some(expected) {
        return Err(PredicateError::TypeMismatch {
            expected: expected.name(),
            actual: value.type_name(),
        });
    }
    Ok(value)
}
