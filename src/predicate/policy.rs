use arrow::datatypes::DataType;

use super::BoundType;
use crate::{key::KeyType, option::PredicateOptions, schema::KeySchema};

/// Decide once, at construction, whether range bounds may be set.
///
/// Under strict text-range mode text keys are excluded, and so is any
/// composite key with a text column.
pub(crate) fn range_eligible(
    bound_type: &BoundType,
    schema: &KeySchema,
    options: &PredicateOptions,
) -> bool {
    if !options.strict_text_range {
        return true;
    }
    match bound_type.key_type() {
        Some(key_type) => key_type != KeyType::String,
        None => !schema
            .column_types()
            .iter()
            .any(|data_type| data_type == &DataType::Utf8),
    }
}

#[cfg(test)]
mod tests {
    use super::range_eligible;
    use crate::{
        key::KeyType, option::PredicateOptions, predicate::BoundType, registry,
        schema::KeySchema,
    };

    fn strict() -> PredicateOptions {
        PredicateOptions::default().strict_text_range(true)
    }

    #[test]
    fn lenient_mode_allows_everything() {
        let schema = registry::primitive_schema(KeyType::String);
        assert!(range_eligible(
            &BoundType::Dynamic(KeyType::String),
            &schema,
            &PredicateOptions::default()
        ));
    }

    #[test]
    fn strict_mode_excludes_text_primitives() {
        for key_type in KeyType::ALL {
            let schema = registry::primitive_schema(key_type);
            assert_eq!(
                range_eligible(&BoundType::Dynamic(key_type), &schema, &strict()),
                key_type != KeyType::String
            );
        }
    }

    #[test]
    fn strict_mode_excludes_composite_with_text_column() {
        let with_text =
            KeySchema::from_columns([("id", KeyType::Long), ("name", KeyType::String)]).unwrap();
        let without_text =
            KeySchema::from_columns([("id", KeyType::Long), ("ts", KeyType::Timestamp)]).unwrap();
        assert!(!range_eligible(&BoundType::GenericKey, &with_text, &strict()));
        assert!(range_eligible(&BoundType::GenericKey, &without_text, &strict()));
    }
}
