use std::{collections::HashSet, ops::Bound};

use crate::key::KeyValue;

/// Read-only view of a predicate's distinct keys.
///
/// Immutable keys are exposed by borrowing the predicate's set. Mutable keys
/// are materialized as fresh copies, so nothing reachable from the view
/// aliases predicate state.
#[derive(Debug)]
pub enum DistinctKeys<'a> {
    /// Borrowed view of a set of immutable keys.
    Shared(&'a HashSet<KeyValue>),
    /// Copies of mutable keys.
    Copied(Vec<KeyValue>),
}

impl DistinctKeys<'_> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        match self {
            DistinctKeys::Shared(set) => set.len(),
            DistinctKeys::Copied(keys) => keys.len(),
        }
    }

    /// Whether no key has been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is one of the distinct keys.
    pub fn contains(&self, key: &KeyValue) -> bool {
        match self {
            DistinctKeys::Shared(set) => set.contains(key),
            DistinctKeys::Copied(keys) => keys.contains(key),
        }
    }

    /// Iterate the keys in unspecified order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &KeyValue> + '_> {
        match self {
            DistinctKeys::Shared(set) => Box::new(set.iter()),
            DistinctKeys::Copied(keys) => Box::new(keys.iter()),
        }
    }

    /// Owned keys, detached from the predicate.
    pub fn into_vec(self) -> Vec<KeyValue> {
        match self {
            DistinctKeys::Shared(set) => set.iter().cloned().collect(),
            DistinctKeys::Copied(keys) => keys,
        }
    }
}

/// Match condition handed to a lookup engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCondition {
    /// No restriction: every row matches.
    All,
    /// Keys within the bounds. Set bounds are inclusive; unset ones are unbounded.
    Range {
        /// Lower bound.
        start: Bound<KeyValue>,
        /// Upper bound.
        finish: Bound<KeyValue>,
    },
    /// Exactly the listed keys, in unspecified order.
    Distinct(Vec<KeyValue>),
}

impl KeyCondition {
    pub(crate) fn range(start: Option<KeyValue>, finish: Option<KeyValue>) -> Self {
        if start.is_none() && finish.is_none() {
            return KeyCondition::All;
        }
        KeyCondition::Range {
            start: start.map_or(Bound::Unbounded, Bound::Included),
            finish: finish.map_or(Bound::Unbounded, Bound::Included),
        }
    }

    pub(crate) fn distinct(keys: Vec<KeyValue>) -> Self {
        if keys.is_empty() {
            KeyCondition::All
        } else {
            KeyCondition::Distinct(keys)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, ops::Bound};

    use super::{DistinctKeys, KeyCondition};
    use crate::key::KeyValue;

    #[test]
    fn empty_range_matches_everything() {
        assert_eq!(KeyCondition::range(None, None), KeyCondition::All);
        assert_eq!(KeyCondition::distinct(Vec::new()), KeyCondition::All);
    }

    #[test]
    fn half_open_range_is_unbounded_on_unset_side() {
        assert_eq!(
            KeyCondition::range(Some(KeyValue::Integer(3)), None),
            KeyCondition::Range {
                start: Bound::Included(KeyValue::Integer(3)),
                finish: Bound::Unbounded,
            }
        );
    }

    #[test]
    fn shared_and_copied_views_agree() {
        let set: HashSet<KeyValue> = [KeyValue::Long(1), KeyValue::Long(2)].into_iter().collect();
        let shared = DistinctKeys::Shared(&set);
        let copied = DistinctKeys::Copied(vec![KeyValue::Long(1), KeyValue::Long(2)]);
        assert_eq!(shared.len(), copied.len());
        assert!(shared.contains(&KeyValue::Long(2)));
        assert!(copied.contains(&KeyValue::Long(2)));
        assert_eq!(shared.iter().count(), 2);

        let mut owned = shared.into_vec();
        owned.clear();
        assert_eq!(set.len(), 2);
    }
}
