/// Options consulted when a [`KeyPredicate`](crate::KeyPredicate) is constructed.
///
/// Options are captured by value at construction time; changing them later
/// does not affect predicates that already exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateOptions {
    pub(crate) strict_text_range: bool,
}

impl PredicateOptions {
    /// Reject range conditions on text keys, and on composite keys with any text column.
    pub fn strict_text_range(self, strict_text_range: bool) -> Self {
        PredicateOptions {
            strict_text_range,
            ..self
        }
    }

    /// Whether strict text-range mode is enabled.
    pub fn is_strict_text_range(&self) -> bool {
        self.strict_text_range
    }
}
