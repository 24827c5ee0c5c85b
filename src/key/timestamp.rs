use std::fmt;

/// Millisecond-precision instant without timezone.
///
/// Unlike the other primitive keys a `Timestamp` can be changed in place. It
/// is not `Copy`; every duplicate is an explicit clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    millis: i64,
}

impl Timestamp {
    /// Instant expressed as milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Milliseconds since the Unix epoch.
    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// Move this timestamp to another instant.
    pub fn set_millis(&mut self, millis: i64) {
        self.millis = millis;
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
