//! Common types used across ChemViz

use serde::{Deserialize, Serialize};

/// Number of datasets the store retains.
pub const RETENTION_LIMIT: usize = 5;

/// Bounded limit for history queries.
///
/// History never returns more than [`RETENTION_LIMIT`] records and always
/// returns at least one when the store is non-empty.
///
/// # Examples
///
/// ```
/// use chemviz_common::types::HistoryLimit;
///
/// assert_eq!(HistoryLimit::new(0).get(), 1);
/// assert_eq!(HistoryLimit::new(3).get(), 3);
/// assert_eq!(HistoryLimit::new(50).get(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct HistoryLimit(usize);

impl HistoryLimit {
    /// Clamp a requested limit into `1..=RETENTION_LIMIT`
    pub fn new(requested: usize) -> Self {
        Self(requested.clamp(1, RETENTION_LIMIT))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(RETENTION_LIMIT)
    }
}

impl From<usize> for HistoryLimit {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<HistoryLimit> for usize {
    fn from(value: HistoryLimit) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_retention_limit() {
        assert_eq!(HistoryLimit::default().get(), RETENTION_LIMIT);
    }

    #[test]
    fn test_deserialize_clamps() {
        let limit: HistoryLimit = serde_json::from_str("99").unwrap();
        assert_eq!(limit.get(), RETENTION_LIMIT);
        let limit: HistoryLimit = serde_json::from_str("0").unwrap();
        assert_eq!(limit.get(), 1);
    }
}
