use serde::{Deserialize, Serialize};

/// A single warning issued to a user. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub timestamp: u64,
    pub reason: String,
}

/// Outcome of recording a warning: the new record plus its 1-based ordinal
/// in the target user's history.
#[derive(Clone, Debug)]
pub struct RecordedWarning {
    pub record: WarningRecord,
    pub warn_number: usize,
}
