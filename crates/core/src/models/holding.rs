use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-declared portfolio row.
///
/// **Note**: `value` is not wired to live prices and is always `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingEntry {
    /// Unique identifier, stable for the row's lifetime
    pub id: Uuid,

    /// Free-text asset name as typed by the user
    pub name: String,

    /// Quantity held (always positive)
    pub amount: f64,

    /// Holding value in USD (always zero)
    pub value: f64,
}

impl HoldingEntry {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            value: 0.0,
        }
    }
}
