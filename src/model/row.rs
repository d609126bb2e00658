//! Row-level data model for the attack-surface grid.

use serde::{Deserialize, Serialize};

/// One classified threat on a row.
///
/// `category` carries whatever id string the model returned; it is not
/// validated against the fixed taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
}

/// Editable input column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Surface,
    Description,
}

/// One row of the grid. The row's index is its position in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackSurfaceRow {
    pub surface: String,
    pub description: String,
    /// Replaced wholesale by a successful classification, never merged.
    pub threats: Vec<Threat>,
}

/// Immutable copy of a row's input columns, taken at submission time.
/// Threats are output, not input, and are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub index: usize,
    pub surface: String,
    pub description: String,
}

impl RowSnapshot {
    /// Placeholder rows the user never filled in are left out of the prompt.
    pub fn is_blank(&self) -> bool {
        self.surface.trim().is_empty() && self.description.trim().is_empty()
    }
}
