//! In-memory row store.
//!
//! The authoritative ordered sequence of attack-surface rows. Rows are
//! addressed by position; only appends are supported, so an index handed out
//! for a row stays valid for the rest of the session.

use thiserror::Error;

use crate::model::row::{AttackSurfaceRow, Field, RowSnapshot, Threat};

/// Error type for row reconciliation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A classification result referenced a row that does not exist.
    /// Indicates a reconciliation bug, not a user error.
    #[error("row index {0} out of range")]
    IndexOutOfRange(usize),
}

/// Ordered, append-only sequence of [`AttackSurfaceRow`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    rows: Vec<AttackSurfaceRow>,
}

impl RowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one blank row. Its index is the previous row count.
    pub fn add_row(&mut self) {
        self.rows.push(AttackSurfaceRow::default());
    }

    /// Overwrite an input cell.
    ///
    /// Out-of-range indices are ignored: the rendering surface only hands out
    /// indices for rows it displays, so a miss here has nothing to repair.
    pub fn edit_cell(&mut self, index: usize, field: Field, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            match field {
                Field::Surface => row.surface = value.into(),
                Field::Description => row.description = value.into(),
            }
        }
    }

    /// Immutable copy of every row's input columns, in index order.
    pub fn snapshot(&self) -> Vec<RowSnapshot> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowSnapshot {
                index,
                surface: row.surface.clone(),
                description: row.description.clone(),
            })
            .collect()
    }

    /// Replace the threats of the row at `index` wholesale.
    pub fn apply_threats(&mut self, index: usize, threats: Vec<Threat>) -> Result<(), StoreError> {
        match self.rows.get_mut(index) {
            Some(row) => {
                row.threats = threats;
                Ok(())
            }
            None => Err(StoreError::IndexOutOfRange(index)),
        }
    }

    /// Drop the threats on every row.
    pub fn clear_threats(&mut self) {
        for row in &mut self.rows {
            row.threats.clear();
        }
    }

    /// True once any row carries a classification result.
    pub fn has_threats(&self) -> bool {
        self.rows.iter().any(|row| !row.threats.is_empty())
    }

    pub fn rows(&self) -> &[AttackSurfaceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat(category: &str, description: &str) -> Threat {
        Threat {
            category: category.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_add_row_assigns_positional_indices() {
        let mut store = RowStore::new();
        for _ in 0..5 {
            store.add_row();
        }
        assert_eq!(store.len(), 5);
        let indices: Vec<usize> = store.snapshot().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_edit_cell_overwrites_value() {
        let mut store = RowStore::new();
        store.add_row();
        store.edit_cell(0, Field::Surface, "login form");
        store.edit_cell(0, Field::Description, "username/password entry");
        store.edit_cell(0, Field::Surface, "login flow");

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].surface, "login flow");
        assert_eq!(snapshot[0].description, "username/password entry");
    }

    #[test]
    fn test_edit_cell_out_of_range_is_silent() {
        let mut store = RowStore::new();
        store.add_row();
        store.edit_cell(7, Field::Surface, "ghost");
        assert_eq!(store.rows()[0].surface, "");
    }

    #[test]
    fn test_snapshot_excludes_threats() {
        let mut store = RowStore::new();
        store.add_row();
        store
            .apply_threats(0, vec![threat("forgery", "x")])
            .unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].surface, "");
        assert_eq!(snapshot[0].description, "");
        // Threats live on the row, not in the snapshot type at all.
        assert_eq!(store.rows()[0].threats.len(), 1);
    }

    #[test]
    fn test_apply_threats_replaces_wholesale() {
        let mut store = RowStore::new();
        store.add_row();
        store
            .apply_threats(0, vec![threat("forgery", "x"), threat("guessing", "y")])
            .unwrap();
        store
            .apply_threats(0, vec![threat("trojan", "supply chain risk")])
            .unwrap();

        assert_eq!(
            store.rows()[0].threats,
            vec![threat("trojan", "supply chain risk")]
        );
    }

    #[test]
    fn test_apply_threats_out_of_range_errors() {
        let mut store = RowStore::new();
        store.add_row();
        let result = store.apply_threats(3, vec![]);
        assert_eq!(result, Err(StoreError::IndexOutOfRange(3)));
    }

    #[test]
    fn test_clear_threats() {
        let mut store = RowStore::new();
        store.add_row();
        store.add_row();
        store.apply_threats(1, vec![threat("forgery", "x")]).unwrap();
        assert!(store.has_threats());

        store.clear_threats();
        assert!(!store.has_threats());
        assert_eq!(store.len(), 2);
    }
}
