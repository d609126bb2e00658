//! UI-agnostic command surface over the row store and coordinator.
//!
//! The rendering surface (grid widget, credential field, buttons) calls
//! these handlers and reads the row/results views back; nothing here knows
//! how the grid is drawn, so the whole core is testable headless.

use crate::model::config::Config;
use crate::model::row::{AttackSurfaceRow, Field};
use crate::service::classification::{
    ClassificationCoordinator, ClassificationError, SubmissionPhase,
};
use crate::store::RowStore;

/// One flattened results row: the input columns plus one classified threat.
/// Rows classified with no applicable threats carry empty threat columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub surface: String,
    pub description: String,
    pub threat_type: String,
    pub threat_description: String,
}

/// Owns the session state: the store, the coordinator, and the latest
/// failure message for the error-display region.
pub struct GridController {
    store: RowStore,
    coordinator: ClassificationCoordinator,
    config: Config,
    last_error: Option<String>,
}

impl GridController {
    /// Start with a single blank row, like a freshly opened grid.
    pub fn new(config: Config) -> Self {
        let mut store = RowStore::new();
        store.add_row();
        let coordinator = ClassificationCoordinator::new(&config);
        Self {
            store,
            coordinator,
            config,
            last_error: None,
        }
    }

    /// Append one blank row.
    pub fn add_row(&mut self) {
        self.store.add_row();
    }

    /// Overwrite an input cell.
    pub fn edit_cell(&mut self, index: usize, field: Field, value: impl Into<String>) {
        self.store.edit_cell(index, field, value);
    }

    /// Submit every current row for classification.
    ///
    /// The credential falls back to the configured default when `None`. The
    /// error region is cleared at the start of every attempt and set from
    /// the failure, if any.
    pub async fn submit(
        &mut self,
        credential: Option<&str>,
        endpoint_override: Option<&str>,
    ) -> Result<(), ClassificationError> {
        self.last_error = None;
        let credential = credential.unwrap_or(&self.config.api_key).to_string();

        match self
            .coordinator
            .submit(&mut self.store, &credential, endpoint_override)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop the threats on every row.
    pub fn clear_results(&mut self) {
        self.store.clear_threats();
    }

    /// Restore the initial state of exactly one blank row.
    pub fn reset_input(&mut self) {
        self.store = RowStore::new();
        self.store.add_row();
    }

    /// Latest failure message, if the last submission failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn rows(&self) -> &[AttackSurfaceRow] {
        self.store.rows()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.coordinator.phase()
    }

    /// The output columns become visible once any row carries a result.
    pub fn has_results(&self) -> bool {
        self.store.has_threats()
    }

    /// Flattened results view: one row per classified threat, in row order,
    /// duplicates removed. Empty until the first successful classification.
    pub fn results(&self) -> Vec<ResultRow> {
        if !self.has_results() {
            return Vec::new();
        }

        let mut out: Vec<ResultRow> = Vec::new();
        for row in self.store.rows() {
            if row.surface.trim().is_empty() && row.description.trim().is_empty() {
                continue;
            }
            if row.threats.is_empty() {
                push_unique(
                    &mut out,
                    ResultRow {
                        surface: row.surface.clone(),
                        description: row.description.clone(),
                        threat_type: String::new(),
                        threat_description: String::new(),
                    },
                );
                continue;
            }
            for threat in &row.threats {
                push_unique(
                    &mut out,
                    ResultRow {
                        surface: row.surface.clone(),
                        description: row.description.clone(),
                        threat_type: threat.category.clone(),
                        threat_description: threat.description.clone(),
                    },
                );
            }
        }
        out
    }

    /// Results view rendered as CSV, matching the grid's column order.
    pub fn results_csv(&self) -> String {
        let mut csv = String::from("Attack Surface,Description,Threat Type,Threat Description\r\n");
        for row in self.results() {
            csv.push_str(&format!(
                "{},{},{},{}\r\n",
                csv_field(&row.surface),
                csv_field(&row.description),
                csv_field(&row.threat_type),
                csv_field(&row.threat_description),
            ));
        }
        csv
    }
}

fn push_unique(out: &mut Vec<ResultRow>, row: ResultRow) {
    if !out.contains(&row) {
        out.push(row);
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
