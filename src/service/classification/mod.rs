//! Classification coordinator.
//!
//! Orchestrates exactly one round-trip per user-triggered submission:
//! snapshot the store, build the prompt, issue the single request, parse the
//! payload, and write results back onto rows by index. On any failure the
//! store is left exactly as it was.

use std::time::Instant;

use crate::model::config::Config;
use crate::service::llm::CompletionClient;
use crate::store::RowStore;

pub mod error;
pub mod parse;
pub mod prompts;

pub use error::ClassificationError;
pub use parse::ClassifiedRow;

/// Phase of the current submission round.
///
/// `Building` and `Applying` are only observable from within a submission;
/// between calls the coordinator sits in `Idle`, `AwaitingResponse` (a call
/// is suspended at its await point), or `Failed` (the last round errored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Building,
    AwaitingResponse,
    Applying,
    Failed,
}

/// Coordinates classification round-trips against one [`RowStore`].
pub struct ClassificationCoordinator {
    model: String,
    default_base_url: Option<String>,
    phase: SubmissionPhase,
}

impl ClassificationCoordinator {
    pub fn new(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            default_base_url: config.base_url.clone(),
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Run one classification round-trip over the current rows.
    ///
    /// A second submission while one is awaiting its response is rejected
    /// with [`ClassificationError::SubmissionInFlight`]; the outstanding
    /// request is untouched. An empty credential fails before any network
    /// activity. Results are applied only after the whole payload parsed, so
    /// a malformed response never partially updates the store.
    pub async fn submit(
        &mut self,
        store: &mut RowStore,
        credential: &str,
        endpoint_override: Option<&str>,
    ) -> Result<(), ClassificationError> {
        if self.phase == SubmissionPhase::AwaitingResponse {
            return Err(ClassificationError::SubmissionInFlight);
        }
        if credential.trim().is_empty() {
            self.phase = SubmissionPhase::Failed;
            return Err(ClassificationError::MissingCredential);
        }

        self.phase = SubmissionPhase::Building;
        let snapshot = store.snapshot();
        let prompt = prompts::build_classification_prompt(&snapshot);
        let base_url = endpoint_override.or(self.default_base_url.as_deref());
        let client = CompletionClient::new(&self.model, base_url);

        self.phase = SubmissionPhase::AwaitingResponse;
        let started = Instant::now();
        let payload = match client.complete(credential.trim(), &prompt).await {
            Ok(payload) => {
                tracing::info!(
                    model = %self.model,
                    rows = snapshot.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    payload_length = payload.len(),
                    "Classification request completed"
                );
                payload
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    rows = snapshot.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Classification request failed"
                );
                self.phase = SubmissionPhase::Failed;
                return Err(e.into());
            }
        };

        self.phase = SubmissionPhase::Applying;
        match Self::apply(store, snapshot.len(), &payload) {
            Ok(()) => {
                self.phase = SubmissionPhase::Idle;
                Ok(())
            }
            Err(e) => {
                self.phase = SubmissionPhase::Failed;
                Err(e)
            }
        }
    }

    /// Parse the payload fully, then write results row by row.
    ///
    /// Reconciliation is bounded by the submitted snapshot: entries whose
    /// index falls outside it are skipped, so rows appended while the
    /// request was in flight are never touched.
    fn apply(
        store: &mut RowStore,
        snapshot_len: usize,
        payload: &str,
    ) -> Result<(), ClassificationError> {
        let entries = parse::parse_payload(payload)?;

        let mut applied = 0usize;
        let mut skipped = 0usize;
        for entry in entries {
            if entry.index >= snapshot_len {
                tracing::warn!(
                    index = entry.index,
                    rows = snapshot_len,
                    "Skipping classification entry for unknown row"
                );
                skipped += 1;
                continue;
            }
            store.apply_threats(entry.index, entry.threats)?;
            applied += 1;
        }

        tracing::debug!(applied, skipped, "Applied classification results");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::Field;

    fn store_with_rows(cells: &[(&str, &str)]) -> RowStore {
        let mut store = RowStore::new();
        for (i, (surface, description)) in cells.iter().enumerate() {
            store.add_row();
            store.edit_cell(i, Field::Surface, *surface);
            store.edit_cell(i, Field::Description, *description);
        }
        store
    }

    #[tokio::test]
    async fn test_empty_credential_fails_before_any_network_activity() {
        let mut store = store_with_rows(&[("login flow", "password entry")]);
        let before = store.clone();
        let mut coordinator = ClassificationCoordinator::new(&Config::default());

        // The override points nowhere routable; a Transport error here would
        // mean a request was actually issued.
        let result = coordinator
            .submit(&mut store, "  ", Some("http://127.0.0.1:1"))
            .await;

        assert!(matches!(result, Err(ClassificationError::MissingCredential)));
        assert_eq!(store, before);
        assert_eq!(coordinator.phase(), SubmissionPhase::Failed);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        let mut store = store_with_rows(&[("login flow", "password entry")]);
        let before = store.clone();
        let mut coordinator = ClassificationCoordinator::new(&Config::default());

        let result = coordinator
            .submit(&mut store, "sk-test", Some("http://127.0.0.1:1"))
            .await;

        assert!(matches!(result, Err(ClassificationError::Transport(_))));
        assert_eq!(store, before);
        assert_eq!(coordinator.phase(), SubmissionPhase::Failed);
    }

    #[test]
    fn test_apply_writes_threats_onto_referenced_row_only() {
        let mut store = store_with_rows(&[("login flow", "password entry"), ("admin API", "")]);
        let payload = r#"[{"index":0,"threats":[{"type":"forgery","description":"x"}]}]"#;

        ClassificationCoordinator::apply(&mut store, 2, payload).unwrap();

        assert_eq!(store.rows()[0].threats.len(), 1);
        assert_eq!(store.rows()[0].threats[0].category, "forgery");
        assert_eq!(store.rows()[0].threats[0].description, "x");
        assert!(store.rows()[1].threats.is_empty());
    }

    #[test]
    fn test_apply_skips_entries_for_unknown_rows() {
        let mut store = store_with_rows(&[("a", ""), ("b", "")]);
        let payload = r#"[
            {"index":5,"threats":[{"type":"forgery","description":"x"}]},
            {"index":1,"threats":[{"type":"guessing","description":"y"}]}
        ]"#;

        ClassificationCoordinator::apply(&mut store, 2, payload).unwrap();

        assert!(store.rows()[0].threats.is_empty());
        assert_eq!(store.rows()[1].threats[0].category, "guessing");
    }

    #[test]
    fn test_apply_is_bounded_by_the_snapshot_not_the_store() {
        // Row 2 was appended after the snapshot was taken; a response entry
        // referencing it must be skipped even though the row now exists.
        let mut store = store_with_rows(&[("a", ""), ("b", ""), ("late", "")]);
        let payload = r#"[{"index":2,"threats":[{"type":"forgery","description":"x"}]}]"#;

        ClassificationCoordinator::apply(&mut store, 2, payload).unwrap();

        assert!(store.rows()[2].threats.is_empty());
    }

    #[test]
    fn test_malformed_payload_leaves_store_untouched() {
        let mut store = store_with_rows(&[("a", "b")]);
        store
            .apply_threats(
                0,
                vec![crate::model::row::Threat {
                    category: "forgery".to_string(),
                    description: "prior run".to_string(),
                }],
            )
            .unwrap();
        let before = store.clone();

        let result = ClassificationCoordinator::apply(&mut store, 1, "not json at all");

        assert!(matches!(
            result,
            Err(ClassificationError::MalformedResponse(_))
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_rows_omitted_from_response_keep_prior_threats() {
        let mut store = store_with_rows(&[("a", ""), ("b", "")]);
        store
            .apply_threats(
                1,
                vec![crate::model::row::Threat {
                    category: "trojan".to_string(),
                    description: "prior run".to_string(),
                }],
            )
            .unwrap();

        let payload = r#"[{"index":0,"threats":[{"type":"forgery","description":"x"}]}]"#;
        ClassificationCoordinator::apply(&mut store, 2, payload).unwrap();

        assert_eq!(store.rows()[1].threats[0].description, "prior run");
    }
}
