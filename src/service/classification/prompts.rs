//! Prompt construction for the classification round-trip.

use crate::model::row::RowSnapshot;
use crate::model::taxonomy::CATEGORIES;

/// Build the classification prompt from a row snapshot.
///
/// Renders the full taxonomy in its fixed order, then every non-blank row as
/// a `#<index>: <surface> - <description>` line under its real store index,
/// in ascending order. Blank placeholder rows are left out; because each
/// line carries its index, reconciliation is unaffected by the gaps.
pub fn build_classification_prompt(rows: &[RowSnapshot]) -> String {
    let categories = CATEGORIES
        .iter()
        .map(|c| format!("{}: {}", c.id, c.description))
        .collect::<Vec<_>>()
        .join("\n");

    let surfaces = rows
        .iter()
        .filter(|r| !r.is_blank())
        .map(|r| format!("#{}: {} - {}", r.index, r.surface, r.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a threat modeling assistant. For each attack surface below, identify applicable threat categories from this list and provide a contextual and specific description explaining how the threat could be carried out to achieve its goal. Omit categories that do not apply. Respond with JSON only, without markdown formatting, in the form:
[
  {{"index":0,"threats":[{{"type":"<category_id>","description":"<text>"}}]}}
]

Threat Categories:
{categories}

Attack Surfaces:
{surfaces}
"#
    )
}
