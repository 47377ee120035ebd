//! Summary Rewriter — generative rewrite when available, otherwise one of two
//! template families per role: entry-level or experienced.
//!
//! Role lookup here is exact (case-insensitive) only. A role that only matches
//! fuzzily, like "backend", gets the generic templates.

use serde::{Deserialize, Serialize};

use crate::llm_client::GenerativeClient;
use crate::optimizer::roles::{RoleCatalog, ENTRY_LEVEL_MARKERS};
use crate::optimizer::RewriteResult;

pub const ENTRY_LEVEL_EXPLANATION: &str =
    "Summary rewritten for a student or entry-level candidate.";
pub const EXPERIENCED_EXPLANATION: &str = "Summary rewritten for an experienced candidate.";

/// Which template family the deterministic path picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryTemplate {
    EntryLevel,
    Experienced,
}

/// Rewrites a summary toward `target_role`. Never fails: any generative miss falls
/// through to [`template_summary`].
pub async fn rewrite_summary(
    generator: &dyn GenerativeClient,
    catalog: &RoleCatalog,
    current_summary: &str,
    target_role: &str,
) -> RewriteResult {
    if let Some(improvement) = generator
        .attempt_improve_summary(current_summary, target_role)
        .await
    {
        return RewriteResult::generated(improvement);
    }

    template_summary(catalog, current_summary, target_role)
}

/// Entry-level when the summary carries an entry-level marker or none of the role's
/// keywords (always the case for unknown roles); experienced otherwise.
pub fn classify_summary(
    catalog: &RoleCatalog,
    current_summary: &str,
    target_role: &str,
) -> SummaryTemplate {
    let summary_lower = current_summary.to_lowercase();
    let keywords = catalog
        .exact(target_role)
        .map(|p| p.keywords)
        .unwrap_or_default();

    let has_experience = keywords.iter().any(|k| summary_lower.contains(k));
    let entry_level_cue = ENTRY_LEVEL_MARKERS
        .iter()
        .any(|m| summary_lower.contains(m));

    if !has_experience || entry_level_cue {
        SummaryTemplate::EntryLevel
    } else {
        SummaryTemplate::Experienced
    }
}

/// Deterministic summary from the role's template, or a generic sentence built from
/// the raw role when the role is not in the catalog.
pub fn template_summary(
    catalog: &RoleCatalog,
    current_summary: &str,
    target_role: &str,
) -> RewriteResult {
    let profile = catalog.exact(target_role);

    match classify_summary(catalog, current_summary, target_role) {
        SummaryTemplate::EntryLevel => RewriteResult::rule_based(
            profile
                .map(|p| p.entry_level_template.to_string())
                .unwrap_or_else(|| {
                    format!(
                        "Student with a strong interest in {target_role}, building practical skills \
                         through academic studies and personal projects."
                    )
                }),
            ENTRY_LEVEL_EXPLANATION.to_string(),
        ),
        SummaryTemplate::Experienced => RewriteResult::rule_based(
            profile
                .map(|p| p.experienced_template.to_string())
                .unwrap_or_else(|| {
                    format!("{target_role} with a solid technical background and professional experience.")
                }),
            EXPERIENCED_EXPLANATION.to_string(),
        ),
    }
}
