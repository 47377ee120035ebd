// Profile optimization engine: decision heuristics plus rule-based rewrites.
// Generative rewrites are optional and go through llm_client only.

pub mod decision;
pub mod handlers;
pub mod headline;
pub mod orchestrator;
pub mod prompts;
pub mod roles;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::llm_client::Improvement;

/// Output of a single rewriter call.
///
/// `generative_model_used` is true only when the generative client returned a
/// non-empty parsed result for this call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub improved_text: String,
    pub explanation: String,
    pub generative_model_used: bool,
}

impl RewriteResult {
    pub fn generated(improvement: Improvement) -> Self {
        Self {
            improved_text: improvement.text,
            explanation: improvement.explanation,
            generative_model_used: true,
        }
    }

    pub fn rule_based(improved_text: String, explanation: String) -> Self {
        Self {
            improved_text,
            explanation,
            generative_model_used: false,
        }
    }
}
