//! Headline Rewriter — generative rewrite when available, otherwise
//! `"{target_role} | {tagline}"` composition from the role catalog.

use crate::llm_client::GenerativeClient;
use crate::optimizer::roles::{is_generic_headline, RoleCatalog};
use crate::optimizer::RewriteResult;

const DETAILED_EXPLANATION: &str = "Your existing headline was considered; you can manually merge in \
    specific details (e.g. years of experience) if needed.";

const GENERIC_EXPLANATION: &str =
    "Headline rewritten to clearly reflect the target role and a relevant focus area.";

/// Rewrites a headline toward `target_role`. Never fails: any generative miss falls
/// through to [`compose_headline`].
pub async fn rewrite_headline(
    generator: &dyn GenerativeClient,
    catalog: &RoleCatalog,
    current_headline: &str,
    target_role: &str,
) -> RewriteResult {
    let target = target_role.trim();
    let current = current_headline.trim();

    if let Some(improvement) = generator.attempt_improve_headline(current, target).await {
        return RewriteResult::generated(improvement);
    }

    compose_headline(catalog, current, target)
}

/// Deterministic headline: role plus tagline when the role resolves (fuzzily) to a
/// catalog entry, the bare role otherwise.
pub fn compose_headline(
    catalog: &RoleCatalog,
    current_headline: &str,
    target_role: &str,
) -> RewriteResult {
    let target = target_role.trim();
    let current = current_headline.trim();

    let improved_text = match catalog.fuzzy(target) {
        Some(profile) => format!("{target} | {}", profile.tagline),
        None => target.to_string(),
    };

    let explanation = if !current.is_empty() && !is_generic_headline(current) {
        format!(
            "Headline focused on target role '{target}' with a clear specialization. {DETAILED_EXPLANATION}"
        )
    } else {
        GENERIC_EXPLANATION.to_string()
    };

    RewriteResult::rule_based(improved_text, explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{Improvement, Section, Unavailable};
    use crate::optimizer::decision::{decide, RewriteTool};
    use crate::optimizer::test_support::FixedGenerator;

    fn catalog() -> RoleCatalog {
        RoleCatalog::builtin()
    }

    #[tokio::test]
    async fn test_known_role_gets_tagline() {
        let result = rewrite_headline(&Unavailable, &catalog(), "engineer", "Backend Developer").await;
        assert_eq!(result.improved_text, "Backend Developer | APIs & Server-Side Systems");
        assert!(!result.generative_model_used);
    }

    #[tokio::test]
    async fn test_partial_role_resolves_by_first_token() {
        let result = rewrite_headline(&Unavailable, &catalog(), "", "backend").await;
        assert_eq!(result.improved_text, "backend | APIs & Server-Side Systems");
    }

    #[tokio::test]
    async fn test_unknown_role_uses_raw_role() {
        let result = rewrite_headline(&Unavailable, &catalog(), "pilot", "  Astronaut ").await;
        assert_eq!(result.improved_text, "Astronaut");
        assert!(!result.generative_model_used);
    }

    #[test]
    fn test_generic_original_gets_short_explanation() {
        let result = compose_headline(&catalog(), "Graduate", "QA Engineer");
        assert_eq!(result.explanation, GENERIC_EXPLANATION);

        let result = compose_headline(&catalog(), "   ", "QA Engineer");
        assert_eq!(result.explanation, GENERIC_EXPLANATION);
    }

    #[test]
    fn test_specific_original_gets_detailed_explanation() {
        let result = compose_headline(&catalog(), "Tester at Acme", "QA Engineer");
        assert!(result
            .explanation
            .starts_with("Headline focused on target role 'QA Engineer'"));
        assert!(result.explanation.contains("years of experience"));
    }

    #[tokio::test]
    async fn test_generative_result_is_used_and_flagged() {
        let generator = FixedGenerator::answering("Backend Developer | Rust & Go", "Sharper focus.");
        let result = rewrite_headline(&generator, &catalog(), " engineer ", "Backend Developer").await;
        assert_eq!(result.improved_text, "Backend Developer | Rust & Go");
        assert_eq!(result.explanation, "Sharper focus.");
        assert!(result.generative_model_used);

        let calls = generator.calls();
        assert_eq!(
            calls,
            vec![(Section::Headline, "engineer".to_string(), "Backend Developer".to_string())]
        );
    }

    #[tokio::test]
    async fn test_generative_miss_falls_back() {
        let generator = FixedGenerator::failing();
        let result = rewrite_headline(&generator, &catalog(), "engineer", "Data Scientist").await;
        assert_eq!(result.improved_text, "Data Scientist | ML & Data-Driven Insights");
        assert!(!result.generative_model_used);
        assert_eq!(generator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_rewriting_twice_keeps_tagline() {
        let catalog = catalog();
        let role = "Backend Developer";
        let first = rewrite_headline(&Unavailable, &catalog, "engineer", role).await;

        let decision = decide(&catalog, &first.improved_text, "", role);
        assert_eq!(decision.decision_trace.headline.score, 0);
        assert!(!decision.wants(RewriteTool::RewriteHeadline));

        let second = rewrite_headline(&Unavailable, &catalog, &first.improved_text, role).await;
        assert_eq!(second.improved_text, first.improved_text);
    }

    #[test]
    fn test_improvement_maps_into_result() {
        let result = RewriteResult::generated(Improvement {
            text: "x".to_string(),
            explanation: "y".to_string(),
        });
        assert!(result.generative_model_used);
    }
}
