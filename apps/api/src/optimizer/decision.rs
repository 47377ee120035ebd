//! Decision Engine — scores headline and summary against a target role and decides
//! which rewrite tools to run.
//!
//! Pure keyword/length heuristics, no LLM call. Every triggered rule adds points and
//! appends a reason, in rule order, so callers can see exactly why a section was flagged.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::optimizer::roles::{first_token, is_generic_headline, RoleCatalog};

/// A section is flagged for rewriting at or above this score.
pub const REWRITE_THRESHOLD: u32 = 2;

/// Headlines shorter than this (in characters, after trimming) are "too short".
pub const MIN_HEADLINE_CHARS: usize = 15;

/// Summaries shorter than this (in characters, after trimming) are "too short".
pub const MIN_SUMMARY_CHARS: usize = 100;

/// A summary scoring below this is left alone when the headline scored 0.
pub const SEVERE_SUMMARY_SCORE: u32 = 3;

pub const REASON_GENERIC_HEADLINE: &str = "generic headline";
pub const REASON_MISSING_ROLE_KEYWORD: &str = "missing role keyword";
pub const REASON_HEADLINE_TOO_SHORT: &str = "headline too short";
pub const REASON_MISSING_ROLE_KEYWORDS: &str = "missing role keywords";
pub const REASON_SUMMARY_TOO_SHORT: &str = "summary too short";
pub const REASON_STRONG_HEADLINE: &str = "summary acceptable given strong headline";

/// The rewrite operations the engine can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteTool {
    RewriteHeadline,
    RewriteSummary,
}

impl RewriteTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteTool::RewriteHeadline => "rewrite_headline",
            RewriteTool::RewriteSummary => "rewrite_summary",
        }
    }
}

impl std::fmt::Display for RewriteTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and ordered reasons for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl ScoreReport {
    fn add(&mut self, points: u32, reason: &str) {
        self.score += points;
        self.reasons.push(reason.to_string());
    }
}

/// Per-section breakdown, serialised as `{"headline": {...}, "summary": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub headline: ScoreReport,
    pub summary: ScoreReport,
}

/// Output of [`decide`]: tools in fixed order (headline before summary) plus the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub tools: Vec<RewriteTool>,
    pub decision_trace: DecisionTrace,
}

impl Decision {
    pub fn wants(&self, tool: RewriteTool) -> bool {
        self.tools.contains(&tool)
    }
}

/// Scores both sections and flags the ones that need rewriting.
///
/// Headline: +2 generic phrase, +2 role's first token missing, +1 shorter than 15 chars.
/// Summary: +2 none of the role-family keywords present, +1 shorter than 100 chars.
/// If the headline scored exactly 0 and the summary scored below 3, the summary score
/// is reset to 0. Each section is flagged at a score of 2 or more.
pub fn decide(
    catalog: &RoleCatalog,
    current_headline: &str,
    current_summary: &str,
    target_role: &str,
) -> Decision {
    let headline = score_headline(current_headline, target_role);
    let summary = score_summary(catalog, current_summary, target_role, headline.score);

    let mut tools = Vec::with_capacity(2);
    if headline.score >= REWRITE_THRESHOLD {
        tools.push(RewriteTool::RewriteHeadline);
    }
    if summary.score >= REWRITE_THRESHOLD {
        tools.push(RewriteTool::RewriteSummary);
    }

    let decision_trace = DecisionTrace { headline, summary };

    info!(
        headline_score = decision_trace.headline.score,
        headline_reasons = ?decision_trace.headline.reasons,
        summary_score = decision_trace.summary.score,
        summary_reasons = ?decision_trace.summary.reasons,
        "Decision trace"
    );
    info!(tools = ?tools, "Final tools");

    Decision {
        tools,
        decision_trace,
    }
}

fn score_headline(current_headline: &str, target_role: &str) -> ScoreReport {
    let headline_lower = current_headline.trim().to_lowercase();
    let role_token = first_token(target_role);
    let mut report = ScoreReport::default();

    if is_generic_headline(&headline_lower) {
        report.add(2, REASON_GENERIC_HEADLINE);
    }

    if !role_token.is_empty() && !headline_lower.contains(role_token.as_str()) {
        report.add(2, REASON_MISSING_ROLE_KEYWORD);
    }

    if headline_lower.chars().count() < MIN_HEADLINE_CHARS {
        report.add(1, REASON_HEADLINE_TOO_SHORT);
    }

    report
}

fn score_summary(
    catalog: &RoleCatalog,
    current_summary: &str,
    target_role: &str,
    headline_score: u32,
) -> ScoreReport {
    let summary_lower = current_summary.trim().to_lowercase();
    let keywords = catalog.family_keywords(target_role);
    let mut report = ScoreReport::default();

    if !keywords.is_empty() && !keywords.iter().any(|k| summary_lower.contains(k)) {
        report.add(2, REASON_MISSING_ROLE_KEYWORDS);
    }

    if summary_lower.chars().count() < MIN_SUMMARY_CHARS {
        report.add(1, REASON_SUMMARY_TOO_SHORT);
    }

    if headline_score == 0 && report.score < SEVERE_SUMMARY_SCORE {
        report.score = 0;
        report.reasons.push(REASON_STRONG_HEADLINE.to_string());
    }

    report
}
