// All LLM prompt constants for the profile rewriters.
// The output marker itself lives in llm_client::prompts.

/// Longest slice of the current summary sent to the model.
pub const SUMMARY_INPUT_CHARS: usize = 2000;

pub const HEADLINE_MAX_TOKENS: u32 = 150;
pub const SUMMARY_MAX_TOKENS: u32 = 600;

/// System prompt for headline rewriting.
pub const HEADLINE_SYSTEM: &str = "You are a LinkedIn profile expert. \
    Improve the user's headline to better match the target job role. \
    Keep it concise (under 120 characters). \
    Return only the improved headline, then on a new line write \
    'EXPLANATION:' followed by one short sentence.";

/// System prompt for summary rewriting.
pub const SUMMARY_SYSTEM: &str = "You are a LinkedIn profile expert. \
    Rewrite the user's About/Summary to align with the target job role. \
    Keep the user's real experience and wording where possible, \
    while improving structure and keywords. \
    Write 2-4 short paragraphs. \
    Then add a new line with 'EXPLANATION:' followed by one short sentence.";

pub fn build_headline_prompt(current_headline: &str, target_role: &str) -> String {
    format!("Target role: {target_role}\nCurrent headline: {current_headline}")
}

pub fn build_summary_prompt(current_summary: &str, target_role: &str) -> String {
    let excerpt: String = current_summary.chars().take(SUMMARY_INPUT_CHARS).collect();
    format!("Target role: {target_role}\nCurrent summary:\n{excerpt}")
}
