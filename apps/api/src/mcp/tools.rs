//! Tools, resources and prompts exposed over MCP.
//!
//! Each tool maps one-to-one onto an engine operation; arguments use the same field
//! names as the HTTP request bodies.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::info;

use crate::mcp::protocol::{McpError, PromptGetParams, ResourceReadParams, Tool, ToolCallParams};
use crate::optimizer::handlers::{HeadlineRequest, SummaryRequest};
use crate::optimizer::headline::rewrite_headline;
use crate::optimizer::orchestrator::{optimize_profile, OptimizeProfileRequest};
use crate::optimizer::summary::rewrite_summary;
use crate::state::AppState;

pub const TOOL_OPTIMIZE_HEADLINE: &str = "optimize_headline";
pub const TOOL_REWRITE_SUMMARY: &str = "rewrite_summary";
pub const TOOL_OPTIMIZE_PROFILE: &str = "optimize_profile";

pub const BEST_PRACTICES_URI: &str = "profile://best-practices";
pub const PROMPT_OPTIMIZE_FOR_ROLE: &str = "optimize_profile_for_role";

/// Longest summary excerpt embedded in the guidance prompt.
const PROMPT_SUMMARY_EXCERPT_CHARS: usize = 200;

const BEST_PRACTICES: &str = "\
# Profile best practices

- Lead the headline with the exact target role, then one focus area (e.g. `Backend Developer | APIs & Server-Side Systems`).
- Keep the headline under 120 characters; avoid bare titles like \"Engineer\" or \"Student\".
- Open the summary with who you are for the target role, then concrete experience.
- Use the role's vocabulary (tools, domains, practices) where it is true of you.
- Entry-level profiles should lean on coursework and projects; experienced profiles on outcomes.
- Write two to four short paragraphs rather than one block of text.
";

pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: TOOL_OPTIMIZE_HEADLINE,
            description: "Improve a profile headline to better match a target job role. \
                Use when the role and specialization should be clearer in the headline.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "current_headline": { "type": "string", "description": "Headline as it is today" },
                    "target_role": { "type": "string", "description": "Job title to optimize toward" }
                },
                "required": ["target_role"]
            }),
        },
        Tool {
            name: TOOL_REWRITE_SUMMARY,
            description: "Rewrite a profile summary to align with a target job role. \
                Use when the summary does not reflect the role, experience level, or relevant keywords.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "current_summary": { "type": "string", "description": "About/summary text as it is today" },
                    "target_role": { "type": "string", "description": "Job title to optimize toward" }
                },
                "required": ["target_role"]
            }),
        },
        Tool {
            name: TOOL_OPTIMIZE_PROFILE,
            description: "Score headline and summary against a target role, rewrite only the \
                sections that need it, and return the decision trace.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "current_headline": { "type": "string" },
                    "current_summary": { "type": "string" },
                    "target_role": { "type": "string" }
                },
                "required": ["target_role"]
            }),
        },
    ]
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}")))
}

fn require_role(target_role: &str) -> Result<(), McpError> {
    if target_role.trim().is_empty() {
        return Err(McpError::invalid_params("target_role cannot be empty"));
    }
    Ok(())
}

fn text_content(text: String) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

/// Runs one `tools/call` request.
pub async fn call_tool(state: &AppState, params: ToolCallParams) -> Result<Value, McpError> {
    info!(tool = %params.name, "MCP tool call");
    let generator = state.generator.as_ref();
    let catalog = state.catalog.as_ref();

    match params.name.as_str() {
        TOOL_OPTIMIZE_HEADLINE => {
            let request: HeadlineRequest = parse_arguments(params.arguments)?;
            require_role(&request.target_role)?;
            let result = rewrite_headline(
                generator,
                catalog,
                &request.current_headline,
                &request.target_role,
            )
            .await;
            Ok(text_content(format!(
                "Improved headline: {}\nExplanation: {}",
                result.improved_text, result.explanation
            )))
        }
        TOOL_REWRITE_SUMMARY => {
            let request: SummaryRequest = parse_arguments(params.arguments)?;
            require_role(&request.target_role)?;
            let result = rewrite_summary(
                generator,
                catalog,
                &request.current_summary,
                &request.target_role,
            )
            .await;
            Ok(text_content(format!(
                "Improved summary: {}\nExplanation: {}",
                result.improved_text, result.explanation
            )))
        }
        TOOL_OPTIMIZE_PROFILE => {
            let request: OptimizeProfileRequest = parse_arguments(params.arguments)?;
            require_role(&request.target_role)?;
            let response = optimize_profile(generator, catalog, &request).await;
            let text = serde_json::to_string_pretty(&response)
                .map_err(|e| McpError::internal(format!("Failed to encode result: {e}")))?;
            Ok(text_content(text))
        }
        other => Err(McpError::invalid_params(format!("Unknown tool: {other}"))),
    }
}

pub fn list_resources() -> Value {
    json!({
        "resources": [{
            "uri": BEST_PRACTICES_URI,
            "name": "Profile best practices",
            "description": "Short static reference for headline and summary best practices.",
            "mimeType": "text/markdown"
        }]
    })
}

pub fn read_resource(params: ResourceReadParams) -> Result<Value, McpError> {
    if params.uri != BEST_PRACTICES_URI {
        return Err(McpError::invalid_params(format!("Unknown resource: {}", params.uri)));
    }
    Ok(json!({
        "contents": [{
            "uri": BEST_PRACTICES_URI,
            "mimeType": "text/markdown",
            "text": BEST_PRACTICES
        }]
    }))
}

pub fn list_prompts() -> Value {
    json!({
        "prompts": [{
            "name": PROMPT_OPTIMIZE_FOR_ROLE,
            "description": "Guide a model through optimizing a profile for a specific role.",
            "arguments": [
                { "name": "target_role", "description": "Job title to optimize toward", "required": true },
                { "name": "current_headline", "description": "Current headline", "required": false },
                { "name": "current_summary", "description": "Current summary", "required": false }
            ]
        }]
    })
}

pub fn get_prompt(params: PromptGetParams) -> Result<Value, McpError> {
    if params.name != PROMPT_OPTIMIZE_FOR_ROLE {
        return Err(McpError::invalid_params(format!("Unknown prompt: {}", params.name)));
    }
    let request: OptimizeProfileRequest = parse_arguments(params.arguments)?;
    require_role(&request.target_role)?;

    Ok(json!({
        "description": "Optimize a profile for a target role",
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": build_role_prompt(&request) }
        }]
    }))
}

/// Guidance prompt for a model that will drive the tools itself.
pub fn build_role_prompt(request: &OptimizeProfileRequest) -> String {
    let mut parts = vec![format!(
        "Optimize this LinkedIn profile for the role: **{}**.",
        request.target_role
    )];

    if !request.current_headline.is_empty() {
        parts.push(format!("Current headline: {}", request.current_headline));
    }

    if !request.current_summary.is_empty() {
        let excerpt: String = request
            .current_summary
            .chars()
            .take(PROMPT_SUMMARY_EXCERPT_CHARS)
            .collect();
        parts.push(format!("Current summary (excerpt): {excerpt}..."));
    }

    parts.push(
        "Use the available tools to improve clarity, role alignment, \
         and relevance of the headline and summary."
            .to_string(),
    );

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(headline: &str, summary: &str) -> OptimizeProfileRequest {
        OptimizeProfileRequest {
            current_headline: headline.to_string(),
            current_summary: summary.to_string(),
            target_role: "Data Analyst".to_string(),
        }
    }

    #[test]
    fn test_tool_names_cover_all_operations() {
        let names: Vec<&str> = tool_definitions().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![TOOL_OPTIMIZE_HEADLINE, TOOL_REWRITE_SUMMARY, TOOL_OPTIMIZE_PROFILE]
        );
    }

    #[test]
    fn test_role_prompt_skips_empty_sections() {
        let prompt = build_role_prompt(&request("", ""));
        assert_eq!(prompt.lines().count(), 2);
        assert!(prompt.starts_with("Optimize this LinkedIn profile for the role: **Data Analyst**."));
    }

    #[test]
    fn test_role_prompt_limits_summary_excerpt() {
        let summary = "s".repeat(500);
        let prompt = build_role_prompt(&request("Analyst", &summary));
        let line = prompt
            .lines()
            .find(|l| l.starts_with("Current summary (excerpt): "))
            .unwrap();
        let excerpt = line
            .trim_start_matches("Current summary (excerpt): ")
            .trim_end_matches("...");
        assert_eq!(excerpt.chars().count(), PROMPT_SUMMARY_EXCERPT_CHARS);
        assert!(prompt.contains("Current headline: Analyst"));
    }

    #[test]
    fn test_unknown_resource_is_invalid_params() {
        let err = read_resource(ResourceReadParams {
            uri: "profile://nope".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.code, crate::mcp::protocol::INVALID_PARAMS);
    }

    #[test]
    fn test_get_prompt_requires_role() {
        let err = get_prompt(PromptGetParams {
            name: PROMPT_OPTIMIZE_FOR_ROLE.to_string(),
            arguments: json!({"target_role": ""}),
        })
        .unwrap_err();
        assert!(err.message.contains("target_role"));
    }
}
