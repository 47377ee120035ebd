//! Agent-tool front end: MCP over line-delimited JSON-RPC on stdio.
//!
//! stdout carries protocol messages only. Logs go to stderr.

pub mod protocol;
pub mod tools;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

use crate::state::AppState;
use protocol::{JsonRpcRequest, JsonRpcResponse, McpError, PROTOCOL_VERSION};

const SERVER_NAME: &str = "profile-optimizer";

const INSTRUCTIONS: &str = "Tools for optimizing professional profiles. \
    The server exposes focused tools for headline and summary rewriting, plus a combined \
    tool that decides which sections need work, intended for AI-driven orchestration \
    rather than direct user interaction.";

pub struct McpServer {
    state: AppState,
}

impl McpServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Serves requests until the reader hits EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("MCP client closed the connection");
        Ok(())
    }

    /// Handles one raw message. Notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                error!("Invalid JSON-RPC request: {e}");
                return Some(JsonRpcResponse::from_result(
                    Value::Null,
                    Err(McpError::parse_error(format!("Parse error: {e}"))),
                ));
            }
        };

        match request.id {
            Some(id) => {
                let result = self.dispatch(&request.method, request.params).await;
                Some(JsonRpcResponse::from_result(id, result))
            }
            None => {
                debug!(method = %request.method, "MCP notification");
                None
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": { "listChanged": false },
                    "resources": { "listChanged": false, "subscribe": false },
                    "prompts": { "listChanged": false }
                },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
                "instructions": INSTRUCTIONS
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::tool_definitions() })),
            "tools/call" => tools::call_tool(&self.state, params_as(params)?).await,
            "resources/list" => Ok(tools::list_resources()),
            "resources/read" => tools::read_resource(params_as(params)?),
            "prompts/list" => Ok(tools::list_prompts()),
            "prompts/get" => tools::get_prompt(params_as(params)?),
            other => Err(McpError::method_not_found(other)),
        }
    }
}

fn params_as<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    let params = params.ok_or_else(|| McpError::invalid_params("Missing params"))?;
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(format!("Invalid params: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::Unavailable;
    use crate::optimizer::roles::RoleCatalog;
    use protocol::{INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};

    fn server() -> McpServer {
        McpServer::new(AppState::new(
            Config::default(),
            RoleCatalog::builtin(),
            Arc::new(Unavailable),
        ))
    }

    async fn call(server: &McpServer, message: Value) -> Value {
        let response = server.handle_line(&message.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    fn tool_text(response: &Value) -> &str {
        response["result"]["content"][0]["text"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_initialize_reports_protocol_and_capabilities() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert!(response["result"]["capabilities"]["tools"].is_object());
        assert!(response.get("error").is_none());
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_has_three_tools() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}),
        )
        .await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 3);
        assert!(tools[0]["inputSchema"]["properties"]["target_role"].is_object());
    }

    #[tokio::test]
    async fn test_optimize_headline_tool() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                "params": {
                    "name": "optimize_headline",
                    "arguments": {"current_headline": "engineer", "target_role": "backend"}
                }
            }),
        )
        .await;
        let text = tool_text(&response);
        assert!(text.starts_with("Improved headline: backend | APIs & Server-Side Systems\n"));
        assert!(text.contains("Explanation: "));
    }

    #[tokio::test]
    async fn test_rewrite_summary_tool() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {
                    "name": "rewrite_summary",
                    "arguments": {"current_summary": "", "target_role": "Data Scientist"}
                }
            }),
        )
        .await;
        let text = tool_text(&response);
        assert!(text.starts_with("Improved summary: Student with a strong foundation in data science"));
        assert!(text.ends_with("Explanation: Summary rewritten for a student or entry-level candidate."));
    }

    #[tokio::test]
    async fn test_optimize_profile_tool_returns_json_result() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 4, "method": "tools/call",
                "params": {
                    "name": "optimize_profile",
                    "arguments": {"current_headline": "graduate", "target_role": "Astronaut"}
                }
            }),
        )
        .await;
        let result: Value = serde_json::from_str(tool_text(&response)).unwrap();
        assert_eq!(result["optimized_headline"], "Astronaut");
        assert_eq!(result["generative_model_used"], false);
        assert!(result["decision_trace"]["headline"]["reasons"].is_array());
    }

    #[tokio::test]
    async fn test_tool_call_with_bad_arguments() {
        let response = call(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 5, "method": "tools/call",
                "params": {"name": "optimize_headline", "arguments": {"current_headline": "x"}}
            }),
        )
        .await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
        assert!(response.get("result").is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 6, "method": "sampling/createMessage"}),
        )
        .await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_garbage_line_is_parse_error_with_null_id() {
        let response = server().handle_line("{not json").await.unwrap();
        let response = serde_json::to_value(response).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert!(response["id"].is_null());
    }

    #[tokio::test]
    async fn test_resources_and_prompts() {
        let server = server();
        let read = call(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 7, "method": "resources/read",
                "params": {"uri": tools::BEST_PRACTICES_URI}
            }),
        )
        .await;
        assert!(read["result"]["contents"][0]["text"]
            .as_str()
            .unwrap()
            .contains("headline"));

        let prompt = call(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 8, "method": "prompts/get",
                "params": {
                    "name": tools::PROMPT_OPTIMIZE_FOR_ROLE,
                    "arguments": {"target_role": "QA Engineer", "current_headline": "Tester"}
                }
            }),
        )
        .await;
        let text = prompt["result"]["messages"][0]["content"]["text"]
            .as_str()
            .unwrap();
        assert!(text.contains("**QA Engineer**"));
        assert!(text.contains("Current headline: Tester"));
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(first["result"], json!({}));
    }
}
