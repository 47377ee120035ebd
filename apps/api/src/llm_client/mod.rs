/// LLM Client — the single point of entry for all generative-model calls.
///
/// ARCHITECTURAL RULE: No other module may call a model API directly.
/// The rewriters only see the `GenerativeClient` trait, and every implementation
/// answers `None` instead of failing, so the deterministic path always runs.
///
/// One attempt per call, bounded by the configured timeout. No retries.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::optimizer::prompts::{
    build_headline_prompt, build_summary_prompt, HEADLINE_MAX_TOKENS, HEADLINE_SYSTEM,
    SUMMARY_MAX_TOKENS, SUMMARY_SYSTEM,
};

pub mod prompts;

use prompts::EXPLANATION_MARKER;

/// Longest headline accepted from a response that ignored the explanation marker.
pub const MAX_HEADLINE_CHARS: usize = 120;

const DEFAULT_HEADLINE_EXPLANATION: &str = "Headline tailored to the target role.";
const DEFAULT_SUMMARY_EXPLANATION: &str = "Summary tailored to the target role.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which profile section a generative call rewrites. Drives prompt and parsing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Headline,
    Summary,
}

/// A parsed generative rewrite: improved text plus a one-sentence explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Improvement {
    pub text: String,
    pub explanation: String,
}

/// Optional generative capability injected into both rewriters.
///
/// `None` means "unavailable": not configured, transport failure, timeout, malformed or
/// empty output. Implementations must never panic or surface errors past this trait.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn improve(&self, section: Section, text: &str, target_role: &str)
        -> Option<Improvement>;

    /// Whether a real backend is configured. Informational only; callers still
    /// have to handle `None` from `improve`.
    fn is_configured(&self) -> bool {
        true
    }

    async fn attempt_improve_headline(
        &self,
        current_headline: &str,
        target_role: &str,
    ) -> Option<Improvement> {
        self.improve(Section::Headline, current_headline, target_role)
            .await
    }

    async fn attempt_improve_summary(
        &self,
        current_summary: &str,
        target_role: &str,
    ) -> Option<Improvement> {
        self.improve(Section::Summary, current_summary, target_role)
            .await
    }
}

/// Used when no API key is configured or generation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl GenerativeClient for Unavailable {
    async fn improve(&self, _: Section, _: &str, _: &str) -> Option<Improvement> {
        None
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Builds the process-wide generative client once at startup.
pub fn from_config(config: &Config) -> Arc<dyn GenerativeClient> {
    let api_key = match &config.openai_api_key {
        Some(key) if config.generative_enabled() => key.clone(),
        _ => {
            info!("Generative client unavailable, using rule-based rewrites only");
            return Arc::new(Unavailable);
        }
    };

    match LlmClient::new(
        api_key,
        config.llm_base_url.clone(),
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    ) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", client.model());
            Arc::new(client)
        }
        Err(e) => {
            warn!("Failed to build LLM client, falling back to rule-based rewrites: {e}");
            Arc::new(Unavailable)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible chat completions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for OpenAI or any compatible endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single chat-completions call and returns the trimmed text of the first choice.
    pub async fn call(&self, system: &str, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl GenerativeClient for LlmClient {
    async fn improve(
        &self,
        section: Section,
        text: &str,
        target_role: &str,
    ) -> Option<Improvement> {
        let (system, prompt, max_tokens) = match section {
            Section::Headline => (
                HEADLINE_SYSTEM,
                build_headline_prompt(text, target_role),
                HEADLINE_MAX_TOKENS,
            ),
            Section::Summary => (
                SUMMARY_SYSTEM,
                build_summary_prompt(text, target_role),
                SUMMARY_MAX_TOKENS,
            ),
        };

        match self.call(system, &prompt, max_tokens).await {
            Ok(raw) => {
                let parsed = parse_improvement(section, &raw);
                if parsed.is_some() {
                    info!("LLM {section:?} optimization used");
                } else {
                    warn!("LLM {section:?} response had no usable text");
                }
                parsed
            }
            Err(e) => {
                warn!("LLM {section:?} call failed: {e}");
                None
            }
        }
    }
}

/// Splits a model response into body and explanation on the first `EXPLANATION:` marker.
///
/// Without the marker a headline is cut to 120 characters and a summary is kept whole,
/// each with a fixed explanation. An empty body yields `None`.
pub fn parse_improvement(section: Section, raw: &str) -> Option<Improvement> {
    let raw = raw.trim();

    let (text, explanation) = match raw.split_once(EXPLANATION_MARKER) {
        Some((body, explanation)) => {
            let body = body.trim();
            let body = match section {
                Section::Headline => body.trim_matches('"').to_string(),
                Section::Summary => body.to_string(),
            };
            (body, explanation.trim().to_string())
        }
        None => match section {
            Section::Headline => (
                raw.chars().take(MAX_HEADLINE_CHARS).collect(),
                DEFAULT_HEADLINE_EXPLANATION.to_string(),
            ),
            Section::Summary => (raw.to_string(), DEFAULT_SUMMARY_EXPLANATION.to_string()),
        },
    };

    if text.is_empty() {
        return None;
    }

    Some(Improvement { text, explanation })
}
