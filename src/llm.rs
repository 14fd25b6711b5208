use crate::config::Config;
use crate::models::{ChatCompletion, ChatMessage, ChatRequest};
use crate::prompt::SYSTEM_PROMPT;

// ── Constants ────────────────────────────────────────────────────────────────

const TEMPERATURE: f32 = 0.3;

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Missing required field 'questions_file'")]
    MissingQuestionsFile,
    #[error("questions_file is not valid UTF-8")]
    InvalidTaskEncoding,
    #[error("Invalid multipart upload: {0}")]
    Multipart(String),
    #[error("LLM API error {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("{0}")]
    Request(String),
    #[error("LLM response did not contain completion content")]
    MalformedCompletion,
}

// ── Outbound call ────────────────────────────────────────────────────────────

/// Sends the prompt to the chat-completions endpoint and returns the first
/// choice's message content. One call, no retries.
pub async fn complete(
    client: &reqwest::Client,
    config: &Config,
    prompt: &str,
) -> Result<String, AgentError> {
    let request = ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: TEMPERATURE,
    };

    let response = client
        .post(format!("{}/chat/completions", config.base_url))
        .bearer_auth(&config.api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AgentError::Request(format!("TimeoutError: {}", e))
            } else if e.is_connect() {
                AgentError::Request(format!("ConnectError: {}", e))
            } else {
                AgentError::Request(format!("RequestError: {}", e))
            }
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AgentError::Request(format!("RequestError: {}", e)))?;

    if !status.is_success() {
        return Err(AgentError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let completion: ChatCompletion =
        serde_json::from_str(&body).map_err(|_| AgentError::MalformedCompletion)?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(AgentError::MalformedCompletion)
}
