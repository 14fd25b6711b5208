use serde::{Deserialize, Serialize};

/// An auxiliary upload: filename plus lossily decoded text content.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub answer: String,
    pub references: Vec<String>,
    pub chart_base64: Option<String>,
    pub other_files_received: Vec<String>,
}

// ── Chat-completions wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// The slice of the completion body we read; everything else is opaque.
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_body_parses_first_choice_content() {
        let body = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "hello"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2}
        }"#;
        let parsed: ChatCompletion = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn completion_body_without_content_is_data_not_error() {
        let body = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let parsed: ChatCompletion = serde_json::from_str(body).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn completion_body_without_choices_parses_empty() {
        let parsed: ChatCompletion = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }
}
