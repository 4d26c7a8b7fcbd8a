//! Chat-completions wire types (OpenAI shape, OpenRouter-compatible)

use serde::{Deserialize, Serialize};

use crate::{ChatError, ChatResult};

/// One message in the conversation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Request payload for the completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

/// Response body, decoded permissively. Providers disagree on the exact
/// shape, so every field is optional and [`extract_reply`] walks the
/// fallback chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Pull the assistant text out of a decoded response body.
///
/// Order: top-level `error` object, `choices[0].message.content`,
/// `choices[0].text`, then a bare top-level `output` string.
pub fn extract_reply(response: ChatResponse) -> ChatResult<String> {
    if let Some(error) = response.error {
        let message = error.message.unwrap_or_else(|| "unknown API error".to_string());
        return Err(ChatError::Api(message));
    }

    let Some(choice) = response.choices.into_iter().next() else {
        return match response.output {
            Some(output) => Ok(output),
            None => Err(ChatError::MalformedResponse("no choices".to_string())),
        };
    };

    let content = choice.message.and_then(|m| m.content).or(choice.text);
    match content {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(ChatError::MalformedResponse(
            "empty assistant message".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> ChatResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_message_content() {
        let response = decode(
            r#"{"choices":[{"message":{"role":"assistant","content":"hello there"}}]}"#,
        );
        assert_eq!(extract_reply(response).unwrap(), "hello there");
    }

    #[test]
    fn test_extract_legacy_text_field() {
        let response = decode(r#"{"choices":[{"text":"legacy completion"}]}"#);
        assert_eq!(extract_reply(response).unwrap(), "legacy completion");
    }

    #[test]
    fn test_extract_bare_output_when_choices_missing() {
        let response = decode(r#"{"output":"bare output"}"#);
        assert_eq!(extract_reply(response).unwrap(), "bare output");
    }

    #[test]
    fn test_api_error_object_wins() {
        let response = decode(
            r#"{"error":{"message":"model overloaded"},"choices":[{"text":"ignored"}]}"#,
        );
        match extract_reply(response) {
            Err(ChatError::Api(message)) => assert_eq!(message, "model overloaded"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let response = decode(r#"{"choices":[]}"#);
        assert!(matches!(
            extract_reply(response),
            Err(ChatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_content_is_malformed() {
        let response = decode(r#"{"choices":[{"message":{"content":""}}]}"#);
        assert!(matches!(
            extract_reply(response),
            Err(ChatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_request_serializes_expected_fields() {
        let request = ChatRequest {
            model: "openrouter/auto".to_string(),
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
            temperature: 0.2,
            max_tokens: 512,
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "openrouter/auto");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["stream"], false);
    }
}
