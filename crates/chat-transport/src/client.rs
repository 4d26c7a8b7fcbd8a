//! Chat-completions client

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    extract_reply, ChatError, ChatMessage, ChatRequest, ChatResponse, ChatResult, RetryPolicy,
};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub user_agent: String,
    /// OpenRouter requires a referer alongside the bearer token
    pub referer: String,
    pub app_title: String,
    pub retry: RetryPolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "openrouter/auto".to_string(),
            system_prompt: "You are a precise coding assistant. Keep explanations brief unless \
                            asked; return complete, runnable examples for programming questions."
                .to_string(),
            temperature: 0.2,
            max_tokens: 512,
            timeout: Duration::from_secs(60),
            user_agent: "Cloak/0.1".to_string(),
            referer: "https://cloak-chat.local".to_string(),
            app_title: "Cloak".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Async chat client with bounded retries
pub struct ChatClient {
    http: reqwest::Client,
    config: ChatConfig,
    api_key: String,
}

impl ChatClient {
    pub fn new(api_key: impl Into<String>, config: ChatConfig) -> ChatResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ChatError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Send one user query and return the assistant text.
    ///
    /// Retries rate-limit, server-error, network, and timeout conditions up
    /// to the policy budget; auth and malformed-response failures are final
    /// immediately.
    pub async fn send_query(&self, query: &str) -> ChatResult<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ChatError::EmptyQuery);
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(&self.config.system_prompt),
                ChatMessage::user(query),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let correlation = Uuid::new_v4();
        let mut attempt = 0;
        loop {
            match self.dispatch(&request, correlation, attempt).await {
                Ok(reply) => return Ok(reply),
                Err(error) if error_is_retryable(&error) && self.config.retry.can_retry(attempt) => {
                    let delay = self.config.retry.backoff(attempt);
                    warn!(
                        %correlation,
                        attempt,
                        error = %error,
                        delay_ms = delay.as_millis() as u64,
                        "chat attempt failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ChatRequest,
        correlation: Uuid,
        attempt: u32,
    ) -> ChatResult<String> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", self.config.referer.as_str())
            .header("X-Title", self.config.app_title.as_str())
            .json(request)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_request_error)?;
        let body_head: String = body.chars().take(200).collect();
        debug!(
            %correlation,
            attempt,
            status = status.as_u16(),
            %body_head,
            "chat completion response"
        );

        if status == StatusCode::UNAUTHORIZED {
            return Err(ChatError::Auth);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if status.is_server_error() {
            return Err(ChatError::Server(status.as_u16()));
        }

        let decoded: ChatResponse = serde_json::from_str(&body).map_err(|_| {
            ChatError::MalformedResponse("response body is not JSON".to_string())
        })?;
        extract_reply(decoded)
    }
}

fn error_is_retryable(error: &ChatError) -> bool {
    matches!(
        error,
        ChatError::RateLimited | ChatError::Server(_) | ChatError::Network(_) | ChatError::Timeout
    )
}

fn classify_request_error(error: reqwest::Error) -> ChatError {
    if error.is_timeout() {
        ChatError::Timeout
    } else {
        ChatError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(matches!(
            ChatClient::new("", ChatConfig::default()),
            Err(ChatError::MissingApiKey)
        ));
        assert!(matches!(
            ChatClient::new("   ", ChatConfig::default()),
            Err(ChatError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_empty_query_fails_before_any_request() {
        let client = ChatClient::new("sk-test", ChatConfig::default()).unwrap();
        assert!(matches!(
            client.send_query("   ").await,
            Err(ChatError::EmptyQuery)
        ));
    }

    #[test]
    fn test_retry_classification() {
        assert!(error_is_retryable(&ChatError::RateLimited));
        assert!(error_is_retryable(&ChatError::Server(503)));
        assert!(error_is_retryable(&ChatError::Network("reset".into())));
        assert!(error_is_retryable(&ChatError::Timeout));

        assert!(!error_is_retryable(&ChatError::Auth));
        assert!(!error_is_retryable(&ChatError::MalformedResponse("x".into())));
        assert!(!error_is_retryable(&ChatError::Api("x".into())));
        assert!(!error_is_retryable(&ChatError::EmptyQuery));
    }
}
