// API client module: the chat completions wire types and a small blocking
// HTTP client that posts them. Validation and chat both go through the
// `CompletionTransport` trait so the session logic never sees reqwest.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::errors::RequestError;

/// One entry of the `messages` array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        ChatMessage {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Request body for the completions endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// A request carrying a single user message.
    pub fn single(model: &str, content: &str, max_tokens: u32) -> Self {
        ChatCompletionRequest {
            model: model.into(),
            messages: vec![ChatMessage::user(content)],
            max_tokens,
        }
    }
}

/// The part of a completion response we read. Everything else is ignored.
#[derive(Deserialize, Debug, Default)]
pub struct ChatCompletionResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, if there is one.
    pub fn first_reply(&self) -> Option<String> {
        self.choices.first().map(|choice| {
            choice
                .message
                .content
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Choice>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Status and raw body of an endpoint response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Sends one completion request using `key` as the bearer credential.
pub trait CompletionTransport {
    fn post_completion(
        &self,
        key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<TransportResponse, RequestError>;
}

/// Blocking reqwest client bound to the completions endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            url: config.api_url.clone(),
        })
    }

    fn auth_headers(key: &str) -> Result<HeaderMap, RequestError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| RequestError::InvalidCredential)?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

impl CompletionTransport for ApiClient {
    fn post_completion(
        &self,
        key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<TransportResponse, RequestError> {
        debug!(
            url = %self.url,
            model = %request.model,
            max_tokens = request.max_tokens,
            "posting completion request"
        );
        let res = self
            .client
            .post(&self.url)
            .headers(Self::auth_headers(key)?)
            .json(request)
            .send()?;
        let status = res.status();
        let body = res.text()?;
        debug!(%status, bytes = body.len(), "completion response received");
        Ok(TransportResponse { status, body })
    }
}
