// Chat requests: one user message in, the first choice's text out.

use tracing::debug;

use crate::api::{ChatCompletionRequest, ChatCompletionResponse, CompletionTransport};
use crate::errors::RequestError;
use crate::validator::ValidatedKey;

pub const CHAT_MAX_TOKENS: u32 = 150;

/// Reply used when the endpoint answers without any choices.
pub const NO_RESPONSE: &str = "No response from AI.";

/// Sends one user message per call and returns the assistant's text.
#[derive(Clone)]
pub struct ChatClient<T> {
    transport: T,
    model: String,
}

impl<T: CompletionTransport> ChatClient<T> {
    pub fn new(transport: T, model: impl Into<String>) -> Self {
        ChatClient {
            transport,
            model: model.into(),
        }
    }

    pub fn send(&self, key: &ValidatedKey, user_text: &str) -> Result<String, RequestError> {
        let request = ChatCompletionRequest::single(&self.model, user_text, CHAT_MAX_TOKENS);
        let res = self.transport.post_completion(key.as_str(), &request)?;
        if !res.is_success() {
            return Err(RequestError::Status {
                status: res.status,
                body: res.body,
            });
        }
        let parsed: ChatCompletionResponse = serde_json::from_str(&res.body)?;
        let reply = parsed.first_reply().unwrap_or_else(|| {
            debug!("completion response carried no choices");
            NO_RESPONSE.to_string()
        });
        Ok(reply)
    }
}
