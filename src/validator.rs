// Key validation: a one-token trial request decides whether a candidate API
// key is usable. Any failure to get a 2xx answer counts as invalid.

use std::fmt;

use tracing::{info, warn};

use crate::api::{ChatCompletionRequest, CompletionTransport};

pub const VALIDATION_PROMPT: &str = "test";
pub const VALIDATION_MAX_TOKENS: u32 = 1;

/// An API key the endpoint has accepted. Only [`KeyValidator::authorize`]
/// hands these out, so holding one proves validation happened.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedKey(String);

impl ValidatedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ValidatedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatedKey(..)")
    }
}

/// Checks a candidate key with the cheapest possible completion request.
#[derive(Clone)]
pub struct KeyValidator<T> {
    transport: T,
    model: String,
}

impl<T: CompletionTransport> KeyValidator<T> {
    pub fn new(transport: T, model: impl Into<String>) -> Self {
        KeyValidator {
            transport,
            model: model.into(),
        }
    }

    /// True iff the endpoint answers the trial request with a 2xx status.
    /// Transport failures count as an invalid key.
    pub fn validate(&self, key: &str) -> bool {
        let request =
            ChatCompletionRequest::single(&self.model, VALIDATION_PROMPT, VALIDATION_MAX_TOKENS);
        match self.transport.post_completion(key, &request) {
            Ok(resp) if resp.is_success() => {
                info!("API key accepted");
                true
            }
            Ok(resp) => {
                info!(status = %resp.status, "API key rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "API key validation request failed");
                false
            }
        }
    }

    pub fn authorize(&self, key: &str) -> Option<ValidatedKey> {
        self.validate(key).then(|| ValidatedKey(key.to_string()))
    }
}
