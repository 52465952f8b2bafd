#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use keychat_cli::api::{ChatCompletionRequest, CompletionTransport, TransportResponse};
use keychat_cli::config::Config;
use keychat_cli::errors::{ConsoleError, RequestError};
use keychat_cli::ui::Console;
use reqwest::StatusCode;

pub const GOOD_KEY: &str = "sk-good";
pub const PONG: &str = r#"{"choices":[{"message":{"role":"assistant","content":" pong "}}]}"#;

pub fn config_with_log(path: &Path) -> Config {
    Config {
        log_path: path.to_path_buf(),
        ..Config::default()
    }
}

/// Console fed from a fixed list of lines. Reads past the end report
/// `Closed`, which makes `SessionController::run` return.
#[derive(Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
    pub clears: usize,
    pub beeps: usize,
    pub key_waits: usize,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        ScriptedConsole {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn printed(&self) -> String {
        self.output.join("\n")
    }

    pub fn prompt_count(&self, prompt: &str) -> usize {
        self.prompts.iter().filter(|p| *p == prompt).count()
    }

    fn next(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().ok_or(ConsoleError::Closed)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.next(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.next(prompt)
    }

    fn print_line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn clear(&mut self) -> Result<(), ConsoleError> {
        self.clears += 1;
        Ok(())
    }

    fn beep(&mut self) -> Result<(), ConsoleError> {
        self.beeps += 1;
        Ok(())
    }

    fn wait_for_key(&mut self) -> Result<(), ConsoleError> {
        self.key_waits += 1;
        Ok(())
    }

    fn while_busy<R>(&mut self, _message: &str, work: impl FnOnce() -> R) -> R {
        work()
    }
}

#[derive(Default)]
struct FakeState {
    chat_replies: VecDeque<(StatusCode, String)>,
    requests: Vec<(String, ChatCompletionRequest)>,
}

/// In-memory endpoint. Accepts exactly one key; chat requests are answered
/// from a queue, falling back to a "pong" reply.
#[derive(Clone)]
pub struct FakeEndpoint {
    valid_key: String,
    state: Rc<RefCell<FakeState>>,
}

impl FakeEndpoint {
    pub fn accepting(key: &str) -> Self {
        FakeEndpoint {
            valid_key: key.to_string(),
            state: Rc::default(),
        }
    }

    pub fn queue_reply(&self, status: StatusCode, body: &str) {
        self.state
            .borrow_mut()
            .chat_replies
            .push_back((status, body.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn requests(&self) -> Vec<(String, ChatCompletionRequest)> {
        self.state.borrow().requests.clone()
    }
}

impl CompletionTransport for FakeEndpoint {
    fn post_completion(
        &self,
        key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<TransportResponse, RequestError> {
        let mut state = self.state.borrow_mut();
        state.requests.push((key.to_string(), request.clone()));

        if key != self.valid_key {
            return Ok(TransportResponse {
                status: StatusCode::UNAUTHORIZED,
                body: r#"{"error":{"message":"Incorrect API key provided"}}"#.into(),
            });
        }
        if request.max_tokens == 1 {
            return Ok(TransportResponse {
                status: StatusCode::OK,
                body: PONG.into(),
            });
        }
        let (status, body) = state
            .chat_replies
            .pop_front()
            .unwrap_or((StatusCode::OK, PONG.to_string()));
        Ok(TransportResponse { status, body })
    }
}
