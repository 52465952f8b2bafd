// Menu-driven session: passcode gate, API key validation, then a chat loop.
//
// `SessionController` is a small state machine. Each call to `step` performs
// one state's console interaction and returns the next state; `run` loops
// until console input is exhausted.

use tracing::{info, warn};

use crate::api::CompletionTransport;
use crate::attempt_log::{AttemptLog, LoginOutcome};
use crate::chat::ChatClient;
use crate::config::Config;
use crate::errors::{ConsoleError, RequestError};
use crate::ui::Console;
use crate::validator::{KeyValidator, ValidatedKey};

const CHAT_DIVIDER: &str = "----------------------------------------";
const WELCOME_DIVIDER: &str =
    "___________________________________________________________________________________________________________________";
const LOG_HEADER: &str = "--- Login Attempts Log ---";
const LOG_FOOTER: &str = "---------------------------";
const PRESS_ANY_KEY: &str = "Press any key to return to the main menu...";

const API_KEY_HELP: &[&str] = &[
    "To get an API key, follow these steps:",
    "1. Go to https://platform.openai.com/signup.",
    "2. Create an account or log in.",
    "3. Navigate to the API section to generate a new API key.",
    "4. Copy the API key and use it in this application.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    LoginPasscode,
    LoginApiKey,
    ChatLoop,
    ApiKeyHelp,
    ViewLogs,
}

/// Per-process login state. Never persisted.
#[derive(Debug, Default)]
pub struct Session {
    pub authenticated: bool,
    pub api_key: Option<ValidatedKey>,
}

impl Session {
    fn sign_in(&mut self, key: ValidatedKey) {
        self.authenticated = true;
        self.api_key = Some(key);
    }

    fn sign_out(&mut self) {
        self.authenticated = false;
        self.api_key = None;
    }
}

pub struct SessionController<C, T> {
    console: C,
    validator: KeyValidator<T>,
    chat: ChatClient<T>,
    log: AttemptLog,
    passcode: String,
    session: Session,
}

impl<C, T> SessionController<C, T>
where
    C: Console,
    T: CompletionTransport + Clone,
{
    pub fn new(console: C, transport: T, config: &Config) -> Self {
        SessionController {
            console,
            validator: KeyValidator::new(transport.clone(), config.model.clone()),
            chat: ChatClient::new(transport, config.model.clone()),
            log: AttemptLog::new(config.log_path.clone()),
            passcode: config.passcode.clone(),
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Drive the state machine from the main menu. Returns once the console
    /// reports that input is closed.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        let mut state = State::MainMenu;
        loop {
            state = match self.step(state) {
                Ok(next) => next,
                Err(ConsoleError::Closed) => {
                    info!("console input closed, leaving session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
        }
    }

    pub fn step(&mut self, state: State) -> Result<State, ConsoleError> {
        let next = match state {
            State::MainMenu => self.main_menu()?,
            State::LoginPasscode => self.login_passcode()?,
            State::LoginApiKey => self.login_api_key()?,
            State::ChatLoop => self.chat_loop()?,
            State::ApiKeyHelp => self.api_key_help()?,
            State::ViewLogs => self.view_logs()?,
        };
        if next != state {
            info!(from = ?state, to = ?next, "session state change");
        }
        Ok(next)
    }

    fn main_menu(&mut self) -> Result<State, ConsoleError> {
        self.console.print_line("1. Login");
        self.console.print_line("2. How to get an API key");
        self.console.print_line("3. View logs");
        let choice = self.console.read_line("Choose an option")?;
        Ok(match choice.as_str() {
            "1" => State::LoginPasscode,
            "2" => State::ApiKeyHelp,
            "3" => State::ViewLogs,
            _ => {
                self.console.print_line("Invalid option. Please choose again.");
                State::MainMenu
            }
        })
    }

    fn login_passcode(&mut self) -> Result<State, ConsoleError> {
        self.console.clear()?;
        let entered = self.console.read_secret("Enter passcode")?;
        if entered != self.passcode {
            // wrong passcodes leave no trace in the attempt log
            self.console.print_line("Invalid passcode.");
            return Ok(State::MainMenu);
        }
        Ok(State::LoginApiKey)
    }

    fn login_api_key(&mut self) -> Result<State, ConsoleError> {
        self.session.sign_out();
        let candidate = self.console.read_secret("Please enter your OpenAI API key")?;

        let validator = &self.validator;
        let accepted = self
            .console
            .while_busy("Validating API key...", || validator.authorize(&candidate));

        let Some(key) = accepted else {
            self.console.print_line("Invalid API key.");
            self.record_attempt(LoginOutcome::Failure, &candidate);
            return Ok(State::MainMenu);
        };

        self.console.print_line("API key validated successfully.");
        self.record_attempt(LoginOutcome::Success, key.as_str());
        self.session.sign_in(key);

        self.console.print_line(WELCOME_DIVIDER);
        self.console
            .print_line("Welcome to the Chatbot! Type your messages below.");
        self.console.print_line("Type 'exit' to quit.");
        self.console.print_line("");
        Ok(State::ChatLoop)
    }

    fn chat_loop(&mut self) -> Result<State, ConsoleError> {
        let Some(key) = self.session.api_key.clone() else {
            warn!("chat requested without a validated key");
            return Ok(State::MainMenu);
        };

        loop {
            let input = self.console.read_line("You")?;
            if is_exit_sentinel(&input) {
                return Ok(State::MainMenu);
            }

            let chat = &self.chat;
            let reply = self
                .console
                .while_busy("Waiting for reply...", || chat.send(&key, &input));
            match reply {
                Ok(text) => {
                    self.print_reply(&text);
                    self.console.beep()?;
                }
                Err(e) => {
                    warn!(error = %e, "chat request failed");
                    self.console.print_line(&chat_error_message(&e));
                }
            }
        }
    }

    fn api_key_help(&mut self) -> Result<State, ConsoleError> {
        self.console.clear()?;
        for line in API_KEY_HELP {
            self.console.print_line(line);
        }
        self.console.print_line("");
        self.console.print_line(PRESS_ANY_KEY);
        self.console.wait_for_key()?;
        Ok(State::MainMenu)
    }

    fn view_logs(&mut self) -> Result<State, ConsoleError> {
        self.console.clear()?;
        match self.log.read_all() {
            Ok(Some(contents)) => {
                self.console.print_line("");
                self.console.print_line(LOG_HEADER);
                self.console.print_line(&contents);
                self.console.print_line(LOG_FOOTER);
                self.console.print_line("");
            }
            Ok(None) => self.console.print_line("No log file found."),
            Err(e) => {
                warn!(error = %e, "could not read login attempt log");
                self.console
                    .print_line(&format!("Failed to read log file: {e}"));
            }
        }
        self.console.print_line(PRESS_ANY_KEY);
        self.console.wait_for_key()?;
        Ok(State::MainMenu)
    }

    fn print_reply(&mut self, reply: &str) {
        self.console.print_line("");
        self.console.print_line(CHAT_DIVIDER);
        self.console.print_line(&format!("AI: {reply}"));
        self.console.print_line(CHAT_DIVIDER);
        self.console.print_line("");
    }

    /// Log store failures are reported but never end the session.
    fn record_attempt(&mut self, outcome: LoginOutcome, key: &str) {
        if let Err(e) = self.log.append(outcome, key) {
            warn!(error = %e, "could not record login attempt");
            self.console
                .print_line(&format!("Failed to log login attempt: {e}"));
        }
    }
}

/// HTTP-level failures read as request errors; anything else is a plain error.
pub fn chat_error_message(err: &RequestError) -> String {
    match err {
        RequestError::Decode(_) => format!("Error: {err}"),
        _ => format!("Request error: {err}"),
    }
}

/// Blank input or any casing of `exit` leaves the chat loop.
pub fn is_exit_sentinel(input: &str) -> bool {
    input.trim().is_empty() || input.eq_ignore_ascii_case("exit")
}
