// UI layer: the console primitives the session needs, and a terminal
// implementation built on `dialoguer` prompts, an `indicatif` spinner and
// `crossterm` for clearing the screen and single-key waits.
//
// When stdin is not a terminal (piped input) the prompts fall back to plain
// line reads so that end of input can be detected and the session can stop.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::execute;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

use crate::errors::ConsoleError;

pub trait Console {
    /// Read one line of visible input, without the line terminator.
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    /// Like `read_line` but the input is not echoed.
    fn read_secret(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    fn print_line(&mut self, text: &str);

    fn clear(&mut self) -> Result<(), ConsoleError>;

    /// Audible notification.
    fn beep(&mut self) -> Result<(), ConsoleError>;

    fn wait_for_key(&mut self) -> Result<(), ConsoleError>;

    /// Run `work` while showing `message` as a busy indicator.
    fn while_busy<R>(&mut self, message: &str, work: impl FnOnce() -> R) -> R;
}

pub struct TerminalConsole {
    interactive: bool,
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole {
            interactive: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }

    fn read_plain(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        print!("{prompt}: ");
        io::stdout().flush()?;
        read_stdin_line()
    }
}

fn read_stdin_line() -> Result<String, ConsoleError> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(ConsoleError::Closed);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        if !self.interactive {
            return self.read_plain(prompt);
        }
        // `Password` hides input in the terminal.
        let secret = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(secret)
    }

    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn clear(&mut self) -> Result<(), ConsoleError> {
        if self.interactive {
            execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn beep(&mut self) -> Result<(), ConsoleError> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }

    fn wait_for_key(&mut self) -> Result<(), ConsoleError> {
        if !self.interactive {
            read_stdin_line()?;
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        let waited = loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
                Ok(_) => continue,
                Err(e) => break Err(e),
            }
        };
        terminal::disable_raw_mode()?;
        waited?;
        Ok(())
    }

    fn while_busy<R>(&mut self, message: &str, work: impl FnOnce() -> R) -> R {
        // indicatif's spinner is shown while the request is outstanding.
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        let out = work();
        spinner.finish_and_clear();
        out
    }
}
