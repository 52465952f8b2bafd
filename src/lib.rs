// Library root
// -----------
// This crate exposes the pieces of the console chat client. The binary
// (`main.rs`) wires them together and hands control to the session loop.
//
// Module responsibilities:
// - `api`: completion wire types and the blocking HTTP transport.
// - `validator`: trial request that decides whether an API key works.
// - `chat`: one request per user message, reply text extraction.
// - `attempt_log`: append-only record of login attempts on disk.
// - `session`: menu, login and chat state machine.
// - `ui`: console primitives and their terminal implementation.
pub mod api;
pub mod attempt_log;
pub mod chat;
pub mod config;
pub mod errors;
pub mod session;
pub mod ui;
pub mod validator;

use tracing_subscriber::EnvFilter;

/// Install the diagnostics subscriber. Output goes to stderr and is limited
/// to warnings unless `RUST_LOG` says otherwise. Calling it twice is harmless.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
