// Entrypoint for the CLI application.
// - Keeps `main` small: build the HTTP client and hand it to the session loop.
// - Returns `anyhow::Result` so setup failures are reported with context.

use anyhow::Context;
use keychat_cli::{
    api::ApiClient, config::Config, session::SessionController, setup_logging,
    ui::TerminalConsole,
};

fn main() -> anyhow::Result<()> {
    setup_logging();

    // Endpoint, model and log file come from `KEYCHAT_*` variables or defaults.
    let config = Config::from_env();
    let api = ApiClient::new(&config).context("Failed to build HTTP client")?;

    // Runs until the process is terminated or stdin is closed.
    let mut session = SessionController::new(TerminalConsole::new(), api, &config);
    session.run().context("Console interaction failed")?;
    Ok(())
}
