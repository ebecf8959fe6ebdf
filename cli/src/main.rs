// cli/src/main.rs

// Entry point for the BioTek access client. Parses the command line and
// dispatches to the CLI logic.
use anyhow::Result;
use biotek_cli::cli::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    start_cli().await
}
