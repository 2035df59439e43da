// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load the config, run the tasks.
// - Returns `anyhow::Result` so any failure ends the run with its context.

use challenge_cli::{api::ApiClient, config::Config, runner};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Request and response traffic is logged at info level on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    let path = Config::path_from_env();
    let config = Config::load_or_create(&path)?;
    if config.is_placeholder() {
        warn!("{} still holds placeholder values, edit it before running", path.display());
    }

    let api = ApiClient::from_config(&config)?;
    runner::run(&api, &config)?;
    Ok(())
}
