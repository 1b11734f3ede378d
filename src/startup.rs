use crate::commands::{Cli, Commands};
use crate::config::Config;
use crate::error::Error;
use clap::Parser;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Parse the command line and dispatch the requested command
pub async fn run(config: Config) -> miette::Result<()> {
    let cli = Cli::parse();

    // The client itself never sets a timeout; the session we hand it may
    // carry one from the config.
    let session = build_session(&config)?;

    let result = match cli.command {
        Commands::Today(args) => crate::commands::calendar::today(&config, session, args).await,
        Commands::Tomorrow(args) => {
            crate::commands::calendar::tomorrow(&config, session, args).await
        }
        Commands::Year(args) => crate::commands::calendar::year(&config, session, args).await,
        Commands::Range(args) => crate::commands::calendar::range(&config, session, args).await,
    };

    result.map_err(Into::into)
}

/// Build the reusable HTTP session handed to the calendar client
fn build_session(config: &Config) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.http_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().map_err(Error::from)
}
