use borocal::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting borocal");

    // Load configuration
    let config = startup::load_config()?;

    // Run the requested command
    startup::run(config).await
}
