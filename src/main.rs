use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitewatch::app::AppContext;
use sitewatch::cli::{commands, Cli, Commands};
use sitewatch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            config.validate(true)?;
            let ctx = AppContext::new(&config)?;
            commands::serve(ctx).await?;
        }
        Commands::Check => {
            config.validate(false)?;
            commands::check(&config).await?;
        }
    }

    Ok(())
}
