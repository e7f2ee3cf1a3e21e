use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use funnies::app::AppContext;
use funnies::cli::{commands, Cli, Commands};
use funnies::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Build { no_open } => {
            commands::build(&ctx, !no_open).await?;
        }
        Commands::Serve { .. } => {
            commands::serve(&ctx).await?;
        }
        Commands::Json => {
            commands::print_json(&ctx).await?;
        }
    }

    Ok(())
}
