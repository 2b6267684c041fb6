use clap::Parser;
use finder::Cli;
use stacks::{CloudFormationProvider, StackFinder};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut finder = StackFinder::new(cli.settings());
    for config in cli.provider_configs() {
        info!(
            region = %config.region,
            profile = config.profile.as_deref().unwrap_or("default"),
            "Searching for expired stacks"
        );
        let provider = CloudFormationProvider::new(config).await?;
        finder = finder.with_provider(Box::new(provider));
    }

    let report = finder.run().await?;

    let mut stdout = io::stdout().lock();
    report.write_to(&mut stdout)?;
    stdout.flush()?;

    Ok(())
}
