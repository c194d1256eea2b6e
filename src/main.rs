//! vertex-creds CLI entry point.

use anyhow::Result;
use clap::Parser;

use vertex_creds::cli::{handle_error, Cli, Commands};
use vertex_creds::infrastructure::logging::LoggerImpl;
use vertex_creds::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        std::process::exit(handle_error(&err, json));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Install(args) => {
            vertex_creds::cli::commands::install::execute(args, &config, cli.json).await
        }
        Commands::Env(args) => {
            vertex_creds::cli::commands::env::execute(args, &config, cli.json).await
        }
    }
}
