//! wta-store - serve and browse WTA application packages

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wta_store::cmd;
use wta_store::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `list` output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve(cli.serve)) {
        Commands::Serve(args) => cmd::serve::serve(args).await,
        Commands::List { packages_dir } => cmd::list::list(&packages_dir),
    }
}
