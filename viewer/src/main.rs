//! cpf viewer entry point

use anyhow::Context;
use clap::Parser;
use cpf_viewer::{cli::Cli, logging, ViewerConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let config = ViewerConfig::resolve(&cli).context("invalid configuration")?;
    tracing::debug!(?config, "Resolved configuration");

    cpf_viewer::run(&config)?;
    Ok(())
}
