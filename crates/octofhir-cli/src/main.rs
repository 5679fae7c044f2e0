mod cli;
mod commands;
mod output;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Parser;

use cli::{Cli, Commands, OutputFormat};
use octofhir_translate::config::loader::load_config;
use octofhir_translate::{Translator, observability};
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).map_err(|e| anyhow!(e))?;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        config.validate().map_err(|e| anyhow!(e))?;
    }
    observability::init_tracing_with_level(&config.logging.level);

    let format = match cli.format {
        Some(format) => format,
        None => OutputFormat::from_config(&config.output.format)
            .ok_or_else(|| anyhow!("Unknown output format: {}", config.output.format))?,
    };

    let mut files = config.mappings.files.clone();
    files.extend(cli.maps.iter().cloned());
    let store = Arc::new(commands::maps::load_store(&files).await?);

    match &cli.command {
        Commands::Translate(args) => {
            let translator = Translator::new(store);
            commands::translate::translate(&translator, args, format).await?;
        }
        Commands::Maps => {
            commands::maps::list(store.as_ref(), format).await?;
        }
    }

    Ok(())
}
