//! codecloze: syntax-highlighted flashcard HTML with intact cloze markers.

mod cli;
mod clipboard;
mod config;
mod convert;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::{init_config, load_config, load_config_from_path};
use convert::Conversion;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Languages) => {
            for language in codecloze_core::Language::ALL {
                println!("{}", language);
            }
            return Ok(());
        }
        Some(Commands::Completions { shell }) => {
            Cli::print_completions(*shell);
            return Ok(());
        }
        Some(Commands::Config { action }) => {
            return handle_config_command(action);
        }
        None => {}
    }

    let config = if let Some(path) = &cli.config {
        load_config_from_path(path)
    } else {
        load_config()
    };
    log::debug!("Loaded config: {:?}", config);

    let conversion = Conversion::resolve(&cli, &config)?;
    log::debug!("Conversion: {:?}", conversion);
    conversion.run()
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = init_config(*force)?;
            println!("Configuration file created at: {}", path.display());
            Ok(())
        }
        ConfigAction::Schema => {
            println!("{}", config::schema::generate_schema()?);
            Ok(())
        }
    }
}
