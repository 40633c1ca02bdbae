mod cli;
mod commands;
mod error;
mod output;
mod paths;

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use log::debug;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;
use tableau_lib::storage::FileStorage;
use tableau_lib::store::MemoryStore;

use crate::cli::Cli;
use crate::commands::Session;
use crate::error::CliError;
use crate::error::Result;

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).map_err(CliError::LogFile)?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;

    let dir = cli.data.clone().unwrap_or_else(paths::data_dir);
    debug!("Using data directory {}", dir.display());
    let mut storage = FileStorage::new(dir);

    let mut store = MemoryStore::load(&storage)?;
    let seeded = store.bootstrap_sample()?.is_some();

    let mut session = Session {
        store,
        table: cli.table,
    };
    let (lines, changed) = session.execute(cli.command)?;
    if changed || seeded {
        session.store.save(&mut storage)?;
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
