use std::io;

use anyhow::{bail, Result};
use clap::Parser;
use log::warn;

use car_finder::app::Session;
use car_finder::cli::Cli;
use car_finder::data::loader::{load_file, LoadError};
use car_finder::ui::prompt::Console;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dataset = load_file(&cli.dataset).map_err(|err| {
        let hint = if matches!(err, LoadError::FileNotFound(_)) {
            "place it in the current folder or pass its path as the first argument"
        } else {
            "check the format and contents of the file"
        };
        anyhow::Error::new(err).context(format!("could not load the car dataset; {hint}"))
    })?;

    if dataset.is_empty() {
        bail!(
            "the dataset is empty after cleaning ({} rows dropped); please check the file for data or formatting issues",
            dataset.dropped_rows
        );
    }

    println!("Car Database Loaded Successfully!");
    println!("Total Cars Available: {}", dataset.len());
    if dataset.dropped_rows > 0 {
        warn!("{} malformed rows were skipped", dataset.dropped_rows);
    }

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    Session::new(&dataset, console, cli.top).run()
}
