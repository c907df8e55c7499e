use std::path::PathBuf;

use clap::Parser;

use crate::app::DEFAULT_TOP;

#[derive(Parser, Debug)]
#[command(name = "car-finder", about = "Find and compare cars within a budget", version)]
pub struct Cli {
    /// Car listings file (.csv, .tsv, .json or .parquet)
    #[arg(default_value = "CARS_DATASET_WITHOUT.csv")]
    pub dataset: PathBuf,

    /// How many recommendations to show per search
    #[arg(short, long, default_value_t = DEFAULT_TOP, value_parser = parse_top)]
    pub top: usize,

    /// Log loading and scoring details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_top(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{s}' is not a positive integer")),
    }
}

impl Cli {
    /// Default log filter; `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
