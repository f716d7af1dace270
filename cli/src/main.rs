//! dtokit command-line tool
//!
//! Usage:
//!   dtokit merge --index email people.csv updates.json --output merged.json
//!   dtokit inspect people.csv

use anyhow::Result;
use clap::Parser;
use dtokit_cli::{Cli, Command, run_inspect, run_merge};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Merge(args) => {
            let report = run_merge(&args)?;
            if args.output.is_none() {
                for line in report.rendered() {
                    println!("{line}");
                }
            }
        }
        Command::Inspect(args) => {
            let report = run_inspect(&args)?;
            println!("{report}");
        }
    }
    Ok(())
}
