#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the safety-calls data toolchain.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use safety_calls_ingest::interactive;

#[derive(Parser)]
#[command(
    name = "safety_calls",
    about = "Generate synthetic women safety distress call records using a generative AI model"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate call records for a date range and append them to the call table
    Generate {
        /// Start date in YYYY-MM-DD format (prompted for when omitted)
        start_date: Option<String>,
        /// End date in YYYY-MM-DD format (prompted for when omitted)
        end_date: Option<String>,
        /// Path of the call table to append to
        #[arg(long, default_value = interactive::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Scale the allocated-resource fields of a predictions dataset to 10% (minimum 1)
    ScaleAllocations {
        /// Path of the JSON allocation dataset to rewrite in place
        file: PathBuf,
    },
    /// Convert a headered CSV dataset to a JSON record collection
    Convert {
        /// Input CSV file
        input: PathBuf,
        /// Output JSON file (defaults to the input path with a .json extension)
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = safety_calls_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Generate {
            start_date,
            end_date,
            output,
        } => {
            let start = interactive::resolve_date(start_date.as_deref(), "start date")?;
            let end = interactive::resolve_date(end_date.as_deref(), "end date")?;

            if start > end {
                log::error!("Start date cannot be after end date.");
                return Ok(());
            }

            safety_calls_ingest::generate_command(&multi, start, end, &output).await?;
        }
        Commands::ScaleAllocations { file } => {
            let count = safety_calls_allocation::scale_allocations(&file)?;
            println!(
                "Updated allocated resources to 10% of current values (minimum 1) for {count} entries"
            );
        }
        Commands::Convert { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("json"));
            let count = safety_calls_store::convert::csv_to_json(&input, &output)?;
            println!(
                "Converted '{}' to '{}' ({count} records)",
                input.display(),
                output.display()
            );
        }
    }

    Ok(())
}
