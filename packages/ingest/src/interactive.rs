#![allow(clippy::module_name_repetitions)]

//! Interactive TUI for the safety-calls toolchain.
//!
//! Provides date prompting with validation loops for the generate command,
//! plus a menu-driven fallback (using `dialoguer`) for running the tools
//! without memorizing CLI flags.

use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::{Input, Select};
use safety_calls_cli_utils::MultiProgress;

/// Default path for the persisted call table.
pub const DEFAULT_OUTPUT: &str = "women_safety_calls.csv";

/// Top-level actions available in the interactive menu.
enum MenuAction {
    GenerateCalls,
    ScaleAllocations,
    ConvertDataset,
}

impl MenuAction {
    const ALL: &[Self] = &[
        Self::GenerateCalls,
        Self::ScaleAllocations,
        Self::ConvertDataset,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::GenerateCalls => "Generate call records for a date range",
            Self::ScaleAllocations => "Scale allocated resources to 10% (minimum 1)",
            Self::ConvertDataset => "Convert a CSV dataset to JSON",
        }
    }
}

/// Parses and validates an ISO `YYYY-MM-DD` date string.
///
/// Dates after January 2025 are accepted with a warning, since generated
/// data that far out is increasingly synthetic.
#[must_use]
pub fn validate_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;

    if NaiveDate::from_ymd_opt(2025, 1, 1).is_some_and(|cutoff| date > cutoff) {
        log::warn!("Dates after January 2025 may use synthetic data");
    }

    Some(date)
}

/// Resolves a date from an optional CLI argument, prompting interactively
/// until a valid date is entered when the argument is missing or invalid.
///
/// # Errors
///
/// Returns an error if the interactive prompt fails (e.g., no TTY).
pub fn resolve_date(
    arg: Option<&str>,
    label: &str,
) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    if let Some(raw) = arg {
        if let Some(date) = validate_date(raw) {
            return Ok(date);
        }
        println!("Invalid {label} format. Please use YYYY-MM-DD.");
    }

    loop {
        let raw: String = Input::new()
            .with_prompt(format!("Enter {label} (YYYY-MM-DD)"))
            .interact_text()?;

        if let Some(date) = validate_date(&raw) {
            return Ok(date);
        }
        println!("Invalid {label} format. Please use YYYY-MM-DD.");
    }
}

/// Runs the interactive menu, prompting the user to select and configure
/// one of the toolchain's operations.
///
/// # Errors
///
/// Returns an error if prompting fails or the selected operation fails.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match MenuAction::ALL[idx] {
        MenuAction::GenerateCalls => generate_calls(multi).await,
        MenuAction::ScaleAllocations => scale_allocations(),
        MenuAction::ConvertDataset => convert_dataset(),
    }
}

/// Prompts for a date range and output path, then runs the generation loop.
async fn generate_calls(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let start = resolve_date(None, "start date")?;
    let end = resolve_date(None, "end date")?;

    if start > end {
        log::error!("Start date cannot be after end date.");
        return Ok(());
    }

    let output: String = Input::new()
        .with_prompt("Output file")
        .default(DEFAULT_OUTPUT.to_string())
        .interact_text()?;

    crate::generate_command(multi, start, end, &PathBuf::from(output)).await?;

    Ok(())
}

/// Prompts for an allocation dataset path and runs the scaler.
fn scale_allocations() -> Result<(), Box<dyn std::error::Error>> {
    let file: String = Input::new()
        .with_prompt("Allocation dataset (JSON)")
        .interact_text()?;

    let count = safety_calls_allocation::scale_allocations(&PathBuf::from(file))?;
    println!("Updated allocated resources to 10% of current values (minimum 1) for {count} entries");

    Ok(())
}

/// Prompts for input/output paths and runs the CSV-to-JSON conversion.
fn convert_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt("Input CSV file")
        .interact_text()?;
    let input = PathBuf::from(input);

    let default_output = input.with_extension("json").display().to_string();
    let output: String = Input::new()
        .with_prompt("Output JSON file")
        .default(default_output)
        .interact_text()?;

    let count = safety_calls_store::convert::csv_to_json(&input, &PathBuf::from(output))?;
    println!("Converted '{}' ({count} records)", input.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_dates() {
        assert_eq!(
            validate_date("2024-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert_eq!(
            validate_date("  2024-06-15  ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(validate_date("15-06-2024").is_none());
        assert!(validate_date("2024/06/15").is_none());
        assert!(validate_date("2024-13-01").is_none());
        assert!(validate_date("tomorrow").is_none());
        assert!(validate_date("").is_none());
    }
}
