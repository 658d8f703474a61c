#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for generating synthetic distress call data over a date range
//! and persisting it to the append-only call table.
//!
//! The orchestrator walks the inclusive date range one day at a time:
//! request generation, parse and clean every returned line independently,
//! append the kept set to the store in one batch, and accumulate the run
//! summary. A failed generation request is logged and treated as zero
//! records for that date; the loop never retries and never aborts mid-range
//! because of one bad day.

pub mod interactive;
pub mod parse;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use safety_calls_ai::AiError;
use safety_calls_ai::generator::{CallGenerator, DailyCallGenerator};
use safety_calls_ai::progress::ProgressCallback;
use safety_calls_ai::providers::create_provider_from_env;
use safety_calls_cli_utils::{IndicatifProgress, MultiProgress};
use safety_calls_models::IncidentRecord;
use safety_calls_store::{CallStore, StoreError};
use thiserror::Error;

/// Errors that can abort a generation run.
///
/// Per-date generation failures are NOT represented here; they are caught
/// inside the loop and converted to an empty day.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Provider configuration failed before the run started.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// Appending to the call table failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Aggregates owned by a single run; no state survives the run beyond the
/// printed summary.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Total records accepted and persisted.
    pub total_calls: u64,
    /// Accepted-record tally keyed by raw category string.
    pub category_counts: BTreeMap<String, u64>,
}

impl RunSummary {
    fn record(&mut self, record: &IncidentRecord) {
        *self
            .category_counts
            .entry(record.call_category.clone())
            .or_insert(0) += 1;
        self.total_calls += 1;
    }
}

/// Processes the inclusive date range `[start, end]`, one day at a time.
///
/// For each date: request generation, parse and clean every returned line
/// independently, append the kept records to the store in one batch, and
/// update the running aggregates. An empty or failed generation skips
/// persistence for that date and continues. If `start > end` the loop body
/// never runs and no generation request is issued.
///
/// # Errors
///
/// Returns [`IngestError::Store`] if appending to the call table fails.
pub async fn run_range(
    generator: &dyn CallGenerator,
    store: &CallStore,
    start: NaiveDate,
    end: NaiveDate,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<RunSummary, IngestError> {
    let mut summary = RunSummary::default();
    let mut current = start;

    while current <= end {
        let date_str = current.format("%Y-%m-%d").to_string();
        log::info!("Processing date: {date_str}");

        let calls = match generator.generate(current).await {
            Ok(calls) => calls,
            Err(e) => {
                log::error!("Error generating safety call data for {date_str}: {e}");
                Vec::new()
            }
        };

        if calls.is_empty() {
            log::warn!("No call data could be generated for {date_str}");
        } else {
            let records: Vec<IncidentRecord> =
                calls.iter().filter_map(|line| parse::parse_call_line(line)).collect();

            if records.is_empty() {
                log::warn!("All {} line(s) for {date_str} were rejected", calls.len());
            } else {
                store.append(&records)?;

                for record in &records {
                    log::debug!("Accepted: {}", record.to_row());
                    summary.record(record);
                }

                log::info!(
                    "{date_str}: kept {}/{} record(s)",
                    records.len(),
                    calls.len()
                );
            }
        }

        if let Some(progress) = &progress {
            progress.inc(1);
        }

        let Some(next) = current.succ_opt() else {
            break;
        };
        current = next;
    }

    Ok(summary)
}

/// Runs the full generate command: provider setup, date-range loop with a
/// per-day progress bar, and the end-of-run summary.
///
/// # Errors
///
/// Returns [`IngestError::Ai`] if no provider is configured, or
/// [`IngestError::Store`] if persistence fails.
pub async fn generate_command(
    multi: &MultiProgress,
    start: NaiveDate,
    end: NaiveDate,
    output: &Path,
) -> Result<(), IngestError> {
    println!(
        "\nFetching women safety calls from {} to {}...",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    let provider = create_provider_from_env()?;
    let generator = DailyCallGenerator::new(provider);
    let store = CallStore::new(output);

    let days = u64::try_from((end - start).num_days() + 1).unwrap_or(0);
    let progress = IndicatifProgress::days_bar(multi, "Generating", days);

    let summary = run_range(&generator, &store, start, end, Some(Arc::clone(&progress))).await?;

    progress.finish_and_clear();
    print_summary(&summary);
    println!("\nData saved to {}", output.display());

    Ok(())
}

/// Prints the end-of-run summary block: total count plus per-category tally.
pub fn print_summary(summary: &RunSummary) {
    println!("\nSummary Statistics:");
    println!("Total calls generated: {}", summary.total_calls);
    for (category, count) in &summary.category_counts {
        println!("{category}: {count}");
    }
}
