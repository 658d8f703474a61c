//! Per-date distress call generation.
//!
//! Builds the generation prompt for a target date, submits it to a
//! [`TextProvider`], and extracts candidate record lines from the free-text
//! completion. The response has no machine-enforced schema; line-prefix
//! filtering on the ISO date is the only contract enforcement.

use chrono::NaiveDate;
use safety_calls_models::{CALL_COLUMNS, CALLS_PER_CITY, CALLS_PER_DAY, CITIES, CallCategory};

use crate::AiError;
use crate::providers::TextProvider;

/// Capability interface for per-date call generation.
///
/// The orchestrator depends on this trait rather than on a concrete
/// provider, so pipeline tests can substitute deterministic stubs.
#[async_trait::async_trait]
pub trait CallGenerator: Send + Sync {
    /// Generates candidate record lines for one calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the generation request fails.
    async fn generate(&self, date: NaiveDate) -> Result<Vec<String>, AiError>;
}

/// [`CallGenerator`] backed by a live [`TextProvider`].
pub struct DailyCallGenerator {
    provider: Box<dyn TextProvider>,
}

impl DailyCallGenerator {
    /// Creates a generator around the given provider.
    #[must_use]
    pub fn new(provider: Box<dyn TextProvider>) -> Self {
        Self { provider }
    }
}

/// Builds the generation instruction for one date.
///
/// Requests exactly [`CALLS_PER_DAY`] records evenly partitioned across the
/// fixed city set, enumerates the exact column order and per-field
/// constraints, and includes one worked example line for the target date.
#[must_use]
pub fn build_prompt(date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");
    let columns = CALL_COLUMNS.join(",");
    let cities = CITIES.join(", ");
    let categories = CallCategory::all()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Generate exactly {CALLS_PER_DAY} realistic and significant women safety-related distress call records for India on {date} in CSV format with the following columns:
{columns}

Strict Requirements:
1. Use exactly {CALLS_PER_CITY} entries each for these cities: {cities}
2. call_category must be one of: {categories}
3. latitude and longitude must be realistic and represent different local areas (not just city center)
4. response_time_hr: realistic float (e.g., 0.5 to 12.0 hours)
5. severity_scale: integer 1-10 (10 = most severe)
6. incident_subtype: real-world issues (e.g., stalking, domestic violence, cyberbullying, abduction, panic attack, trafficking)
7. incident_radius_km: float (e.g., 0.5-5.0 km)
8. description: one-sentence summary of the call situation
9. police_action_required: True or False
10. pincode: 6-digit Indian postal code matching the incident location (mandatory)
11. Ensure all {CALLS_PER_DAY} entries have unique, non-redundant locations and descriptions

Example:
{date},Violence,Mumbai,19.1075,72.8654,2.0,9,Domestic Violence,1.5,"Woman assaulted by husband in Andheri, rushed to hospital",True,400053"#
    )
}

#[async_trait::async_trait]
impl CallGenerator for DailyCallGenerator {
    async fn generate(&self, date: NaiveDate) -> Result<Vec<String>, AiError> {
        let prompt = build_prompt(date);
        let content = self.provider.complete(&prompt).await?;

        let date_str = date.format("%Y-%m-%d").to_string();

        // Keep only lines that begin with the target date, discarding any
        // preamble, markdown fences, or commentary the model emits.
        let mut calls: Vec<String> = content
            .trim()
            .lines()
            .filter(|line| line.starts_with(&date_str))
            .map(ToString::to_string)
            .collect();

        if calls.len() != CALLS_PER_DAY {
            log::warn!(
                "Got {} records instead of {CALLS_PER_DAY} for {date_str}",
                calls.len()
            );
        }

        calls.truncate(CALLS_PER_DAY);

        Ok(calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider {
        response: String,
    }

    #[async_trait::async_trait]
    impl TextProvider for FixedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            Ok(self.response.clone())
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn record_line(n: usize) -> String {
        format!("2024-06-15,Violence,Mumbai,19.1,72.8,2.0,{n},Stalking,1.5,Followed home,True,400053")
    }

    #[test]
    fn prompt_names_every_column_and_city() {
        let prompt = build_prompt(date());
        for column in CALL_COLUMNS {
            assert!(prompt.contains(column), "missing column {column}");
        }
        for city in CITIES {
            assert!(prompt.contains(city), "missing city {city}");
        }
        assert!(prompt.contains("2024-06-15,Violence,Mumbai"));
    }

    #[tokio::test]
    async fn keeps_only_lines_starting_with_the_date() {
        let response = format!(
            "Here are the records:\n```csv\n{}\n{}\n```\nLet me know if you need more.",
            record_line(1),
            record_line(2)
        );
        let generator = DailyCallGenerator::new(Box::new(FixedProvider { response }));

        let calls = generator.generate(date()).await.unwrap();
        assert_eq!(calls, vec![record_line(1), record_line(2)]);
    }

    #[tokio::test]
    async fn truncates_surplus_lines_to_the_daily_quota() {
        let response = (0..25).map(record_line).collect::<Vec<_>>().join("\n");
        let generator = DailyCallGenerator::new(Box::new(FixedProvider { response }));

        let calls = generator.generate(date()).await.unwrap();
        assert_eq!(calls.len(), CALLS_PER_DAY);
    }
}
