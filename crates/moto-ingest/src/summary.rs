use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use moto_core::CountryCode;

use crate::state::CountryOutcome;

#[derive(Debug, Clone)]
pub struct CountryReport {
    pub country: CountryCode,
    pub outcome: CountryOutcome,
}

/// Result of a full ingestion run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reports: Vec<CountryReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    #[must_use]
    pub fn new(
        reports: Vec<CountryReport>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reports,
            started_at,
            finished_at,
        }
    }

    #[must_use]
    pub fn total_countries(&self) -> usize {
        self.reports.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> Vec<&CountryCode> {
        self.countries_where(|o| matches!(o, CountryOutcome::Succeeded { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> Vec<&CountryCode> {
        self.countries_where(|o| matches!(o, CountryOutcome::Skipped))
    }

    /// Failed countries, in processing order.
    #[must_use]
    pub fn failed(&self) -> Vec<&CountryCode> {
        self.countries_where(|o| matches!(o, CountryOutcome::Failed { .. }))
    }

    /// Records written by successful countries. Partial writes from a country
    /// whose sink failed midway are not included.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.reports
            .iter()
            .map(|r| match r.outcome {
                CountryOutcome::Succeeded { records } => records,
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }

    /// Plain-text end-of-run report.
    #[must_use]
    pub fn render(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Data fetch complete");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "Successfully processed: {}/{} countries",
            self.succeeded().len(),
            self.total_countries()
        );
        let _ = writeln!(out, "Total shops upserted: {}", self.total_records());

        let elapsed = self.finished_at - self.started_at;
        let _ = writeln!(out, "Elapsed: {}s", elapsed.num_seconds().max(0));

        let skipped = self.skipped();
        if !skipped.is_empty() {
            let _ = writeln!(out, "No shops found: {}", join(&skipped));
        }

        let failed = self.failed();
        if !failed.is_empty() {
            let _ = writeln!(out, "Failed countries: {}", join(&failed));
            let retry_args: Vec<String> = failed.iter().map(|c| format!("--country {c}")).collect();
            let _ = writeln!(
                out,
                "  Run the fetch again to retry them (e.g. `fetch {}`).",
                retry_args.join(" ")
            );
        }
        out
    }

    fn countries_where<F>(&self, pred: F) -> Vec<&CountryCode>
    where
        F: Fn(&CountryOutcome) -> bool,
    {
        self.reports
            .iter()
            .filter(|r| pred(&r.outcome))
            .map(|r| &r.country)
            .collect()
    }
}

fn join(codes: &[&CountryCode]) -> String {
    codes
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
