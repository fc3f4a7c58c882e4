//! Ingestion run orchestration.

use std::time::Duration;

use chrono::Utc;
use moto_core::{AppConfig, CountryCode};
use moto_overpass::normalize_elements;
use moto_store::{upsert_in_batches, ShopSink, BATCH_SIZE};

use crate::source::ShopSource;
use crate::state::{Cooldown, CountryOutcome, CountryState};
use crate::summary::{CountryReport, RunSummary};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub batch_size: usize,
    /// Pause after a country was written; keeps load on the public Overpass
    /// instance polite.
    pub success_cooldown: Duration,
    /// Pause after a failed country; longer, since failures usually mean the
    /// query service is degraded or rate limiting.
    pub failure_cooldown: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            success_cooldown: Duration::from_secs(10),
            failure_cooldown: Duration::from_secs(20),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            success_cooldown: config.success_cooldown(),
            failure_cooldown: config.failure_cooldown(),
        }
    }

    #[must_use]
    pub fn pause_for(&self, cooldown: Cooldown) -> Duration {
        match cooldown {
            Cooldown::None => Duration::ZERO,
            Cooldown::Success => self.success_cooldown,
            Cooldown::Failure => self.failure_cooldown,
        }
    }
}

/// Runs one country through query, normalization and batched upsert.
///
/// Never fails: every error ends the country in
/// [`CountryOutcome::Failed`].
pub async fn process_country<Q, S>(
    source: &Q,
    sink: &S,
    country: &CountryCode,
    options: &PipelineOptions,
) -> CountryOutcome
where
    Q: ShopSource,
    S: ShopSink,
{
    let mut state = CountryState::Querying;
    loop {
        state = match state {
            CountryState::Querying => CountryState::after_query(source.fetch(country).await),
            CountryState::Normalizing(elements) => {
                let records = normalize_elements(&elements, country);
                tracing::debug!(
                    country = %country,
                    elements = elements.len(),
                    records = records.len(),
                    "normalized elements"
                );
                CountryState::after_normalize(records)
            }
            CountryState::Sinking(records) => CountryState::after_sink(
                upsert_in_batches(sink, &records, options.batch_size).await,
            ),
            CountryState::Done(outcome) => return outcome,
        };
    }
}

/// Processes `countries` in order, one at a time, and summarizes the run.
///
/// A failed country is logged and recorded, then the run continues after the
/// failure cooldown. No pause follows the last country.
pub async fn run_pipeline<Q, S>(
    source: &Q,
    sink: &S,
    countries: &[CountryCode],
    options: &PipelineOptions,
) -> RunSummary
where
    Q: ShopSource,
    S: ShopSink,
{
    let started_at = Utc::now();
    let mut reports: Vec<CountryReport> = Vec::with_capacity(countries.len());

    tracing::info!(countries = countries.len(), "starting ingestion run");

    for (index, country) in countries.iter().enumerate() {
        tracing::info!(country = %country, "fetching");
        let outcome = process_country(source, sink, country, options).await;

        match &outcome {
            CountryOutcome::Succeeded { records } => {
                tracing::info!(country = %country, records, "upserted shops");
            }
            CountryOutcome::Skipped => {
                tracing::warn!(country = %country, "no shops found, skipping");
            }
            CountryOutcome::Failed {
                stage,
                written,
                reason,
            } => {
                tracing::error!(
                    country = %country,
                    stage = %stage,
                    written,
                    error = %reason,
                    "country failed"
                );
            }
        }

        let pause = options.pause_for(outcome.cooldown());
        reports.push(CountryReport {
            country: country.clone(),
            outcome,
        });

        let is_last = index + 1 == countries.len();
        if !is_last && !pause.is_zero() {
            tracing::debug!(pause_secs = pause.as_secs_f64(), "cooling down");
            tokio::time::sleep(pause).await;
        }
    }

    RunSummary::new(reports, started_at, Utc::now())
}
