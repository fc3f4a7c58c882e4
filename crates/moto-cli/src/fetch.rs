//! `fetch` command handler.
//!
//! Credentials for the chosen target are validated before the first Overpass
//! request, so a misconfigured run fails without touching the network.

use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use moto_core::{AppConfig, CountryCode};
use moto_ingest::{run_pipeline, PipelineOptions, RunSummary};
use moto_overpass::OverpassClient;
use moto_store::{MemorySink, PgSink, PoolConfig, RestSink};

use crate::config_failure;

pub(crate) const DEFAULT_CSV_PATH: &str = "./data/eu_motorcycle_repairs.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Target {
    /// Supabase REST upsert (`SUPABASE_URL` + `SUPABASE_KEY`)
    Rest,
    /// Direct Postgres upsert (`DATABASE_URL`)
    Postgres,
    /// Flat CSV file for the site's static-data mode
    Csv,
}

#[derive(Debug)]
pub(crate) struct FetchArgs {
    pub countries: Vec<CountryCode>,
    pub target: Target,
    pub csv_path: PathBuf,
    pub dry_run: bool,
}

impl FetchArgs {
    /// The countries to process; all EU members when none were given.
    pub(crate) fn resolved_countries(&self) -> Vec<CountryCode> {
        if self.countries.is_empty() {
            return CountryCode::all();
        }
        let mut seen = Vec::with_capacity(self.countries.len());
        for country in &self.countries {
            if !seen.contains(country) {
                seen.push(country.clone());
            }
        }
        seen
    }
}

/// Runs the ingestion pipeline against the sink selected by `args`.
///
/// # Errors
///
/// Returns an error if the target's credentials are missing or invalid, or if
/// a client or connection pool cannot be built. Per-country failures are not
/// errors; they are reported in the returned [`RunSummary`].
pub(crate) async fn run_fetch(config: &AppConfig, args: &FetchArgs) -> anyhow::Result<RunSummary> {
    let countries = args.resolved_countries();
    let options = PipelineOptions::from_app_config(config);

    let source = OverpassClient::with_endpoint(
        &config.overpass_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build Overpass client")?;

    if args.dry_run {
        let sink = MemorySink::new();
        let summary = run_pipeline(&source, &sink, &countries, &options).await;
        println!(
            "dry-run: normalized {} shops across {} countries; nothing was written",
            sink.len(),
            countries.len()
        );
        return Ok(summary);
    }

    let summary = match args.target {
        Target::Rest => {
            let credentials = config.store_credentials().map_err(config_failure)?;
            let sink = RestSink::new(
                &credentials,
                config.request_timeout_secs,
                &config.user_agent,
            )
            .context("failed to build Supabase REST sink")?;
            tracing::info!(endpoint = %sink.endpoint(), "writing to Supabase");
            run_pipeline(&source, &sink, &countries, &options).await
        }
        Target::Postgres => {
            let database_url = config.require_database_url().map_err(config_failure)?;
            let pool = moto_store::connect_pool(database_url, PoolConfig::default())
                .await
                .context("failed to connect to Postgres")?;
            let sink = PgSink::new(pool);
            run_pipeline(&source, &sink, &countries, &options).await
        }
        Target::Csv => {
            let sink = MemorySink::new();
            let summary = run_pipeline(&source, &sink, &countries, &options).await;
            // Merge by id so a partial rerun keeps the other countries' rows.
            let total = moto_store::upsert_csv_file(&sink.records(), &args.csv_path)
                .with_context(|| format!("failed to update {}", args.csv_path.display()))?;
            println!(
                "{} now holds {total} shops ({} upserted by this run)",
                args.csv_path.display(),
                sink.len()
            );
            summary
        }
    };

    Ok(summary)
}
