//! Direct Postgres sink for deployments that expose the database itself
//! (Supabase included) rather than only its REST API.

use std::time::Duration;

use moto_core::ShopRecord;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::sink::{dedupe_last_wins, ShopSink};
use crate::StoreError;

const DEFAULT_MAX_CONNECTIONS: u32 = 2;
const DEFAULT_MIN_CONNECTIONS: u32 = 0;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// Path relative to crates/moto-store/Cargo.toml; resolves to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

/// Connect to a Postgres pool using explicit URL and config.
///
/// Ingestion is sequential, so the default pool is deliberately small.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Run all pending migrations against the pool.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Upserts shop records into `motorcycle_shops` over a Postgres pool.
pub struct PgSink {
    pool: PgPool,
}

impl PgSink {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ShopSink for PgSink {
    /// Uses a single `INSERT … SELECT * FROM UNNEST(…) ON CONFLICT (id)` so
    /// that the whole batch is one round-trip. Nested objects are bound as
    /// `jsonb`.
    async fn upsert(&self, records: &[ShopRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let rows = dedupe_last_wins(records);

        // Collect each column into a parallel Vec for UNNEST binding.
        let mut ids: Vec<i64> = Vec::with_capacity(rows.len());
        let mut country_codes: Vec<String> = Vec::with_capacity(rows.len());
        let mut names: Vec<Option<String>> = Vec::with_capacity(rows.len());
        let mut lats: Vec<Option<f64>> = Vec::with_capacity(rows.len());
        let mut lons: Vec<Option<f64>> = Vec::with_capacity(rows.len());
        let mut addresses: Vec<serde_json::Value> = Vec::with_capacity(rows.len());
        let mut contacts: Vec<serde_json::Value> = Vec::with_capacity(rows.len());
        let mut shop_tags: Vec<serde_json::Value> = Vec::with_capacity(rows.len());
        let mut source_countries: Vec<String> = Vec::with_capacity(rows.len());

        for shop in &rows {
            ids.push(shop.id);
            country_codes.push(shop.country_code.clone());
            names.push(shop.name.clone());
            lats.push(shop.lat);
            lons.push(shop.lon);
            addresses.push(serde_json::to_value(&shop.address)?);
            contacts.push(serde_json::to_value(&shop.contact)?);
            shop_tags.push(serde_json::to_value(&shop.shop_tags)?);
            source_countries.push(shop.source_country.to_string());
        }

        let affected = sqlx::query(
            "INSERT INTO motorcycle_shops \
                 (id, country_code, name, lat, lon, address, contact, shop_tags, source_country) \
             SELECT * FROM UNNEST(\
                  $1::int8[], $2::text[], $3::text[], $4::float8[], $5::float8[], \
                  $6::jsonb[], $7::jsonb[], $8::jsonb[], $9::text[]) \
             ON CONFLICT (id) DO UPDATE SET \
                 country_code   = EXCLUDED.country_code, \
                 name           = EXCLUDED.name, \
                 lat            = EXCLUDED.lat, \
                 lon            = EXCLUDED.lon, \
                 address        = EXCLUDED.address, \
                 contact        = EXCLUDED.contact, \
                 shop_tags      = EXCLUDED.shop_tags, \
                 source_country = EXCLUDED.source_country, \
                 updated_at     = NOW()",
        )
        .bind(&ids)
        .bind(&country_codes)
        .bind(&names)
        .bind(&lats)
        .bind(&lons)
        .bind(&addresses)
        .bind(&contacts)
        .bind(&shop_tags)
        .bind(&source_countries)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::debug!(rows = affected, "upserted batch via Postgres");
        Ok(())
    }
}
