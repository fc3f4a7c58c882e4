//! Persistence for normalized shop records.
//!
//! Every destination implements [`ShopSink`]; [`upsert_in_batches`] drives a
//! sink over a country's records in fixed-size chunks.

pub mod csv_export;
pub mod memory;
pub mod postgres;
pub mod rest;
pub mod sink;

use thiserror::Error;

pub use csv_export::{upsert_csv_file, write_csv, CSV_HEADER};
pub use memory::MemorySink;
pub use postgres::{connect_pool, run_migrations, PgSink, PoolConfig};
pub use rest::RestSink;
pub use sink::{upsert_in_batches, BatchError, ShopSink, BATCH_SIZE};

/// Name of the destination table, shared by the REST and Postgres sinks.
pub const SHOPS_TABLE: &str = "motorcycle_shops";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from store: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid store URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
