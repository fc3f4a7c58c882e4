//! Country-by-country ingestion: query, normalize, batch-upsert.
//!
//! [`run_pipeline`] walks the country list strictly in sequence. Each country
//! runs through the [`CountryState`] machine and ends in a
//! [`CountryOutcome`]; failures are recorded and the run moves on. There is no
//! retry within a run. Rerunning is safe because every write is an upsert on
//! the OSM element id.

pub mod pipeline;
pub mod source;
pub mod state;
pub mod summary;

pub use pipeline::{process_country, run_pipeline, PipelineOptions};
pub use source::ShopSource;
pub use state::{Cooldown, CountryOutcome, CountryState, FailedStage};
pub use summary::{CountryReport, RunSummary};
