//! Per-country state machine.
//!
//! ```text
//! Querying ──err──────────────────────────────▶ Done(Failed { Query })
//!    │ ok
//!    ▼
//! Normalizing ──0 records─────────────────────▶ Done(Skipped)
//!    │ ≥1 record
//!    ▼
//! Sinking ──err───────────────────────────────▶ Done(Failed { Sink })
//!    │ ok
//!    ▼
//! Done(Succeeded)
//! ```
//!
//! The transition functions are pure so the table can be tested without a
//! network or a store.

use std::fmt;

use moto_core::ShopRecord;
use moto_overpass::{OverpassError, RawElement};
use moto_store::BatchError;

#[derive(Debug)]
pub enum CountryState {
    Querying,
    Normalizing(Vec<RawElement>),
    Sinking(Vec<ShopRecord>),
    Done(CountryOutcome),
}

/// Where a failed country stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Query,
    Sink,
}

impl fmt::Display for FailedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailedStage::Query => write!(f, "query"),
            FailedStage::Sink => write!(f, "sink"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryOutcome {
    Succeeded {
        records: usize,
    },
    /// The query matched nothing, or only tag-less elements.
    Skipped,
    Failed {
        stage: FailedStage,
        /// Records persisted before a sink failure; always 0 for query
        /// failures.
        written: usize,
        reason: String,
    },
}

/// Which pause follows a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooldown {
    None,
    Success,
    Failure,
}

impl CountryOutcome {
    #[must_use]
    pub fn cooldown(&self) -> Cooldown {
        match self {
            CountryOutcome::Succeeded { .. } => Cooldown::Success,
            CountryOutcome::Skipped => Cooldown::None,
            CountryOutcome::Failed { .. } => Cooldown::Failure,
        }
    }
}

impl CountryState {
    #[must_use]
    pub fn after_query(result: Result<Vec<RawElement>, OverpassError>) -> Self {
        match result {
            Ok(elements) => CountryState::Normalizing(elements),
            Err(e) => CountryState::Done(CountryOutcome::Failed {
                stage: FailedStage::Query,
                written: 0,
                reason: e.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn after_normalize(records: Vec<ShopRecord>) -> Self {
        if records.is_empty() {
            CountryState::Done(CountryOutcome::Skipped)
        } else {
            CountryState::Sinking(records)
        }
    }

    #[must_use]
    pub fn after_sink(result: Result<usize, BatchError>) -> Self {
        match result {
            Ok(records) => CountryState::Done(CountryOutcome::Succeeded { records }),
            Err(e) => CountryState::Done(CountryOutcome::Failed {
                stage: FailedStage::Sink,
                written: e.written,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use moto_core::{Address, Contact, CountryCode};
    use moto_store::StoreError;

    use super::*;

    fn element(id: i64) -> RawElement {
        RawElement {
            id,
            lat: None,
            lon: None,
            center: None,
            tags: BTreeMap::new(),
        }
    }

    fn record(id: i64) -> ShopRecord {
        ShopRecord {
            id,
            country_code: "DE".to_owned(),
            name: None,
            lat: None,
            lon: None,
            address: Address::default(),
            contact: Contact::default(),
            shop_tags: BTreeMap::from([("shop".to_owned(), "motorcycle".to_owned())]),
            source_country: CountryCode::parse("DE").unwrap(),
        }
    }

    #[test]
    fn query_success_moves_to_normalizing() {
        let state = CountryState::after_query(Ok(vec![element(1), element(2)]));
        assert!(matches!(state, CountryState::Normalizing(ref els) if els.len() == 2));
    }

    #[test]
    fn query_success_with_no_elements_still_normalizes() {
        let state = CountryState::after_query(Ok(Vec::new()));
        assert!(matches!(state, CountryState::Normalizing(ref els) if els.is_empty()));
    }

    #[test]
    fn query_failure_is_terminal() {
        let state = CountryState::after_query(Err(OverpassError::Runtime(
            "runtime error: out of memory".to_owned(),
        )));
        match state {
            CountryState::Done(CountryOutcome::Failed {
                stage,
                written,
                reason,
            }) => {
                assert_eq!(stage, FailedStage::Query);
                assert_eq!(written, 0);
                assert!(reason.contains("out of memory"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn zero_records_is_skipped() {
        let state = CountryState::after_normalize(Vec::new());
        assert!(matches!(state, CountryState::Done(CountryOutcome::Skipped)));
    }

    #[test]
    fn records_move_to_sinking() {
        let state = CountryState::after_normalize(vec![record(1)]);
        assert!(matches!(state, CountryState::Sinking(ref r) if r.len() == 1));
    }

    #[test]
    fn sink_success_reports_record_count() {
        let state = CountryState::after_sink(Ok(250));
        assert!(matches!(
            state,
            CountryState::Done(CountryOutcome::Succeeded { records: 250 })
        ));
    }

    #[test]
    fn sink_failure_keeps_partial_count() {
        let state = CountryState::after_sink(Err(BatchError {
            chunk: 2,
            written: 200,
            source: StoreError::UnexpectedStatus {
                status: 500,
                body: "down".to_owned(),
            },
        }));
        assert!(matches!(
            state,
            CountryState::Done(CountryOutcome::Failed {
                stage: FailedStage::Sink,
                written: 200,
                ..
            })
        ));
    }

    #[test]
    fn cooldown_per_outcome() {
        assert_eq!(
            CountryOutcome::Succeeded { records: 1 }.cooldown(),
            Cooldown::Success
        );
        assert_eq!(CountryOutcome::Skipped.cooldown(), Cooldown::None);
        assert_eq!(
            CountryOutcome::Failed {
                stage: FailedStage::Query,
                written: 0,
                reason: String::new(),
            }
            .cooldown(),
            Cooldown::Failure
        );
    }
}
