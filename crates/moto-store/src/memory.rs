use std::collections::BTreeMap;
use std::sync::Mutex;

use moto_core::ShopRecord;

use crate::sink::ShopSink;
use crate::StoreError;

/// In-process sink keyed by `id`; a later upsert of the same `id` replaces
/// the earlier record. Backs dry runs and CSV export.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Mutex<BTreeMap<i64, ShopRecord>>,
    batches: Mutex<usize>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, ordered by `id`.
    #[must_use]
    pub fn records(&self) -> Vec<ShopRecord> {
        self.lock_rows().values().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<ShopRecord> {
        self.lock_rows().get(&id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_rows().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_rows().is_empty()
    }

    /// Number of upsert calls received.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        *self
            .batches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, BTreeMap<i64, ShopRecord>> {
        // A poisoned map is still consistent: every insert is a single call.
        self.rows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ShopSink for MemorySink {
    async fn upsert(&self, records: &[ShopRecord]) -> Result<(), StoreError> {
        {
            let mut rows = self.lock_rows();
            for record in records {
                rows.insert(record.id, record.clone());
            }
        }
        *self
            .batches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use moto_core::{Address, Contact, CountryCode};

    use super::*;

    fn record(id: i64, name: &str) -> ShopRecord {
        ShopRecord {
            id,
            country_code: "IT".to_owned(),
            name: Some(name.to_owned()),
            lat: Some(45.46),
            lon: Some(9.19),
            address: Address::default(),
            contact: Contact::default(),
            shop_tags: BTreeMap::from([("shop".to_owned(), "motorcycle".to_owned())]),
            source_country: CountryCode::parse("IT").unwrap(),
        }
    }

    #[tokio::test]
    async fn upserting_same_id_twice_keeps_one_record_with_second_values() {
        let sink = MemorySink::new();

        sink.upsert(&[record(7, "Moto Rossi")]).await.unwrap();
        sink.upsert(&[record(7, "Moto Rossi & Figli")]).await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.get(7).unwrap().name.as_deref(),
            Some("Moto Rossi & Figli")
        );
        assert_eq!(sink.batch_count(), 2);
    }

    #[tokio::test]
    async fn records_are_ordered_by_id() {
        let sink = MemorySink::new();
        sink.upsert(&[record(30, "c"), record(10, "a"), record(20, "b")])
            .await
            .unwrap();
        let ids: Vec<i64> = sink.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn new_sink_is_empty() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        assert_eq!(sink.batch_count(), 0);
    }
}
