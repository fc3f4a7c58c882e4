use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::country::CountryCode;

/// A motorcycle shop as persisted in the `motorcycle_shops` table.
///
/// `id` is the upstream OSM element id, so re-ingesting the same element
/// replaces the stored row instead of adding a new one. Optional fields
/// serialize as `null` so that every record in a batch carries the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    pub id: i64,
    /// `addr:country` when tagged, otherwise the queried country. A stale tag
    /// wins over the query.
    pub country_code: String,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Address,
    pub contact: Contact,
    pub shop_tags: BTreeMap<String, String>,
    pub source_country: CountryCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub street: Option<String>,
    pub housenumber: Option<String>,
    pub postcode: Option<String>,
    pub suburb: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
}
