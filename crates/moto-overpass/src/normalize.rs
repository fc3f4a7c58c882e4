//! Normalization of Overpass elements into [`ShopRecord`]s.
//!
//! Pure and total: every field is a tag lookup, absent tags stay absent, and
//! nothing is validated. The only element that yields no record is one with
//! no tags at all.

use std::collections::BTreeMap;

use moto_core::{Address, Contact, CountryCode, ShopRecord};

use crate::types::RawElement;

/// Converts one element into a [`ShopRecord`].
///
/// Returns `None` when the element has no tags.
#[must_use]
pub fn normalize_element(element: &RawElement, country: &CountryCode) -> Option<ShopRecord> {
    let tags = &element.tags;
    if tags.is_empty() {
        return None;
    }

    let (lat, lon) = coordinates(element);

    Some(ShopRecord {
        id: element.id,
        country_code: tag(tags, "addr:country").unwrap_or_else(|| country.to_string()),
        name: tag(tags, "name"),
        lat,
        lon,
        address: Address {
            city: tag(tags, "addr:city"),
            street: tag(tags, "addr:street"),
            housenumber: tag(tags, "addr:housenumber"),
            postcode: tag(tags, "addr:postcode"),
            suburb: tag(tags, "addr:suburb"),
        },
        contact: Contact {
            phone: tag_or(tags, "contact:phone", "phone"),
            fax: tag(tags, "contact:fax"),
            website: tag_or(tags, "contact:website", "website"),
            email: tag_or(tags, "contact:email", "email"),
        },
        shop_tags: tags.clone(),
        source_country: country.clone(),
    })
}

/// Normalizes a whole query response, dropping tag-less elements and keeping
/// the response order.
#[must_use]
pub fn normalize_elements(elements: &[RawElement], country: &CountryCode) -> Vec<ShopRecord> {
    elements
        .iter()
        .filter_map(|el| normalize_element(el, country))
        .collect()
}

fn tag(tags: &BTreeMap<String, String>, key: &str) -> Option<String> {
    tags.get(key).cloned()
}

/// `primary` if set to a non-empty value, else `fallback` as stored (an
/// empty `fallback` is kept).
fn tag_or(tags: &BTreeMap<String, String>, primary: &str, fallback: &str) -> Option<String> {
    tags.get(primary)
        .filter(|v| !v.is_empty())
        .or_else(|| tags.get(fallback))
        .cloned()
}

/// Direct node coordinates, else the server-computed center.
fn coordinates(element: &RawElement) -> (Option<f64>, Option<f64>) {
    match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => (Some(lat), Some(lon)),
        (None, None, Some(center)) => (Some(center.lat), Some(center.lon)),
        (lat, lon, _) => (lat, lon),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
