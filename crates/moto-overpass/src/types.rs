//! Overpass API response types.
//!
//! Only the fields the normalizer reads are modelled; everything else in the
//! `[out:json]` payload (`version`, `generator`, `osm3s`) is ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level `[out:json]` payload.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<RawElement>,
    /// Set by the interpreter when the query hit a runtime error such as a
    /// timeout or memory exhaustion. The HTTP status is still 200 in that case.
    #[serde(default)]
    pub remark: Option<String>,
}

impl OverpassResponse {
    /// The remark text, if it reports a runtime error rather than a notice.
    #[must_use]
    pub fn runtime_error(&self) -> Option<&str> {
        self.remark
            .as_deref()
            .filter(|r| r.trim_start().starts_with("runtime error"))
    }
}

/// One matched map element.
///
/// Nodes carry `lat`/`lon` directly. Ways and relations only carry a
/// `center` when the query ends in `out center`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_without_tags_deserializes_with_empty_map() {
        let el: RawElement =
            serde_json::from_str(r#"{"type":"node","id":7,"lat":1.5,"lon":2.5}"#).unwrap();
        assert_eq!(el.id, 7);
        assert_eq!(el.lat, Some(1.5));
        assert!(el.tags.is_empty());
        assert!(el.center.is_none());
    }

    #[test]
    fn way_with_center_deserializes() {
        let el: RawElement = serde_json::from_str(
            r#"{"type":"way","id":9,"center":{"lat":48.1,"lon":11.5},"tags":{"shop":"motorcycle"}}"#,
        )
        .unwrap();
        assert!(el.lat.is_none());
        let center = el.center.unwrap();
        assert!((center.lat - 48.1).abs() < f64::EPSILON);
        assert_eq!(el.tags["shop"], "motorcycle");
    }

    #[test]
    fn missing_elements_array_is_empty() {
        let resp: OverpassResponse = serde_json::from_str(r#"{"version":0.6}"#).unwrap();
        assert!(resp.elements.is_empty());
        assert!(resp.runtime_error().is_none());
    }

    #[test]
    fn runtime_error_remark_is_detected() {
        let resp: OverpassResponse = serde_json::from_str(
            r#"{"elements":[],"remark":"runtime error: Query timed out in \"query\" at line 3 after 61 seconds."}"#,
        )
        .unwrap();
        assert!(resp.runtime_error().unwrap().contains("timed out"));
    }

    #[test]
    fn informational_remark_is_not_an_error() {
        let resp: OverpassResponse =
            serde_json::from_str(r#"{"elements":[],"remark":"notice: area not found"}"#).unwrap();
        assert!(resp.runtime_error().is_none());
    }
}
