use super::*;
use crate::types::Center;

fn de() -> CountryCode {
    CountryCode::parse("DE").unwrap()
}

fn element(id: i64, tags: &[(&str, &str)]) -> RawElement {
    RawElement {
        id,
        lat: Some(52.5),
        lon: Some(13.4),
        center: None,
        tags: tags
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
    }
}

// -----------------------------------------------------------------------
// dropping and identity
// -----------------------------------------------------------------------

#[test]
fn element_without_tags_is_dropped() {
    assert!(normalize_element(&element(1, &[]), &de()).is_none());
}

#[test]
fn id_is_taken_from_element() {
    let record = normalize_element(&element(987_654_321, &[("shop", "motorcycle")]), &de()).unwrap();
    assert_eq!(record.id, 987_654_321);
}

#[test]
fn shop_tags_retain_every_tag() {
    let el = element(
        1,
        &[("shop", "motorcycle"), ("opening_hours", "Mo-Fr 09:00-18:00"), ("brand", "KTM")],
    );
    let record = normalize_element(&el, &de()).unwrap();
    assert_eq!(record.shop_tags, el.tags);
}

// -----------------------------------------------------------------------
// country_code
// -----------------------------------------------------------------------

#[test]
fn addr_country_tag_wins_over_query_country() {
    let record = normalize_element(&element(1, &[("addr:country", "FR")]), &de()).unwrap();
    assert_eq!(record.country_code, "FR");
    assert_eq!(record.source_country.as_str(), "DE");
}

#[test]
fn country_code_falls_back_to_query_country() {
    let record = normalize_element(&element(1, &[("shop", "motorcycle")]), &de()).unwrap();
    assert_eq!(record.country_code, "DE");
    assert_eq!(record.source_country.as_str(), "DE");
}

// -----------------------------------------------------------------------
// contact fallbacks
// -----------------------------------------------------------------------

#[test]
fn namespaced_phone_wins_over_bare_phone() {
    let record =
        normalize_element(&element(1, &[("contact:phone", "A"), ("phone", "B")]), &de()).unwrap();
    assert_eq!(record.contact.phone.as_deref(), Some("A"));
}

#[test]
fn bare_phone_used_when_namespaced_absent() {
    let record = normalize_element(&element(1, &[("phone", "B")]), &de()).unwrap();
    assert_eq!(record.contact.phone.as_deref(), Some("B"));
}

#[test]
fn phone_absent_when_neither_tag_present() {
    let record = normalize_element(&element(1, &[("shop", "motorcycle")]), &de()).unwrap();
    assert!(record.contact.phone.is_none());
}

#[test]
fn empty_namespaced_phone_falls_through_to_bare_phone() {
    let record =
        normalize_element(&element(1, &[("contact:phone", ""), ("phone", "B")]), &de()).unwrap();
    assert_eq!(record.contact.phone.as_deref(), Some("B"));
}

#[test]
fn empty_bare_phone_is_kept_when_namespaced_phone_missing() {
    let record = normalize_element(&element(1, &[("phone", "")]), &de()).unwrap();
    assert_eq!(record.contact.phone.as_deref(), Some(""));
}

#[test]
fn empty_namespaced_phone_without_fallback_is_absent() {
    let record = normalize_element(&element(1, &[("contact:phone", "")]), &de()).unwrap();
    assert!(record.contact.phone.is_none());
}

#[test]
fn website_and_email_follow_the_same_fallback() {
    let record = normalize_element(
        &element(
            1,
            &[
                ("contact:website", "https://a.example"),
                ("website", "https://b.example"),
                ("email", "shop@b.example"),
            ],
        ),
        &de(),
    )
    .unwrap();
    assert_eq!(record.contact.website.as_deref(), Some("https://a.example"));
    assert_eq!(record.contact.email.as_deref(), Some("shop@b.example"));
}

#[test]
fn fax_has_no_bare_tag_fallback() {
    let bare = normalize_element(&element(1, &[("fax", "+49 30 1")]), &de()).unwrap();
    assert!(bare.contact.fax.is_none());

    let namespaced = normalize_element(&element(1, &[("contact:fax", "+49 30 2")]), &de()).unwrap();
    assert_eq!(namespaced.contact.fax.as_deref(), Some("+49 30 2"));
}

// -----------------------------------------------------------------------
// address and coordinates
// -----------------------------------------------------------------------

#[test]
fn address_fields_are_direct_lookups_without_validation() {
    let record = normalize_element(
        &element(
            1,
            &[
                ("addr:city", "Berlin"),
                ("addr:street", "Hauptstraße"),
                ("addr:postcode", "not-a-postcode"),
                ("addr:suburb", "Mitte"),
            ],
        ),
        &de(),
    )
    .unwrap();
    assert_eq!(record.address.city.as_deref(), Some("Berlin"));
    assert_eq!(record.address.street.as_deref(), Some("Hauptstraße"));
    assert_eq!(record.address.postcode.as_deref(), Some("not-a-postcode"));
    assert_eq!(record.address.suburb.as_deref(), Some("Mitte"));
    assert!(record.address.housenumber.is_none());
}

#[test]
fn node_coordinates_are_copied() {
    let record = normalize_element(&element(1, &[("shop", "motorcycle")]), &de()).unwrap();
    assert_eq!(record.lat, Some(52.5));
    assert_eq!(record.lon, Some(13.4));
}

#[test]
fn center_used_when_element_has_no_coordinates() {
    let mut el = element(1, &[("shop", "motorcycle")]);
    el.lat = None;
    el.lon = None;
    el.center = Some(Center { lat: 48.1, lon: 11.5 });
    let record = normalize_element(&el, &de()).unwrap();
    assert_eq!(record.lat, Some(48.1));
    assert_eq!(record.lon, Some(11.5));
}

#[test]
fn coordinates_absent_without_center() {
    let mut el = element(1, &[("shop", "motorcycle")]);
    el.lat = None;
    el.lon = None;
    let record = normalize_element(&el, &de()).unwrap();
    assert!(record.lat.is_none());
    assert!(record.lon.is_none());
}

// -----------------------------------------------------------------------
// normalize_elements
// -----------------------------------------------------------------------

#[test]
fn normalize_elements_drops_tagless_and_keeps_order() {
    let elements = vec![
        element(3, &[("shop", "motorcycle")]),
        element(1, &[]),
        element(2, &[("craft", "motorcycle"), ("name", "Bike Fix")]),
    ];
    let records = normalize_elements(&elements, &de());
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(records[1].name.as_deref(), Some("Bike Fix"));
}
