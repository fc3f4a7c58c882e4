use super::*;

fn test_client(endpoint: &str) -> OverpassClient {
    OverpassClient::with_endpoint(endpoint, 30, "moto-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn build_url_puts_query_in_data_param() {
    let client = test_client("https://overpass-api.de/api/interpreter");
    let url = client.build_url("[out:json];");
    assert!(url
        .as_str()
        .starts_with("https://overpass-api.de/api/interpreter?data="));
    let (key, value) = url.query_pairs().next().unwrap();
    assert_eq!(key, "data");
    assert_eq!(value, "[out:json];");
}

#[test]
fn build_url_encodes_query_characters() {
    let client = test_client("https://overpass-api.de/api/interpreter");
    let url = client.build_url("area[\"ISO3166-1\"=\"DE\"];");
    assert!(
        !url.as_str().contains('"'),
        "quotes should be percent-encoded: {url}"
    );
}

#[test]
fn with_endpoint_rejects_invalid_url() {
    let result = OverpassClient::with_endpoint("not a url", 30, "moto-test/0.1");
    assert!(matches!(
        result,
        Err(OverpassError::InvalidEndpoint { ref url, .. }) if url == "not a url"
    ));
}

#[test]
fn truncate_keeps_short_bodies() {
    assert_eq!(truncate("  busy  ", 200), "busy");
}

#[test]
fn truncate_cuts_long_bodies_on_char_boundary() {
    let body = "é".repeat(10);
    assert_eq!(truncate(&body, 3), "ééé...");
}
