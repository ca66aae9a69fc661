use placefinder::search::{
    AddressesProvider, Envelope, Point, Provider, ProviderError, SpatialReference,
};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn address_body(entries: &[serde_json::Value]) -> serde_json::Value {
    serde_json::json!({
        "header": { "totalresults": entries.len(), "output_srs": "EPSG:4326" },
        "results": entries
            .iter()
            .map(|e| serde_json::json!({ "DPA": e }))
            .collect::<Vec<_>>(),
    })
}

fn survey_entry() -> serde_json::Value {
    serde_json::json!({
        "UPRN": "100062039611",
        "ADDRESS": "ORDNANCE SURVEY, ADANAC DRIVE, SOUTHAMPTON, SO16 0AS",
        "X_COORDINATE": -1.470691,
        "Y_COORDINATE": 50.938015
    })
}

// ============================================================================
// Addresses Provider Tests
// ============================================================================

#[tokio::test]
async fn test_successful_find_parses_addresses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addresses/find"))
        .and(query_param("query", "Adanac Drive"))
        .and(query_param("output_srs", "EPSG:4326"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(address_body(&[survey_entry()])),
        )
        .mount(&mock_server)
        .await;

    let provider = AddressesProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let results = provider.query("Adanac Drive").await.unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.id, "100062039611");
    assert_eq!(result.name, "ORDNANCE SURVEY");
    assert_eq!(result.context, "ADANAC DRIVE, SOUTHAMPTON, SO16 0AS");
    assert_eq!(result.point, Point::new(-1.470691, 50.938015));
    assert_eq!(result.envelope, Some(Envelope::Empty));
    assert_eq!(result.spatial_reference, SpatialReference::WGS84);
}

#[tokio::test]
async fn test_postcode_term_queries_both_endpoints_and_dedups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addresses/find"))
        .and(query_param("query", "SO16 0AS"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(address_body(&[survey_entry()])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let second = serde_json::json!({
        "UPRN": "100062039612",
        "ADDRESS": "4, ADANAC DRIVE, SOUTHAMPTON, SO16 0AS",
        "X_COORDINATE": -1.470701,
        "Y_COORDINATE": 50.938020
    });
    Mock::given(method("GET"))
        .and(path("/addresses/postcode"))
        .and(query_param("postcode", "SO16 0AS"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(address_body(&[survey_entry(), second])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = AddressesProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let results = provider.query("SO16 0AS").await.unwrap();

    // The shared UPRN appears once; the postcode-only entry survives.
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["100062039611", "100062039612"]);
}

#[tokio::test]
async fn test_uprn_term_queries_the_uprn_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addresses/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/addresses/uprn"))
        .and(query_param("uprn", "100062039611"))
        .and(query_param("dataset", "dpa"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(address_body(&[survey_entry()])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = AddressesProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let results = provider.query("100062039611").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "100062039611");
}

#[tokio::test]
async fn test_plain_terms_skip_the_dedicated_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addresses/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/addresses/postcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/addresses/uprn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_body(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = AddressesProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let results = provider.query("Southampton").await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_api_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/addresses/find"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let provider = AddressesProvider::new("invalid-key".to_string(), Some(mock_server.uri()));
    let result = provider.query("Southampton").await;

    assert!(matches!(result, Err(ProviderError::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_unsupported_output_srs_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "header": { "totalresults": 1, "output_srs": "invalid:4326" },
        "results": [{ "DPA": survey_entry() }],
    });
    Mock::given(method("GET"))
        .and(path("/addresses/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let provider = AddressesProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let result = provider.query("Southampton").await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}
