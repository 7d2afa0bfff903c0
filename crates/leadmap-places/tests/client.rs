//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use leadmap_core::LatLng;
use leadmap_places::{PlacesClient, PlacesError, SearchRequest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, "leadmap-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn place(id: &str, name: &str, website: &str) -> serde_json::Value {
    json!({
        "id": id,
        "displayName": { "text": name },
        "websiteUri": website,
        "googleMapsUri": format!("https://maps.google.com/?cid={id}"),
        "primaryTypeDisplayName": { "text": "Bakery" }
    })
}

#[tokio::test]
async fn search_text_sends_key_mask_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(body_partial_json(json!({
            "textQuery": "Acme Bakery Austin USA",
            "pageSize": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [
                place("p1", "Acme Bakery North", "https://acme-north.com"),
                place("p2", "Acme Bakery", "https://www.acmebakery.com/")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .search_text(&SearchRequest::new("Acme Bakery Austin USA", 3))
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].place_id, "p1");
    assert_eq!(results[1].name, "Acme Bakery");
    assert_eq!(
        results[1].website.as_deref(),
        Some("https://www.acmebakery.com/")
    );
    assert_eq!(results[1].category.as_deref(), Some("Bakery"));
}

#[tokio::test]
async fn search_text_sends_field_mask_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(wiremock::matchers::header_exists("X-Goog-FieldMask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .search_text(&SearchRequest::new("anything", 1))
        .await
        .expect("search should succeed");
}

#[tokio::test]
async fn search_text_includes_location_bias_circle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(body_partial_json(json!({
            "textQuery": "Bakery open 24 hours",
            "locationBias": {
                "circle": {
                    "center": { "latitude": 30.5, "longitude": -97.5 },
                    "radius": 5000.0
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "places": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = SearchRequest::new("Bakery open 24 hours", 10).biased_to(
        LatLng {
            latitude: 30.5,
            longitude: -97.5,
        },
        5000.0,
    );
    let results = client.search_text(&request).await.expect("should succeed");
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_text_treats_empty_object_as_no_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .search_text(&SearchRequest::new("Nowhere Inc", 3))
        .await
        .expect("empty object should parse");
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_text_truncates_to_max_results() {
    let server = MockServer::start().await;

    let places: Vec<_> = (1..=5)
        .map(|i| place(&format!("p{i}"), "Acme", "https://acme.com"))
        .collect();
    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "places": places })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .search_text(&SearchRequest::new("Acme", 3))
        .await
        .expect("should succeed");
    assert_eq!(results.len(), 3);
    assert_eq!(results[2].place_id, "p3");
}

#[tokio::test]
async fn search_text_surfaces_google_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_text(&SearchRequest::new("Acme", 3))
        .await
        .expect_err("403 should be an error");

    match err {
        PlacesError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.starts_with("PERMISSION_DENIED"), "got: {message}");
        }
        other => panic!("expected PlacesError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn search_text_reports_quota_errors_as_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_text(&SearchRequest::new("Acme", 3))
        .await
        .expect_err("429 should be an error");
    assert!(
        matches!(err, PlacesError::Api { status: 429, ref message } if message == "quota exhausted"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn search_text_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_text(&SearchRequest::new("Acme", 3))
        .await
        .expect_err("non-JSON body should fail");
    assert!(matches!(err, PlacesError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn search_text_reports_connection_failure_as_http_error() {
    // Port 1 on localhost is reserved and refuses connections.
    let client = test_client("http://127.0.0.1:1");
    let err = client
        .search_text(&SearchRequest::new("Acme", 3))
        .await
        .expect_err("connection should fail");
    assert!(matches!(err, PlacesError::Http(_)), "got: {err:?}");
}
