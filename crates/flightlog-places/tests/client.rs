//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use std::time::Duration;

use flightlog_places::{PlacesClient, PlacesError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn photo_mock(photo_path: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(photo_path))
        .and(query_param("maxHeightPx", "800"))
        .and(query_param("key", "test-key"))
        .respond_with(response)
}

#[tokio::test]
async fn fetch_detail_parses_payload_and_sends_field_mask() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "displayName": { "text": "Narita International", "languageCode": "en" },
        "formattedAddress": "1-1 Furugome, Narita, Chiba",
        "rating": 4.3,
        "userRatingCount": 21032,
        "location": { "latitude": 35.7719, "longitude": 140.3929 },
        "photos": [
            { "name": "places/nrt/photos/p1" },
            { "name": "places/nrt/photos/p2" }
        ],
        "primaryType": "international_airport",
        "types": ["international_airport", "airport"],
        "priceLevel": "PRICE_LEVEL_MODERATE",
        "websiteUri": "https://www.narita-airport.jp/",
        "nationalPhoneNumber": "0476-34-8000"
    });

    Mock::given(method("GET"))
        .and(path("/places/nrt"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.fetch_detail("nrt").await.expect("should parse detail");

    assert_eq!(detail.rating, Some(4.3));
    assert_eq!(detail.user_rating_count, Some(21032));
    assert_eq!(detail.photos.len(), 2);
    assert_eq!(detail.photos[0].name, "places/nrt/photos/p1");
    assert_eq!(detail.primary_type.as_deref(), Some("international_airport"));

    // The service only returns masked fields, so the mask header must cover
    // everything the normalizer maps.
    let requests = server.received_requests().await.expect("recorded requests");
    let mask = requests[0]
        .headers
        .get("X-Goog-FieldMask")
        .expect("field mask header present")
        .to_str()
        .expect("ascii header");
    for field in [
        "displayName",
        "formattedAddress",
        "rating",
        "userRatingCount",
        "location",
        "photos",
        "primaryType",
        "types",
        "regularOpeningHours",
        "priceLevel",
        "websiteUri",
        "nationalPhoneNumber",
        "reviews",
    ] {
        assert!(mask.contains(field), "field mask missing {field}: {mask}");
    }
}

#[tokio::test]
async fn fetch_detail_surfaces_upstream_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/places/bogus"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such place"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_detail("bogus").await.unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got {err}");
    match err {
        PlacesError::Upstream { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such place");
        }
        other => panic!("expected Upstream error, got {other}"),
    }
}

#[tokio::test]
async fn photo_redirect_resolves_to_location_header() {
    let server = MockServer::start().await;

    photo_mock(
        "/places/nrt/photos/p1/media",
        ResponseTemplate::new(302).insert_header("Location", "https://cdn.example/x.jpg"),
    )
    .expect(1)
    .mount(&server)
    .await;

    let client = test_client(&server.uri());
    let resolved = client.fetch_photo_asset("places/nrt/photos/p1").await;

    assert_eq!(resolved.as_deref(), Some("https://cdn.example/x.jpg"));
}

#[tokio::test]
async fn photo_direct_success_resolves_to_request_url() {
    let server = MockServer::start().await;

    photo_mock("/places/nrt/photos/p1/media", ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved = client
        .fetch_photo_asset("places/nrt/photos/p1")
        .await
        .expect("direct success should resolve");

    assert_eq!(
        resolved,
        format!(
            "{}/places/nrt/photos/p1/media?maxHeightPx=800&key=test-key",
            server.uri()
        )
    );
}

#[tokio::test]
async fn photo_failure_yields_none_without_error() {
    let server = MockServer::start().await;

    photo_mock("/places/nrt/photos/p1/media", ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch_photo_asset("places/nrt/photos/p1").await.is_none());
}

#[tokio::test]
async fn resolve_photos_drops_failures_and_preserves_order() {
    let server = MockServer::start().await;

    photo_mock(
        "/places/nrt/photos/p1/media",
        ResponseTemplate::new(302).insert_header("Location", "https://cdn.example/1.jpg"),
    )
    .mount(&server)
    .await;
    photo_mock("/places/nrt/photos/p2/media", ResponseTemplate::new(500))
        .mount(&server)
        .await;
    photo_mock(
        "/places/nrt/photos/p3/media",
        ResponseTemplate::new(302).insert_header("Location", "https://cdn.example/3.jpg"),
    )
    .mount(&server)
    .await;

    let client = test_client(&server.uri());
    let refs = vec![
        "places/nrt/photos/p1".to_owned(),
        "places/nrt/photos/p2".to_owned(),
        "places/nrt/photos/p3".to_owned(),
    ];
    let resolved = client.resolve_photos(&refs, Duration::from_secs(5)).await;

    assert_eq!(
        resolved,
        vec!["https://cdn.example/1.jpg", "https://cdn.example/3.jpg"]
    );
}

#[tokio::test]
async fn resolve_photos_empty_input_issues_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved = client.resolve_photos(&[], Duration::from_secs(5)).await;

    assert!(resolved.is_empty());
}

#[tokio::test]
async fn resolve_photos_abandons_slow_fetches_but_keeps_fast_ones() {
    let server = MockServer::start().await;

    photo_mock(
        "/places/nrt/photos/slow/media",
        ResponseTemplate::new(302)
            .insert_header("Location", "https://cdn.example/slow.jpg")
            .set_delay(Duration::from_secs(5)),
    )
    .mount(&server)
    .await;
    photo_mock(
        "/places/nrt/photos/fast/media",
        ResponseTemplate::new(302).insert_header("Location", "https://cdn.example/fast.jpg"),
    )
    .mount(&server)
    .await;

    let client = test_client(&server.uri());
    let refs = vec![
        "places/nrt/photos/slow".to_owned(),
        "places/nrt/photos/fast".to_owned(),
    ];
    let resolved = client
        .resolve_photos(&refs, Duration::from_millis(500))
        .await;

    assert_eq!(resolved, vec!["https://cdn.example/fast.jpg"]);
}
