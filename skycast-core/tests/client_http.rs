//! HTTP behavior tests for the WeatherAPI.com client against a mock server.
//!
//! These verify the fetch contract: both requests joined, the error taxonomy,
//! and the forecast-length invariant.

use skycast_core::{FetchError, WeatherApiClient, WeatherQuery, WeatherSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "Jaipur",
            "region": "Rajasthan",
            "country": "India",
            "localtime": "2026-08-08 14:30"
        },
        "current": {
            "temp_c": 28.5,
            "feelslike_c": 30.1,
            "humidity": 40,
            "wind_kph": 12.3,
            "uv": 6.0,
            "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/113.png" }
        }
    })
}

fn sample_forecast_response(days: usize) -> serde_json::Value {
    let forecastday: Vec<serde_json::Value> = (0..days)
        .map(|i| {
            serde_json::json!({
                "date": format!("2026-08-{:02}", 8 + i),
                "day": {
                    "maxtemp_c": 34.0 + i as f64,
                    "mintemp_c": 26.0 + i as f64,
                    "condition": { "text": "Patchy rain nearby" }
                }
            })
        })
        .collect();

    serde_json::json!({
        "location": { "name": "Jaipur", "country": "India" },
        "forecast": { "forecastday": forecastday }
    })
}

async fn mount_current(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn test_client(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::new("TEST_KEY".to_string())
        .expect("client creation should succeed")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn successful_fetch_joins_both_responses() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(7)))
        .await;

    let client = test_client(&server);
    let snapshot = client
        .fetch(&WeatherQuery::new("Jaipur", 7))
        .await
        .expect("both responses are well-formed");

    assert_eq!(snapshot.location.name, "Jaipur");
    assert_eq!(snapshot.location.country, "India");
    assert!((snapshot.current.temp_c - 28.5).abs() < f64::EPSILON);
    assert_eq!(snapshot.current.condition, "Sunny");
    assert_eq!(snapshot.current.humidity_pct, 40);
    assert!((snapshot.current.wind_kph - 12.3).abs() < f64::EPSILON);
    assert!((snapshot.current.feelslike_c - 30.1).abs() < f64::EPSILON);
    assert!((snapshot.current.uv - 6.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn forecast_has_requested_length_in_ascending_order() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(5)))
        .await;

    let client = test_client(&server);
    let snapshot = client
        .fetch(&WeatherQuery::new("Jaipur", 5))
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.forecast.len(), 5);
    for pair in snapshot.forecast.windows(2) {
        assert!(pair[0].date < pair[1].date, "forecast must stay chronological");
    }
    assert!((snapshot.forecast[0].max_temp_c - 34.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.forecast[0].condition, "Patchy rain nearby");
}

#[tokio::test]
async fn both_requests_carry_the_same_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "Jaipur"))
        .and(query_param("days", "3"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "Jaipur"))
        .and(query_param("days", "3"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch(&WeatherQuery::new("Jaipur", 3)).await;

    assert!(result.is_ok(), "expected success, got: {result:?}");
}

#[tokio::test]
async fn http_404_surfaces_status_and_no_partial_data() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(404).set_body_string(r#"{"error":{"message":"No matching location found."}}"#),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(7)))
        .await;

    let client = test_client(&server);
    let err = client
        .fetch(&WeatherQuery::new("Nowhereville", 7))
        .await
        .unwrap_err();

    match &err {
        FetchError::HttpStatus { status, body, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("No matching location found"));
        }
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn forecast_failure_fails_the_whole_cycle() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(500).set_body_string("internal error")).await;

    let client = test_client(&server);
    let err = client.fetch(&WeatherQuery::new("Jaipur", 7)).await.unwrap_err();

    assert!(
        matches!(err, FetchError::HttpStatus { .. }),
        "a good current response must not mask a failed forecast, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_string("not valid json")).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(7)))
        .await;

    let client = test_client(&server);
    let err = client.fetch(&WeatherQuery::new("Jaipur", 7)).await.unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }), "expected Parse, got: {err:?}");
}

#[tokio::test]
async fn missing_expected_fields_are_a_parse_error() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Jaipur", "country": "India" }
        })),
    )
    .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(7)))
        .await;

    let client = test_client(&server);
    let err = client.fetch(&WeatherQuery::new("Jaipur", 7)).await.unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }), "expected Parse, got: {err:?}");
}

#[tokio::test]
async fn over_delivered_forecast_is_truncated_to_request() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(10)))
        .await;

    let client = test_client(&server);
    let snapshot = client
        .fetch(&WeatherQuery::new("Jaipur", 7))
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.forecast.len(), 7);
}

#[tokio::test]
async fn single_day_request_yields_single_entry() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(1)))
        .await;

    let client = test_client(&server);
    let snapshot = client
        .fetch(&WeatherQuery::new("Jaipur", 1))
        .await
        .expect("fetch should succeed");

    assert_eq!(snapshot.forecast.len(), 1);
}

#[tokio::test]
async fn zero_day_request_yields_empty_forecast() {
    let server = MockServer::start().await;
    mount_current(&server, ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(sample_forecast_response(0)))
        .await;

    let client = test_client(&server);
    let snapshot = client
        .fetch(&WeatherQuery::new("Jaipur", 0))
        .await
        .expect("fetch should succeed");

    assert!(snapshot.forecast.is_empty());
    assert_eq!(snapshot.current.condition, "Sunny");
}
