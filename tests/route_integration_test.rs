use httpmock::prelude::*;
use kripa_ops::app::deliveries::NewDelivery;
use kripa_ops::domain::model::DeliveryStatus;
use kripa_ops::utils::error::ErrorCategory;
use kripa_ops::{DeliveryBook, GeminiClient, GeminiConfig, JsonFileStore, RouteOptimizer};
use tempfile::TempDir;

fn new_delivery(name: &str, address: &str) -> NewDelivery {
    NewDelivery {
        patient_name: name.to_string(),
        address: address.to_string(),
        contact: "9876543210".to_string(),
        medications: vec![],
    }
}

fn gemini_config(server: &MockServer, api_key: Option<&str>) -> GeminiConfig {
    GeminiConfig {
        api_key: api_key.map(str::to_string),
        model: "gemini-2.5-flash".to_string(),
        endpoint: server.base_url(),
    }
}

fn envelope_with(route_json: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": route_json }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn pending_deliveries_are_planned_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path());
    let book = DeliveryBook::new(store);

    book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();
    book.add(new_delivery("Bob Johnson", "789 Pine St")).await.unwrap();
    let done = book.add(new_delivery("Done Customer", "1 Old Rd")).await.unwrap();
    book.set_status(done.id, DeliveryStatus::Completed).await.unwrap();

    // The service answers out of order; the optimizer must sort.
    let route_json = r#"[
        {"customerName":"Jane Smith","address":"456 Oak Ave","optimized_order":2},
        {"customerName":"Bob Johnson","address":"789 Pine St","optimized_order":1}
    ]"#;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent")
            .header("x-goog-api-key", "test-key")
            .body_contains("Customer: Jane Smith, Address: 456 Oak Ave")
            .body_contains("Customer: Bob Johnson, Address: 789 Pine St");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(envelope_with(route_json));
    });

    let client = GeminiClient::new(gemini_config(&server, Some("test-key")));
    let optimizer = RouteOptimizer::new(client);

    let route = book.optimize_pending(&optimizer).await.unwrap();

    api_mock.assert();
    assert_eq!(route.len(), 2);
    assert_eq!(route[0].customer_name, "Bob Johnson");
    assert_eq!(route[0].order, 1);
    assert_eq!(route[1].customer_name, "Jane Smith");
    assert_eq!(route[1].order, 2);
}

#[tokio::test]
async fn completed_deliveries_never_reach_the_wire() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path());
    let book = DeliveryBook::new(store);

    book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();
    let done = book.add(new_delivery("Done Customer", "1 Old Rd")).await.unwrap();
    book.set_status(done.id, DeliveryStatus::Completed).await.unwrap();

    let route_json = r#"[{"customerName":"Jane Smith","address":"456 Oak Ave","optimized_order":1}]"#;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).body_contains("Done Customer");
        then.status(200);
    });
    let planned_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(envelope_with(route_json));
    });

    let client = GeminiClient::new(gemini_config(&server, Some("test-key")));
    let optimizer = RouteOptimizer::new(client);

    let route = book.optimize_pending(&optimizer).await.unwrap();

    api_mock.assert_hits(0);
    planned_mock.assert();
    assert_eq!(route.len(), 1);
}

#[tokio::test]
async fn empty_roster_skips_the_network_entirely() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path());
    let book = DeliveryBook::new(store);

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let client = GeminiClient::new(gemini_config(&server, Some("test-key")));
    let optimizer = RouteOptimizer::new(client);

    let route = book.optimize_pending(&optimizer).await.unwrap();

    assert!(route.is_empty());
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn missing_credential_is_a_configuration_failure_with_no_request() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path());
    let book = DeliveryBook::new(store);

    book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let client = GeminiClient::new(gemini_config(&server, None));
    let optimizer = RouteOptimizer::new(client);

    let err = book.optimize_pending(&optimizer).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(err.user_friendly_message().contains("GEMINI_API_KEY"));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn service_outage_surfaces_the_generic_retry_message() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path());
    let book = DeliveryBook::new(store);

    book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(503).body("overloaded");
    });

    let client = GeminiClient::new(gemini_config(&server, Some("test-key")));
    let optimizer = RouteOptimizer::new(client);

    let err = book.optimize_pending(&optimizer).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Transport);
    assert!(err
        .user_friendly_message()
        .contains("check the addresses and your connection"));
}
