//! Engine client tests
//!
//! Tests for the search engine HTTP client against a mock server.

use catsearch::engine::{EngineClient, EngineError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_response() -> serde_json::Value {
    json!({
        "took": 3,
        "timed_out": false,
        "hits": {
            "total": { "value": 2, "relation": "eq" },
            "max_score": 5.0,
            "hits": [
                {
                    "_index": "wands",
                    "_id": "W1",
                    "_score": 5.0,
                    "_source": {
                        "product_id": "W1",
                        "product_name": "Standing Desk",
                        "product_class": "Desks",
                        "product_description": "Height adjustable standing desk.",
                        "average_rating": 4.2
                    }
                },
                {
                    "_index": "wands",
                    "_id": "W2",
                    "_score": 3.0,
                    "_source": {
                        "product_id": "W2",
                        "product_name": "Writing Desk",
                        "product_class": "Desks",
                        "product_description": "Compact writing desk.",
                        "average_rating": 3.9
                    }
                }
            ]
        },
        "aggregations": {
            "product_class": {
                "buckets": [
                    { "key": "Desks", "doc_count": 4 },
                    { "key": "", "doc_count": 1 }
                ]
            }
        }
    })
}

#[tokio::test]
async fn test_search_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wands/_search"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .mount(&mock_server)
        .await;

    let client = EngineClient::with_config("wands", Some(mock_server.uri()), None, None, Some(0));

    let body = json!({ "query": { "match_all": {} }, "size": 2 });
    let response = client.search(&body).await.unwrap();

    assert_eq!(response.hits.total.value, 2);
    assert_eq!(response.hits.max_score, Some(5.0));
    assert_eq!(response.hits.hits.len(), 2);
    assert_eq!(response.hits.hits[0].score, 5.0);
    assert_eq!(
        response.aggregations["product_class"].buckets[0].key,
        "Desks"
    );
}

#[tokio::test]
async fn test_search_sends_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wands/_search"))
        .and(header("Authorization", "ApiKey secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .mount(&mock_server)
        .await;

    let client = EngineClient::with_config(
        "wands",
        Some(mock_server.uri()),
        Some("secret-key".to_string()),
        None,
        Some(0),
    );

    let body = json!({ "query": { "match_all": {} } });
    assert!(client.search(&body).await.is_ok());
}

#[tokio::test]
async fn test_search_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wands/_search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = EngineClient::with_config("wands", Some(mock_server.uri()), None, None, Some(0));

    let result = client.search(&json!({})).await;
    match result.unwrap_err() {
        EngineError::Unauthorized => {}
        e => panic!("Expected Unauthorized error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_search_index_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/missing/_search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client =
        EngineClient::with_config("missing", Some(mock_server.uri()), None, None, Some(0));

    let result = client.search(&json!({})).await;
    match result.unwrap_err() {
        EngineError::IndexNotFound(index) => assert_eq!(index, "missing"),
        e => panic!("Expected IndexNotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_search_engine_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wands/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("shard failure"))
        .mount(&mock_server)
        .await;

    let client = EngineClient::with_config("wands", Some(mock_server.uri()), None, None, Some(0));

    let result = client.search(&json!({})).await;
    match result.unwrap_err() {
        EngineError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("shard failure"));
        }
        e => panic!("Expected Api error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_search_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wands/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = EngineClient::with_config("wands", Some(mock_server.uri()), None, None, Some(0));

    let result = client.search(&json!({})).await;
    match result.unwrap_err() {
        EngineError::Parse(_) => {}
        e => panic!("Expected Parse error, got: {:?}", e),
    }
}
