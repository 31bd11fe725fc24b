//! Tests for the lenient `invoke` entry point.

mod common;

use common::{
    client_for_mock, mock_action, mock_anki_error, mock_anki_response, setup_mock_server,
};
use deckcopy_connect::AnkiClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_invoke_returns_result_unchanged() {
    let server = setup_mock_server().await;
    let result = json!([{"noteId": 1, "fields": {"Front": {"value": "A", "order": 0}}}]);
    mock_action(&server, "notesInfo", mock_anki_response(result.clone())).await;

    let client = client_for_mock(&server);
    let value = client
        .invoke("notesInfo", Some(json!({"notes": [1]})))
        .await;

    assert_eq!(value, Some(result));
}

#[tokio::test]
async fn test_invoke_sends_envelope_without_params() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"action": "version", "version": 6})))
        .respond_with(mock_anki_response(6))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    assert_eq!(client.invoke("version", None).await, Some(json!(6)));
}

#[tokio::test]
async fn test_invoke_omits_empty_params() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"action": "deckNames", "version": 6})))
        .respond_with(mock_anki_response(vec!["Default"]))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let names = client.invoke("deckNames", Some(json!({}))).await;

    assert_eq!(names, Some(json!(["Default"])));
}

#[tokio::test]
async fn test_invoke_sends_params() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "action": "createDeck",
            "version": 6,
            "params": {"deck": "print-jlpt"}
        })))
        .respond_with(mock_anki_response(1651445861967_i64))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let id = client
        .invoke("createDeck", Some(json!({"deck": "print-jlpt"})))
        .await;

    assert_eq!(id, Some(json!(1651445861967_i64)));
}

#[tokio::test]
async fn test_invoke_remote_error_is_absent() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "addNote",
        mock_anki_error("cannot create note because it is a duplicate"),
    )
    .await;

    let client = client_for_mock(&server);
    assert_eq!(client.invoke("addNote", Some(json!({}))).await, None);
}

#[tokio::test]
async fn test_invoke_error_wins_over_result() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        ResponseTemplate::new(200).set_body_json(json!({
            "result": ["Default"],
            "error": "collection is not available"
        })),
    )
    .await;

    let client = client_for_mock(&server);
    assert_eq!(client.invoke("deckNames", None).await, None);
}

#[tokio::test]
async fn test_invoke_null_result_is_absent() {
    let server = setup_mock_server().await;
    mock_action(&server, "createDeck", mock_anki_response(serde_json::Value::Null)).await;

    let client = client_for_mock(&server);
    assert_eq!(client.invoke("createDeck", Some(json!({"deck": "x"}))).await, None);
}

#[tokio::test]
async fn test_invoke_malformed_body_is_absent() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let client = client_for_mock(&server);
    assert_eq!(client.invoke("deckNames", None).await, None);
}

#[tokio::test]
async fn test_invoke_connection_refused_is_absent() {
    // Nothing listens on port 1.
    let client = AnkiClient::builder().endpoint("127.0.0.1", 1).build();
    assert_eq!(client.invoke("version", None).await, None);
}
