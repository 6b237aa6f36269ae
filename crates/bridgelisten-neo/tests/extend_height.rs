//! Extended-height endpoint against a mock HTTP server.

use std::time::Duration;

use bridgelisten_core::error::ListenError;
use bridgelisten_neo::ExtendHeightClient;

async fn client_for(server: &mockito::Server) -> ExtendHeightClient {
    ExtendHeightClient::new(format!("{}/height", server.url()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn string_height() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/height")
        .match_header("accepts", "application/json")
        .with_status(200)
        .with_body(r#"{"last_block_height": "6100123"}"#)
        .create_async()
        .await;

    let height = client_for(&server).await.latest_height().await.unwrap();
    assert_eq!(height, 6_100_123);
    mock.assert_async().await;
}

#[tokio::test]
async fn numeric_height_and_extra_fields() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/height")
        .with_status(200)
        .with_body(r#"{"network": "mainnet", "last_block_height": 42}"#)
        .create_async()
        .await;

    assert_eq!(client_for(&server).await.latest_height().await.unwrap(), 42);
}

#[tokio::test]
async fn non_ok_status_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/height")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let err = client_for(&server).await.latest_height().await.unwrap_err();
    assert!(matches!(err, ListenError::HttpStatus { status: 503 }));
    assert_eq!(err.to_string(), "response status code: 503");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/height")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server).await.latest_height().await.unwrap_err();
    assert!(matches!(err, ListenError::Decode(_)));
}

#[tokio::test]
async fn non_numeric_height_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/height")
        .with_status(200)
        .with_body(r#"{"last_block_height": "soon"}"#)
        .create_async()
        .await;

    let err = client_for(&server).await.latest_height().await.unwrap_err();
    assert!(matches!(err, ListenError::Decode(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_http_error() {
    let client = ExtendHeightClient::new("http://127.0.0.1:9/height", Duration::from_secs(2)).unwrap();
    let err = client.latest_height().await.unwrap_err();
    assert!(matches!(err, ListenError::Http(_)));
    assert!(err.is_transient());
}
