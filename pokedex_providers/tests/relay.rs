use pokedex_core::Relay;
use pokedex_providers::{HttpRelay, RelaySettings};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn relay(server: &MockServer) -> HttpRelay {
    HttpRelay::new(&RelaySettings {
        enabled: true,
        url: server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn handshake_checks_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(relay(&server).handshake().await.is_ok());
}

#[tokio::test]
async fn unhealthy_relay_fails_the_handshake() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = relay(&server).handshake().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn tool_calls_post_name_and_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tools/call"))
        .and(body_json(json!({
            "name": "get_pokemon_info",
            "arguments": {"identifier": "pikachu"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "pikachu (피카츄) #025"}],
            "isError": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = relay(&server)
        .call_tool("get_pokemon_info", json!({"identifier": "pikachu"}))
        .await
        .unwrap();
    assert_eq!(text, "pikachu (피카츄) #025");
}

#[tokio::test]
async fn tool_errors_are_reported_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tools/call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "upstream timed out"}],
            "isError": true
        })))
        .mount(&server)
        .await;

    let err = relay(&server)
        .call_tool("search_pokemon", json!({"query": "char"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("upstream timed out"));
}

#[tokio::test]
async fn calls_after_close_never_reach_the_relay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tools/call"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let relay = relay(&server);
    relay.close().await;
    assert!(relay.call_tool("help", json!({})).await.is_err());
}
