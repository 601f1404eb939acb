//! Integration tests for the WhatsApp notifier

use idata_slot_watch::notifier::WhatsAppNotifier;
use url::Url;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_notifier(server: &MockServer) -> WhatsAppNotifier {
    let url = Url::parse(&format!("{}/whatsapp.php", server.uri())).unwrap();
    WhatsAppNotifier::with_api_url(url).unwrap()
}

#[tokio::test]
async fn test_send_after_register_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("phone", "+905551112233"))
        .and(query_param("text", "slot found"))
        .and(query_param("apikey", "key-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut notifier = gateway_notifier(&server);
    notifier.register("+905551112233", "key-1");

    let sent = notifier.send("+905551112233", "slot found").await.unwrap();
    assert!(sent);
}

#[tokio::test]
async fn test_send_without_register_is_fatal_error() {
    let server = MockServer::start().await;
    let notifier = gateway_notifier(&server);

    let err = notifier.send("+905551112233", "slot found").await.unwrap_err();
    assert!(err.to_string().contains("+905551112233"));

    // Nothing may reach the gateway without a key.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_gateway_refusal_is_soft_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut notifier = gateway_notifier(&server);
    notifier.register("+905551112233", "key-1");

    let sent = notifier.send("+905551112233", "slot found").await.unwrap();
    assert!(!sent);
}

#[tokio::test]
async fn test_unreachable_gateway_is_soft_failure() {
    let mut notifier =
        WhatsAppNotifier::with_api_url(Url::parse("http://127.0.0.1:9/whatsapp.php").unwrap())
            .unwrap();
    notifier.register("+905551112233", "key-1");

    let sent = notifier.send("+905551112233", "slot found").await.unwrap();
    assert!(!sent);
}
