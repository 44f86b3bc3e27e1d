//! End-to-end relay tests: router → real sensor client → stub HTTP
//! endpoint → recording transport.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sensorbot_core::router::{UNAUTHORIZED_TEXT, WELCOME_TEXT};
use sensorbot_core::{CommandRouter, InboundMessage, SensorClient};
use sensorbot_test::{
    RecordingTransport, StubResponse, StubSensorServer, TEST_READING_TEXT, authorized,
    start_command, test_reading_json, text_message, weather_request,
};

const USER: i64 = 1001;
const STRANGER: i64 = 2002;

async fn relay(response: StubResponse, timeout: Duration) -> (StubSensorServer, CommandRouter<SensorClient>) {
    let server = StubSensorServer::start(response).await.unwrap();
    let sensor = SensorClient::new(server.url(), timeout).unwrap();
    let router = CommandRouter::new(Arc::new(authorized(&[USER])), sensor);
    (server, router)
}

#[tokio::test]
async fn authorized_weather_request_relays_reading() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    router.handle(&weather_request(USER), &transport).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, USER);
    assert_eq!(sent[0].text, TEST_READING_TEXT);
    assert!(sent[0].keyboard.is_none());
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn each_request_fetches_once() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    for _ in 0..3 {
        router.handle(&weather_request(USER), &transport).await.unwrap();
    }

    assert_eq!(transport.sent().len(), 3);
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn stranger_is_denied_without_fetch() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    for text in ["/start", "🌤️ Get Weather Data", "hello"] {
        router
            .handle(&text_message(STRANGER, text), &transport)
            .await
            .unwrap();
    }

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    for msg in &sent {
        assert_eq!(msg.chat_id, STRANGER);
        assert_eq!(msg.text, UNAUTHORIZED_TEXT);
        assert!(msg.keyboard.is_none());
    }
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn reply_goes_to_originating_group_chat() {
    let (_server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();
    let group_chat = -100_200_300;

    router
        .handle(
            &InboundMessage::new(Some(USER), group_chat, "🌤️ Get Weather Data"),
            &transport,
        )
        .await
        .unwrap();

    assert_eq!(transport.sent()[0].chat_id, group_chat);
}

#[tokio::test]
async fn start_offers_single_button_keyboard() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    router.handle(&start_command(USER), &transport).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, WELCOME_TEXT);
    let keyboard = sent[0].keyboard.as_ref().unwrap();
    assert_eq!(
        keyboard.labels().collect::<Vec<_>>(),
        vec!["🌤️ Get Weather Data"]
    );
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn bad_status_is_reported_with_status() {
    let (_server, router) = relay(
        StubResponse::Status(503, "down".to_owned()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    router.handle(&weather_request(USER), &transport).await.unwrap();

    let text = &transport.sent()[0].text;
    assert!(text.starts_with("Error fetching sensor data:"), "{text}");
    assert!(text.contains("503"), "{text}");
}

#[tokio::test]
async fn malformed_body_is_reported_as_decode_error() {
    let (_server, router) = relay(
        StubResponse::Json(r#"{"temperature": 21.5}"#.to_owned()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    router.handle(&weather_request(USER), &transport).await.unwrap();

    let text = &transport.sent()[0].text;
    assert!(
        text.starts_with("Error fetching sensor data: could not decode sensor data:"),
        "{text}"
    );
}

#[tokio::test]
async fn hanging_endpoint_times_out() {
    let timeout = Duration::from_millis(300);
    let (server, router) = relay(StubResponse::Hang, timeout).await;
    let transport = RecordingTransport::new();

    let started = Instant::now();
    router.handle(&weather_request(USER), &transport).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= timeout, "replied after {elapsed:?}");
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.starts_with("Error fetching sensor data:"));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn unreachable_endpoint_is_reported() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(2),
    )
    .await;
    // Free the port so the connection is refused.
    let url = server.url();
    drop(server);
    drop(router);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let sensor = SensorClient::new(url, Duration::from_secs(2)).unwrap();
    let router = CommandRouter::new(Arc::new(authorized(&[USER])), sensor);
    let transport = RecordingTransport::new();

    router.handle(&weather_request(USER), &transport).await.unwrap();

    let text = &transport.sent()[0].text;
    assert!(
        text.starts_with("Error fetching sensor data: could not fetch sensor data:"),
        "{text}"
    );
}

#[tokio::test]
async fn authorized_unrecognized_and_empty_text_are_silent() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    router
        .handle(&text_message(USER, "what's the weather?"), &transport)
        .await
        .unwrap();
    router
        .handle(&text_message(USER, ""), &transport)
        .await
        .unwrap();

    assert!(transport.sent().is_empty());
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn stranger_non_text_message_is_denied() {
    let (server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::new();

    router
        .handle(&text_message(STRANGER, ""), &transport)
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, STRANGER);
    assert_eq!(sent[0].text, UNAUTHORIZED_TEXT);
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn transport_failure_is_returned() {
    let (_server, router) = relay(
        StubResponse::Json(test_reading_json()),
        Duration::from_secs(5),
    )
    .await;
    let transport = RecordingTransport::failing();

    let result = router.handle(&start_command(USER), &transport).await;
    assert!(result.is_err());
}
