//! Authorization properties of the router, driven by a scripted sensor.

use std::sync::Arc;

use sensorbot_core::router::UNAUTHORIZED_TEXT;
use sensorbot_core::{CommandRouter, InboundMessage};
use sensorbot_test::{
    RecordingTransport, ScriptedSensor, TEST_READING_TEXT, authorized, test_reading,
    weather_request,
};

#[tokio::test]
async fn only_listed_senders_trigger_fetches() {
    let sensor = Arc::new(ScriptedSensor::new());
    let router = CommandRouter::new(Arc::new(authorized(&[10, 20])), Arc::clone(&sensor));
    let transport = RecordingTransport::new();

    let strangers = [0, 1, 11, 19, 21, -10, i64::MAX, i64::MIN];
    for id in strangers {
        router.handle(&weather_request(id), &transport).await.unwrap();
    }

    let sent = transport.sent();
    assert_eq!(sent.len(), strangers.len());
    for (msg, id) in sent.iter().zip(strangers) {
        assert_eq!(msg.chat_id, id);
        assert_eq!(msg.text, UNAUTHORIZED_TEXT);
    }
    assert_eq!(sensor.calls(), 0);
}

#[tokio::test]
async fn empty_allow_list_denies_everyone() {
    let sensor = Arc::new(ScriptedSensor::new().with_reading(test_reading()));
    let router = CommandRouter::new(Arc::new(authorized(&[])), Arc::clone(&sensor));
    let transport = RecordingTransport::new();

    router.handle(&weather_request(10), &transport).await.unwrap();

    assert_eq!(transport.sent()[0].text, UNAUTHORIZED_TEXT);
    assert_eq!(sensor.calls(), 0);
}

#[tokio::test]
async fn anonymous_sender_is_denied() {
    let sensor = Arc::new(ScriptedSensor::new().with_reading(test_reading()));
    let router = CommandRouter::new(Arc::new(authorized(&[10])), Arc::clone(&sensor));
    let transport = RecordingTransport::new();

    router
        .handle(
            &InboundMessage::new(None, -1_001_234, "🌤️ Get Weather Data"),
            &transport,
        )
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, -1_001_234);
    assert_eq!(sent[0].text, UNAUTHORIZED_TEXT);
    assert_eq!(sensor.calls(), 0);
}

#[tokio::test]
async fn failure_then_success_are_independent() {
    let sensor = Arc::new(
        ScriptedSensor::new()
            .with_status(500)
            .with_reading(test_reading()),
    );
    let router = CommandRouter::new(Arc::new(authorized(&[10])), Arc::clone(&sensor));
    let transport = RecordingTransport::new();

    router.handle(&weather_request(10), &transport).await.unwrap();
    router.handle(&weather_request(10), &transport).await.unwrap();

    let sent = transport.sent();
    assert!(sent[0].text.starts_with("Error fetching sensor data:"));
    assert!(sent[0].text.contains("500"));
    assert_eq!(sent[1].text, TEST_READING_TEXT);
    assert_eq!(sensor.calls(), 2);
}

#[tokio::test]
async fn concurrent_requests_share_one_router() {
    let mut sensor = ScriptedSensor::new();
    for _ in 0..8 {
        sensor = sensor.with_reading(test_reading());
    }
    let sensor = Arc::new(sensor);
    let router = Arc::new(CommandRouter::new(
        Arc::new(authorized(&[1, 2, 3, 4, 5, 6, 7, 8])),
        Arc::clone(&sensor),
    ));
    let transport = RecordingTransport::new();

    let mut tasks = Vec::new();
    for id in 1..=8 {
        let router = Arc::clone(&router);
        let transport = transport.clone();
        tasks.push(tokio::spawn(async move {
            router.handle(&weather_request(id), &transport).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let mut chats: Vec<i64> = transport.sent().iter().map(|m| m.chat_id).collect();
    chats.sort_unstable();
    assert_eq!(chats, (1..=8).collect::<Vec<_>>());
    assert!(transport.sent().iter().all(|m| m.text == TEST_READING_TEXT));
    assert_eq!(sensor.calls(), 8);
}
