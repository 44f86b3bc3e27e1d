//! Mock implementations for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sensorbot_core::{
    OutboundMessage, SensorError, SensorReading, SensorResult, SensorSource, Transport,
    TransportError, TransportResult,
};

/// A canned outcome for [`ScriptedSensor`].
#[derive(Debug, Clone)]
pub enum SensorOutcome {
    /// Return this reading.
    Reading(SensorReading),
    /// Fail with [`SensorError::BadStatus`].
    Status(u16),
}

/// Sensor source that replays queued outcomes.
///
/// When the queue is empty, the default outcome is used. Counts every
/// fetch so tests can assert that no fetch happened.
#[derive(Debug)]
pub struct ScriptedSensor {
    outcomes: Mutex<VecDeque<SensorOutcome>>,
    default: SensorOutcome,
    calls: AtomicUsize,
}

impl Default for ScriptedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSensor {
    /// A sensor that answers `503` until outcomes are queued.
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            default: SensorOutcome::Status(503),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a successful reading.
    #[must_use]
    pub fn with_reading(self, reading: SensorReading) -> Self {
        if let Ok(mut guard) = self.outcomes.lock() {
            guard.push_back(SensorOutcome::Reading(reading));
        }
        self
    }

    /// Queue a non-200 status.
    #[must_use]
    pub fn with_status(self, status: u16) -> Self {
        if let Ok(mut guard) = self.outcomes.lock() {
            guard.push_back(SensorOutcome::Status(status));
        }
        self
    }

    /// How many times `fetch` was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SensorSource for ScriptedSensor {
    async fn fetch(&self) -> SensorResult<SensorReading> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .outcomes
            .lock()
            .ok()
            .and_then(|mut guard| guard.pop_front())
            .unwrap_or_else(|| self.default.clone());

        match outcome {
            SensorOutcome::Reading(r) => Ok(r),
            SensorOutcome::Status(code) => Err(SensorError::BadStatus {
                status: reqwest::StatusCode::from_u16(code)
                    .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            }),
        }
    }
}

/// Transport that records every message instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    fail: bool,
}

impl RecordingTransport {
    /// Create a recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose sends always fail (messages are still recorded).
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, message: OutboundMessage) -> TransportResult<()> {
        let chat_id = message.chat_id;
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(message);
        }
        if self.fail {
            return Err(TransportError::Send {
                chat_id,
                reason: "recording transport set to fail".to_owned(),
            });
        }
        Ok(())
    }
}
