//! Sensorbot Test - Shared test utilities for the sensorbot crates.
//!
//! This crate provides mock implementations and test helpers that can be
//! used across sensorbot crates as a dev-dependency.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use sensorbot_core::CommandRouter;
//! use sensorbot_test::{RecordingTransport, ScriptedSensor, authorized, test_reading, weather_request};
//!
//! #[tokio::test]
//! async fn weather_flow() {
//!     let sensor = Arc::new(ScriptedSensor::new().with_reading(test_reading()));
//!     let router = CommandRouter::new(Arc::new(authorized(&[1])), Arc::clone(&sensor));
//!     let transport = RecordingTransport::new();
//!
//!     router.handle(&weather_request(1), &transport).await.unwrap();
//!     assert_eq!(transport.sent().len(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;
pub mod server;

pub use fixtures::*;
pub use mocks::*;
pub use server::*;
