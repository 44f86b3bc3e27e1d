//! Sensorbot Telegram - the Telegram frontend for the sensor relay.
//!
//! Receives messages through the Telegram Bot API (long polling), hands
//! them to [`sensorbot_core::CommandRouter`] and sends the replies back.
//!
//! This crate can be used as a library or as the `sensorbot` binary.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod bot;
pub mod config;
pub mod error;
pub mod handler;
pub mod transport;
