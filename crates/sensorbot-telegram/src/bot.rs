//! Teloxide bot setup, dispatcher, and handler registration.

use std::sync::Arc;

use sensorbot_core::{CommandRouter, SensorClient};
use teloxide::dispatching::{ShutdownToken, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::config::TelegramConfig;
use crate::error::TelegramResult;
use crate::handler::{self, BotState};
use crate::transport::TelegramTransport;

/// Build the bot handle and the shared handler state from a config.
pub fn build_state(config: TelegramConfig) -> TelegramResult<(Bot, BotState)> {
    let bot = Bot::new(&config.bot_token);
    let sensor = SensorClient::new(config.sensor_url, config.sensor_timeout)?;
    let router = CommandRouter::new(Arc::new(config.authorized_users), sensor);

    if router.users().is_empty() {
        warn!(
            "Telegram bot starting with an empty authorized user list; \
             every sender will be refused. Set [telegram] authorized_users \
             or TELEGRAM_AUTHORIZED_USERS."
        );
    } else {
        info!(count = router.users().len(), "loaded authorized users");
    }
    info!(
        url = router.sensor().url(),
        timeout_secs = config.sensor_timeout.as_secs(),
        "sensor endpoint configured"
    );

    let state = BotState {
        router: Arc::new(router),
        transport: TelegramTransport::new(bot.clone()),
    };
    Ok((bot, state))
}

/// Build the teloxide handler tree that feeds every message to `state`.
pub fn build_handler(state: BotState) -> UpdateHandler<anyhow::Error> {
    let message_handler = Update::filter_message().endpoint(move |msg: Message| {
        let state = state.clone();
        async move { Box::pin(handler::handle_message(msg, state)).await }
    });

    dptree::entry().branch(message_handler)
}

/// Run the Telegram bot until SIGINT or SIGTERM.
pub async fn run(config: TelegramConfig) -> anyhow::Result<()> {
    let (bot, state) = build_state(config)?;

    let mut dispatcher = Dispatcher::builder(bot, build_handler(state))
        .enable_ctrlc_handler()
        .build();

    tokio::spawn(shutdown_on_terminate(dispatcher.shutdown_token()));

    info!("Bot started");
    Box::pin(dispatcher.dispatch()).await;

    info!("Bot stopped");
    Ok(())
}

/// Stop the dispatcher when the process receives SIGTERM. SIGINT is
/// handled by teloxide's own Ctrl+C handler.
async fn shutdown_on_terminate(token: ShutdownToken) {
    wait_for_terminate().await;
    info!("received SIGTERM, shutting down");
    match token.shutdown() {
        Ok(done) => done.await,
        Err(e) => warn!(error = %e, "dispatcher was not running at shutdown"),
    }
}

#[cfg(unix)]
async fn wait_for_terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        },
        Err(e) => {
            warn!(error = %e, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        },
    }
}

#[cfg(not(unix))]
async fn wait_for_terminate() {
    std::future::pending::<()>().await;
}
