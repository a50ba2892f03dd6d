use anyhow::{Context, Result};
use dotenv::dotenv;
use homework_notifier_rust::config::{self, Config};
use homework_notifier_rust::{logging, HomeworkPoller};
use homework_rust_core::clients::{PracticumClient, TelegramClient};
use homework_rust_core::models::PollState;
use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init(&config::log_file_from_env())?;

    info!("Starting homework status notifier...");

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Required configuration is missing, shutting down: {:#}", e);
            return Err(e);
        }
    };
    info!(
        "Config: endpoint={} retry={}s timeout={}s lookback={}s",
        cfg.practicum_endpoint,
        cfg.retry_interval.as_secs(),
        cfg.request_timeout.as_secs(),
        cfg.initial_lookback_secs,
    );

    let practicum = PracticumClient::new(
        cfg.practicum_endpoint.clone(),
        cfg.practicum_token.clone(),
        cfg.request_timeout,
    )
    .context("Failed to build homework API client")?;

    let telegram = TelegramClient::new(
        cfg.telegram_api_base_url.clone(),
        cfg.telegram_token.clone(),
        cfg.request_timeout,
    )
    .context("Failed to build Telegram client")?;

    let poller = HomeworkPoller::new(
        practicum,
        telegram,
        cfg.telegram_chat_id.clone(),
        PollState::starting_now(cfg.initial_lookback_secs),
        cfg.retry_interval,
    );

    poller.run().await;

    Ok(())
}
