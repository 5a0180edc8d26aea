mod action;
mod app;
mod app_state;
mod audio;
mod component;
mod components;
mod focus;
#[cfg(test)]
mod test_support;
mod theme;
mod widgets;

use anyhow::Context;

use weather_core::config::Config;
use weather_core::controller::Controller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = weather_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("weather-sounds.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // ── Load config ──────────────────────────────────────────────────────────
    // Read before logging starts so the configured filter applies; a broken
    // file is reported once the subscriber is up.
    let loaded = Config::load();
    let log_filter = match &loaded {
        Ok(config) => config.logging.filter.clone(),
        Err(_) => Config::default().logging.filter,
    };

    // RUST_LOG wins over the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or(log_filter);
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("weather-sounds log: {}", log_path.display());

    tracing::info!("weather-sounds starting…");

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config ignored, using defaults: {:#}", e);
        Config::default()
    });
    tracing::info!("assets: {}", config.assets.dir.display());

    // ── Audio output + controller ────────────────────────────────────────────
    let output = audio::RodioOutput::try_default().context("failed to open audio output")?;
    let controller = Controller::new(
        output,
        &config.asset_table(),
        config.audio.initial_volume,
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    // The output stream is tied to this thread, so the app runs on the main
    // task rather than a spawned one.
    app::App::new(controller).run().await?;

    tracing::info!("weather-sounds exiting");
    Ok(())
}
