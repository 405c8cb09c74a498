//! Darkwatch - Monitor Entry Point

use darkwatch_core::constants::{APP_NAME, APP_VERSION};
use darkwatch_core::logic::config::MonitorConfig;
use darkwatch_core::logic::feed::JsonFileFeed;
use darkwatch_core::logic::monitor::Monitor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = MonitorConfig::from_env()?;
    log::info!("Thresholds: {:?}", config.thresholds);

    let feed = JsonFileFeed::new(config.feed_path.clone());
    let mut monitor = Monitor::new(Box::new(feed), config);
    monitor.run();

    Ok(())
}
