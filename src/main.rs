use dotenv::dotenv;
use scalawatch::{config::WatchConfig, pipeline};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::error;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let config = match WatchConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Could not load config: {e:#}");
            return;
        }
    };

    if let Err(e) = pipeline::run(&config).await {
        error!("Run aborted: {e:#}");
    }
}
