use std::{collections::HashMap, fs};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{info, warn};

use crate::{
    building::Building,
    config::WatchConfig,
    report,
    requests::RequestClient,
    series::build_daily_series,
    store::{CsvStore, Observation},
    summary_scraper::{self, Availability},
};

/// One watcher run: fetch, merge today's figures, rewrite the report.
///
/// A failed fetch is not fatal — the run degrades to re-rendering the
/// report from whatever the store already holds. Only store-level errors
/// propagate.
pub async fn run(config: &WatchConfig) -> Result<()> {
    let markup = match fetch_markup(config).await {
        Ok(markup) => Some(markup),
        Err(e) => {
            warn!("Fetch failed: {e:#}; leaving existing data unchanged");
            None
        }
    };
    run_with_markup(config, markup.as_deref(), Local::now().date_naive())
}

/// The post-fetch pipeline: extract, zero-fill, merge, reload, aggregate,
/// render. `markup: None` means the fetch failed and the merge is skipped.
pub fn run_with_markup(
    config: &WatchConfig,
    markup: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let store = CsvStore::new(&config.csv_path);

    if let Some(markup) = markup {
        let found = summary_scraper::scrape_summaries(markup);
        let observations = observations_for(today, &found);
        for observation in &observations {
            info!(
                "{}: {} offices, {} m2",
                observation.building, observation.offices, observation.m2
            );
        }
        store.merge(&observations)?;
        info!("Saved to {}", config.csv_path.display());
    }

    let dataset = store.load_all()?;
    let series = build_daily_series(&dataset);
    let html = report::render(&series);
    if let Some(parent) = config.html_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(&config.html_path, html)
        .with_context(|| format!("failed to write {}", config.html_path.display()))?;
    info!("Report written to {}", config.html_path.display());
    Ok(())
}

/// Exactly one observation per known building: buildings the page didn't
/// yield count as zero free offices and zero area, not as missing rows.
pub fn observations_for(
    date: NaiveDate,
    found: &HashMap<Building, Availability>,
) -> Vec<Observation> {
    Building::ALL
        .iter()
        .map(|&building| {
            let availability = found.get(&building).copied().unwrap_or_default();
            Observation {
                date,
                building,
                offices: availability.offices,
                m2: availability.m2,
            }
        })
        .collect()
}

async fn fetch_markup(config: &WatchConfig) -> Result<String> {
    let client = RequestClient::new(config.fetch_timeout)?;
    client.fetch_url_body(&config.url).await
}
