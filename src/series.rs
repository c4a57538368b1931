use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{building::Building, store::Observation, summary_scraper::Availability};

/// Parallel per-date sequences for one metric pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSeries {
    pub offices: Vec<u32>,
    pub m2: Vec<u32>,
}

/// One date's figures, flattened for the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub by_building: BTreeMap<Building, Availability>,
    pub total: Availability,
}

/// The aggregated view the report renders from: ascending dates, one
/// metric series per building plus the cross-building total (all parallel
/// to `dates`, zero-filled where a building has no row for a date), the
/// latest date's snapshot, and the history rows newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub per_building: BTreeMap<Building, MetricSeries>,
    pub total: MetricSeries,
    pub latest: Option<NaiveDate>,
    pub current: BTreeMap<Building, Availability>,
    pub history: Vec<HistoryRow>,
}

impl DailySeries {
    pub fn current_total(&self) -> Availability {
        sum_availability(&self.current)
    }
}

pub fn build_daily_series(dataset: &[Observation]) -> DailySeries {
    let mut daily: BTreeMap<NaiveDate, BTreeMap<Building, Availability>> = BTreeMap::new();
    for observation in dataset {
        daily.entry(observation.date).or_default().insert(
            observation.building,
            Availability {
                offices: observation.offices,
                m2: observation.m2,
            },
        );
    }

    let dates: Vec<NaiveDate> = daily.keys().copied().collect();

    let mut per_building: BTreeMap<Building, MetricSeries> = Building::ALL
        .iter()
        .map(|&building| (building, MetricSeries::default()))
        .collect();
    let mut total = MetricSeries::default();

    for by_building in daily.values() {
        let mut day_total = Availability::default();
        for &building in &Building::ALL {
            let availability = by_building.get(&building).copied().unwrap_or_default();
            let series = per_building.get_mut(&building).unwrap();
            series.offices.push(availability.offices);
            series.m2.push(availability.m2);
            day_total.offices += availability.offices;
            day_total.m2 += availability.m2;
        }
        total.offices.push(day_total.offices);
        total.m2.push(day_total.m2);
    }

    let latest = dates.last().copied();
    let current = zero_filled(latest.and_then(|date| daily.get(&date)));

    let history: Vec<HistoryRow> = daily
        .iter()
        .rev()
        .map(|(&date, by_building)| {
            let by_building = zero_filled(Some(by_building));
            let total = sum_availability(&by_building);
            HistoryRow {
                date,
                by_building,
                total,
            }
        })
        .collect();

    DailySeries {
        dates,
        per_building,
        total,
        latest,
        current,
        history,
    }
}

/// Every known building gets an entry; absent ones count as zero.
fn zero_filled(found: Option<&BTreeMap<Building, Availability>>) -> BTreeMap<Building, Availability> {
    Building::ALL
        .iter()
        .map(|&building| {
            let availability = found
                .and_then(|map| map.get(&building))
                .copied()
                .unwrap_or_default();
            (building, availability)
        })
        .collect()
}

fn sum_availability(by_building: &BTreeMap<Building, Availability>) -> Availability {
    by_building.values().fold(
        Availability::default(),
        |mut total, availability| {
            total.offices += availability.offices;
            total.m2 += availability.m2;
            total
        },
    )
}
