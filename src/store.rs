use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::building::Building;

/// One day's scraped figures for one building. Keyed by (date, building);
/// re-running the scrape on the same day replaces that day's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub building: Building,
    pub offices: u32,
    pub m2: u32,
}

/// The persisted dataset: a single CSV file with a `date,building,offices,m2`
/// header, one row per observation. This is the sole writer.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every persisted observation in file order. A missing file is an
    /// empty dataset; a malformed row fails the whole load.
    pub fn load_all(&self) -> Result<Vec<Observation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut observations = Vec::new();
        for row in reader.deserialize() {
            let observation: Observation =
                row.with_context(|| format!("malformed row in {}", self.path.display()))?;
            observations.push(observation);
        }
        Ok(observations)
    }

    /// Replace the given date's rows with `fresh` and rewrite the file.
    /// All fresh observations must share one date; rows for other dates are
    /// carried over untouched. Merging an empty slice changes nothing.
    pub fn merge(&self, fresh: &[Observation]) -> Result<()> {
        let Some(date) = fresh.first().map(|observation| observation.date) else {
            return Ok(());
        };
        let mut rows: Vec<Observation> = self
            .load_all()?
            .into_iter()
            .filter(|observation| observation.date != date)
            .collect();
        rows.extend_from_slice(fresh);
        self.persist(&rows)
    }

    /// Rewrite the whole file through a sibling temp file so a crash
    /// mid-write cannot leave a truncated dataset behind.
    fn persist(&self, rows: &[Observation]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let tmp = self.path.with_extension("csv.tmp");
        let mut writer = csv::Writer::from_path(&tmp)
            .with_context(|| format!("failed to open {}", tmp.display()))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn observation(day: &str, building: Building, offices: u32, m2: u32) -> Observation {
        Observation {
            date: date(day),
            building,
            offices,
            m2,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> CsvStore {
        CsvStore::new(dir.path().join("offices.csv"))
    }

    #[test]
    fn missing_file_loads_as_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load_all().unwrap().is_empty());
    }

    #[test]
    fn dataset_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let rows = vec![
            observation("2024-01-01", Building::Scala, 12, 340),
            observation("2024-01-01", Building::Jakub, 0, 0),
        ];
        store.merge(&rows).unwrap();
        assert_eq!(store.load_all().unwrap(), rows);
    }

    #[test]
    fn merge_is_idempotent_for_a_fixed_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let rows = vec![
            observation("2024-01-01", Building::Scala, 12, 340),
            observation("2024-01-01", Building::Jakub, 3, 95),
        ];
        store.merge(&rows).unwrap();
        store.merge(&rows).unwrap();
        assert_eq!(store.load_all().unwrap(), rows);
    }

    #[test]
    fn same_day_rerun_overwrites_that_day_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .merge(&[
                observation("2024-01-01", Building::Scala, 12, 340),
                observation("2024-01-01", Building::Jakub, 3, 95),
            ])
            .unwrap();
        store
            .merge(&[
                observation("2024-01-01", Building::Scala, 10, 300),
                observation("2024-01-01", Building::Jakub, 4, 120),
            ])
            .unwrap();
        let rows = store.load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].offices, 10);
        assert_eq!(rows[1].m2, 120);
    }

    #[test]
    fn merge_keeps_other_dates_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let monday = vec![
            observation("2024-01-01", Building::Scala, 12, 340),
            observation("2024-01-01", Building::Jakub, 3, 95),
        ];
        store.merge(&monday).unwrap();
        store
            .merge(&[
                observation("2024-01-02", Building::Scala, 11, 320),
                observation("2024-01-02", Building::Jakub, 3, 95),
            ])
            .unwrap();
        let rows = store.load_all().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[..2], &monday[..]);
    }

    #[test]
    fn merging_nothing_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .merge(&[observation("2024-01-01", Building::Scala, 12, 340)])
            .unwrap();
        store.merge(&[]).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn malformed_row_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offices.csv");
        fs::write(&path, "date,building,offices,m2\n2024-01-01,SCALA,twelve,340\n").unwrap();
        assert!(CsvStore::new(&path).load_all().is_err());
    }

    #[test]
    fn unknown_building_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offices.csv");
        fs::write(&path, "date,building,offices,m2\n2024-01-01,OPERA,1,40\n").unwrap();
        assert!(CsvStore::new(&path).load_all().is_err());
    }

    #[test]
    fn file_carries_the_expected_header_and_cells() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .merge(&[observation("2024-01-01", Building::Scala, 12, 340)])
            .unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "date,building,offices,m2\n2024-01-01,SCALA,12,340\n");
    }
}
