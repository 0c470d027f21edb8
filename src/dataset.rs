//! Daily temperature records and the ordered dataset that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the dataset: the mean of every hourly reading scraped for `date`.
///
/// The serde names are the CSV column headers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperatureRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Temperature (°F)")]
    pub average_temperature_f: f64,
}

impl DailyTemperatureRecord {
    pub fn new(date: NaiveDate, average_temperature_f: f64) -> Self {
        Self {
            date,
            average_temperature_f,
        }
    }
}

/// Records ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<DailyTemperatureRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. The day loop produces dates in order, so this keeps
    /// the dataset sorted when fed by it.
    pub fn push(&mut self, record: DailyTemperatureRecord) {
        self.records.push(record);
    }

    /// Inserts `record` at its date position, replacing any record that
    /// already has the same date.
    pub fn upsert(&mut self, record: DailyTemperatureRecord) {
        match self.records.binary_search_by_key(&record.date, |r| r.date) {
            Ok(idx) => self.records[idx] = record,
            Err(idx) => self.records.insert(idx, record),
        }
    }

    pub fn records(&self) -> &[DailyTemperatureRecord] {
        &self.records
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.average_temperature_f)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<DailyTemperatureRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = DailyTemperatureRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Inclusive iterator over calendar days, one day per step.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let days: Vec<_> = DateRange::new(day(1), day(3)).collect();
        assert_eq!(days, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn test_range_crosses_month_boundary() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days: Vec<_> = DateRange::new(start, end)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(days, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert_eq!(DateRange::new(day(3), day(1)).count(), 0);
    }

    #[test]
    fn test_upsert_keeps_dates_unique_and_sorted() {
        let mut dataset = Dataset::new();
        dataset.upsert(DailyTemperatureRecord::new(day(3), 30.0));
        dataset.upsert(DailyTemperatureRecord::new(day(1), 10.0));
        dataset.upsert(DailyTemperatureRecord::new(day(3), 33.0));
        dataset.upsert(DailyTemperatureRecord::new(day(2), 20.0));

        let dates: Vec<_> = dataset.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(dataset.records()[2].average_temperature_f, 33.0);
    }
}
