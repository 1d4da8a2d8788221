//! Trip statistics over a saved course-list export.
//!
//! Reads the records of an export (a `walletOperations` array or a bare
//! array) and aggregates durations, distances, stations, bikes and time
//! buckets. Stations are reported by id unless a [`StationDirectory`] is
//! given to name them.

mod report;
mod stations;
mod trip;

pub use stations::{
    CoordinateRows, StationDirectory, StationInfo, COORDINATES_CSV_HEADER, STATION_INFORMATION_URL,
};
pub use trip::{SkipReason, Trip};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Timelike};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Trips shorter than this count as boomerangs (bike returned right away).
pub const BOOMERANG_SECS: f64 = 60.0;

/// Entries kept in every top-N list.
pub const TOP_N: usize = 10;

/// Labels of the duration buckets, shortest first.
pub const DURATION_BIN_LABELS: [&str; 5] = ["<5 min", "5-10 min", "10-20 min", "20-30 min", ">30 min"];

// Exclusive upper bounds in minutes; the last bucket is open.
const DURATION_BIN_BOUNDS: [f64; 4] = [5.0, 10.0, 20.0, 30.0];

/// A trip in a ranking: value plus its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTrip {
    pub value: f64,
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

/// Aggregates over all readable trips of an export.
#[derive(Debug, Clone, Default)]
pub struct TripStats {
    pub trips: usize,
    pub skipped: usize,
    pub boomerangs: usize,
    pub bonus_trips: usize,
    pub total_bonus: f64,
    /// Metres.
    pub total_distance: f64,
    pub electric_trips: usize,
    pub mechanical_trips: usize,
    pub duration_bins: [usize; 5],
    pub per_hour: BTreeMap<u32, usize>,
    pub per_day: BTreeMap<NaiveDate, usize>,
    total_duration_secs: f64,
    speeds: Vec<RankedTrip>,
    durations: Vec<RankedTrip>,
    stations: HashMap<String, usize>,
    bikes: HashMap<String, usize>,
}

impl TripStats {
    /// Records of an export value. None when the shape is not recognized.
    pub fn records(export: &Value) -> Option<&Vec<Value>> {
        match export {
            Value::Array(items) => Some(items),
            Value::Object(map) => map.get("walletOperations").and_then(Value::as_array),
            _ => None,
        }
    }

    /// Aggregate every record of `export`.
    pub fn from_export(export: &Value) -> Result<TripStats> {
        let records = Self::records(export)
            .context("export has neither a walletOperations array nor a top-level array")?;
        let mut stats = TripStats::default();
        for (i, record) in records.iter().enumerate() {
            match Trip::from_record(record) {
                Ok(trip) => stats.add(&trip),
                Err(reason) => {
                    tracing::debug!(index = i, ?reason, "trip skipped");
                    stats.skipped += 1;
                }
            }
        }
        Ok(stats)
    }

    /// Read and aggregate a saved export file.
    pub fn from_path(path: &Path) -> Result<TripStats> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse JSON: {}", path.display()))?;
        Self::from_export(&value)
    }

    pub fn add(&mut self, trip: &Trip) {
        let duration = trip.duration_secs();
        self.trips += 1;
        self.total_duration_secs += duration;
        self.total_distance += trip.distance;

        for station in [&trip.departure, &trip.arrival].into_iter().flatten() {
            *self.stations.entry(station.clone()).or_default() += 1;
        }
        self.durations.push(RankedTrip {
            value: duration,
            departure: trip.departure.clone(),
            arrival: trip.arrival.clone(),
        });
        if let Some(speed) = trip.average_speed {
            self.speeds.push(RankedTrip {
                value: speed,
                departure: trip.departure.clone(),
                arrival: trip.arrival.clone(),
            });
        }

        if let Some(bike) = &trip.bike_id {
            *self.bikes.entry(bike.clone()).or_default() += 1;
        }
        match trip.is_electric() {
            Some(true) => self.electric_trips += 1,
            Some(false) => self.mechanical_trips += 1,
            None => {}
        }

        if duration < BOOMERANG_SECS {
            self.boomerangs += 1;
        }
        self.total_bonus += trip.bonus;
        if trip.bonus > 0.0 {
            self.bonus_trips += 1;
        }

        let minutes = duration / 60.0;
        let bin = DURATION_BIN_BOUNDS
            .iter()
            .position(|bound| minutes < *bound)
            .unwrap_or(DURATION_BIN_BOUNDS.len());
        self.duration_bins[bin] += 1;

        *self.per_hour.entry(trip.start.hour()).or_default() += 1;
        *self.per_day.entry(trip.start.date()).or_default() += 1;
    }

    pub fn avg_duration_min(&self) -> f64 {
        if self.trips == 0 {
            return 0.0;
        }
        self.total_duration_secs / self.trips as f64 / 60.0
    }

    pub fn avg_speed_kmh(&self) -> f64 {
        if self.speeds.is_empty() {
            return 0.0;
        }
        self.speeds.iter().map(|t| t.value).sum::<f64>() / self.speeds.len() as f64
    }

    pub fn avg_distance_km(&self) -> f64 {
        if self.trips == 0 {
            return 0.0;
        }
        self.total_distance / self.trips as f64 / 1000.0
    }

    /// Distinct bikes seen, split into (electric, mechanical).
    pub fn bike_fleet(&self) -> (usize, usize) {
        let electric = self
            .bikes
            .keys()
            .filter(|id| id.trim().parse::<i64>().map_or(false, |n| n < 50_000))
            .count();
        (electric, self.bikes.len() - electric)
    }

    /// Stations by passages (departures + arrivals), busiest first.
    pub fn top_stations(&self, n: usize) -> Vec<(&str, usize)> {
        top_counts(&self.stations, n)
    }

    /// Bikes by trip count, most used first.
    pub fn top_bikes(&self, n: usize) -> Vec<(&str, usize)> {
        top_counts(&self.bikes, n)
    }

    /// Longest trips; `value` is seconds.
    pub fn longest(&self, n: usize) -> Vec<RankedTrip> {
        top_trips(&self.durations, n)
    }

    /// Fastest trips; `value` is km/h.
    pub fn fastest(&self, n: usize) -> Vec<RankedTrip> {
        top_trips(&self.speeds, n)
    }
}

// Ties break on id so the report is stable across runs.
fn top_counts(counts: &HashMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut v: Vec<(&str, usize)> = counts.iter().map(|(k, c)| (k.as_str(), *c)).collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    v.truncate(n);
    v
}

fn top_trips(trips: &[RankedTrip], n: usize) -> Vec<RankedTrip> {
    let mut v = trips.to_vec();
    v.sort_by(|a, b| b.value.total_cmp(&a.value));
    v.truncate(n);
    v
}
