//! Station names and coordinates from the open-data station list.
//!
//! Optional: the report falls back to bare ids when the list is unavailable.

use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::TripStats;
use crate::fetch::{self, FetchOptions};

/// Public station list of the bike network (GBFS `station_information`).
pub const STATION_INFORMATION_URL: &str =
    "https://velib-metropole-opendata.smovengo.cloud/opendata/Velib_Metropole/station_information.json";

/// Header row of the coordinates CSV.
pub const COORDINATES_CSV_HEADER: &str = "lat_start,lon_start,lat_end,lon_end";

#[derive(Debug, Deserialize)]
struct StationInformation {
    data: StationList,
}

#[derive(Debug, Deserialize)]
struct StationList {
    stations: Vec<RawStation>,
}

#[derive(Debug, Deserialize)]
struct RawStation {
    station_id: Value,
    name: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// What the station list says about one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Station id → info. Ids are compared as strings, whatever their JSON type.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<String, StationInfo>,
}

impl StationDirectory {
    /// A directory that knows no station; every label falls back to the id.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a `station_information.json` body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let info: StationInformation =
            serde_json::from_slice(body).context("parse station information")?;
        let mut stations = HashMap::with_capacity(info.data.stations.len());
        for s in info.data.stations {
            let id = match s.station_id {
                Value::String(id) => id,
                Value::Number(n) => n.to_string(),
                other => {
                    tracing::debug!(station_id = %other, "station without usable id skipped");
                    continue;
                }
            };
            stations.insert(
                id,
                StationInfo {
                    name: s.name,
                    lat: s.lat,
                    lon: s.lon,
                },
            );
        }
        Ok(Self { stations })
    }

    /// GET `url` and parse the station list.
    pub fn fetch(url: &str, opts: FetchOptions) -> Result<Self> {
        let headers = [("Accept", "application/json".to_string())];
        let response = fetch::get(url, &headers, None, opts)
            .with_context(|| format!("fetch station information from {}", url))?;
        if !response.is_success() {
            bail!("station information: HTTP error {}", response.status);
        }
        let directory = Self::from_json(&response.body)?;
        tracing::debug!(stations = directory.len(), "station information loaded");
        Ok(directory)
    }

    /// Like [`fetch`](Self::fetch), but an unreachable or unreadable list
    /// gives an empty directory and a warning.
    pub fn load_or_empty(url: &str, opts: FetchOptions) -> Self {
        match Self::fetch(url, opts) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("station names unavailable, showing ids: {:#}", e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StationInfo> {
        self.stations.get(id.trim())
    }

    /// `Name (id)` when the station has a name, `station id` otherwise.
    pub fn label(&self, id: &str) -> String {
        match self.get(id).and_then(|s| s.name.as_deref()) {
            Some(name) => format!("{} ({})", name, id),
            None => format!("station {}", id),
        }
    }

    /// `(lat, lon)` when both are known.
    pub fn coordinates(&self, id: &str) -> Option<(f64, f64)> {
        let s = self.get(id)?;
        Some((s.lat?, s.lon?))
    }
}

/// Rows written to a coordinates CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateRows {
    pub written: usize,
    /// Trips with a station missing from the directory or without coordinates.
    pub skipped: usize,
}

impl TripStats {
    /// Writes `lat_start,lon_start,lat_end,lon_end` rows, one per trip in
    /// export order, header first.
    pub fn write_coordinates_csv<W: Write>(
        &self,
        directory: &StationDirectory,
        mut out: W,
    ) -> io::Result<CoordinateRows> {
        writeln!(out, "{}", COORDINATES_CSV_HEADER)?;
        let mut rows = CoordinateRows {
            written: 0,
            skipped: 0,
        };
        for trip in &self.durations {
            let start = trip.departure.as_deref().and_then(|id| directory.coordinates(id));
            let end = trip.arrival.as_deref().and_then(|id| directory.coordinates(id));
            match (start, end) {
                (Some((lat_start, lon_start)), Some((lat_end, lon_end))) => {
                    writeln!(out, "{},{},{},{}", lat_start, lon_start, lat_end, lon_end)?;
                    rows.written += 1;
                }
                _ => rows.skipped += 1,
            }
        }
        out.flush()?;
        Ok(rows)
    }
}
