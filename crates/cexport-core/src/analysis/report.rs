//! Plain-text rendering of [`TripStats`].

use std::fmt::Write;

use super::{RankedTrip, StationDirectory, TripStats, DURATION_BIN_LABELS, TOP_N};

fn station(stations: &StationDirectory, id: &Option<String>) -> String {
    match id {
        Some(id) => stations.label(id),
        None => "unknown station".to_string(),
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn legs(
    out: &mut String,
    stations: &StationDirectory,
    title: &str,
    trips: &[RankedTrip],
    fmt_value: impl Fn(f64) -> String,
) {
    let _ = writeln!(out, "{}:", title);
    for t in trips {
        let _ = writeln!(
            out,
            "{} -> {} : {}",
            station(stations, &t.departure),
            station(stations, &t.arrival),
            fmt_value(t.value)
        );
    }
    out.push('\n');
}

impl TripStats {
    /// Full text report, sections separated by blank lines. Stations by id.
    pub fn render(&self) -> String {
        self.render_with(&StationDirectory::empty())
    }

    /// Same report with stations labelled `Name (id)` where `stations` knows them.
    pub fn render_with(&self, stations: &StationDirectory) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- Trip statistics ---\n");

        let _ = writeln!(out, "Top {} stations (departures + arrivals):", TOP_N);
        for (id, count) in self.top_stations(TOP_N) {
            let _ = writeln!(out, "{} : {} passages", stations.label(id), count);
        }
        out.push('\n');

        legs(
            &mut out,
            stations,
            &format!("Top {} longest trips (minutes)", TOP_N),
            &self.longest(TOP_N),
            |secs| format!("{:.2} min", secs / 60.0),
        );
        legs(
            &mut out,
            stations,
            &format!("Top {} fastest trips (average km/h)", TOP_N),
            &self.fastest(TOP_N),
            |kmh| format!("{:.2} km/h", kmh),
        );

        let _ = writeln!(out, "Top {} most used bikes:", TOP_N);
        for (id, count) in self.top_bikes(TOP_N) {
            let _ = writeln!(out, "bike {} : {} trips", id, count);
        }
        out.push('\n');

        let (electric, mechanical) = self.bike_fleet();
        let _ = writeln!(out, "Trips counted: {}", self.trips);
        let _ = writeln!(out, "Records skipped: {}", self.skipped);
        let _ = writeln!(out, "Electric bikes used: {}", electric);
        let _ = writeln!(out, "Mechanical bikes used: {}", mechanical);
        let _ = writeln!(out, "Electric trips: {}", self.electric_trips);
        let _ = writeln!(out, "Mechanical trips: {}", self.mechanical_trips);
        let _ = writeln!(out, "Boomerang trips (< 1 min): {}", self.boomerangs);
        let _ = writeln!(
            out,
            "Trips with bonus: {} ({:.2}%)",
            self.bonus_trips,
            pct(self.bonus_trips, self.trips)
        );
        let _ = writeln!(out, "Total bonus earned: {:.2}", self.total_bonus);
        let _ = writeln!(out, "Total distance (km): {:.2}", self.total_distance / 1000.0);
        let _ = writeln!(out, "Average trip duration: {:.2} minutes", self.avg_duration_min());
        let _ = writeln!(out, "Average speed: {:.2} km/h", self.avg_speed_kmh());
        let _ = writeln!(out, "Average distance per trip: {:.2} km", self.avg_distance_km());
        out.push('\n');

        let _ = writeln!(out, "Trip durations:");
        for (label, count) in DURATION_BIN_LABELS.iter().zip(self.duration_bins) {
            let _ = writeln!(out, "{} : {} trips ({:.1}%)", label, count, pct(count, self.trips));
        }
        out.push('\n');

        let _ = writeln!(out, "Trips per hour:");
        for (hour, count) in &self.per_hour {
            let _ = writeln!(out, "{:02}:00 - {:02}:00 : {}", hour, hour + 1, count);
        }
        out.push('\n');

        let _ = writeln!(out, "Trips per day:");
        for (day, count) in &self.per_day {
            let _ = writeln!(out, "{} : {}", day, count);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_contains_sections() {
        let export = json!([
            {
                "startDate": "2024-03-01T08:00:00Z",
                "endDate": "2024-03-01T08:06:00Z",
                "parameter3": {
                    "departureStationId": "16107",
                    "arrivalStationId": "9020",
                    "BIKEID": "4242",
                    "BONUS_EARNED": "1.5",
                    "DISTANCE": "1500",
                    "AVERAGE_SPEED": "15"
                }
            }
        ]);
        let text = TripStats::from_export(&export).unwrap().render();
        assert!(text.starts_with("--- Trip statistics ---"));
        assert!(text.contains("station 16107 : 1 passages"));
        assert!(text.contains("station 16107 -> station 9020 : 6.00 min"));
        assert!(text.contains("station 16107 -> station 9020 : 15.00 km/h"));
        assert!(text.contains("bike 4242 : 1 trips"));
        assert!(text.contains("Trips with bonus: 1 (100.00%)"));
        assert!(text.contains("Total distance (km): 1.50"));
        assert!(text.contains("5-10 min : 1 trips (100.0%)"));
        assert!(text.contains("08:00 - 09:00 : 1"));
        assert!(text.contains("2024-03-01 : 1"));
    }

    #[test]
    fn render_with_names_known_stations() {
        let stations = StationDirectory::from_json(
            br#"{"data":{"stations":[{"station_id":16107,"name":"Benjamin Godard","lat":48.86,"lon":2.27}]}}"#,
        )
        .unwrap();
        let export = json!([{
            "startDate": "2024-03-01T08:00:00Z",
            "endDate": "2024-03-01T08:06:00Z",
            "parameter3": {"departureStationId": "16107", "arrivalStationId": "9020", "AVERAGE_SPEED": 12}
        }]);
        let text = TripStats::from_export(&export).unwrap().render_with(&stations);
        assert!(text.contains("Benjamin Godard (16107) : 1 passages"));
        assert!(text.contains("station 9020 : 1 passages"));
        assert!(text.contains("Benjamin Godard (16107) -> station 9020 : 6.00 min"));
    }

    #[test]
    fn render_empty_export() {
        let text = TripStats::default().render();
        assert!(text.contains("Trips counted: 0"));
        assert!(text.contains("<5 min : 0 trips (0.0%)"));
    }
}
