//! One trip record from the export.

use chrono::NaiveDateTime;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Fields of a trip the statistics use. Everything but the dates is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub bike_id: Option<String>,
    pub bonus: f64,
    /// Metres.
    pub distance: f64,
    /// km/h as reported by the operator.
    pub average_speed: Option<f64>,
}

/// Why a record was not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingDates,
    BadDate(String),
}

impl Trip {
    /// Read a trip from one export record.
    pub fn from_record(record: &Value) -> Result<Trip, SkipReason> {
        let start = record.get("startDate").and_then(Value::as_str);
        let end = record.get("endDate").and_then(Value::as_str);
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if !s.is_empty() && !e.is_empty() => (s, e),
            _ => return Err(SkipReason::MissingDates),
        };
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        let p3 = record.get("parameter3");
        let field = |name: &str| p3.and_then(|p| p.get(name));

        Ok(Trip {
            start,
            end,
            departure: field("departureStationId").and_then(as_id),
            arrival: field("arrivalStationId").and_then(as_id),
            bike_id: field("BIKEID").and_then(as_id),
            bonus: field("BONUS_EARNED").and_then(as_number).unwrap_or(0.0),
            distance: field("DISTANCE").and_then(as_number).unwrap_or(0.0),
            average_speed: field("AVERAGE_SPEED").and_then(as_number),
        })
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64
    }

    /// Bike ids below 50000 are electric; other numeric ids mechanical.
    pub fn is_electric(&self) -> Option<bool> {
        self.bike_id
            .as_deref()
            .and_then(|id| id.trim().parse::<i64>().ok())
            .map(|n| n < 50_000)
    }
}

fn parse_date(s: &str) -> Result<NaiveDateTime, SkipReason> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT).map_err(|_| SkipReason::BadDate(s.to_string()))
}

/// Ids arrive as strings or numbers; empty strings and null count as missing.
fn as_id(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers arrive as JSON numbers or numeric strings.
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_full_record() {
        let rec = json!({
            "startDate": "2024-03-01T08:00:00Z",
            "endDate": "2024-03-01T08:12:30Z",
            "parameter3": {
                "departureStationId": 16107,
                "arrivalStationId": "9020",
                "BIKEID": "12345",
                "BONUS_EARNED": "2",
                "DISTANCE": 2500,
                "AVERAGE_SPEED": 12.5
            }
        });
        let t = Trip::from_record(&rec).unwrap();
        assert_eq!(t.duration_secs(), 750.0);
        assert_eq!(t.departure.as_deref(), Some("16107"));
        assert_eq!(t.arrival.as_deref(), Some("9020"));
        assert_eq!(t.is_electric(), Some(true));
        assert_eq!(t.bonus, 2.0);
        assert_eq!(t.distance, 2500.0);
        assert_eq!(t.average_speed, Some(12.5));
    }

    #[test]
    fn missing_parameters_default() {
        let rec = json!({
            "startDate": "2024-03-01T08:00:00Z",
            "endDate": "2024-03-01T08:00:30Z"
        });
        let t = Trip::from_record(&rec).unwrap();
        assert!(t.departure.is_none());
        assert!(t.is_electric().is_none());
        assert_eq!(t.bonus, 0.0);
        assert!(t.average_speed.is_none());
    }

    #[test]
    fn mechanical_bike() {
        let rec = json!({
            "startDate": "2024-03-01T08:00:00Z",
            "endDate": "2024-03-01T08:00:30Z",
            "parameter3": { "BIKEID": 61234 }
        });
        assert_eq!(Trip::from_record(&rec).unwrap().is_electric(), Some(false));
    }

    #[test]
    fn skip_reasons() {
        assert_eq!(
            Trip::from_record(&json!({"startDate": "2024-03-01T08:00:00Z"})),
            Err(SkipReason::MissingDates)
        );
        assert_eq!(
            Trip::from_record(&json!({"startDate": "yesterday", "endDate": "2024-03-01T08:00:00Z"})),
            Err(SkipReason::BadDate("yesterday".to_string()))
        );
    }
}
