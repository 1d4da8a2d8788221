//! Integration test: station names and coordinates served by a local
//! stand-in for the open-data station list.

mod common;

use cexport_core::analysis::{CoordinateRows, StationDirectory, TripStats};
use cexport_core::fetch::FetchOptions;
use serde_json::json;

const STATION_LIST: &[u8] = br#"{"data":{"stations":[
    {"station_id":213688169,"name":"Benjamin Godard - Victor Hugo","lat":48.865983,"lon":2.275725},
    {"station_id":"9020","name":"Toudouze - Clauzel","lat":48.879296,"lon":2.337360}
]}}"#;

fn stats() -> TripStats {
    let export = json!({
        "walletOperations": [
            {
                "startDate": "2024-03-01T08:00:00Z",
                "endDate": "2024-03-01T08:12:00Z",
                "parameter3": {"departureStationId": 213688169, "arrivalStationId": "9020", "AVERAGE_SPEED": 14}
            },
            {
                "startDate": "2024-03-02T09:00:00Z",
                "endDate": "2024-03-02T09:05:00Z",
                "parameter3": {"departureStationId": "9020", "arrivalStationId": "555"}
            }
        ]
    });
    TripStats::from_export(&export).unwrap()
}

fn station_url(base: &str) -> String {
    format!("{}/opendata/Velib_Metropole/station_information.json", base)
}

#[test]
fn report_names_stations_from_the_served_list() {
    let server = common::api_server::start(200, STATION_LIST);

    let stations =
        StationDirectory::fetch(&station_url(&server.base_url), FetchOptions::default()).unwrap();
    let text = stats().render_with(&stations);

    assert_eq!(stations.len(), 2);
    assert!(text.contains("Toudouze - Clauzel (9020) : 2 passages"));
    assert!(text.contains("Benjamin Godard - Victor Hugo (213688169) : 1 passages"));
    assert!(text.contains("station 555 : 1 passages"));
    assert!(text.contains(
        "Benjamin Godard - Victor Hugo (213688169) -> Toudouze - Clauzel (9020) : 12.00 min"
    ));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].target,
        "/opendata/Velib_Metropole/station_information.json"
    );
    assert!(requests[0].header("Cookie").is_none());
}

#[test]
fn coordinates_csv_from_the_served_list() {
    let server = common::api_server::start(200, STATION_LIST);
    let stations =
        StationDirectory::fetch(&station_url(&server.base_url), FetchOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coordonnees.csv");
    let file = std::fs::File::create(&path).unwrap();
    let rows = stats().write_coordinates_csv(&stations, file).unwrap();

    assert_eq!(rows, CoordinateRows { written: 1, skipped: 1 });
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "lat_start,lon_start,lat_end,lon_end\n48.865983,2.275725,48.879296,2.33736\n"
    );
}

#[test]
fn unreachable_list_falls_back_to_ids() {
    let base = common::api_server::closed_base_url();

    assert!(StationDirectory::fetch(&station_url(&base), FetchOptions::default()).is_err());
    let stations = StationDirectory::load_or_empty(&station_url(&base), FetchOptions::default());
    let text = stats().render_with(&stations);

    assert!(stations.is_empty());
    assert!(text.contains("station 9020 : 2 passages"));
    assert!(text.contains("station 213688169 -> station 9020 : 12.00 min"));
    assert_eq!(text, stats().render());
}

#[test]
fn error_status_from_the_list_falls_back_to_ids() {
    let server = common::api_server::start(500, b"down");

    let err = StationDirectory::fetch(&station_url(&server.base_url), FetchOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("500"));
    assert!(
        StationDirectory::load_or_empty(&station_url(&server.base_url), FetchOptions::default())
            .is_empty()
    );
}
