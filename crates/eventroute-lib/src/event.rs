//! Input models: calendar events and geographic coordinates.
//!
//! Events arrive from an external calendar source and are assumed already
//! validated (coordinates, start time, and timezone present). This module
//! only defines the shapes; no calendar logic lives here.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Format as a `lat,lon` waypoint string, the form routing providers
    /// expect in query parameters.
    pub fn waypoint(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// A calendar event at a fixed place and time.
///
/// `duration_minutes` is only meaningful when the event is the origin of a
/// trip: the occupancy must elapse before departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier from the calendar source.
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// Event start, milliseconds since the Unix epoch (UTC).
    pub start_time_ms: i64,
    /// Occupancy duration in minutes.
    #[serde(default)]
    pub duration_minutes: i64,
    /// IANA timezone name, for example `Europe/Berlin`.
    pub timezone: String,
}

impl Event {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_joins_lat_and_lon() {
        let coord = Coordinate::new(52.52, 13.405);
        assert_eq!(coord.waypoint(), "52.52,13.405");
    }

    #[test]
    fn event_deserializes_without_duration() {
        let event: Event = serde_json::from_str(
            r#"{"id": "office", "lat": 52.52, "lon": 13.405,
                "start_time_ms": 1700000000000, "timezone": "Europe/Berlin"}"#,
        )
        .unwrap();
        assert_eq!(event.duration_minutes, 0);
        assert_eq!(event.coordinate(), Coordinate::new(52.52, 13.405));
    }
}
