//! Marker maps from coordinate lists.
//!
//! The map itself is rendered elsewhere; this module only assembles the
//! renderable document: a set of point markers, a center (the arithmetic
//! mean of the markers), and an initial zoom level, serialized as a
//! GeoJSON `FeatureCollection`.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::event::{Coordinate, Event};

/// Initial zoom level used when the caller does not specify one.
pub const DEFAULT_ZOOM: u32 = 15;

/// A single map marker, optionally labeled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coord: Coordinate,
    pub label: Option<String>,
}

/// A marker map document: markers, mean center, and initial zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerMap {
    pub center: Coordinate,
    pub zoom: u32,
    pub markers: Vec<Marker>,
}

impl MarkerMap {
    /// Build a map with one unlabeled marker per coordinate.
    pub fn from_coordinates(coords: &[Coordinate], zoom: u32) -> Result<Self> {
        let markers = coords
            .iter()
            .map(|&coord| Marker { coord, label: None })
            .collect();
        Self::from_markers(markers, zoom)
    }

    /// Build a map with one marker per event, labeled with the event id.
    pub fn from_events(events: &[Event], zoom: u32) -> Result<Self> {
        let markers = events
            .iter()
            .map(|event| Marker {
                coord: event.coordinate(),
                label: Some(event.id.clone()),
            })
            .collect();
        Self::from_markers(markers, zoom)
    }

    fn from_markers(markers: Vec<Marker>, zoom: u32) -> Result<Self> {
        if markers.is_empty() {
            return Err(Error::EmptyMarkerList);
        }

        let count = markers.len() as f64;
        let lat = markers.iter().map(|m| m.coord.lat).sum::<f64>() / count;
        let lon = markers.iter().map(|m| m.coord.lon).sum::<f64>() / count;

        Ok(Self {
            center: Coordinate::new(lat, lon),
            zoom,
            markers,
        })
    }

    /// Render as a GeoJSON `FeatureCollection`, one Point feature per
    /// marker. GeoJSON positions are `[lon, lat]`; the map center and zoom
    /// travel in the collection's `properties`.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers
            .iter()
            .map(|marker| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [marker.coord.lon, marker.coord.lat],
                    },
                    "properties": {
                        "label": marker.label,
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "properties": {
                "center": [self.center.lon, self.center.lat],
                "zoom": self.zoom,
            },
            "features": features,
        })
    }

    /// Write the GeoJSON document to `path`, pretty-printed.
    pub fn write_geojson(&self, path: &Path) -> Result<()> {
        let rendered = serde_json::to_string_pretty(&self.to_geojson())?;
        fs::write(path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_the_mean_of_the_markers() {
        let map = MarkerMap::from_coordinates(
            &[Coordinate::new(50.0, 10.0), Coordinate::new(52.0, 14.0)],
            DEFAULT_ZOOM,
        )
        .unwrap();
        assert_eq!(map.center, Coordinate::new(51.0, 12.0));
        assert_eq!(map.zoom, 15);
        assert_eq!(map.markers.len(), 2);
    }

    #[test]
    fn empty_coordinate_list_is_rejected() {
        let err = MarkerMap::from_coordinates(&[], DEFAULT_ZOOM).unwrap_err();
        assert!(matches!(err, Error::EmptyMarkerList));
    }

    #[test]
    fn event_markers_carry_the_event_id() {
        let events = vec![Event {
            id: "office".to_string(),
            lat: 52.52,
            lon: 13.405,
            start_time_ms: 0,
            duration_minutes: 0,
            timezone: "Europe/Berlin".to_string(),
        }];
        let map = MarkerMap::from_events(&events, 12).unwrap();
        assert_eq!(map.markers[0].label.as_deref(), Some("office"));
        assert_eq!(map.zoom, 12);
    }

    #[test]
    fn geojson_uses_lon_lat_order() {
        let map =
            MarkerMap::from_coordinates(&[Coordinate::new(52.52, 13.405)], DEFAULT_ZOOM).unwrap();
        let geojson = map.to_geojson();

        assert_eq!(geojson["type"], "FeatureCollection");
        assert_eq!(
            geojson["features"][0]["geometry"]["coordinates"][0],
            13.405
        );
        assert_eq!(geojson["features"][0]["geometry"]["coordinates"][1], 52.52);
        assert_eq!(geojson["properties"]["zoom"], 15);
    }

    #[test]
    fn geojson_writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.geojson");
        let map =
            MarkerMap::from_coordinates(&[Coordinate::new(52.52, 13.405)], DEFAULT_ZOOM).unwrap();
        map.write_geojson(&path).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["features"].as_array().unwrap().len(), 1);
    }
}
