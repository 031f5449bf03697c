//! Forward geocoding and simple distance math.
//!
//! Geocoding delegates to the OSM Nominatim search API; there is no logic
//! here beyond issuing the call and reading the first match. The distance
//! helper is a deliberately crude flat-earth approximation, good enough
//! for sanity-checking short trips without a geodesy dependency.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::event::Coordinate;

const GEOCODER_URL_ENV: &str = "EVENTROUTE_GEOCODER_URL";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Earth's equatorial circumference in kilometers.
const EQUATOR_CIRCUMFERENCE_KM: f64 = 40_074.275;
/// Pole-to-pole meridian length in kilometers.
const MERIDIAN_LENGTH_KM: f64 = 20_004.146;

#[derive(Debug, Deserialize)]
struct GeocoderPlace {
    lat: String,
    lon: String,
}

/// Resolve an address to a coordinate using the OSM geocoder.
///
/// Returns [`Error::AddressNotRecognized`] when the geocoder has no match
/// for the address. The endpoint can be overridden for tests via the
/// `EVENTROUTE_GEOCODER_URL` environment variable.
pub fn geocode_address(address: &str) -> Result<Coordinate> {
    let base_url =
        env::var(GEOCODER_URL_ENV).unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

    debug!(address, url = %base_url, "geocoding address");
    let client = build_client()?;
    let places: Vec<GeocoderPlace> = client
        .get(&base_url)
        .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
        .send()?
        .error_for_status()?
        .json()?;

    let place = match places.into_iter().next() {
        Some(place) => place,
        None => {
            warn!(address, "address was not recognized");
            return Err(Error::AddressNotRecognized {
                address: address.to_string(),
            });
        }
    };

    parse_place(place)
}

fn parse_place(place: GeocoderPlace) -> Result<Coordinate> {
    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|err| Error::MalformedGeocodeResponse {
            message: format!("latitude '{}': {}", place.lat, err),
        })?;
    let lon = place
        .lon
        .parse::<f64>()
        .map_err(|err| Error::MalformedGeocodeResponse {
            message: format!("longitude '{}': {}", place.lon, err),
        })?;
    Ok(Coordinate::new(lat, lon))
}

/// Distance between two points in kilometers, by flat-earth approximation.
///
/// East-west extent is scaled by the cosine of the mean latitude; the
/// result is the hypotenuse of the two axis distances. Accurate to within
/// a few percent for distances up to a few hundred kilometers away from
/// the poles.
pub fn simple_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let mean_lat_rad = ((a.lat + b.lat) / 2.0).to_radians();
    let dx = EQUATOR_CIRCUMFERENCE_KM * ((b.lon - a.lon).abs() / 360.0) * mean_lat_rad.cos();
    let dy = MERIDIAN_LENGTH_KM * (a.lat - b.lat).abs() / 180.0;
    dx.hypot(dy)
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!(
        "eventroute-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/eventroute/eventroute-rs"
    )
}
