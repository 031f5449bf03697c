//! Trip time resolution.
//!
//! A trip between two calendar events has a single known timestamp: either
//! the arrival instant (the start of the destination event) or the
//! departure instant (the start of the origin event plus its occupancy).
//! Given that anchor and the provider's travel time, [`resolve_trip`]
//! derives a consistent start/finish pair and assembles the normalized
//! [`TripRecord`]. The computation is pure; validation of provider figures
//! happens in the client before a [`RouteSummary`] is ever constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::event::Event;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Whether a trip's single known timestamp is its arrival or its
/// departure instant.
///
/// External text (CLI arguments, configuration) is parsed once at the
/// boundary via [`FromStr`]; past that point the invalid-mode branch is
/// unreachable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// The anchor is the start of the destination event.
    Arrival,
    /// The anchor is the end of the origin event's occupancy.
    Departure,
}

impl FromStr for AnchorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrival" => Ok(AnchorMode::Arrival),
            "departure" => Ok(AnchorMode::Departure),
            other => Err(Error::InvalidAnchorMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AnchorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorMode::Arrival => write!(f, "arrival"),
            AnchorMode::Departure => write!(f, "departure"),
        }
    }
}

/// Distance and travel-time figures for one itinerary, as returned by the
/// routing provider. Both figures are non-negative; the provider client
/// rejects malformed responses before constructing a summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Distance traveled in meters.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub travel_time_sec: i64,
}

/// The normalized record of a vehicle trip between two events.
///
/// Immutable once constructed; `finish_time_ms - start_time_ms` equals the
/// travel time in milliseconds exactly, regardless of anchor mode, and
/// `id` is always the departure instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Constant record tag, always `"trip"`.
    pub kind: String,
    /// Departure timestamp in milliseconds, used as the record identity.
    pub id: i64,
    /// Constant mobility tag, always `"vehicle"`.
    pub mobility: String,
    /// Distance traveled in meters.
    pub distance_m: f64,
    pub start_time_ms: i64,
    pub finish_time_ms: i64,
    /// Timezone of the origin event.
    pub start_timezone: String,
    /// Timezone of the destination event.
    pub finish_timezone: String,
}

/// Compute the anchor timestamp for a trip, in epoch milliseconds.
///
/// For [`AnchorMode::Arrival`] this is the destination event's start; for
/// [`AnchorMode::Departure`] it is the origin event's start plus its
/// occupancy duration (the origin must be fully attended before leaving).
pub fn anchor_timestamp_ms(origin: &Event, destination: &Event, mode: AnchorMode) -> i64 {
    match mode {
        AnchorMode::Arrival => destination.start_time_ms,
        AnchorMode::Departure => {
            origin.start_time_ms + origin.duration_minutes * MS_PER_MINUTE
        }
    }
}

/// Resolve a trip's start/finish pair from its anchor and travel time.
///
/// Pure and total over its inputs: with the anchor mode expressed as a
/// closed enum there is no invalid branch left to reject, and the summary
/// was validated by the provider client. Zero travel time is accepted
/// verbatim and yields `start == finish`.
pub fn resolve_trip(
    origin: &Event,
    destination: &Event,
    mode: AnchorMode,
    summary: &RouteSummary,
) -> TripRecord {
    let anchor_ms = anchor_timestamp_ms(origin, destination, mode);
    let travel_ms = summary.travel_time_sec * MS_PER_SECOND;

    let (start_time_ms, finish_time_ms) = match mode {
        AnchorMode::Arrival => (anchor_ms - travel_ms, anchor_ms),
        AnchorMode::Departure => (anchor_ms, anchor_ms + travel_ms),
    };

    TripRecord {
        kind: "trip".to_string(),
        // Trips are keyed by their departure instant in both modes so
        // downstream consumers never have to branch on how the trip was
        // queried.
        id: start_time_ms,
        mobility: "vehicle".to_string(),
        distance_m: summary.distance_m,
        start_time_ms,
        finish_time_ms,
        start_timezone: origin.timezone.clone(),
        finish_timezone: destination.timezone.clone(),
    }
}
