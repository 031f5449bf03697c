//! eventroute library entry points.
//!
//! This crate exposes helpers to plan vehicle trips between calendar
//! events: resolving trip start/finish timestamps from a routing
//! provider's travel time, calling the provider over HTTP, geocoding
//! addresses, converting instants to local time, and building marker maps
//! from coordinate lists. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing
//! behavior.

#![deny(warnings)]

pub mod error;
pub mod event;
pub mod geocode;
pub mod localtime;
pub mod map;
pub mod provider;
pub mod trip;

pub use error::{Error, Result};
pub use event::{Coordinate, Event};
pub use geocode::{geocode_address, simple_distance_km};
pub use localtime::{local_iso_time, OffsetLookup, TzDatabase};
pub use map::{Marker, MarkerMap, DEFAULT_ZOOM};
pub use provider::{fetch_route_summary, plan_trip, route_summary_from_json, ProviderConfig};
pub use trip::{anchor_timestamp_ms, resolve_trip, AnchorMode, RouteSummary, TripRecord};
