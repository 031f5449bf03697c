//! HERE-style routing provider client.
//!
//! Builds the request parameter set the provider expects, issues one
//! blocking HTTP call, and reshapes the JSON response into a validated
//! [`RouteSummary`]. Everything downstream of this module may assume the
//! summary figures are non-negative.
//!
//! Tests (and offline tooling) can bypass the network entirely by setting
//! the `EVENTROUTE_ROUTE_SOURCE` environment variable to a file with a
//! canned provider response.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::event::Event;
use crate::localtime::{local_iso_time, OffsetLookup};
use crate::trip::{anchor_timestamp_ms, resolve_trip, AnchorMode, RouteSummary, TripRecord};

const BASE_URL_ENV: &str = "EVENTROUTE_HERE_URL";
const APP_ID_ENV: &str = "EVENTROUTE_HERE_APP_ID";
const APP_CODE_ENV: &str = "EVENTROUTE_HERE_APP_CODE";
const ROUTE_SOURCE_ENV: &str = "EVENTROUTE_ROUTE_SOURCE";

const DEFAULT_BASE_URL: &str = "https://route.api.here.com/routing/7.2/calculateroute.json";

/// Routing provider endpoint and credentials.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_code: String,
}

impl ProviderConfig {
    pub fn new<U, I, C>(base_url: U, app_id: I, app_code: C) -> Self
    where
        U: Into<String>,
        I: Into<String>,
        C: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            app_id: app_id.into(),
            app_code: app_code.into(),
        }
    }

    /// Read the provider configuration from the environment. The base URL
    /// falls back to the public routing endpoint; credentials are required.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let app_id = require_env(APP_ID_ENV)?;
        let app_code = require_env(APP_CODE_ENV)?;
        Ok(Self::new(base_url, app_id, app_code))
    }
}

fn require_env(var: &str) -> Result<String> {
    env::var(var).map_err(|_| Error::MissingCredential {
        var: var.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    response: RouteBody,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    route: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
    summary: LegSummary,
}

#[derive(Debug, Deserialize)]
struct LegSummary {
    distance: f64,
    #[serde(rename = "travelTime")]
    travel_time: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    details: Option<String>,
}

/// True when `EVENTROUTE_ROUTE_SOURCE` is set, meaning route summaries
/// come from a local file and no provider credentials are needed.
pub fn offline_override_active() -> bool {
    env::var_os(ROUTE_SOURCE_ENV).is_some()
}

/// Fetch the route summary for a trip between two events.
///
/// The time parameter is the trip's anchor instant formatted as local ISO
/// time in the anchor event's timezone (destination for arrival anchors,
/// origin for departure anchors).
pub fn fetch_route_summary(
    config: &ProviderConfig,
    origin: &Event,
    destination: &Event,
    mode: AnchorMode,
    offsets: &dyn OffsetLookup,
) -> Result<RouteSummary> {
    if let Some(source) = env::var_os(ROUTE_SOURCE_ENV) {
        let path = PathBuf::from(source);
        info!(path = %path.display(), "using local route response override");
        let body = fs::read_to_string(&path)?;
        return route_summary_from_json(&body);
    }

    let anchor_ms = anchor_timestamp_ms(origin, destination, mode);
    let anchor_timezone = match mode {
        AnchorMode::Arrival => destination.timezone.as_str(),
        AnchorMode::Departure => origin.timezone.as_str(),
    };
    let local_time = local_iso_time(anchor_ms, anchor_timezone, offsets)?;

    let params = request_params(config, origin, destination, mode, local_time);
    debug!(
        url = %config.base_url,
        mode = %mode,
        origin = %origin.id,
        destination = %destination.id,
        "requesting route"
    );

    let client = build_client()?;
    let response = client.get(&config.base_url).query(&params).send()?;
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        let details = error_details(&body);
        warn!(status = status.as_u16(), details = %details, "provider rejected route request");
        return Err(Error::ProviderResponse {
            status: status.as_u16(),
            details,
        });
    }

    route_summary_from_json(&body)
}

/// Plan a trip end to end: anchor timestamp, provider request, and trip
/// time resolution.
pub fn plan_trip(
    config: &ProviderConfig,
    origin: &Event,
    destination: &Event,
    mode: AnchorMode,
    offsets: &dyn OffsetLookup,
) -> Result<TripRecord> {
    let summary = fetch_route_summary(config, origin, destination, mode, offsets)?;
    Ok(resolve_trip(origin, destination, mode, &summary))
}

/// Decode and validate a provider response body.
///
/// A body that is not valid JSON is fatal immediately; deferring the
/// failure would only surface a misleading error from a later field read.
pub fn route_summary_from_json(body: &str) -> Result<RouteSummary> {
    let parsed: RouteResponse = serde_json::from_str(body)?;
    let leg = parsed
        .response
        .route
        .into_iter()
        .next()
        .ok_or(Error::EmptyRoute)?;
    let summary = leg.summary;

    if summary.distance < 0.0 {
        return Err(Error::InvalidRouteSummary {
            message: format!("negative distance {}", summary.distance),
        });
    }
    if summary.travel_time < 0 {
        return Err(Error::InvalidRouteSummary {
            message: format!("negative travel time {}", summary.travel_time),
        });
    }

    Ok(RouteSummary {
        distance_m: summary.distance,
        travel_time_sec: summary.travel_time,
    })
}

fn request_params(
    config: &ProviderConfig,
    origin: &Event,
    destination: &Event,
    mode: AnchorMode,
    local_time: String,
) -> Vec<(&'static str, String)> {
    let time_param = match mode {
        AnchorMode::Arrival => "arrival",
        AnchorMode::Departure => "departure",
    };

    vec![
        ("mode", "fastest;car;traffic:enabled;".to_string()),
        ("alternatives", "0".to_string()),
        ("routeAttributes", "sh,-wp".to_string()),
        ("legAttributes", "links,-maneuvers".to_string()),
        ("linkAttributes", "sh,le,sl,ds,ro,ma,fc".to_string()),
        ("returnElevation", "true".to_string()),
        ("app_id", config.app_id.clone()),
        ("app_code", config.app_code.clone()),
        ("waypoint0", origin.coordinate().waypoint()),
        ("waypoint1", destination.coordinate().waypoint()),
        (time_param, local_time),
    ]
}

fn error_details(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.details)
        .unwrap_or_else(|| body.trim().to_string())
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
