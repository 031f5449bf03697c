use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use eventroute_lib::{
    geocode_address, plan_trip, provider, simple_distance_km, AnchorMode, Coordinate, Event,
    MarkerMap, ProviderConfig, TzDatabase, DEFAULT_ZOOM,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Event-to-event trip planning utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a vehicle trip between two events using the routing provider.
    Trip {
        /// JSON file holding an array of events.
        #[arg(long)]
        events: PathBuf,
        /// Identifier of the origin event.
        #[arg(long)]
        from: String,
        /// Identifier of the destination event.
        #[arg(long)]
        to: String,
        /// Which instant anchors the trip: "arrival" or "departure".
        #[arg(long, default_value = "arrival")]
        anchor: String,
    },
    /// Resolve an address to a lat,lon coordinate.
    Geocode {
        /// Free-form address to geocode.
        address: String,
    },
    /// Flat-earth distance in kilometers between two lat,lon points.
    Distance {
        /// First point as "lat,lon".
        #[arg(long)]
        from: String,
        /// Second point as "lat,lon".
        #[arg(long)]
        to: String,
    },
    /// Write a GeoJSON marker map for an events file.
    Map {
        /// JSON file holding an array of events.
        #[arg(long)]
        events: PathBuf,
        /// Output GeoJSON path.
        #[arg(long)]
        out: PathBuf,
        /// Initial zoom level.
        #[arg(long, default_value_t = DEFAULT_ZOOM)]
        zoom: u32,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Trip {
            events,
            from,
            to,
            anchor,
        } => handle_trip(&events, &from, &to, &anchor),
        Command::Geocode { address } => handle_geocode(&address),
        Command::Distance { from, to } => handle_distance(&from, &to),
        Command::Map { events, out, zoom } => handle_map(&events, &out, zoom),
    }
}

fn handle_trip(events_path: &Path, from: &str, to: &str, anchor: &str) -> Result<()> {
    // Reject a bad anchor mode before touching the events file or the
    // provider.
    let mode: AnchorMode = anchor.parse()?;

    let events = load_events(events_path)?;
    let origin = find_event(&events, from)?;
    let destination = find_event(&events, to)?;

    let config = if provider::offline_override_active() {
        ProviderConfig::new("http://localhost/unused", "offline", "offline")
    } else {
        ProviderConfig::from_env().context("routing provider is not configured")?
    };

    let record = plan_trip(&config, origin, destination, mode, &TzDatabase)
        .with_context(|| format!("failed to plan {} trip from {} to {}", mode, from, to))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn handle_geocode(address: &str) -> Result<()> {
    let coord = geocode_address(address)
        .with_context(|| format!("failed to geocode '{}'", address))?;
    println!("{},{}", coord.lat, coord.lon);
    Ok(())
}

fn handle_distance(from: &str, to: &str) -> Result<()> {
    let a = parse_coordinate(from)?;
    let b = parse_coordinate(to)?;
    println!("{:.3}", simple_distance_km(a, b));
    Ok(())
}

fn handle_map(events_path: &Path, out: &Path, zoom: u32) -> Result<()> {
    let events = load_events(events_path)?;
    let map = MarkerMap::from_events(&events, zoom)?;
    map.write_geojson(out)
        .with_context(|| format!("failed to write marker map to {}", out.display()))?;
    println!("Marker map written to {}", out.display());
    Ok(())
}

fn load_events(path: &Path) -> Result<Vec<Event>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse events file {}", path.display()))
}

fn find_event<'a>(events: &'a [Event], id: &str) -> Result<&'a Event> {
    events
        .iter()
        .find(|event| event.id == id)
        .ok_or_else(|| anyhow!("no event with id '{}' in the events file", id))
}

fn parse_coordinate(raw: &str) -> Result<Coordinate> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'lat,lon', got '{}'", raw))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("invalid latitude in '{}'", raw))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("invalid longitude in '{}'", raw))?;
    Ok(Coordinate::new(lat, lon))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
