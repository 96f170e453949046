//! Radius search over a GeoJSON FeatureCollection of Point features.
//!
//! Run with: cargo run --example nearby --features geojson -- points.geojson 12.97 77.59 5

use std::env;
use std::process;

use geojson::FeatureCollection;
use geopoints::find_within_radius;
use geopoints::geojson::{located_features, nearby_feature_collection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 4 {
        eprintln!("Usage: cargo run --example nearby --features geojson -- <file> <lat> <lon> <radius_km>");
        process::exit(1);
    }

    let collection: FeatureCollection = std::fs::read_to_string(&args[0])?.parse()?;
    let lat: f64 = args[1].parse()?;
    let lon: f64 = args[2].parse()?;
    let radius: f64 = args[3].parse()?;

    let candidates = located_features(collection)?;
    let total = candidates.len();
    let nearby = find_within_radius(lat, lon, radius, candidates);

    eprintln!("{} of {} features within {} km", nearby.len(), total, radius);
    println!("{}", nearby_feature_collection(nearby));

    Ok(())
}
