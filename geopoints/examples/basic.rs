//! Basic example demonstrating geopoints library usage.
//!
//! Run with: cargo run --example basic

use geopoints::{
    distance_km, find_within_radius, GeoPointsError, MemoryStore, NewPoint, PointStore,
};

#[tokio::main]
async fn main() -> Result<(), GeoPointsError> {
    let store = MemoryStore::new();

    let landmarks = [
        ("Cubbon Park", 12.9763, 77.5929),
        ("Lalbagh Botanical Garden", 12.9507, 77.5848),
        ("Bangalore Palace", 12.9987, 77.5920),
        ("Nandi Hills", 13.3702, 77.6835),
        ("Mysore Palace", 12.3052, 76.6552),
    ];

    for (name, lat, lon) in landmarks {
        store
            .insert(NewPoint::new(name, lat, lon).address("Karnataka", "Bengaluru", "560001"))
            .await?;
    }

    // Pairwise distance
    let d = distance_km(12.9763, 77.5929, 12.3052, 76.6552);
    println!("Cubbon Park -> Mysore Palace: {:.2} km", d);

    // Proximity search around MG Road
    let (lat, lon, radius) = (12.9756, 77.6066, 10.0);
    let nearby = find_within_radius(lat, lon, radius, store.list_active().await?);

    println!("\nWithin {} km of ({}, {}):", radius, lat, lon);
    println!("{:-<50}", "");
    for entry in &nearby {
        println!("{}: {:.2} km", entry.item.name, entry.distance_km);
    }

    // Soft-deleted points drop out of every query
    if let Some(first) = nearby.first() {
        store.mark_deleted(first.item.id).await?;
    }
    let after = find_within_radius(lat, lon, radius, store.list_active().await?);
    println!("\nAfter deleting the nearest point: {} result(s)", after.len());

    Ok(())
}
